//! Animatable property bags and their interpolation.
//!
//! Numeric values (numbers, vectors, hex colors) blend linearly. Values with
//! no numeric blend (text, flags, mismatched kinds, a property present on
//! only one side) switch discretely at the halfway point, the way CSS treats
//! discrete properties.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Types that can be blended between two values.
///
/// `t = 0.0` yields `self`, `t = 1.0` yields `to`. Eased progress may leave
/// `[0, 1]` (spring, elastic), so implementations extrapolate instead of
/// clamping where that makes sense.
pub trait Interpolate: Sized {
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

#[inline]
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[inline]
fn discrete<T: Clone>(from: &T, to: &T, t: f64) -> T {
    if t < 0.5 {
        from.clone()
    } else {
        to.clone()
    }
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        lerp(*self, *to, t)
    }
}

/// Three-component vector used for position, rotation and scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }
}

impl Interpolate for Vec3 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            z: lerp(self.z, to.z, t),
        }
    }
}

/// RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse_hex(input: &str) -> Option<Self> {
        let hex = input.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        let (r, g, b, a) = match hex.len() {
            3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
            4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
            6 => (byte(0)?, byte(2)?, byte(4)?, 255),
            8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
            _ => return None,
        };

        Some(Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: f64::from(a) / 255.0,
        })
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (channel(self.r), channel(self.g), channel(self.b), channel(self.a));
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl Interpolate for Color {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self {
            r: lerp(self.r, to.r, t),
            g: lerp(self.g, to.g, t),
            b: lerp(self.b, to.b, t),
            a: lerp(self.a, to.a, t),
        }
    }
}

fn interpolate_color(from: &str, to: &str, t: f64) -> String {
    match (Color::parse_hex(from), Color::parse_hex(to)) {
        (Some(a), Some(b)) => a.interpolate(&b, t).to_hex(),
        _ => discrete(&from.to_string(), &to.to_string(), t),
    }
}

/// Value of a free-form custom property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Number(f64),
    Vector(Vec3),
    Text(String),
    Flag(bool),
}

impl Interpolate for PropertyValue {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        match (self, to) {
            (Self::Number(a), Self::Number(b)) => Self::Number(lerp(*a, *b, t)),
            (Self::Vector(a), Self::Vector(b)) => Self::Vector(a.interpolate(b, t)),
            (Self::Text(a), Self::Text(b)) => Self::Text(interpolate_color(a, b, t)),
            _ => discrete(self, to, t),
        }
    }
}

fn interpolate_option<T, F>(from: &Option<T>, to: &Option<T>, t: f64, blend: F) -> Option<T>
where
    T: Clone,
    F: Fn(&T, &T, f64) -> T,
{
    match (from, to) {
        (Some(a), Some(b)) => Some(blend(a, b, t)),
        _ => discrete(from, to, t),
    }
}

/// Visual configuration carried by a state. Every property is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateProperties {
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub scale: Option<Vec3>,
    pub opacity: Option<f64>,
    /// CSS hex color such as `#ff8800`.
    pub color: Option<String>,
    pub visible: Option<bool>,
    pub custom: BTreeMap<String, PropertyValue>,
}

impl StateProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn with_custom(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.custom.insert(name.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.rotation.is_none()
            && self.scale.is_none()
            && self.opacity.is_none()
            && self.color.is_none()
            && self.visible.is_none()
            && self.custom.is_empty()
    }

    /// Overlay every property set in `patch` onto `self`.
    pub fn merge(&mut self, patch: &StateProperties) {
        if patch.position.is_some() {
            self.position = patch.position;
        }
        if patch.rotation.is_some() {
            self.rotation = patch.rotation;
        }
        if patch.scale.is_some() {
            self.scale = patch.scale;
        }
        if patch.opacity.is_some() {
            self.opacity = patch.opacity;
        }
        if patch.color.is_some() {
            self.color.clone_from(&patch.color);
        }
        if patch.visible.is_some() {
            self.visible = patch.visible;
        }
        for (name, value) in &patch.custom {
            self.custom.insert(name.clone(), value.clone());
        }
    }
}

impl Interpolate for StateProperties {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        let mut custom = BTreeMap::new();
        for name in self.custom.keys().chain(to.custom.keys()) {
            if custom.contains_key(name) {
                continue;
            }
            let blended = interpolate_option(
                &self.custom.get(name).cloned(),
                &to.custom.get(name).cloned(),
                t,
                |a, b, t| a.interpolate(b, t),
            );
            if let Some(value) = blended {
                custom.insert(name.clone(), value);
            }
        }

        Self {
            position: interpolate_option(&self.position, &to.position, t, |a, b, t| {
                a.interpolate(b, t)
            }),
            rotation: interpolate_option(&self.rotation, &to.rotation, t, |a, b, t| {
                a.interpolate(b, t)
            }),
            scale: interpolate_option(&self.scale, &to.scale, t, |a, b, t| a.interpolate(b, t)),
            opacity: interpolate_option(&self.opacity, &to.opacity, t, |a, b, t| lerp(*a, *b, t)),
            color: interpolate_option(&self.color, &to.color, t, |a, b, t| {
                interpolate_color(a, b, t)
            }),
            visible: discrete(&self.visible, &to.visible, t),
            custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn numbers_blend_linearly() {
        assert!((0.0_f64.interpolate(&10.0, 0.25) - 2.5).abs() < EPSILON);
        assert!((1.0_f64.interpolate(&0.0, 1.0)).abs() < EPSILON);
    }

    #[test]
    fn vectors_blend_per_component() {
        let from = Vec3::new(0.0, 10.0, -4.0);
        let to = Vec3::new(2.0, 0.0, 4.0);
        assert_eq!(from.interpolate(&to, 0.5), Vec3::new(1.0, 5.0, 0.0));
    }

    #[test]
    fn hex_colors_parse_in_all_forms() {
        let short = Color::parse_hex("#f80").unwrap();
        let long = Color::parse_hex("#ff8800").unwrap();
        assert_eq!(short, long);
        assert_eq!(long.to_hex(), "#ff8800");

        let translucent = Color::parse_hex("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < EPSILON);
        assert_eq!(translucent.to_hex(), "#00000080");

        assert!(Color::parse_hex("ff8800").is_none());
        assert!(Color::parse_hex("#ff88").is_some());
        assert!(Color::parse_hex("#zzzzzz").is_none());
    }

    #[test]
    fn colors_blend_through_rgb() {
        let from = StateProperties::new().with_color("#000000");
        let to = StateProperties::new().with_color("#ffffff");
        let mid = from.interpolate(&to, 0.5);
        assert_eq!(mid.color.as_deref(), Some("#808080"));
    }

    #[test]
    fn unparseable_colors_switch_at_halfway() {
        let from = StateProperties::new().with_color("red");
        let to = StateProperties::new().with_color("#0000ff");
        assert_eq!(from.interpolate(&to, 0.4).color.as_deref(), Some("red"));
        assert_eq!(from.interpolate(&to, 0.6).color.as_deref(), Some("#0000ff"));
    }

    #[test]
    fn one_sided_properties_switch_discretely() {
        let from = StateProperties::new().with_opacity(1.0);
        let to = StateProperties::new().with_scale(Vec3::splat(2.0));

        let early = from.interpolate(&to, 0.1);
        assert_eq!(early.opacity, Some(1.0));
        assert_eq!(early.scale, None);

        let late = from.interpolate(&to, 0.9);
        assert_eq!(late.opacity, None);
        assert_eq!(late.scale, Some(Vec3::splat(2.0)));
    }

    #[test]
    fn custom_properties_blend_by_kind() {
        let from = StateProperties::new()
            .with_custom("glow", PropertyValue::Number(0.0))
            .with_custom("label", PropertyValue::Text("Off".into()));
        let to = StateProperties::new()
            .with_custom("glow", PropertyValue::Number(4.0))
            .with_custom("label", PropertyValue::Text("On".into()));

        let mid = from.interpolate(&to, 0.25);
        assert_eq!(mid.custom["glow"], PropertyValue::Number(1.0));
        assert_eq!(mid.custom["label"], PropertyValue::Text("Off".into()));
    }

    #[test]
    fn overshoot_extrapolates_numbers() {
        let from = StateProperties::new().with_opacity(0.0);
        let to = StateProperties::new().with_opacity(1.0);
        let over = from.interpolate(&to, 1.2);
        assert!((over.opacity.unwrap() - 1.2).abs() < EPSILON);
    }

    #[test]
    fn merge_overwrites_only_set_fields() {
        let mut base = StateProperties::new()
            .with_opacity(1.0)
            .with_color("#ffffff")
            .with_custom("a", PropertyValue::Flag(true));
        let patch = StateProperties::new()
            .with_opacity(0.5)
            .with_custom("b", PropertyValue::Number(2.0));

        base.merge(&patch);

        assert_eq!(base.opacity, Some(0.5));
        assert_eq!(base.color.as_deref(), Some("#ffffff"));
        assert_eq!(base.custom.len(), 2);
    }

    #[test]
    fn empty_properties_report_empty() {
        assert!(StateProperties::new().is_empty());
        assert!(!StateProperties::new().with_visible(false).is_empty());
    }
}
