//! Builder for state definitions.

use crate::builder::error::BuildError;
use crate::core::{NewState, PropertyValue, StateProperties, Vec3};

/// Fluent builder for a [`NewState`].
#[derive(Clone, Debug, Default)]
pub struct StateBuilder {
    name: String,
    is_default: bool,
    properties: StateProperties,
}

impl StateBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mark this state as the object's default.
    pub fn default_state(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Replace the whole property bag.
    pub fn properties(mut self, properties: StateProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.properties.position = Some(position);
        self
    }

    pub fn rotation(mut self, rotation: Vec3) -> Self {
        self.properties.rotation = Some(rotation);
        self
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.properties.scale = Some(scale);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.properties.opacity = Some(opacity);
        self
    }

    /// Hex color such as `#ff8800`.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.properties.color = Some(color.into());
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.properties.visible = Some(visible);
        self
    }

    pub fn custom(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.custom.insert(name.into(), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build(self) -> Result<NewState, BuildError> {
        if self.name.trim().is_empty() {
            return Err(BuildError::MissingName);
        }

        let state = NewState::named(self.name).with_properties(self.properties);
        Ok(if self.is_default {
            state.as_default()
        } else {
            state
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            StateBuilder::new("  ").build(),
            Err(BuildError::MissingName)
        ));
    }

    #[test]
    fn setters_fill_property_bag() {
        let state = StateBuilder::new("Pressed")
            .scale(Vec3::splat(0.95))
            .opacity(0.9)
            .color("#336699")
            .custom("blur", PropertyValue::Number(2.0))
            .default_state()
            .build()
            .unwrap();

        assert_eq!(state.name, "Pressed");
        assert!(state.is_default);
        assert_eq!(state.properties.scale, Some(Vec3::splat(0.95)));
        assert_eq!(state.properties.opacity, Some(0.9));
        assert_eq!(state.properties.color.as_deref(), Some("#336699"));
        assert_eq!(
            state.properties.custom.get("blur"),
            Some(&PropertyValue::Number(2.0))
        );
        assert!(state.properties.position.is_none());
    }
}
