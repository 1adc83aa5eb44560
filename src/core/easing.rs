//! Easing functions for transition timing.
//!
//! An easing maps linear time progress in `[0, 1]` to perceptual progress.
//! The CSS curves (`ease`, `ease-in`, `ease-out`, `ease-in-out`) and
//! `cubic-bezier(..)` are evaluated as real bezier curves. `spring`,
//! `bounce` and `elastic` are closed-form approximations; spring and elastic
//! overshoot 1.0 before settling.
//!
//! # Example
//!
//! ```rust
//! use poise::core::Easing;
//!
//! let linear = Easing::Linear;
//! assert_eq!(linear.evaluate(0.5), 0.5);
//!
//! let material: Easing = "cubic-bezier(0.4, 0, 0.2, 1)".parse().unwrap();
//! assert!(material.evaluate(0.5) > 0.5);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Timing curve of a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// `cubic-bezier(0.25, 0.1, 0.25, 1)`
    Ease,
    /// `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`
    #[default]
    EaseInOut,
    /// Damped oscillation around the target.
    Spring,
    /// Decaying bounces off the target.
    Bounce,
    /// Exponentially decaying sine overshoot.
    Elastic,
    /// Custom curve through control points `(x1, y1)` and `(x2, y2)`.
    /// `x1` and `x2` must lie in `[0, 1]`; they are clamped when evaluated.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Evaluate eased progress for linear progress `t`.
    ///
    /// `t` is clamped to `[0, 1]`. The result is exactly 0 at `t = 0` and
    /// exactly 1 at `t = 1` for every curve.
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match *self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::Spring => spring(t),
            Self::Bounce => bounce_out(t),
            Self::Elastic => elastic_out(t),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                cubic_bezier(x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2, t)
            }
        }
    }

    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::CubicBezier { x1, y1, x2, y2 }
    }

    /// Whether the control points of a custom curve are usable as given.
    pub fn is_well_formed(&self) -> bool {
        match *self {
            Self::CubicBezier { x1, y1, x2, y2 } => {
                (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
                    && y1.is_finite()
                    && y2.is_finite()
            }
            _ => true,
        }
    }
}

fn spring(t: f64) -> f64 {
    1.0 - (t * 4.5 * PI).cos() * (-6.0 * t).exp()
}

fn bounce_out(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;

    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

fn elastic_out(t: f64) -> f64 {
    let period = (2.0 * PI) / 3.0;
    2.0_f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * period).sin() + 1.0
}

/// Bezier coordinate for one axis with endpoints fixed at 0 and 1.
#[inline]
fn bezier(p1: f64, p2: f64, s: f64) -> f64 {
    let ms = 1.0 - s;
    3.0 * ms * ms * s * p1 + 3.0 * ms * s * s * p2 + s * s * s
}

#[inline]
fn bezier_derivative(p1: f64, p2: f64, s: f64) -> f64 {
    let ms = 1.0 - s;
    3.0 * ms * ms * p1 + 6.0 * ms * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Solve `x(s) = x` for the curve parameter, then return `y(s)`.
///
/// Newton-Raphson converges in a few steps for typical curves; bisection
/// takes over when the slope flattens out.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    const TOLERANCE: f64 = 1e-7;

    let mut s = x;
    for _ in 0..8 {
        let err = bezier(x1, x2, s) - x;
        if err.abs() < TOLERANCE {
            return bezier(y1, y2, s);
        }
        let slope = bezier_derivative(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let value = bezier(x1, x2, s);
        if (value - x).abs() < TOLERANCE {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }

    bezier(y1, y2, s)
}

/// Error returned when parsing an easing name fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EasingParseError {
    #[error("Unknown easing '{0}'")]
    Unknown(String),

    #[error("cubic-bezier expects 4 numeric arguments, got '{0}'")]
    BadArguments(String),
}

impl FromStr for Easing {
    type Err = EasingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let easing = match trimmed {
            "linear" => Self::Linear,
            "ease" => Self::Ease,
            "ease-in" => Self::EaseIn,
            "ease-out" => Self::EaseOut,
            "ease-in-out" => Self::EaseInOut,
            "spring" => Self::Spring,
            "bounce" => Self::Bounce,
            "elastic" => Self::Elastic,
            other => {
                let args = other
                    .strip_prefix("cubic-bezier(")
                    .and_then(|rest| rest.strip_suffix(')'))
                    .ok_or_else(|| EasingParseError::Unknown(other.to_string()))?;

                let values = args
                    .split(',')
                    .map(|part| part.trim().parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| EasingParseError::BadArguments(args.to_string()))?;

                match values.as_slice() {
                    [x1, y1, x2, y2] => Self::cubic_bezier(*x1, *y1, *x2, *y2),
                    _ => return Err(EasingParseError::BadArguments(args.to_string())),
                }
            }
        };
        Ok(easing)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Ease => f.write_str("ease"),
            Self::EaseIn => f.write_str("ease-in"),
            Self::EaseOut => f.write_str("ease-out"),
            Self::EaseInOut => f.write_str("ease-in-out"),
            Self::Spring => f.write_str("spring"),
            Self::Bounce => f.write_str("bounce"),
            Self::Elastic => f.write_str("elastic"),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-3;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    const ALL: [Easing; 9] = [
        Easing::Linear,
        Easing::Ease,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::Spring,
        Easing::Bounce,
        Easing::Elastic,
        Easing::CubicBezier {
            x1: 0.4,
            y1: 0.0,
            x2: 0.2,
            y2: 1.0,
        },
    ];

    #[test]
    fn every_curve_hits_both_endpoints() {
        for easing in ALL {
            assert_eq!(easing.evaluate(0.0), 0.0, "{easing} at 0");
            assert_eq!(easing.evaluate(1.0), 1.0, "{easing} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.evaluate(-0.5), 0.0);
        assert_eq!(Easing::Ease.evaluate(1.5), 1.0);
    }

    #[test]
    fn linear_is_identity() {
        for t in [0.1, 0.25, 0.5, 0.75, 0.9] {
            assert!(approx_eq(Easing::Linear.evaluate(t), t));
        }
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let ease = Easing::EaseInOut;
        assert!(approx_eq(ease.evaluate(0.5), 0.5));
        assert!(approx_eq(ease.evaluate(0.25) + ease.evaluate(0.75), 1.0));
    }

    #[test]
    fn ease_in_starts_slow_and_ease_out_starts_fast() {
        assert!(Easing::EaseIn.evaluate(0.25) < 0.25);
        assert!(Easing::EaseOut.evaluate(0.25) > 0.25);
    }

    #[test]
    fn css_ease_midpoint() {
        let mid = Easing::Ease.evaluate(0.5);
        assert!(mid > 0.75 && mid < 0.85, "ease(0.5) = {mid}");
    }

    #[test]
    fn diagonal_bezier_is_linear() {
        let diagonal = Easing::cubic_bezier(0.0, 0.0, 1.0, 1.0);
        for t in [0.1, 0.3, 0.5, 0.7, 0.9] {
            assert!(approx_eq(diagonal.evaluate(t), t));
        }
    }

    #[test]
    fn bezier_control_points_matter() {
        let fast = Easing::cubic_bezier(0.0, 0.9, 0.1, 1.0);
        let slow = Easing::cubic_bezier(0.9, 0.0, 1.0, 0.1);
        assert!(fast.evaluate(0.3) > 0.8);
        assert!(slow.evaluate(0.3) < 0.1);
    }

    #[test]
    fn spring_and_elastic_overshoot() {
        let spring_peak = (1..100)
            .map(|i| Easing::Spring.evaluate(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(spring_peak > 1.0);

        let elastic_peak = (1..100)
            .map(|i| Easing::Elastic.evaluate(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(elastic_peak > 1.0);
    }

    #[test]
    fn bounce_stays_in_range() {
        for i in 0..=100 {
            let v = Easing::Bounce.evaluate(i as f64 / 100.0);
            assert!((0.0..=1.0 + 1e-9).contains(&v), "bounce({i}%) = {v}");
        }
    }

    #[test]
    fn names_round_trip_through_display() {
        for easing in ALL {
            let parsed: Easing = easing.to_string().parse().unwrap();
            assert_eq!(parsed, easing);
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            "wobble".parse::<Easing>(),
            Err(EasingParseError::Unknown(_))
        ));
        assert!(matches!(
            "cubic-bezier(0.1, 0.2)".parse::<Easing>(),
            Err(EasingParseError::BadArguments(_))
        ));
        assert!(matches!(
            "cubic-bezier(a, b, c, d)".parse::<Easing>(),
            Err(EasingParseError::BadArguments(_))
        ));
    }

    #[test]
    fn well_formed_checks_x_range() {
        assert!(Easing::Bounce.is_well_formed());
        assert!(Easing::cubic_bezier(0.2, -1.0, 0.8, 2.0).is_well_formed());
        assert!(!Easing::cubic_bezier(1.5, 0.0, 0.5, 1.0).is_well_formed());
    }

    #[test]
    fn serializes_as_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Easing::EaseInOut).unwrap(),
            "\"ease-in-out\""
        );
        let custom: Easing =
            serde_json::from_str(r#"{"cubic-bezier":{"x1":0.1,"y1":0.2,"x2":0.3,"y2":0.4}}"#)
                .unwrap();
        assert_eq!(custom, Easing::cubic_bezier(0.1, 0.2, 0.3, 0.4));
    }

    #[test]
    fn default_is_ease_in_out() {
        assert_eq!(Easing::default(), Easing::EaseInOut);
    }
}
