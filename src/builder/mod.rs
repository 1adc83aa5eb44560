//! Builder API for declaring an object's states by name.
//!
//! States and transitions get generated ids, which makes hand-written setup
//! code awkward. These builders let callers refer to states by name and
//! resolve everything in one `build` call.
//!
//! ```
//! use poise::builder::{instant_transition, timed_transition, ControllerBuilder, StateBuilder};
//! use poise::core::TransitionTrigger;
//!
//! let controller = ControllerBuilder::new("toggle")
//!     .state(StateBuilder::new("Off").opacity(0.4))?
//!     .state(StateBuilder::new("On").opacity(1.0))?
//!     .transition(timed_transition("Off", "On", TransitionTrigger::Click, 150))?
//!     .transition(instant_transition("On", "Off", TransitionTrigger::Click))?
//!     .build()?;
//!
//! assert_eq!(controller.current_state().unwrap().name, "Off");
//! # Ok::<(), poise::builder::BuildError>(())
//! ```

pub mod controller;
pub mod error;
pub mod state;
pub mod transition;

pub use controller::ControllerBuilder;
pub use error::BuildError;
pub use state::StateBuilder;
pub use transition::{NamedTransition, TransitionBuilder};

use crate::core::TransitionTrigger;

/// Transition that switches states without animating.
pub fn instant_transition(
    from: impl Into<String>,
    to: impl Into<String>,
    trigger: TransitionTrigger,
) -> TransitionBuilder {
    TransitionBuilder::new().from(from).to(to).on(trigger).instant()
}

/// Transition animated over `duration_ms` with the default easing.
pub fn timed_transition(
    from: impl Into<String>,
    to: impl Into<String>,
    trigger: TransitionTrigger,
    duration_ms: u32,
) -> TransitionBuilder {
    TransitionBuilder::new()
        .from(from)
        .to(to)
        .on(trigger)
        .duration_ms(duration_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Easing;

    #[test]
    fn instant_transition_has_no_duration() {
        let transition = instant_transition("A", "B", TransitionTrigger::Focus)
            .build()
            .unwrap();

        assert!(transition.animation.is_instant());
        assert_eq!(transition.trigger, TransitionTrigger::Focus);
    }

    #[test]
    fn timed_transition_keeps_default_easing() {
        let transition = timed_transition("A", "B", TransitionTrigger::Blur, 80)
            .build()
            .unwrap();

        assert_eq!(transition.animation.duration_ms, 80);
        assert_eq!(transition.animation.easing, Easing::EaseInOut);
    }
}
