//! Builder for transitions between named states.

use crate::builder::error::BuildError;
use crate::core::{Easing, NewTransition, StateId, TransitionAnimation, TransitionTrigger};

/// Transition whose endpoints are still state names.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTransition {
    pub from: String,
    pub to: String,
    pub trigger: TransitionTrigger,
    pub animation: TransitionAnimation,
    pub enabled: bool,
}

impl NamedTransition {
    pub(crate) fn resolve(self, to_state: StateId) -> NewTransition {
        let transition = NewTransition::new(to_state, self.trigger).with_animation(self.animation);
        if self.enabled {
            transition
        } else {
            transition.disabled()
        }
    }
}

/// Fluent builder for transitions, referring to states by name.
#[derive(Clone, Debug)]
pub struct TransitionBuilder {
    from: Option<String>,
    to: Option<String>,
    trigger: TransitionTrigger,
    animation: TransitionAnimation,
    enabled: bool,
}

impl TransitionBuilder {
    /// Create a builder for a `Direct` transition with the default animation.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            trigger: TransitionTrigger::Direct,
            animation: TransitionAnimation::default(),
            enabled: true,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: impl Into<String>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.to = Some(state.into());
        self
    }

    pub fn on(mut self, trigger: TransitionTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn animation(mut self, animation: TransitionAnimation) -> Self {
        self.animation = animation;
        self
    }

    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.animation.duration_ms = duration_ms;
        self
    }

    pub fn delay_ms(mut self, delay_ms: u32) -> Self {
        self.animation.delay_ms = delay_ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.animation.easing = easing;
        self
    }

    /// Switch states without animating.
    pub fn instant(mut self) -> Self {
        self.animation = TransitionAnimation::instant();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn build(self) -> Result<NamedTransition, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(NamedTransition {
            from,
            to,
            trigger: self.trigger,
            animation: self.animation,
            enabled: self.enabled,
        })
    }
}

impl Default for TransitionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
