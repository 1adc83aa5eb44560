//! Transitions between object states.

use super::easing::Easing;
use super::ids::{StateId, TransitionId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// What causes a transition to fire.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionTrigger {
    /// Programmatic state change, also recorded when no transition matched.
    Direct,
    Click,
    Hover,
    HoverEnd,
    Focus,
    Blur,
    /// Fires after the object has rested in the source state for a while.
    Timer { after_ms: u32 },
    /// Application-defined event name.
    Custom(String),
}

impl fmt::Display for TransitionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Click => f.write_str("click"),
            Self::Hover => f.write_str("hover"),
            Self::HoverEnd => f.write_str("hover-end"),
            Self::Focus => f.write_str("focus"),
            Self::Blur => f.write_str("blur"),
            Self::Timer { after_ms } => write!(f, "timer({after_ms}ms)"),
            Self::Custom(name) => write!(f, "custom({name})"),
        }
    }
}

/// Timing of an animated transition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionAnimation {
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub easing: Easing,
}

impl Default for TransitionAnimation {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            delay_ms: 0,
            easing: Easing::EaseInOut,
        }
    }
}

impl TransitionAnimation {
    pub fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            delay_ms: 0,
            easing,
        }
    }

    /// A zero-length animation; transitions using it commit immediately.
    pub fn instant() -> Self {
        Self::new(0, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms))
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.delay_ms))
    }

    pub fn is_instant(&self) -> bool {
        self.duration_ms == 0
    }
}

/// Directed edge from the owning state to another state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    pub id: TransitionId,
    pub from_state: StateId,
    pub to_state: StateId,
    pub trigger: TransitionTrigger,
    pub animation: TransitionAnimation,
    pub enabled: bool,
}

impl StateTransition {
    /// Whether this transition is enabled and connects `from` to `to`.
    pub fn connects(&self, from: &StateId, to: &StateId) -> bool {
        self.enabled && self.from_state == *from && self.to_state == *to
    }

    /// Whether this transition is enabled and fires on `trigger`.
    pub fn fires_on(&self, trigger: &TransitionTrigger) -> bool {
        self.enabled && self.trigger == *trigger
    }
}

/// Transition definition before it is attached to a state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTransition {
    pub to_state: StateId,
    pub trigger: TransitionTrigger,
    pub animation: TransitionAnimation,
    pub enabled: bool,
}

impl NewTransition {
    pub fn new(to_state: StateId, trigger: TransitionTrigger) -> Self {
        Self {
            to_state,
            trigger,
            animation: TransitionAnimation::default(),
            enabled: true,
        }
    }

    pub fn with_animation(mut self, animation: TransitionAnimation) -> Self {
        self.animation = animation;
        self
    }

    /// Create the transition switched off.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub(crate) fn attach(self, from_state: StateId) -> StateTransition {
        StateTransition {
            id: TransitionId::new(),
            from_state,
            to_state: self.to_state,
            trigger: self.trigger,
            animation: self.animation,
            enabled: self.enabled,
        }
    }
}

/// Partial update of a transition; `None` fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionPatch {
    pub to_state: Option<StateId>,
    pub trigger: Option<TransitionTrigger>,
    pub animation: Option<TransitionAnimation>,
    pub enabled: Option<bool>,
}

impl TransitionPatch {
    pub(crate) fn apply(self, transition: &mut StateTransition) {
        if let Some(to_state) = self.to_state {
            transition.to_state = to_state;
        }
        if let Some(trigger) = self.trigger {
            transition.trigger = trigger;
        }
        if let Some(animation) = self.animation {
            transition.animation = animation;
        }
        if let Some(enabled) = self.enabled {
            transition.enabled = enabled;
        }
    }
}
