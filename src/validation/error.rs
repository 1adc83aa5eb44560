//! Validation problems.

use crate::core::{StateId, TransitionId};
use thiserror::Error;

/// A problem found in a state collection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("The object has no states")]
    NoStates,

    #[error("No state is marked as the default")]
    MissingDefault,

    #[error("{count} states are marked as the default; exactly one is allowed")]
    MultipleDefaults { count: usize },

    #[error("State id '{id}' is used more than once")]
    DuplicateStateId { id: StateId },

    #[error("State '{state}' has a blank name")]
    BlankName { state: StateId },

    #[error("Transition '{transition}' on state '{state}' targets missing state '{target}'")]
    OrphanedTransition {
        state: StateId,
        transition: TransitionId,
        target: StateId,
    },

    #[error("Transition '{transition}' is owned by state '{state}' but starts elsewhere")]
    MismatchedSource {
        state: StateId,
        transition: TransitionId,
    },

    #[error("Transition '{transition}' uses malformed easing {easing}")]
    InvalidEasing {
        transition: TransitionId,
        easing: String,
    },
}

impl ValidationError {
    /// The part of the model the problem belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NoStates
            | Self::MissingDefault
            | Self::MultipleDefaults { .. }
            | Self::DuplicateStateId { .. } => "states",
            Self::BlankName { .. } => "name",
            Self::OrphanedTransition { .. } | Self::MismatchedSource { .. } => "transitions",
            Self::InvalidEasing { .. } => "animation.easing",
        }
    }

    /// Human-readable description.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
