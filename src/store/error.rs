//! Store error types.

use crate::core::{StateId, TransitionId};
use thiserror::Error;

/// Errors returned by state collection edits and navigation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("State '{id}' not found")]
    StateNotFound { id: StateId },

    #[error("Transition '{transition}' not found on state '{state}'")]
    TransitionNotFound {
        state: StateId,
        transition: TransitionId,
    },

    #[error("Cannot delete state '{id}': an object must keep at least one state")]
    LastState { id: StateId },

    #[error("Index {index} is out of bounds for {len} states")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("An object needs at least one state")]
    NoStates,
}
