//! Build errors for controller, state and transition builders.

use crate::store::StoreError;
use crate::validation::ValidationError;
use thiserror::Error;

/// Errors that can occur when building a controller from named parts.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("State name is blank. Pass a non-empty name to StateBuilder::new")]
    MissingName,

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error("State name '{0}' is used more than once")]
    DuplicateStateName(String),

    #[error("Transition source state not specified. Call .from(name)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(name)")]
    MissingToState,

    #[error("Transition refers to unknown state '{0}'")]
    UnknownState(String),

    #[error("Built collection is invalid: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
