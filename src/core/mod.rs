//! Core data model.
//!
//! This module contains the plain data types of the state system:
//! - Identifiers for states, transitions and owning objects
//! - Animatable property bags and their interpolation
//! - Easing curves
//! - States, transitions and the bounded history of state changes
//!
//! Everything here is pure data with no side effects; the store,
//! animator and controller build on top of it.

mod easing;
mod history;
mod ids;
mod properties;
mod state;
mod transition;

pub use easing::{Easing, EasingParseError};
pub use history::{StateHistory, StateHistoryEntry, DEFAULT_HISTORY_SIZE};
pub use ids::{ObjectId, StateId, TransitionId};
pub use properties::{Color, Interpolate, PropertyValue, StateProperties, Vec3};
pub use state::{NewState, ObjectState, StatePatch};
pub use transition::{
    NewTransition, StateTransition, TransitionAnimation, TransitionPatch, TransitionTrigger,
};
