//! Poise: interactive visual states for scene objects
//!
//! Poise keeps a named set of visual states per object, such as "Idle",
//! "Hover" or "Pressed", and moves between them either instantly or through
//! an eased animation that blends position, rotation, scale, opacity, color
//! and custom properties.
//!
//! Like Stillwater's "pure core, imperative shell", the data model, history
//! and validation are plain values and pure functions. Time enters only
//! through an explicit `tick`, and persistence is described as effects that
//! the caller runs against a repository.
//!
//! # Core Concepts
//!
//! - **States**: named property bags with outbound transitions
//! - **Transitions**: trigger plus animation (duration, delay, easing)
//! - **Animator**: tick-driven timing of one transition at a time
//! - **Controller**: the active state, history, validation and persistence
//!
//! # Example
//!
//! ```rust
//! use poise::core::{Easing, NewState, NewTransition, StateProperties, TransitionAnimation, TransitionTrigger};
//! use poise::StateController;
//! use std::time::Duration;
//!
//! let mut card = StateController::new("card");
//! let rest = card.current_state_id();
//! card.update_state_properties(&rest, &StateProperties::new().with_opacity(1.0)).unwrap();
//! let faded = card.add_state(
//!     NewState::named("Faded").with_properties(StateProperties::new().with_opacity(0.0)),
//! );
//! card.add_transition(
//!     &rest,
//!     NewTransition::new(faded, TransitionTrigger::Click)
//!         .with_animation(TransitionAnimation::new(400, Easing::Linear)),
//! ).unwrap();
//!
//! card.fire_trigger(&TransitionTrigger::Click).unwrap();
//! card.tick(Duration::from_millis(100));
//! assert!((card.current_properties().opacity.unwrap() - 0.75).abs() < 1e-9);
//!
//! card.tick(Duration::from_millis(300));
//! assert_eq!(card.current_state_id(), faded);
//! assert_eq!(card.history().len(), 1);
//! ```

pub mod animation;
pub mod builder;
pub mod config;
pub mod core;
pub mod machine;
pub mod persistence;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use animation::{AnimationFrame, AnimationOutcome, TransitionAnimator};
pub use builder::{BuildError, ControllerBuilder, StateBuilder, TransitionBuilder};
pub use config::ControllerConfig;
pub use core::{
    Easing, NewState, NewTransition, ObjectId, ObjectState, StateHistory, StateId,
    StateProperties, StateTransition, TransitionAnimation, TransitionTrigger,
};
pub use machine::{GoToOutcome, StateController, StateEvent};
pub use persistence::{FileRepository, MemoryRepository, StateRepository, StateSnapshot};
pub use store::{ObjectStateStore, StoreError};
pub use validation::ValidationError;
