//! Runtime controller for one object's states.
//!
//! [`StateController`] combines the state store, the animator, the bounded
//! history and persistence. Hosts drive it by navigating (`go_to_state`,
//! `fire_trigger`) and by calling `tick` once per frame.
//!
//! # Example
//!
//! ```rust
//! use poise::core::{Easing, NewState, NewTransition, StateProperties, TransitionAnimation, TransitionTrigger};
//! use poise::machine::{GoToOutcome, StateController};
//! use std::time::Duration;
//!
//! let mut button = StateController::new("button");
//! let idle = button.current_state_id();
//! let hover = button.add_state(
//!     NewState::named("Hover").with_properties(StateProperties::new().with_opacity(0.8)),
//! );
//! button
//!     .add_transition(
//!         &idle,
//!         NewTransition::new(hover, TransitionTrigger::Hover)
//!             .with_animation(TransitionAnimation::new(100, Easing::EaseOut)),
//!     )
//!     .unwrap();
//!
//! let outcome = button.fire_trigger(&TransitionTrigger::Hover).unwrap();
//! assert!(matches!(outcome, Some(GoToOutcome::Animating(_))));
//!
//! button.tick(Duration::from_millis(100));
//! assert_eq!(button.current_state_id(), hover);
//! ```

mod controller;
mod event;

pub use controller::{GoToOutcome, SaveReceipt, StateController, DEFAULT_STATE_NAME};
pub use event::{Listener, ListenerId, StateEvent};
