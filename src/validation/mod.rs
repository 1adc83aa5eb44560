//! Validation of a state collection.
//!
//! Validation never blocks editing. It inspects a collection and reports
//! every problem at once using Stillwater's `Validation`, so an authoring UI
//! can show the full list instead of one error at a time.
//!
//! # Example
//!
//! ```rust
//! use poise::core::{NewState, NewTransition, StateId, TransitionTrigger};
//! use poise::store::ObjectStateStore;
//! use poise::validation::{issues, ValidationError};
//!
//! let mut store = ObjectStateStore::new();
//! let idle = store.add_state(NewState::named("Idle"));
//! store
//!     .add_transition(&idle, NewTransition::new(StateId::new(), TransitionTrigger::Click))
//!     .unwrap();
//!
//! let problems = issues(store.states());
//! assert_eq!(problems.len(), 1);
//! assert!(matches!(problems[0], ValidationError::OrphanedTransition { .. }));
//! assert_eq!(problems[0].field(), "transitions");
//! ```

mod error;

pub use error::ValidationError;

use crate::core::ObjectState;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ValidationError>>;

fn check(ok: bool, error: impl FnOnce() -> ValidationError) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error())
    }
}

/// Validate a collection, accumulating ALL problems.
///
/// Returns `Validation::Success(())` when the collection is consistent,
/// otherwise `Validation::Failure` with every problem found.
pub fn validate(states: &[ObjectState]) -> Validation<(), NonEmptyVec<ValidationError>> {
    let mut checks: Vec<Check> = Vec::new();

    checks.push(check(!states.is_empty(), || ValidationError::NoStates));

    if !states.is_empty() {
        let defaults = states.iter().filter(|s| s.is_default).count();
        checks.push(check(defaults > 0, || ValidationError::MissingDefault));
        checks.push(check(defaults <= 1, || ValidationError::MultipleDefaults {
            count: defaults,
        }));
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for state in states {
        if !seen.insert(state.id) && reported.insert(state.id) {
            checks.push(Validation::fail(ValidationError::DuplicateStateId { id: state.id }));
        }
    }

    for state in states {
        checks.push(check(!state.name.trim().is_empty(), || {
            ValidationError::BlankName { state: state.id }
        }));

        for transition in &state.transitions {
            checks.push(check(seen.contains(&transition.to_state), || {
                ValidationError::OrphanedTransition {
                    state: state.id,
                    transition: transition.id,
                    target: transition.to_state,
                }
            }));
            checks.push(check(transition.from_state == state.id, || {
                ValidationError::MismatchedSource {
                    state: state.id,
                    transition: transition.id,
                }
            }));
            checks.push(check(transition.animation.easing.is_well_formed(), || {
                ValidationError::InvalidEasing {
                    transition: transition.id,
                    easing: transition.animation.easing.to_string(),
                }
            }));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Every problem in the collection as a flat list; empty when valid.
pub fn issues(states: &[ObjectState]) -> Vec<ValidationError> {
    match validate(states) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        Easing, NewState, NewTransition, StateId, TransitionAnimation, TransitionTrigger,
    };
    use crate::store::ObjectStateStore;

    fn valid_store() -> (ObjectStateStore, StateId, StateId) {
        let mut store = ObjectStateStore::new();
        let idle = store.add_state(NewState::named("idle"));
        let hover = store.add_state(
            NewState::named("hover").with_transition(NewTransition::new(idle, TransitionTrigger::HoverEnd)),
        );
        store
            .add_transition(&idle, NewTransition::new(hover, TransitionTrigger::Hover))
            .unwrap();
        (store, idle, hover)
    }

    #[test]
    fn consistent_collection_passes() {
        let (store, _, _) = valid_store();
        assert!(validate(store.states()).is_success());
        assert!(issues(store.states()).is_empty());
    }

    #[test]
    fn empty_collection_fails() {
        assert_eq!(issues(&[]), vec![ValidationError::NoStates]);
    }

    #[test]
    fn missing_and_multiple_defaults_are_reported() {
        let (store, _, _) = valid_store();

        let mut none: Vec<ObjectState> = store.states().to_vec();
        none.iter_mut().for_each(|s| s.is_default = false);
        assert_eq!(issues(&none), vec![ValidationError::MissingDefault]);

        let mut both: Vec<ObjectState> = store.states().to_vec();
        both.iter_mut().for_each(|s| s.is_default = true);
        assert_eq!(
            issues(&both),
            vec![ValidationError::MultipleDefaults { count: 2 }]
        );
    }

    #[test]
    fn validation_accumulates_all_problems() {
        let (mut store, idle, hover) = valid_store();
        let ghost = StateId::new();
        store
            .add_transition(&hover, NewTransition::new(ghost, TransitionTrigger::Click))
            .unwrap();

        let mut states = store.into_states();
        states[0].name = "   ".into();
        states[1].transitions[0].from_state = idle;
        let mut twin = states[1].clone();
        twin.is_default = false;
        states.push(twin);

        let problems = issues(&states);

        assert!(problems
            .iter()
            .any(|e| matches!(e, ValidationError::BlankName { state } if *state == idle)));
        assert!(problems
            .iter()
            .any(|e| matches!(e, ValidationError::OrphanedTransition { target, .. } if *target == ghost)));
        assert!(problems
            .iter()
            .any(|e| matches!(e, ValidationError::MismatchedSource { state, .. } if *state == hover)));
        assert_eq!(
            problems
                .iter()
                .filter(|e| matches!(e, ValidationError::DuplicateStateId { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn malformed_bezier_is_reported() {
        let (mut store, idle, hover) = valid_store();
        let transition = store.find_transition(&idle, &hover).unwrap().id;
        store
            .update_transition(
                &idle,
                &transition,
                crate::core::TransitionPatch {
                    animation: Some(TransitionAnimation::new(
                        200,
                        Easing::cubic_bezier(-0.5, 0.0, 1.0, 1.0),
                    )),
                    ..Default::default()
                },
            )
            .unwrap();

        let problems = issues(store.states());
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].field(), "animation.easing");
    }
}
