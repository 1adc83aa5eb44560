//! Builder for constructing controllers from named states.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::builder::transition::{NamedTransition, TransitionBuilder};
use crate::config::ControllerConfig;
use crate::core::{NewState, ObjectId, StateId};
use crate::machine::StateController;
use crate::store::ObjectStateStore;
use crate::validation;
use std::collections::HashMap;

/// Builder for a [`StateController`] whose states and transitions are
/// declared by name.
///
/// `build` resolves names to generated ids and rejects collections that fail
/// validation.
pub struct ControllerBuilder {
    object_id: ObjectId,
    config: ControllerConfig,
    states: Vec<NewState>,
    transitions: Vec<NamedTransition>,
}

impl ControllerBuilder {
    pub fn new(object_id: impl Into<ObjectId>) -> Self {
        Self {
            object_id: object_id.into(),
            config: ControllerConfig::default(),
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a state. The first state is the default unless another is marked.
    pub fn state(mut self, builder: StateBuilder) -> Result<Self, BuildError> {
        self.states.push(builder.build()?);
        Ok(self)
    }

    /// Add a transition using a builder.
    pub fn transition(mut self, builder: TransitionBuilder) -> Result<Self, BuildError> {
        self.transitions.push(builder.build()?);
        Ok(self)
    }

    /// Add multiple pre-built transitions at once.
    pub fn transitions(mut self, transitions: Vec<NamedTransition>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    pub fn build(self) -> Result<StateController, BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut store = ObjectStateStore::new();
        let mut ids: HashMap<String, StateId> = HashMap::new();
        for state in self.states {
            let name = state.name.clone();
            if ids.contains_key(&name) {
                return Err(BuildError::DuplicateStateName(name));
            }
            ids.insert(name, store.add_state(state));
        }

        let lookup = |name: &str| {
            ids.get(name)
                .copied()
                .ok_or_else(|| BuildError::UnknownState(name.to_string()))
        };
        for transition in self.transitions {
            let from = lookup(&transition.from)?;
            let to = lookup(&transition.to)?;
            store.add_transition(&from, transition.resolve(to))?;
        }

        let problems = validation::issues(store.states());
        if !problems.is_empty() {
            return Err(BuildError::Invalid(problems));
        }

        Ok(StateController::from_store(self.object_id, self.config, store)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Easing, TransitionTrigger};
    use crate::validation::ValidationError;

    #[test]
    fn builder_requires_states() {
        let result = ControllerBuilder::new("empty").build();
        assert!(matches!(result, Err(BuildError::NoStates)));
    }

    #[test]
    fn fluent_api_builds_controller() {
        let controller = ControllerBuilder::new("button")
            .state(StateBuilder::new("Idle").opacity(1.0))
            .unwrap()
            .state(StateBuilder::new("Hover").opacity(0.8))
            .unwrap()
            .transition(
                TransitionBuilder::new()
                    .from("Idle")
                    .to("Hover")
                    .on(TransitionTrigger::Hover)
                    .easing(Easing::EaseOut),
            )
            .unwrap()
            .build()
            .unwrap();

        let idle = controller.store().get_by_name("Idle").unwrap();
        let hover = controller.store().get_by_name("Hover").unwrap();
        assert!(idle.is_default);
        assert_eq!(controller.current_state_id(), idle.id);
        assert_eq!(idle.transitions.len(), 1);
        assert_eq!(idle.transitions[0].to_state, hover.id);
        assert!(!controller.is_dirty());
    }

    #[test]
    fn marked_default_wins() {
        let controller = ControllerBuilder::new("card")
            .state(StateBuilder::new("A"))
            .unwrap()
            .state(StateBuilder::new("B").default_state())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(controller.current_state().unwrap().name, "B");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = ControllerBuilder::new("card")
            .state(StateBuilder::new("A"))
            .unwrap()
            .state(StateBuilder::new("A"))
            .unwrap()
            .build();

        assert!(matches!(result, Err(BuildError::DuplicateStateName(name)) if name == "A"));
    }

    #[test]
    fn unknown_state_name_is_rejected() {
        let result = ControllerBuilder::new("card")
            .state(StateBuilder::new("A"))
            .unwrap()
            .transition(TransitionBuilder::new().from("A").to("Missing"))
            .unwrap()
            .build();

        assert!(matches!(result, Err(BuildError::UnknownState(name)) if name == "Missing"));
    }

    #[test]
    fn invalid_easing_fails_validation() {
        let result = ControllerBuilder::new("card")
            .state(StateBuilder::new("A"))
            .unwrap()
            .state(StateBuilder::new("B"))
            .unwrap()
            .transition(TransitionBuilder::new().from("A").to("B").easing(
                Easing::CubicBezier {
                    x1: 1.5,
                    y1: 0.0,
                    x2: 0.5,
                    y2: 1.0,
                },
            ))
            .unwrap()
            .build();

        match result {
            Err(BuildError::Invalid(problems)) => {
                assert!(matches!(problems[0], ValidationError::InvalidEasing { .. }));
            }
            other => panic!("expected invalid collection, got {:?}", other.err()),
        }
    }
}
