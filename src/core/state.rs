//! Named visual states of an object.

use super::ids::{StateId, TransitionId};
use super::properties::StateProperties;
use super::transition::{NewTransition, StateTransition, TransitionTrigger};
use serde::{Deserialize, Serialize};

/// A named configuration of visual properties plus its outbound transitions.
///
/// # Example
///
/// ```rust
/// use poise::core::{NewState, StateProperties};
/// use poise::store::ObjectStateStore;
///
/// let mut store = ObjectStateStore::new();
/// let idle = store.add_state(NewState::named("Idle"));
/// let pressed = store.add_state(
///     NewState::named("Pressed").with_properties(StateProperties::new().with_opacity(0.5)),
/// );
///
/// assert!(store.get(&idle).unwrap().is_default);
/// assert_eq!(store.get(&pressed).unwrap().properties.opacity, Some(0.5));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectState {
    pub id: StateId,
    pub name: String,
    pub is_default: bool,
    pub properties: StateProperties,
    pub transitions: Vec<StateTransition>,
    pub sort_order: u32,
}

impl ObjectState {
    /// First enabled transition from this state to `to`.
    pub fn transition_to(&self, to: &StateId) -> Option<&StateTransition> {
        self.transitions.iter().find(|t| t.connects(&self.id, to))
    }

    /// First enabled transition from this state that fires on `trigger`.
    pub fn transition_on(&self, trigger: &TransitionTrigger) -> Option<&StateTransition> {
        self.transitions.iter().find(|t| t.fires_on(trigger))
    }

    pub fn transition(&self, id: &TransitionId) -> Option<&StateTransition> {
        self.transitions.iter().find(|t| t.id == *id)
    }

    pub(crate) fn transition_mut(&mut self, id: &TransitionId) -> Option<&mut StateTransition> {
        self.transitions.iter_mut().find(|t| t.id == *id)
    }
}

/// State definition before the store assigns its id and sort order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewState {
    pub name: String,
    pub is_default: bool,
    pub properties: StateProperties,
    pub transitions: Vec<NewTransition>,
}

impl NewState {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_properties(mut self, properties: StateProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn with_transition(mut self, transition: NewTransition) -> Self {
        self.transitions.push(transition);
        self
    }
}

/// Partial update of a state; `None` fields are left unchanged.
///
/// `properties` replaces the whole bag. To overlay individual properties use
/// `ObjectStateStore::update_state_properties`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatePatch {
    pub name: Option<String>,
    pub is_default: Option<bool>,
    pub properties: Option<StateProperties>,
    pub transitions: Option<Vec<StateTransition>>,
}
