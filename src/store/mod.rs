//! Authoritative collection of states for one visual object.
//!
//! The store keeps states in sort order and maintains the default-state
//! invariant: whenever the store is non-empty exactly one state has
//! `is_default` set. It does not enforce that transition targets exist;
//! dangling targets are reported by [`crate::validation`].

pub mod error;

pub use error::StoreError;

use crate::core::{
    NewState, NewTransition, ObjectState, StatePatch, StateProperties, StateId, StateTransition,
    TransitionId, TransitionPatch,
};
use log::{debug, warn};

/// Ordered list of an object's states and their outbound transitions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectStateStore {
    states: Vec<ObjectState>,
}

impl ObjectStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from previously saved states, ordered by `sort_order`.
    ///
    /// Saved flags are normalized to a single default: the first flagged
    /// state in sort order keeps it, or the first state when none is flagged.
    pub fn from_states(mut states: Vec<ObjectState>) -> Self {
        states.sort_by_key(|s| s.sort_order);
        let flagged = states.iter().filter(|s| s.is_default).count();
        if flagged != 1 && !states.is_empty() {
            let keep = states.iter().position(|s| s.is_default).unwrap_or(0);
            warn!(
                "Loaded {flagged} default states; keeping '{}' as the default",
                states[keep].name
            );
            for (i, state) in states.iter_mut().enumerate() {
                state.is_default = i == keep;
            }
        }
        Self { states }
    }

    /// States in sort order.
    pub fn states(&self) -> &[ObjectState] {
        &self.states
    }

    pub fn into_states(self) -> Vec<ObjectState> {
        self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, id: &StateId) -> bool {
        self.states.iter().any(|s| s.id == *id)
    }

    pub fn get(&self, id: &StateId) -> Option<&ObjectState> {
        self.states.iter().find(|s| s.id == *id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&ObjectState> {
        self.states.iter().find(|s| s.name == name)
    }

    pub fn default_state(&self) -> Option<&ObjectState> {
        self.states.iter().find(|s| s.is_default)
    }

    /// First enabled transition from `from` to `to`.
    pub fn find_transition(&self, from: &StateId, to: &StateId) -> Option<&StateTransition> {
        self.get(from)?.transition_to(to)
    }

    /// Add a state and return its generated id.
    ///
    /// The first state added always becomes the default. Adding a state
    /// flagged as default clears the flag on every other state.
    pub fn add_state(&mut self, new_state: NewState) -> StateId {
        let id = StateId::new();
        let is_default = new_state.is_default || self.states.is_empty();
        if is_default {
            self.states.iter_mut().for_each(|s| s.is_default = false);
        }

        let state = ObjectState {
            id,
            name: new_state.name,
            is_default,
            properties: new_state.properties,
            transitions: new_state
                .transitions
                .into_iter()
                .map(|t| t.attach(id))
                .collect(),
            sort_order: self.next_sort_order(),
        };

        debug!("Added state '{}' ({})", state.name, id);
        self.states.push(state);
        id
    }

    /// Merge the fields set in `patch` into the state.
    ///
    /// `is_default: Some(true)` makes the state the only default.
    /// `Some(false)` is ignored: the default moves only by promoting another
    /// state.
    pub fn update_state(&mut self, id: &StateId, patch: StatePatch) -> Result<(), StoreError> {
        let index = self.position(id)?;
        let StatePatch {
            name,
            is_default,
            properties,
            transitions,
        } = patch;

        let state = &mut self.states[index];
        if let Some(name) = name {
            state.name = name;
        }
        if let Some(properties) = properties {
            state.properties = properties;
        }
        if let Some(transitions) = transitions {
            state.transitions = transitions
                .into_iter()
                .map(|mut t| {
                    t.from_state = *id;
                    t
                })
                .collect();
        }

        match is_default {
            Some(true) => self.make_default(index),
            Some(false) if self.states[index].is_default => {
                warn!("Ignoring request to unset the default flag on state {id}");
            }
            _ => {}
        }
        Ok(())
    }

    /// Overlay the properties set in `properties` onto the state's bag.
    pub fn update_state_properties(
        &mut self,
        id: &StateId,
        properties: &StateProperties,
    ) -> Result<(), StoreError> {
        let index = self.position(id)?;
        self.states[index].properties.merge(properties);
        Ok(())
    }

    /// Remove a state, returning it.
    ///
    /// Refuses to remove the last state. When the removed state was the
    /// default, the first remaining state becomes the default.
    pub fn delete_state(&mut self, id: &StateId) -> Result<ObjectState, StoreError> {
        let index = self.position(id)?;
        if self.states.len() == 1 {
            warn!("Refusing to delete {id}: it is the only state");
            return Err(StoreError::LastState { id: *id });
        }

        let removed = self.states.remove(index);
        if removed.is_default {
            self.states[0].is_default = true;
            debug!(
                "Deleted default state {}; promoted '{}'",
                id, self.states[0].name
            );
        } else {
            debug!("Deleted state {id}");
        }
        Ok(removed)
    }

    /// Copy a state, appending the copy at the end of the sort order.
    ///
    /// The copy gets a new id, a " (copy)" name suffix, and fresh ids for all
    /// of its transitions, which start from the copy. Targets, triggers,
    /// animations and properties are copied verbatim. The copy is never the
    /// default.
    pub fn duplicate_state(&mut self, id: &StateId) -> Result<StateId, StoreError> {
        let source = self
            .get(id)
            .ok_or(StoreError::StateNotFound { id: *id })?
            .clone();

        let new_id = StateId::new();
        let transitions = source
            .transitions
            .into_iter()
            .map(|t| StateTransition {
                id: TransitionId::new(),
                from_state: new_id,
                ..t
            })
            .collect();

        let copy = ObjectState {
            id: new_id,
            name: format!("{} (copy)", source.name),
            is_default: false,
            properties: source.properties,
            transitions,
            sort_order: self.next_sort_order(),
        };

        debug!("Duplicated state {id} as {new_id}");
        self.states.push(copy);
        Ok(new_id)
    }

    /// Make `id` the only default state.
    pub fn set_default_state(&mut self, id: &StateId) -> Result<(), StoreError> {
        let index = self.position(id)?;
        self.make_default(index);
        Ok(())
    }

    /// Move the state at index `from` to index `to` and renumber sort orders.
    pub fn reorder_states(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        let len = self.states.len();
        for index in [from, to] {
            if index >= len {
                return Err(StoreError::IndexOutOfBounds { index, len });
            }
        }

        let state = self.states.remove(from);
        self.states.insert(to, state);
        for (order, state) in self.states.iter_mut().enumerate() {
            state.sort_order = u32::try_from(order).unwrap_or(u32::MAX);
        }
        Ok(())
    }

    /// Attach a new outbound transition to a state.
    pub fn add_transition(
        &mut self,
        state_id: &StateId,
        transition: NewTransition,
    ) -> Result<TransitionId, StoreError> {
        let index = self.position(state_id)?;
        let transition = transition.attach(*state_id);
        let id = transition.id;
        self.states[index].transitions.push(transition);
        Ok(id)
    }

    pub fn update_transition(
        &mut self,
        state_id: &StateId,
        transition_id: &TransitionId,
        patch: TransitionPatch,
    ) -> Result<(), StoreError> {
        let index = self.position(state_id)?;
        let transition = self.states[index]
            .transition_mut(transition_id)
            .ok_or(StoreError::TransitionNotFound {
                state: *state_id,
                transition: *transition_id,
            })?;
        patch.apply(transition);
        Ok(())
    }

    pub fn remove_transition(
        &mut self,
        state_id: &StateId,
        transition_id: &TransitionId,
    ) -> Result<StateTransition, StoreError> {
        let index = self.position(state_id)?;
        let transitions = &mut self.states[index].transitions;
        let position = transitions
            .iter()
            .position(|t| t.id == *transition_id)
            .ok_or(StoreError::TransitionNotFound {
                state: *state_id,
                transition: *transition_id,
            })?;
        Ok(transitions.remove(position))
    }

    fn position(&self, id: &StateId) -> Result<usize, StoreError> {
        self.states
            .iter()
            .position(|s| s.id == *id)
            .ok_or(StoreError::StateNotFound { id: *id })
    }

    fn make_default(&mut self, index: usize) {
        for (i, state) in self.states.iter_mut().enumerate() {
            state.is_default = i == index;
        }
    }

    fn next_sort_order(&self) -> u32 {
        self.states
            .iter()
            .map(|s| s.sort_order.saturating_add(1))
            .max()
            .unwrap_or(0)
    }
}
