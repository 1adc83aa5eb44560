//! Controller owning one object's states, active state and animation.

use super::event::{Listener, ListenerId, StateEvent};
use crate::animation::{ActiveAnimation, AnimationEnd, AnimationFrame, AnimationTicket, TransitionAnimator};
use crate::config::ControllerConfig;
use crate::core::{
    Interpolate, NewState, NewTransition, ObjectId, ObjectState, StateHistory, StateHistoryEntry,
    StateId, StatePatch, StateProperties, StateTransition, TransitionAnimation, TransitionId,
    TransitionPatch, TransitionTrigger,
};
use crate::persistence::{PersistenceError, StateRepository, StateSnapshot};
use crate::store::{ObjectStateStore, StoreError};
use crate::validation::{self, ValidationError};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::time::Duration;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Name of the state a fresh controller starts with.
pub const DEFAULT_STATE_NAME: &str = "Default";

/// What `go_to_state` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoToOutcome {
    /// The target became active immediately.
    Committed,
    /// The target was already active; nothing was recorded.
    AlreadyActive,
    /// An animation started; the target commits when it finishes.
    Animating(AnimationTicket),
}

/// Result of running a save effect, applied with
/// [`StateController::apply_save`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaveReceipt {
    /// Controller revision captured in the saved snapshot.
    pub revision: u64,
    pub saved_at: DateTime<Utc>,
    /// False when persistence is disabled and nothing was written.
    pub persisted: bool,
}

/// Runtime controller for a single object.
///
/// Owns the state collection, the active state, the transition history and
/// the animator. Edits go through the controller so it can track unsaved
/// changes and notify listeners. Navigation either commits a state at once or
/// starts an animation that commits when [`tick`](Self::tick) reaches its end.
///
/// Persistence follows an effect-then-apply split: [`save`](Self::save) and
/// [`load`](Self::load) only build effects; the caller runs them against a
/// repository and feeds the results back through
/// [`apply_save`](Self::apply_save) and [`apply_load`](Self::apply_load).
pub struct StateController {
    object_id: ObjectId,
    config: ControllerConfig,
    store: ObjectStateStore,
    current: StateId,
    history: StateHistory,
    animator: TransitionAnimator,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    revision: u64,
    dirty: bool,
    last_saved: Option<DateTime<Utc>>,
    resting: Duration,
}

impl StateController {
    /// Create a controller with a single default state.
    pub fn new(object_id: impl Into<ObjectId>) -> Self {
        Self::with_config(object_id, ControllerConfig::default())
    }

    pub fn with_config(object_id: impl Into<ObjectId>, config: ControllerConfig) -> Self {
        let mut store = ObjectStateStore::new();
        let current = store.add_state(NewState::named(DEFAULT_STATE_NAME).as_default());
        Self::assemble(object_id.into(), config, store, current)
    }

    /// Wrap an existing collection. The default state becomes active.
    pub fn from_store(
        object_id: impl Into<ObjectId>,
        config: ControllerConfig,
        store: ObjectStateStore,
    ) -> Result<Self, StoreError> {
        let current = fallback_state(&store).ok_or(StoreError::NoStates)?;
        Ok(Self::assemble(object_id.into(), config, store, current))
    }

    /// Rebuild a controller from a stored snapshot.
    pub fn from_snapshot(
        config: ControllerConfig,
        snapshot: StateSnapshot,
    ) -> Result<Self, PersistenceError> {
        let mut controller = Self::with_config(snapshot.object_id.clone(), config);
        controller.restore(snapshot)?;
        Ok(controller)
    }

    fn assemble(
        object_id: ObjectId,
        config: ControllerConfig,
        store: ObjectStateStore,
        current: StateId,
    ) -> Self {
        let history = StateHistory::with_capacity(config.max_history_size);
        Self {
            object_id,
            config,
            store,
            current,
            history,
            animator: TransitionAnimator::new(),
            listeners: Vec::new(),
            next_listener: 0,
            revision: 0,
            dirty: false,
            last_saved: None,
            resting: Duration::ZERO,
        }
    }

    pub fn object_id(&self) -> &ObjectId {
        &self.object_id
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn store(&self) -> &ObjectStateStore {
        &self.store
    }

    pub fn states(&self) -> &[ObjectState] {
        self.store.states()
    }

    pub fn current_state_id(&self) -> StateId {
        self.current
    }

    pub fn current_state(&self) -> Option<&ObjectState> {
        self.store.get(&self.current)
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn active_animation(&self) -> Option<&ActiveAnimation> {
        self.animator.active()
    }

    pub fn progress(&self) -> f64 {
        self.animator.progress()
    }

    pub fn eased_progress(&self) -> f64 {
        self.animator.eased_progress()
    }

    /// Whether there are edits not yet confirmed by `apply_save`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Counter bumped by every edit and load.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Change the history bound, dropping the oldest entries if needed.
    pub fn set_max_history_size(&mut self, size: usize) {
        self.config.max_history_size = size;
        self.history = self.history.resized(size);
    }

    // Listeners

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&StateEvent) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn emit(&self, event: StateEvent) {
        for (_, listener) in &self.listeners {
            listener(&event);
        }
    }

    // Editing

    fn touch(&mut self) {
        self.revision += 1;
        self.dirty = true;
        self.emit(StateEvent::CollectionEdited);
    }

    pub fn add_state(&mut self, new_state: NewState) -> StateId {
        let id = self.store.add_state(new_state);
        self.touch();
        id
    }

    pub fn update_state(&mut self, id: &StateId, patch: StatePatch) -> Result<(), StoreError> {
        self.store.update_state(id, patch)?;
        self.touch();
        Ok(())
    }

    pub fn update_state_properties(
        &mut self,
        id: &StateId,
        properties: &StateProperties,
    ) -> Result<(), StoreError> {
        self.store.update_state_properties(id, properties)?;
        self.touch();
        Ok(())
    }

    /// Remove a state.
    ///
    /// An animation to or from the removed state is cancelled. If the removed
    /// state was active, the default state is committed in its place.
    pub fn delete_state(&mut self, id: &StateId) -> Result<ObjectState, StoreError> {
        let removed = self.store.delete_state(id)?;

        let involved = self
            .animator
            .active()
            .is_some_and(|active| active.from == *id || active.to == *id);
        if involved {
            if let Some(end) = self.animator.cancel() {
                self.emit(StateEvent::TransitionEnded(end));
            }
        }

        self.touch();

        if self.current == *id {
            if let Some(fallback) = fallback_state(&self.store) {
                debug!("Active state {id} deleted; falling back to {fallback}");
                self.commit(fallback, TransitionTrigger::Direct);
            }
        }
        Ok(removed)
    }

    pub fn duplicate_state(&mut self, id: &StateId) -> Result<StateId, StoreError> {
        let copy = self.store.duplicate_state(id)?;
        self.touch();
        Ok(copy)
    }

    pub fn set_default_state(&mut self, id: &StateId) -> Result<(), StoreError> {
        self.store.set_default_state(id)?;
        self.touch();
        Ok(())
    }

    pub fn reorder_states(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        self.store.reorder_states(from, to)?;
        self.touch();
        Ok(())
    }

    pub fn add_transition(
        &mut self,
        state_id: &StateId,
        transition: NewTransition,
    ) -> Result<TransitionId, StoreError> {
        let id = self.store.add_transition(state_id, transition)?;
        self.touch();
        Ok(id)
    }

    pub fn update_transition(
        &mut self,
        state_id: &StateId,
        transition_id: &TransitionId,
        patch: TransitionPatch,
    ) -> Result<(), StoreError> {
        self.store.update_transition(state_id, transition_id, patch)?;
        self.touch();
        Ok(())
    }

    pub fn remove_transition(
        &mut self,
        state_id: &StateId,
        transition_id: &TransitionId,
    ) -> Result<StateTransition, StoreError> {
        let removed = self.store.remove_transition(state_id, transition_id)?;
        self.touch();
        Ok(removed)
    }

    // Navigation

    /// Move to `target`.
    ///
    /// With `animate` set and a non-zero duration, starts an animation using
    /// the first enabled transition from the active state to `target`, or the
    /// configured default animation when none exists. Otherwise the target is
    /// committed immediately and recorded as `Direct`. Any animation already
    /// in flight is pre-empted.
    pub fn go_to_state(&mut self, target: &StateId, animate: bool) -> Result<GoToOutcome, StoreError> {
        if !self.store.contains(target) {
            return Err(StoreError::StateNotFound { id: *target });
        }

        if *target == self.current {
            self.preempt();
            return Ok(GoToOutcome::AlreadyActive);
        }

        let (trigger, animation) = match self.store.find_transition(&self.current, target) {
            Some(transition) => (transition.trigger.clone(), transition.animation),
            None => (TransitionTrigger::Direct, self.config.default_animation),
        };

        if !animate || animation.is_instant() {
            self.preempt();
            self.commit(*target, TransitionTrigger::Direct);
            return Ok(GoToOutcome::Committed);
        }

        Ok(GoToOutcome::Animating(self.begin(*target, trigger, animation)))
    }

    /// Follow the first enabled transition of the active state that fires on
    /// `trigger`. Returns `None` when no transition matches.
    pub fn fire_trigger(
        &mut self,
        trigger: &TransitionTrigger,
    ) -> Result<Option<GoToOutcome>, StoreError> {
        let Some(transition) = self
            .current_state()
            .and_then(|state| state.transition_on(trigger))
            .cloned()
        else {
            debug!("No transition on {trigger} from {}", self.current);
            return Ok(None);
        };

        let target = transition.to_state;
        if !self.store.contains(&target) {
            warn!("Transition {} points at missing state {target}", transition.id);
            return Err(StoreError::StateNotFound { id: target });
        }

        if target == self.current {
            self.preempt();
            return Ok(Some(GoToOutcome::AlreadyActive));
        }

        if transition.animation.is_instant() {
            self.preempt();
            self.commit(target, transition.trigger);
            return Ok(Some(GoToOutcome::Committed));
        }

        let ticket = self.begin(target, transition.trigger, transition.animation);
        Ok(Some(GoToOutcome::Animating(ticket)))
    }

    /// Go back to the default state.
    pub fn reset_to_default(&mut self, animate: bool) -> Result<GoToOutcome, StoreError> {
        let default = fallback_state(&self.store).ok_or(StoreError::NoStates)?;
        self.go_to_state(&default, animate)
    }

    /// Advance time by `delta`.
    ///
    /// Commits the target when the running animation finishes. While idle,
    /// fires a due `Timer` transition of the active state.
    pub fn tick(&mut self, delta: Duration) -> AnimationFrame {
        let frame = self.animator.tick(delta);
        match &frame {
            AnimationFrame::Finished(end) => {
                self.commit(end.to, end.trigger.clone());
                self.emit(StateEvent::TransitionEnded(end.clone()));
            }
            AnimationFrame::Idle => {
                self.resting = self.resting.saturating_add(delta);
                self.fire_due_timer();
            }
            AnimationFrame::Delayed { .. } | AnimationFrame::Running { .. } => {}
        }
        frame
    }

    /// Stop the running animation, leaving the source state active.
    pub fn cancel_animation(&mut self) -> Option<AnimationEnd> {
        let end = self.animator.cancel()?;
        self.emit(StateEvent::TransitionEnded(end.clone()));
        Some(end)
    }

    /// Properties to render right now.
    ///
    /// While animating this blends the source and target properties at the
    /// eased progress; otherwise it is the active state's own properties.
    pub fn current_properties(&self) -> StateProperties {
        let Some(active) = self.animator.active() else {
            return self
                .current_state()
                .map(|state| state.properties.clone())
                .unwrap_or_default();
        };

        match (self.store.get(&active.from), self.store.get(&active.to)) {
            (Some(from), Some(to)) => from
                .properties
                .interpolate(&to.properties, self.animator.eased_progress()),
            (Some(from), None) => from.properties.clone(),
            _ => StateProperties::default(),
        }
    }

    fn begin(
        &mut self,
        target: StateId,
        trigger: TransitionTrigger,
        animation: TransitionAnimation,
    ) -> AnimationTicket {
        let from = self.current;
        let (ticket, preempted) = self.animator.start(from, target, trigger, animation);
        if let Some(end) = preempted {
            self.emit(StateEvent::TransitionEnded(end));
        }
        self.emit(StateEvent::TransitionStarted {
            ticket,
            from,
            to: target,
        });
        ticket
    }

    fn preempt(&mut self) {
        if let Some(end) = self.animator.preempt() {
            self.emit(StateEvent::TransitionEnded(end));
        }
    }

    fn commit(&mut self, target: StateId, trigger: TransitionTrigger) {
        let from = self.current;
        self.current = target;
        self.resting = Duration::ZERO;
        self.history = self
            .history
            .record(StateHistoryEntry::now(target, trigger.clone()));
        debug!("{}: {from} -> {target} ({trigger})", self.object_id);
        self.emit(StateEvent::StateChanged {
            from,
            to: target,
            trigger,
        });
    }

    fn fire_due_timer(&mut self) {
        let resting = self.resting;
        let due = self.current_state().and_then(|state| {
            state.transitions.iter().find(|t| {
                t.enabled
                    && matches!(
                        t.trigger,
                        TransitionTrigger::Timer { after_ms }
                            if resting >= Duration::from_millis(u64::from(after_ms))
                    )
            })
        });
        let Some(trigger) = due.map(|t| t.trigger.clone()) else {
            return;
        };

        self.resting = Duration::ZERO;
        if let Err(e) = self.fire_trigger(&trigger) {
            warn!("Timer transition on {} failed: {e}", self.object_id);
        }
    }

    // Validation

    /// Check the collection, accumulating every problem found.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ValidationError>> {
        validation::validate(self.store.states())
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        validation::issues(self.store.states())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_success()
    }

    // Persistence

    /// Capture the collection, active state and history.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(
            self.object_id.clone(),
            self.store.states().to_vec(),
            self.current,
            self.history.clone(),
        )
    }

    /// Build an effect that writes the current snapshot to a repository.
    ///
    /// The snapshot is captured now; edits made before the effect runs are
    /// not included. Pass the receipt to [`apply_save`](Self::apply_save).
    pub fn save<R>(&self) -> BoxedEffect<SaveReceipt, PersistenceError, R>
    where
        R: StateRepository + Clone + Send + Sync + 'static,
    {
        let revision = self.revision;
        if !self.config.persistence.enabled {
            return pure(SaveReceipt {
                revision,
                saved_at: Utc::now(),
                persisted: false,
            })
            .boxed();
        }

        let object_id = self.object_id.clone();
        let snapshot = self.snapshot();
        from_fn(move |repo: &R| -> Result<SaveReceipt, PersistenceError> {
            repo.save(&object_id, &snapshot)?;
            Ok(SaveReceipt {
                revision,
                saved_at: snapshot.saved_at,
                persisted: true,
            })
        })
        .boxed()
    }

    /// Record a finished save.
    ///
    /// The dirty flag is cleared only if nothing was edited after the
    /// snapshot was taken.
    pub fn apply_save(&mut self, receipt: SaveReceipt) {
        self.last_saved = Some(receipt.saved_at);
        if receipt.revision == self.revision {
            self.dirty = false;
        } else {
            debug!(
                "{} edited since revision {}; still dirty",
                self.object_id, receipt.revision
            );
        }
        if receipt.persisted {
            info!("Saved {} at revision {}", self.object_id, receipt.revision);
        }
        self.emit(StateEvent::Saved {
            saved_at: receipt.saved_at,
        });
    }

    /// Build an effect that reads this object's snapshot from a repository.
    pub fn load<R>(&self) -> BoxedEffect<Option<StateSnapshot>, PersistenceError, R>
    where
        R: StateRepository + Clone + Send + Sync + 'static,
    {
        if !self.config.persistence.enabled {
            return pure(None).boxed();
        }

        let object_id = self.object_id.clone();
        from_fn(move |repo: &R| repo.load(&object_id)).boxed()
    }

    /// Replace the collection with a loaded snapshot.
    ///
    /// Any running animation is cancelled. The snapshot's active state is
    /// restored when it still exists, otherwise the default state is used.
    pub fn apply_load(&mut self, snapshot: StateSnapshot) -> Result<(), PersistenceError> {
        if snapshot.object_id != self.object_id {
            return Err(PersistenceError::ObjectMismatch {
                expected: self.object_id.clone(),
                found: snapshot.object_id,
            });
        }
        self.restore(snapshot)?;
        self.emit(StateEvent::Loaded);
        Ok(())
    }

    fn restore(&mut self, snapshot: StateSnapshot) -> Result<(), PersistenceError> {
        if snapshot.states.is_empty() {
            return Err(PersistenceError::EmptySnapshot(snapshot.object_id));
        }

        if let Some(end) = self.animator.cancel() {
            self.emit(StateEvent::TransitionEnded(end));
        }

        let store = ObjectStateStore::from_states(snapshot.states);
        let Some(fallback) = fallback_state(&store) else {
            return Err(PersistenceError::EmptySnapshot(snapshot.object_id));
        };

        self.current = if store.contains(&snapshot.active_state) {
            snapshot.active_state
        } else {
            warn!(
                "Stored active state {} is missing; using {fallback}",
                snapshot.active_state
            );
            fallback
        };
        self.store = store;
        self.history = snapshot.history.resized(self.config.max_history_size);
        self.revision += 1;
        self.dirty = false;
        self.last_saved = Some(snapshot.saved_at);
        self.resting = Duration::ZERO;

        info!(
            "Loaded {} states for {}",
            self.store.len(),
            self.object_id
        );
        Ok(())
    }
}

/// The default state, or the first state when none is flagged.
fn fallback_state(store: &ObjectStateStore) -> Option<StateId> {
    store
        .default_state()
        .or_else(|| store.states().first())
        .map(|state| state.id)
}
