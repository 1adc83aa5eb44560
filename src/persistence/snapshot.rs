//! Serializable snapshot of an object's state collection.

use super::error::PersistenceError;
use crate::core::{ObjectId, ObjectState, StateHistory, StateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to restore an object's states.
///
/// Snapshots carry the full collection; there is no partial-update format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Object the states belong to
    pub object_id: ObjectId,

    /// States in sort order
    pub states: Vec<ObjectState>,

    /// State active when the snapshot was taken
    pub active_state: StateId,

    /// Retained state change history
    pub history: StateHistory,

    /// When the snapshot was taken
    pub saved_at: DateTime<Utc>,
}

impl StateSnapshot {
    pub fn new(
        object_id: ObjectId,
        states: Vec<ObjectState>,
        active_state: StateId,
        history: StateHistory,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            object_id,
            states,
            active_state,
            history,
            saved_at: Utc::now(),
        }
    }

    /// Human-readable JSON encoding.
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Compact binary encoding.
    pub fn to_binary(&self) -> Result<Vec<u8>, PersistenceError> {
        bincode::serialize(self).map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, PersistenceError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    fn check_version(&self) -> Result<(), PersistenceError> {
        if self.version > SNAPSHOT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        Easing, NewState, NewTransition, PropertyValue, StateHistoryEntry, StateProperties,
        TransitionAnimation, TransitionTrigger, Vec3,
    };
    use crate::store::ObjectStateStore;

    fn sample() -> StateSnapshot {
        let mut store = ObjectStateStore::new();
        let idle = store.add_state(NewState::named("idle").with_properties(
            StateProperties::new()
                .with_position(Vec3::ZERO)
                .with_color("#ffffff")
                .with_custom("label", PropertyValue::Text("Idle".into())),
        ));
        let mut to_idle = NewTransition::new(idle, TransitionTrigger::Timer { after_ms: 2000 });
        to_idle.animation =
            TransitionAnimation::new(400, Easing::cubic_bezier(0.4, 0.0, 0.2, 1.0)).with_delay(50);
        let hover = store.add_state(
            NewState::named("hover")
                .with_properties(StateProperties::new().with_scale(Vec3::splat(1.2)))
                .with_transition(to_idle),
        );
        store
            .add_transition(
                &idle,
                NewTransition::new(hover, TransitionTrigger::Custom("poke".into())),
            )
            .unwrap();

        let history =
            StateHistory::with_capacity(5).record(StateHistoryEntry::now(hover, TransitionTrigger::Hover));
        StateSnapshot::new(ObjectId::new("cube-1"), store.into_states(), hover, history)
    }

    #[test]
    fn json_round_trip_preserves_everything() {
        let snapshot = sample();
        let json = snapshot.to_json().unwrap();
        assert_eq!(StateSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn binary_round_trip_preserves_everything() {
        let snapshot = sample();
        let bytes = snapshot.to_binary().unwrap();
        assert_eq!(StateSnapshot::from_binary(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn binary_is_more_compact_than_json() {
        let snapshot = sample();
        assert!(snapshot.to_binary().unwrap().len() < snapshot.to_json().unwrap().len());
    }

    #[test]
    fn newer_versions_are_rejected() {
        let mut snapshot = sample();
        snapshot.version = SNAPSHOT_VERSION + 1;
        let json = snapshot.to_json().unwrap();

        assert!(matches!(
            StateSnapshot::from_json(&json),
            Err(PersistenceError::UnsupportedVersion { found, supported })
                if found == SNAPSHOT_VERSION + 1 && supported == SNAPSHOT_VERSION
        ));
    }

    #[test]
    fn garbage_fails_to_deserialize() {
        assert!(matches!(
            StateSnapshot::from_json("{not json"),
            Err(PersistenceError::DeserializationFailed(_))
        ));
        assert!(matches!(
            StateSnapshot::from_binary(&[1, 2, 3]),
            Err(PersistenceError::DeserializationFailed(_))
        ));
    }
}
