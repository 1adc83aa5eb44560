//! In-process repository.

use super::{PersistenceError, StateRepository, StateSnapshot};
use crate::core::ObjectId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Repository backed by a shared in-memory map.
///
/// Clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryRepository {
    snapshots: Arc<RwLock<HashMap<ObjectId, StateSnapshot>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects stored.
    pub fn len(&self) -> usize {
        self.snapshots.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.snapshots
            .read()
            .map(|map| map.contains_key(object_id))
            .unwrap_or(false)
    }
}

fn poisoned() -> PersistenceError {
    PersistenceError::Backend("memory repository lock poisoned".to_string())
}

impl StateRepository for MemoryRepository {
    fn save(&self, object_id: &ObjectId, snapshot: &StateSnapshot) -> Result<(), PersistenceError> {
        let mut map = self.snapshots.write().map_err(|_| poisoned())?;
        map.insert(object_id.clone(), snapshot.clone());
        Ok(())
    }

    fn load(&self, object_id: &ObjectId) -> Result<Option<StateSnapshot>, PersistenceError> {
        let map = self.snapshots.read().map_err(|_| poisoned())?;
        Ok(map.get(object_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NewState, StateHistory};
    use crate::store::ObjectStateStore;

    fn snapshot(object: &str) -> StateSnapshot {
        let mut store = ObjectStateStore::new();
        let idle = store.add_state(NewState::named("idle"));
        StateSnapshot::new(
            ObjectId::new(object),
            store.into_states(),
            idle,
            StateHistory::new(),
        )
    }

    #[test]
    fn load_missing_returns_none() {
        let repo = MemoryRepository::new();
        assert!(repo.load(&ObjectId::new("nothing")).unwrap().is_none());
        assert!(repo.is_empty());
    }

    #[test]
    fn save_then_load() {
        let repo = MemoryRepository::new();
        let id = ObjectId::new("button");
        let snap = snapshot("button");

        repo.save(&id, &snap).unwrap();

        assert!(repo.contains(&id));
        assert_eq!(repo.load(&id).unwrap(), Some(snap));
    }

    #[test]
    fn clones_share_storage() {
        let repo = MemoryRepository::new();
        let other = repo.clone();
        let id = ObjectId::new("panel");

        other.save(&id, &snapshot("panel")).unwrap();

        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn save_replaces_previous_snapshot() {
        let repo = MemoryRepository::new();
        let id = ObjectId::new("card");
        repo.save(&id, &snapshot("card")).unwrap();
        let newer = snapshot("card");
        repo.save(&id, &newer).unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.load(&id).unwrap(), Some(newer));
    }
}
