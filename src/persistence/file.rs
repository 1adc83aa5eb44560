//! Directory-backed repository storing one JSON document per object.

use super::{PersistenceError, StateRepository, StateSnapshot};
use crate::core::ObjectId;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Repository writing `<dir>/<object-id>.json`.
///
/// Writes are atomic: the document is written to a temporary file and then
/// renamed over the previous one, so a crash never leaves a torn document.
/// Object ids may contain ASCII letters, digits, `-`, `_` and `.`, and must
/// not start with a dot.
#[derive(Clone, Debug)]
pub struct FileRepository {
    dir: PathBuf,
}

impl FileRepository {
    /// Use `dir` for storage, creating it if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, object_id: &ObjectId) -> Result<PathBuf, PersistenceError> {
        let key = object_id.as_str();
        let usable = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !usable {
            return Err(PersistenceError::InvalidObjectId(object_id.clone()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StateRepository for FileRepository {
    fn save(&self, object_id: &ObjectId, snapshot: &StateSnapshot) -> Result<(), PersistenceError> {
        let path = self.path_for(object_id)?;
        let json = snapshot.to_json()?;

        let temp_path = path.with_extension("json.tmp");
        let written = fs::write(&temp_path, json).and_then(|()| fs::rename(&temp_path, &path));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!("Wrote snapshot for '{}' to {}", object_id, path.display());
        Ok(())
    }

    fn load(&self, object_id: &ObjectId) -> Result<Option<StateSnapshot>, PersistenceError> {
        let path = self.path_for(object_id)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        StateSnapshot::from_json(&json).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NewState, StateHistory};
    use crate::store::ObjectStateStore;

    fn snapshot(object: &ObjectId) -> StateSnapshot {
        let mut store = ObjectStateStore::new();
        let idle = store.add_state(NewState::named("idle"));
        store.add_state(NewState::named("active"));
        StateSnapshot::new(object.clone(), store.into_states(), idle, StateHistory::new())
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileRepository::open(dir.path()).unwrap();
        let id = ObjectId::new("hero-banner_2");
        let snap = snapshot(&id);

        repo.save(&id, &snap).unwrap();

        assert!(dir.path().join("hero-banner_2.json").exists());
        assert!(!dir.path().join("hero-banner_2.json.tmp").exists());
        assert_eq!(repo.load(&id).unwrap(), Some(snap));
    }

    #[test]
    fn missing_document_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileRepository::open(dir.path()).unwrap();
        assert!(repo.load(&ObjectId::new("absent")).unwrap().is_none());
    }

    #[test]
    fn open_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let repo = FileRepository::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(repo.dir(), nested.as_path());
    }

    #[test]
    fn path_like_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileRepository::open(dir.path()).unwrap();

        for bad in ["../escape", "a/b", "", ".hidden"] {
            let id = ObjectId::new(bad);
            assert!(matches!(
                repo.save(&id, &snapshot(&id)),
                Err(PersistenceError::InvalidObjectId(_))
            ));
        }
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileRepository::open(dir.path()).unwrap();
        let blocker = dir.path().join("stuck.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();
        let id = ObjectId::new("stuck");

        assert!(matches!(
            repo.save(&id, &snapshot(&id)),
            Err(PersistenceError::Io(_))
        ));
        assert!(!dir.path().join("stuck.json.tmp").exists());
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileRepository::open(dir.path()).unwrap();
        fs::write(dir.path().join("broken.json"), "{ nope").unwrap();

        assert!(matches!(
            repo.load(&ObjectId::new("broken")),
            Err(PersistenceError::DeserializationFailed(_))
        ));
    }
}
