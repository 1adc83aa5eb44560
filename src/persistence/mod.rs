//! Persistence of state collections.
//!
//! A [`StateRepository`] stores and retrieves whole [`StateSnapshot`]s keyed
//! by [`ObjectId`]. The controller never calls a repository directly: it
//! builds Stillwater effects that run against a repository environment, so
//! the I/O stays at the edge and the caller decides when to run it.
//!
//! Two repositories ship with the crate:
//! - [`MemoryRepository`]: in-process map, useful for previews and tests
//! - [`FileRepository`]: one JSON document per object in a directory

pub mod error;
mod file;
mod memory;
mod snapshot;

pub use error::PersistenceError;
pub use file::FileRepository;
pub use memory::MemoryRepository;
pub use snapshot::{StateSnapshot, SNAPSHOT_VERSION};

use crate::core::ObjectId;
use std::sync::Arc;

/// Document store holding one snapshot per object.
pub trait StateRepository: Send + Sync {
    /// Store the full collection for `object_id`, replacing any previous one.
    fn save(&self, object_id: &ObjectId, snapshot: &StateSnapshot) -> Result<(), PersistenceError>;

    /// Retrieve the collection for `object_id`, or `None` if nothing is stored.
    fn load(&self, object_id: &ObjectId) -> Result<Option<StateSnapshot>, PersistenceError>;
}

impl<R: StateRepository + ?Sized> StateRepository for Arc<R> {
    fn save(&self, object_id: &ObjectId, snapshot: &StateSnapshot) -> Result<(), PersistenceError> {
        (**self).save(object_id, snapshot)
    }

    fn load(&self, object_id: &ObjectId) -> Result<Option<StateSnapshot>, PersistenceError> {
        (**self).load(object_id)
    }
}
