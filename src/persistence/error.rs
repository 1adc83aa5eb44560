//! Persistence error types.

use crate::core::ObjectId;
use thiserror::Error;

/// Errors that can occur while saving or loading state collections.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing store failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot belongs to a different object
    #[error("Snapshot belongs to object '{found}', expected '{expected}'")]
    ObjectMismatch { expected: ObjectId, found: ObjectId },

    /// Snapshot contains no states
    #[error("Snapshot for object '{0}' contains no states")]
    EmptySnapshot(ObjectId),

    /// Object id cannot be used as a storage key
    #[error("Object id '{0}' cannot be used as a storage key")]
    InvalidObjectId(ObjectId),

    /// The backing store rejected the request
    #[error("Storage backend error: {0}")]
    Backend(String),
}
