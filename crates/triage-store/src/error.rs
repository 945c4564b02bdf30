//! Error types for the storage layer.

use std::path::PathBuf;
use thiserror::Error;

use triage_core::ComplaintId;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file I/O error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted JSON could not be parsed. Recoverable by restoring
    /// the file; the store never discards unreadable state.
    #[error("store file {path} is corrupted: {source}")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization of the in-memory state failed.
    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),

    /// Complaint not found in the ledger.
    #[error("complaint not found: {0}")]
    ComplaintNotFound(ComplaintId),

    /// Username already present in the credential store.
    #[error("username '{0}' already exists")]
    UserExists(String),

    /// Username failed validation.
    #[error("invalid username: {0}")]
    InvalidUsername(String),

    /// Password failed validation.
    #[error("invalid password: {0}")]
    InvalidPassword(String),

    /// Password hashing or hash parsing failed.
    #[error("password hash error: {0}")]
    PasswordHash(String),
}
