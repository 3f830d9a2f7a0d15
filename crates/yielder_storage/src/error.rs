//! # Storage Error Types
//!
//! Callers of the favorites and wallet stores never see these directly:
//! persistence failures are logged and swallowed. They surface only from the
//! raw [`KeyValueStore`](crate::store::KeyValueStore) API.

use thiserror::Error;

/// Errors from a key-value store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Key contains characters the backing store cannot represent.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Backing store I/O failed.
    #[error("storage I/O failed for {key}: {reason}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying failure.
        reason: String,
    },

    /// Stored value exists but is not valid text.
    #[error("corrupted value for {key}: {reason}")]
    Corrupt {
        /// Key being accessed.
        key: String,
        /// Why the value could not be decoded.
        reason: String,
    },

    /// Store cannot be used in this environment.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
