//! # Application Error Types

use thiserror::Error;
use yielder_effects::EffectsError;
use yielder_storage::StorageError;

/// Errors surfaced by the application layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {reason}")]
    ConfigRead {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },

    /// Config text is malformed or out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Particle field configuration rejected.
    #[error(transparent)]
    Effects(#[from] EffectsError),

    /// Storage could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Logging could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
