//! # Effects Error Types
//!
//! The particle field itself never fails at runtime. Errors only come from
//! loading and validating configuration.

use thiserror::Error;

/// Errors that can occur while configuring the particle field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectsError {
    /// Configuration values are out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration file {path}: {reason}")]
    ConfigRead {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },
}

/// Result type for effects operations.
pub type EffectsResult<T> = Result<T, EffectsError>;
