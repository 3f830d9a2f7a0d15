//! Application configuration.
//!
//! One TOML file, every section optional:
//!
//! ```toml
//! [field]
//! capacity = 100
//! seed = 42
//!
//! [storage]
//! data_dir = "/var/lib/yielder"
//!
//! [logging]
//! filter = "yielder=debug"
//!
//! [headless]
//! width = 800
//! height = 600
//! frames = 240
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use yielder_effects::{FieldConfig, Viewport};
use yielder_storage::FileStore;

use crate::error::{AppError, AppResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Particle field tunables.
    pub field: FieldConfig,
    /// Persistence settings.
    pub storage: StorageConfig,
    /// Log filtering.
    pub logging: LoggingConfig,
    /// Headless run parameters.
    pub headless: HeadlessConfig,
}

impl AppConfig {
    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidConfig`] for malformed TOML or bad values.
    pub fn from_toml_str(text: &str) -> AppResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| AppError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ConfigRead`] if the file cannot be read, plus
    /// anything [`AppConfig::from_toml_str`] returns.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| AppError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate(&self) -> AppResult<()> {
        self.field.validate()?;
        self.headless.validate()
    }
}

/// Where persisted state lives.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory; the platform's local data dir when unset.
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Opens the configured file store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if no directory is configured and the
    /// platform has no local data directory.
    pub fn open(&self) -> AppResult<FileStore> {
        match &self.data_dir {
            Some(dir) => Ok(FileStore::new(dir)),
            None => Ok(FileStore::in_data_dir()?),
        }
    }
}

/// Log filtering.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "yielder=info,yielder_effects=info,yielder_storage=info".to_string(),
        }
    }
}

/// Parameters for an off-screen run of the particle field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeadlessConfig {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Frames to run.
    pub frames: u32,
    /// Radius of the circular pointer path.
    pub pointer_radius: f32,
    /// Pointer angular speed in radians per frame.
    pub pointer_speed: f32,
    /// Address the demo wallet provider hands out; connect fails when unset.
    pub demo_address: Option<String>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            frames: 240,
            pointer_radius: 120.0,
            pointer_speed: 0.08,
            demo_address: None,
        }
    }
}

impl HeadlessConfig {
    /// Viewport for the run.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    fn validate(&self) -> AppResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AppError::InvalidConfig(
                "headless viewport must be non-empty".to_string(),
            ));
        }
        if self.pointer_radius < 0.0 {
            return Err(AppError::InvalidConfig(
                "pointer_radius must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
