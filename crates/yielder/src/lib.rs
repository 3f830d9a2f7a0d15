//! # Yielder
//!
//! Application layer of the Yielder dashboard core: configuration, logging
//! and a headless driver for the cursor particle field.
//!
//! ```text
//! AppConfig (TOML) ──► init_tracing
//!        │
//!        ├──► run_headless ──► ParticleAnimator on HeadlessHost
//!        │
//!        └──► StorageConfig::open ──► FavoritesStore / WalletSessionStore
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod driver;
pub mod error;
pub mod logging;

pub use config::{AppConfig, HeadlessConfig, LoggingConfig, StorageConfig};
pub use driver::{field_rng, run_headless, DemoWalletProvider, RunSummary};
pub use error::{AppError, AppResult};
pub use logging::init_tracing;
