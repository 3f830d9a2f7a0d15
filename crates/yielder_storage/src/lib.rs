//! # Yielder Storage
//!
//! Small amounts of dashboard state persisted to a local key-value store.
//!
//! ## Keys
//!
//! | Key                            | Value                                  |
//! |--------------------------------|----------------------------------------|
//! | `yielder_favorites_<category>` | JSON array of IDs                      |
//! | `yielder_wallet`               | `{"address": ..., "walletType": ...}`  |
//!
//! ## Failure policy
//!
//! 1. **Read/write failures** - logged, swallowed; memory stays authoritative
//! 2. **Corrupted values** - treated as absent, key purged
//! 3. **Wallet connect failures** - returned to the caller, state rolled back
//!
//! ## Example
//!
//! ```rust,ignore
//! let store = Arc::new(FileStore::in_data_dir()?);
//! let mut favorites = FavoritesStore::load(Arc::clone(&store));
//! favorites.toggle(FavoriteCategory::Pools, "XLM-USDC");
//!
//! let mut wallet = WalletSessionStore::restore(store);
//! wallet.connect(&provider, WalletKind::Freighter).await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod favorites;
pub mod store;
pub mod wallet;

pub use error::{StorageError, StorageResult};
pub use favorites::{FavoriteCategory, FavoritesStore};
pub use store::{FileStore, KeyValueStore, MemoryStore, KEY_PREFIX, WALLET_KEY};
pub use wallet::{ConnectionError, WalletKind, WalletProvider, WalletSession, WalletSessionStore};
