//! # Favorites
//!
//! Per-category sets of favorited IDs (positions, assets, pools, dApps).
//!
//! Each category is persisted as a JSON array under
//! `yielder_favorites_<category>`. The array keeps insertion order; membership
//! is what matters to callers.
//!
//! Persistence is best-effort. If a write fails the in-memory set stays
//! authoritative for the rest of the session.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::StorageError;
use crate::store::{KeyValueStore, KEY_PREFIX};

/// Category of favorited item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FavoriteCategory {
    /// Open positions.
    Positions,
    /// Tokens and assets.
    Assets,
    /// Liquidity pools.
    Pools,
    /// Decentralized applications.
    Dapps,
}

impl FavoriteCategory {
    /// Every category.
    pub const ALL: [Self; 4] = [Self::Positions, Self::Assets, Self::Pools, Self::Dapps];

    /// Lowercase name used in storage keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positions => "positions",
            Self::Assets => "assets",
            Self::Pools => "pools",
            Self::Dapps => "dapps",
        }
    }

    /// Storage key for this category.
    #[must_use]
    pub fn storage_key(self) -> String {
        format!("{KEY_PREFIX}favorites_{}", self.as_str())
    }
}

impl fmt::Display for FavoriteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FavoriteCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown favorite category: {s}"))
    }
}

/// Favorites for every category, backed by a key-value store.
pub struct FavoritesStore<S> {
    store: S,
    sets: HashMap<FavoriteCategory, Vec<String>>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Loads every category from `store`.
    ///
    /// Missing or unreadable categories start empty. Corrupted values are
    /// removed from the store.
    pub fn load(store: S) -> Self {
        let sets = FavoriteCategory::ALL
            .into_iter()
            .map(|category| (category, read_category(&store, category)))
            .collect();
        Self { store, sets }
    }

    /// IDs in `category`, in the order they were added.
    #[must_use]
    pub fn get(&self, category: FavoriteCategory) -> &[String] {
        self.sets.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    /// True if `id` is a favorite in `category`.
    #[must_use]
    pub fn has(&self, category: FavoriteCategory, id: &str) -> bool {
        self.get(category).iter().any(|existing| existing == id)
    }

    /// Number of favorites in `category`.
    #[must_use]
    pub fn count(&self, category: FavoriteCategory) -> usize {
        self.get(category).len()
    }

    /// Number of favorites across all categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.sets.values().map(Vec::len).sum()
    }

    /// Flips membership of `id` in `category` and persists the result.
    ///
    /// Returns the new membership.
    pub fn toggle(&mut self, category: FavoriteCategory, id: &str) -> bool {
        let set = self.sets.entry(category).or_default();
        let now_member = if let Some(pos) = set.iter().position(|existing| existing == id) {
            set.remove(pos);
            false
        } else {
            set.push(id.to_string());
            true
        };
        self.persist(category);
        now_member
    }

    /// Empties `category` and persists the result.
    pub fn clear(&mut self, category: FavoriteCategory) {
        self.sets.insert(category, Vec::new());
        self.persist(category);
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self, category: FavoriteCategory) {
        let key = category.storage_key();
        let result = serde_json::to_string(self.get(category))
            .map_err(|e| e.to_string())
            .and_then(|json| self.store.set(&key, &json).map_err(|e| e.to_string()));

        if let Err(reason) = result {
            tracing::warn!(%key, %reason, "failed to persist favorites");
        }
    }
}

fn read_category<S: KeyValueStore>(store: &S, category: FavoriteCategory) -> Vec<String> {
    let key = category.storage_key();
    let parsed = match store.get(&key) {
        Ok(Some(raw)) => serde_json::from_str::<Vec<String>>(&raw).map_err(|e| e.to_string()),
        Ok(None) => return Vec::new(),
        Err(StorageError::Corrupt { reason, .. }) => Err(reason),
        Err(e) => {
            tracing::warn!(%key, error = %e, "failed to read favorites");
            return Vec::new();
        }
    };

    match parsed {
        Ok(mut ids) => {
            let mut seen = std::collections::HashSet::new();
            ids.retain(|id| seen.insert(id.clone()));
            ids
        }
        Err(reason) => {
            tracing::warn!(%key, %reason, "discarding corrupted favorites");
            if let Err(e) = store.remove(&key) {
                tracing::warn!(%key, error = %e, "failed to purge corrupted favorites");
            }
            Vec::new()
        }
    }
}
