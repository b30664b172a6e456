//! Storage record models for the favorites file.
//!
//! Kept separate from the in-memory `HashSet` the engine works with so the
//! on-disk format can evolve independently.

use crate::domain::CityId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Current favorites file format version.
pub const FAVORITES_FORMAT_VERSION: u32 = 1;

/// Top-level structure serialized to the favorites file.
///
/// Ids are kept in a `BTreeSet` so the file content is stable across writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesRecord {
    /// Version of the storage format for future migrations.
    pub version: u32,

    /// Favorite city ids.
    #[serde(default)]
    pub favorites: BTreeSet<CityId>,

    /// Unix timestamp of the last successful write.
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl FavoritesRecord {
    /// Returns the ids as the set type published to observers.
    #[must_use]
    pub fn to_set(&self) -> HashSet<CityId> {
        self.favorites.iter().copied().collect()
    }
}

impl Default for FavoritesRecord {
    fn default() -> Self {
        Self {
            version: FAVORITES_FORMAT_VERSION,
            favorites: BTreeSet::new(),
            updated_at: None,
        }
    }
}
