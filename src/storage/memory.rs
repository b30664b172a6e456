//! Process-local favorites store.
//!
//! Same observable semantics as the JSON store without touching the disk.
//! Used for ephemeral sessions and as a building block in tests.

use crate::domain::error::Result;
use crate::domain::CityId;
use crate::storage::backend::FavoritesStore;
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::watch;

/// In-memory favorites store.
#[derive(Debug)]
pub struct InMemoryFavoritesStore {
    sender: watch::Sender<HashSet<CityId>>,
}

impl InMemoryFavoritesStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_favorites(std::iter::empty())
    }

    /// Creates a store pre-populated with `favorites`.
    ///
    /// # Examples
    ///
    /// ```
    /// use citysearch::storage::{FavoritesStore, InMemoryFavoritesStore};
    ///
    /// let store = InMemoryFavoritesStore::with_favorites([2, 4]);
    /// assert!(store.observe_favorites().borrow().contains(&4));
    /// ```
    pub fn with_favorites(favorites: impl IntoIterator<Item = CityId>) -> Self {
        let (sender, _receiver) = watch::channel(favorites.into_iter().collect());
        Self { sender }
    }

    fn apply(&self, change: impl FnOnce(&mut HashSet<CityId>) -> bool) {
        self.sender.send_if_modified(change);
    }
}

impl Default for InMemoryFavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FavoritesStore for InMemoryFavoritesStore {
    fn observe_favorites(&self) -> watch::Receiver<HashSet<CityId>> {
        self.sender.subscribe()
    }

    async fn add_favorite(&self, city_id: CityId) -> Result<()> {
        self.apply(|favorites| favorites.insert(city_id));
        Ok(())
    }

    async fn remove_favorite(&self, city_id: CityId) -> Result<()> {
        self.apply(|favorites| favorites.remove(&city_id));
        Ok(())
    }

    async fn toggle_favorite(&self, city_id: CityId) -> Result<()> {
        self.apply(|favorites| {
            if !favorites.remove(&city_id) {
                favorites.insert(city_id);
            }
            true
        });
        Ok(())
    }

    async fn clear_favorites(&self) -> Result<()> {
        self.apply(|favorites| {
            let changed = !favorites.is_empty();
            favorites.clear();
            changed
        });
        Ok(())
    }
}
