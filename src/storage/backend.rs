//! Favorites store abstraction.
//!
//! This module defines the [`FavoritesStore`] trait that abstracts over
//! persistence backends for the favorites set. The engine depends only on this
//! trait, so backends can be swapped without touching business logic.
//!
//! # Contract
//!
//! - `observe_favorites` returns a receiver whose current value is the
//!   persisted set; every successful write publishes the new set, either
//!   before returning or afterwards
//! - A failed write returns [`CitySearchError::Persist`](crate::domain::CitySearchError::Persist)
//!   and leaves both the persisted and the published set unchanged
//! - Membership is a set: adding an existing id or removing a missing one is
//!   a successful no-op

use crate::domain::error::Result;
use crate::domain::CityId;
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::watch;

/// Abstraction over persistent favorites backends.
///
/// # Implementations
///
/// - [`JsonFavoritesStore`](crate::storage::JsonFavoritesStore): JSON file with atomic writes
/// - [`InMemoryFavoritesStore`](crate::storage::InMemoryFavoritesStore): process-local set
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Subscribes to the favorites set. The receiver replays the current value.
    fn observe_favorites(&self) -> watch::Receiver<HashSet<CityId>>;

    /// Marks a city as favorite.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    async fn add_favorite(&self, city_id: CityId) -> Result<()>;

    /// Unmarks a city.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    async fn remove_favorite(&self, city_id: CityId) -> Result<()>;

    /// Flips the membership of a city.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    async fn toggle_favorite(&self, city_id: CityId) -> Result<()>;

    /// Removes every favorite.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    async fn clear_favorites(&self) -> Result<()>;

    /// Sets the membership of a city to `favorite`.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    async fn set_favorite(&self, city_id: CityId, favorite: bool) -> Result<()> {
        if favorite {
            self.add_favorite(city_id).await
        } else {
            self.remove_favorite(city_id).await
        }
    }
}
