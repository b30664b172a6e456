//! JSON file-based favorites store.
//!
//! This module provides a simple, human-readable favorites store using JSON
//! serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "favorites": [707860, 2643743],
//!   "updated_at": 1760890000
//! }
//! ```

use crate::domain::error::{CitySearchError, Result};
use crate::domain::CityId;
use crate::storage::backend::FavoritesStore;
use crate::storage::models::FavoritesRecord;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tokio::sync::{watch, Mutex};
use tracing::Instrument;

/// JSON file favorites store.
///
/// The whole set is kept in memory and rewritten on every effective change.
/// Writes are serialized by an internal async lock, and the new set is
/// published to observers only after it reached the disk.
pub struct JsonFavoritesStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy of the file, loaded on open.
    data: Mutex<FavoritesRecord>,

    /// Publishes the set after each successful write.
    sender: watch::Sender<HashSet<CityId>>,
}

impl JsonFavoritesStore {
    /// Opens a favorites file, or starts empty if it does not exist yet.
    ///
    /// Parent directories are created automatically. The file itself is
    /// created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use citysearch::storage::JsonFavoritesStore;
    ///
    /// let store = JsonFavoritesStore::open("/tmp/citysearch/favorites.json")?;
    /// # Ok::<(), citysearch::CitySearchError>(())
    /// ```
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "opening favorites file");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no favorites file yet, starting empty");
            FavoritesRecord::default()
        };

        tracing::debug!(count = data.favorites.len(), "favorites loaded");

        let (sender, _receiver) = watch::channel(data.to_set());

        Ok(Self {
            file_path,
            data: Mutex::new(data),
            sender,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<FavoritesRecord> {
        let contents = std::fs::read_to_string(path)?;
        let data: FavoritesRecord = serde_json::from_str(&contents)
            .map_err(|e| CitySearchError::Storage(format!("failed to parse favorites file: {e}")))?;

        tracing::debug!(version = data.version, count = data.favorites.len(), "loaded favorites file");
        Ok(data)
    }

    /// Writes a record to disk atomically.
    async fn save_to_file(&self, record: &FavoritesRecord) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.file_path).await?;
        Ok(())
    }

    /// Applies `change` to a copy of the set, persists it, then commits and publishes.
    ///
    /// A change that leaves the set as it was is not written.
    async fn update<F>(&self, operation: &str, change: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeSet<CityId>) + Send,
    {
        let span = tracing::debug_span!("json_favorites_update", operation);

        async move {
            let mut data = self.data.lock().await;
            let mut next = data.clone();
            change(&mut next.favorites);

            if next.favorites == data.favorites {
                tracing::trace!("favorites unchanged, skipping write");
                return Ok(());
            }

            next.updated_at = Some(chrono::Utc::now().timestamp());

            self.save_to_file(&next).await.map_err(|e| {
                tracing::debug!(error = %e, "favorites write failed");
                CitySearchError::Persist(format!("{operation}: {e}"))
            })?;

            *data = next;
            self.sender.send_replace(data.to_set());

            tracing::debug!(count = data.favorites.len(), "favorites saved");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl FavoritesStore for JsonFavoritesStore {
    fn observe_favorites(&self) -> watch::Receiver<HashSet<CityId>> {
        self.sender.subscribe()
    }

    async fn add_favorite(&self, city_id: CityId) -> Result<()> {
        self.update("add favorite", |favorites| {
            favorites.insert(city_id);
        })
        .await
    }

    async fn remove_favorite(&self, city_id: CityId) -> Result<()> {
        self.update("remove favorite", |favorites| {
            favorites.remove(&city_id);
        })
        .await
    }

    async fn toggle_favorite(&self, city_id: CityId) -> Result<()> {
        self.update("toggle favorite", |favorites| {
            if !favorites.remove(&city_id) {
                favorites.insert(city_id);
            }
        })
        .await
    }

    async fn clear_favorites(&self) -> Result<()> {
        self.update("clear favorites", BTreeSet::clear).await
    }
}

impl std::fmt::Debug for JsonFavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFavoritesStore")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}
