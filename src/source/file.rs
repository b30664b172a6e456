//! File-backed city source, for offline use.

use crate::domain::error::{CitySearchError, Result};
use crate::domain::City;
use crate::source::backend::CityStore;
use crate::source::dto::decode_cities;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads the city feed from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileCityStore {
    path: PathBuf,
}

impl FileCityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CityStore for FileCityStore {
    async fn fetch_all_cities(&self) -> Result<Vec<City>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            CitySearchError::Load(format!("failed to read {}: {e}", self.path.display()))
        })?;

        let cities = decode_cities(&bytes)?;
        tracing::debug!(path = ?self.path, count = cities.len(), "city file decoded");
        Ok(cities)
    }
}
