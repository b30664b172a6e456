//! citysearch: browse a large city collection with prefix search and favorites.
//!
//! The crate provides:
//! - Case-insensitive prefix search over city names, sorted by name then country
//! - A favorites set persisted to a JSON file and merged into every result
//! - A reactive engine publishing a single replayable [`ViewState`]
//! - A selection cell shared between list, detail, and map consumers
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Search and favorites merge                       │
//! │  - View state derivation                            │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Stores        │   │ Worker Layer  │
//! │ (ui/)         │   │ (source/,     │   │ (worker/)     │
//! │ - View models │   │  storage/)    │   │ - Store calls │
//! │ - Rendering   │   │ - HTTP, file  │   │ - Responses   │
//! │               │   │ - JSON I/O    │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - City model (domain/city)                         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based span export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/citysearch/config.toml
//! cities_url = "https://example.com/cities.json"
//! favorites_path = "~/.local/share/citysearch/favorites.json"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use citysearch::{initialize, Config};
//!
//! # async fn run() -> citysearch::Result<()> {
//! let config = Config {
//!     cities_file: Some("cities.json".into()),
//!     ephemeral: true,
//!     ..Default::default()
//! };
//!
//! let engine = initialize(&config)?;
//! engine.set_query("Al");
//! for row in engine.view_state().cities() {
//!     println!("{}", row.display_name);
//! }
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod source;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Engine, Event, SearchState, SharedSelection};
pub use domain::{City, CityId, CitySearchError, Coordinates, Result};
pub use ui::{CityView, ViewState};

use serde::Deserialize;
use source::{CityStore, FileCityStore, HttpCityStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storage::{FavoritesStore, InMemoryFavoritesStore, JsonFavoritesStore};

/// Favorites file name inside the data directory.
const FAVORITES_FILE_NAME: &str = "favorites.json";

/// Application configuration.
///
/// Loaded from a TOML file; every field is optional. Command line flags are
/// applied on top by the binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// URL of the JSON city feed.
    pub cities_url: Option<String>,

    /// Local JSON city file. Takes precedence over `cities_url`.
    pub cities_file: Option<PathBuf>,

    /// Favorites file. Default: `<data_dir>/favorites.json`.
    pub favorites_path: Option<PathBuf>,

    /// Keep favorites in memory only.
    pub ephemeral: bool,

    /// Tracing filter directive, e.g. `debug` or `citysearch=trace`.
    ///
    /// Default: `"info"`
    pub trace_level: Option<String>,
}

impl Config {
    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or
    /// [`CitySearchError::Config`] if it is not valid configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = infrastructure::expand_tilde(path);
        let contents = std::fs::read_to_string(&path)?;
        Self::from_toml(&contents)
            .map_err(|e| CitySearchError::Config(format!("{}: {e}", path.display())))
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CitySearchError::Config`] on syntax errors or unknown keys.
    ///
    /// # Example
    ///
    /// ```rust
    /// use citysearch::Config;
    ///
    /// let config = Config::from_toml("cities_url = \"http://localhost/cities.json\"")?;
    /// assert_eq!(config.cities_url.as_deref(), Some("http://localhost/cities.json"));
    /// assert!(!config.ephemeral);
    /// # Ok::<(), citysearch::CitySearchError>(())
    /// ```
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CitySearchError::Config(e.to_string()))
    }

    /// Resolves the favorites file path, expanding `~`.
    #[must_use]
    pub fn favorites_file(&self) -> PathBuf {
        self.favorites_path.as_ref().map_or_else(
            || infrastructure::get_data_dir().join(FAVORITES_FILE_NAME),
            |path| infrastructure::expand_tilde(path),
        )
    }

    /// Builds the configured city source.
    ///
    /// # Errors
    ///
    /// Returns [`CitySearchError::Config`] if neither `cities_file` nor
    /// `cities_url` is set.
    pub fn city_source(&self) -> Result<Arc<dyn CityStore>> {
        if let Some(file) = &self.cities_file {
            return Ok(Arc::new(FileCityStore::new(infrastructure::expand_tilde(file))));
        }
        if let Some(url) = &self.cities_url {
            return Ok(Arc::new(HttpCityStore::new(url.clone())));
        }
        Err(CitySearchError::Config(
            "no city source configured: set cities_file or cities_url".to_string(),
        ))
    }

    /// Builds the favorites store: in-memory when `ephemeral`, otherwise the JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the favorites file exists but cannot be read.
    pub fn favorites_store(&self) -> Result<Arc<dyn FavoritesStore>> {
        if self.ephemeral {
            return Ok(Arc::new(InMemoryFavoritesStore::new()));
        }
        Ok(Arc::new(JsonFavoritesStore::open(self.favorites_file())?))
    }
}

/// Builds the stores from `config` and starts an engine with a fresh selection.
///
/// Must be called from within a Tokio runtime.
///
/// # Errors
///
/// Returns an error if no city source is configured or the favorites file
/// cannot be opened.
pub fn initialize(config: &Config) -> Result<Engine> {
    tracing::debug!(?config, "initializing citysearch");

    let cities = config.city_source()?;
    let favorites = config.favorites_store()?;

    Ok(Engine::start(cities, favorites, SharedSelection::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.favorites_file().ends_with("favorites.json"));
    }

    #[test]
    fn full_config_parses() {
        let config = Config::from_toml(
            r#"
            cities_url = "https://example.com/cities.json"
            cities_file = "/tmp/cities.json"
            favorites_path = "/tmp/fav.json"
            ephemeral = true
            trace_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.cities_file, Some(PathBuf::from("/tmp/cities.json")));
        assert_eq!(config.favorites_file(), PathBuf::from("/tmp/fav.json"));
        assert!(config.ephemeral);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml("scan_depth = 4").unwrap_err();
        assert!(matches!(err, CitySearchError::Config(_)));
    }

    #[test]
    fn city_source_requires_a_location() {
        let err = Config::default().city_source().err().unwrap();
        assert!(matches!(err, CitySearchError::Config(_)));

        let config = Config {
            cities_url: Some("http://localhost:1/cities.json".to_string()),
            ..Default::default()
        };
        assert!(config.city_source().is_ok());
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "cities_file = \"cities.json\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.cities_file, Some(PathBuf::from("cities.json")));
    }
}
