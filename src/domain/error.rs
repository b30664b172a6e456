//! Error types for the city search engine.
//!
//! This module defines the centralized error type [`CitySearchError`] and a type
//! alias [`Result`] for convenient error handling throughout the crate. All
//! errors are implemented using the `thiserror` crate.

use thiserror::Error;

/// The main error type for city search operations.
///
/// Load and persist failures are recoverable: the engine turns them into view
/// state (or a rollback) rather than propagating them to the presentation.
///
/// # Examples
///
/// ```
/// use citysearch::domain::CitySearchError;
///
/// let err = CitySearchError::Load("connection refused".to_string());
/// assert_eq!(err.to_string(), "Failed to load cities: connection refused");
/// ```
#[derive(Debug, Error)]
pub enum CitySearchError {
    /// Fetching the city collection failed.
    ///
    /// Covers network errors, non-success HTTP statuses, and JSON decoding
    /// failures inside a city source.
    #[error("Failed to load cities: {0}")]
    Load(String),

    /// Writing a favorites change failed.
    ///
    /// The favorites store leaves its persisted and observed sets untouched
    /// when this is returned.
    #[error("Failed to persist favorites: {0}")]
    Persist(String),

    /// The favorites file exists but cannot be parsed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for city search operations.
pub type Result<T> = std::result::Result<T, CitySearchError>;
