//! City source abstraction.
//!
//! The engine consumes the city collection through [`CityStore`] only. Network
//! and decoding details stay inside implementations, which report every
//! failure as [`CitySearchError::Load`](crate::domain::CitySearchError::Load).

use crate::domain::error::Result;
use crate::domain::City;
use async_trait::async_trait;

/// Provider of the full, immutable city collection.
///
/// # Implementations
///
/// - [`HttpCityStore`](crate::source::HttpCityStore): JSON over HTTP
/// - [`FileCityStore`](crate::source::FileCityStore): JSON file on disk
#[async_trait]
pub trait CityStore: Send + Sync {
    /// Fetches every city. Called once per session and again on explicit retry.
    ///
    /// # Errors
    ///
    /// Returns [`CitySearchError::Load`](crate::domain::CitySearchError::Load)
    /// if the collection cannot be fetched or decoded.
    async fn fetch_all_cities(&self) -> Result<Vec<City>>;
}
