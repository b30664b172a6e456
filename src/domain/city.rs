//! City domain model.
//!
//! This module defines the immutable [`City`] value that every other layer
//! works with. Cities are loaded once per session from a city source and are
//! never mutated afterwards; identity is the externally assigned `id`.

use serde::{Deserialize, Serialize};

/// Externally assigned city identifier.
pub type CityId = i32;

/// Geographic position of a city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A city that can be listed, searched, and marked as favorite.
///
/// # Fields
///
/// - `id`: Unique identifier assigned by the city source
/// - `name`: City name as shown to the user
/// - `country`: Country code or name
/// - `coordinates`: Position used by detail and map consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub country: String,
    pub coordinates: Coordinates,
}

impl City {
    /// Creates a new city.
    ///
    /// # Examples
    ///
    /// ```
    /// use citysearch::domain::{City, Coordinates};
    ///
    /// let city = City::new(5, "Sydney", "AU", Coordinates::new(-33.86, 151.2));
    /// assert_eq!(city.display_name(), "Sydney, AU");
    /// ```
    pub fn new(
        id: CityId,
        name: impl Into<String>,
        country: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            country: country.into(),
            coordinates,
        }
    }

    /// Returns the `"{name}, {country}"` label used in lists and headers.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}
