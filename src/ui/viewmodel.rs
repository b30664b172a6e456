//! View model types representing the externally observed city list state.
//!
//! View models are immutable, recomputed on every derivation, and never
//! persisted. They carry display-ready data so that presentation code contains
//! no business logic.
//!
//! # Example
//!
//! ```rust
//! use citysearch::domain::{City, Coordinates};
//! use citysearch::ui::{CityView, ViewState};
//!
//! let city = City::new(2, "Albuquerque", "US", Coordinates::new(35.08, -106.65));
//! let state = ViewState::Success {
//!     cities: vec![CityView::new(city, true)],
//!     query: String::new(),
//!     favorites_only: true,
//! };
//! assert_eq!(state.cities()[0].display_name, "Albuquerque, US");
//! ```

use crate::domain::{City, CityId};

/// The single state published to presentation consumers.
///
/// A success with zero results is always collapsed into [`ViewState::Empty`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    /// The city collection has not been loaded yet (or a first load is in flight).
    #[default]
    Loading,

    /// At least one city matches the current filters.
    Success {
        /// Matching cities in name/country order.
        cities: Vec<CityView>,
        /// Query text the result was derived from, as typed.
        query: String,
        /// Whether the favorites-only filter was active.
        favorites_only: bool,
    },

    /// The collection is loaded but nothing matches the current filters.
    Empty,

    /// No collection could be loaded.
    Error {
        /// Human-readable failure description.
        message: String,
    },
}

impl ViewState {
    /// Returns the visible cities, or an empty slice for non-success states.
    #[must_use]
    pub fn cities(&self) -> &[CityView] {
        match self {
            Self::Success { cities, .. } => cities,
            Self::Loading | Self::Empty | Self::Error { .. } => &[],
        }
    }

    /// Short lowercase name of the variant, used in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Success { .. } => "success",
            Self::Empty => "empty",
            Self::Error { .. } => "error",
        }
    }
}

/// Display information for a single city row.
#[derive(Debug, Clone, PartialEq)]
pub struct CityView {
    /// The underlying city.
    pub city: City,

    /// Whether the city is in the observed favorites set.
    pub is_favorite: bool,

    /// `"{name}, {country}"`.
    pub display_name: String,

    /// `"{latitude}, {longitude}"` with four decimals, for detail screens.
    pub coordinates_text: String,
}

impl CityView {
    /// Builds a view row for `city`.
    #[must_use]
    pub fn new(city: City, is_favorite: bool) -> Self {
        let display_name = city.display_name();
        let coordinates_text = format!(
            "{:.4}, {:.4}",
            city.coordinates.latitude, city.coordinates.longitude
        );
        Self {
            city,
            is_favorite,
            display_name,
            coordinates_text,
        }
    }

    /// Id of the underlying city.
    #[must_use]
    pub const fn id(&self) -> CityId {
        self.city.id
    }
}
