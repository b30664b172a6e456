//! Worker message types exchanged between the engine and its background worker.
//!
//! The engine never awaits a store itself. It posts a [`WorkerMessage`] and
//! later receives the matching [`WorkerResponse`] as an event. Every message
//! carries the id that lets the engine recognize stale responses.

use crate::domain::{City, CityId};

/// Requests sent from the engine to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Fetch the full city collection.
    LoadCities {
        /// Load request id assigned by the engine.
        request: u64,
    },

    /// Persist the desired favorite membership of one city.
    SetFavorite {
        /// City whose membership changes.
        city_id: CityId,

        /// Desired membership.
        favorite: bool,

        /// Intent id assigned by the engine.
        intent: u64,
    },
}

impl WorkerMessage {
    /// Creates a `LoadCities` message.
    #[must_use]
    pub const fn load_cities(request: u64) -> Self {
        Self::LoadCities { request }
    }

    /// Creates a `SetFavorite` message.
    #[must_use]
    pub const fn set_favorite(city_id: CityId, favorite: bool, intent: u64) -> Self {
        Self::SetFavorite {
            city_id,
            favorite,
            intent,
        }
    }
}

/// Responses sent from the worker back to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    /// The city source returned a collection.
    CitiesLoaded {
        /// Request id of the originating load.
        request: u64,

        /// Collection as returned by the source.
        cities: Vec<City>,
    },

    /// The city source failed.
    CitiesFailed {
        /// Request id of the originating load.
        request: u64,

        /// Human-readable error message.
        message: String,
    },

    /// The favorites store persisted an intent.
    FavoriteSaved {
        /// City whose membership changed.
        city_id: CityId,

        /// Intent id of the persisted change.
        intent: u64,
    },

    /// The favorites store rejected an intent.
    FavoriteFailed {
        /// City whose membership was meant to change.
        city_id: CityId,

        /// Intent id of the rejected change.
        intent: u64,

        /// Human-readable error message.
        message: String,
    },
}

impl WorkerResponse {
    /// Short name for spans and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CitiesLoaded { .. } => "cities_loaded",
            Self::CitiesFailed { .. } => "cities_failed",
            Self::FavoriteSaved { .. } => "favorite_saved",
            Self::FavoriteFailed { .. } => "favorite_failed",
        }
    }
}
