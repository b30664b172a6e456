//! Application state and view state derivation.
//!
//! This module defines [`AppState`], the single owned container for everything
//! the engine knows: the loaded city collection, the favorites set as last
//! emitted by the store, pending favorite intents, the search controls, and the
//! last published [`ViewState`].
//!
//! # Architecture
//!
//! `AppState` separates inputs (collection, favorites, search controls) from
//! the derived view. The view is recomputed by the pure function
//! [`derive_view_state`] after every transition and depends on nothing but
//! those inputs.
//!
//! # Favorites Overlay
//!
//! The observed favorites set is the store's confirmed set with the latest
//! pending intent of each city applied on top. Dropping an intent therefore
//! falls back to the store's value.
//!
//! A failed write drops its intent immediately. A successful write drops it
//! only once the store's set reflects it: stores may publish after the write
//! returns, and the overlay stays in place until they do. An acknowledged
//! intent is settled by the next store emission, whichever value it carries.
//!
//! # Example
//!
//! ```rust
//! use citysearch::app::state::{derive_view_state, SearchState};
//! use citysearch::domain::{City, Coordinates};
//! use citysearch::ui::ViewState;
//! use std::collections::HashSet;
//!
//! let origin = Coordinates::new(0.0, 0.0);
//! let cities = vec![
//!     City::new(1, "Alabama", "US", origin),
//!     City::new(2, "Albuquerque", "US", origin),
//! ];
//! let favorites: HashSet<i32> = [2].into_iter().collect();
//! let search = SearchState { query: String::new(), favorites_only: true };
//!
//! let view = derive_view_state(Some(&cities), &favorites, &search, None);
//! assert_eq!(view.cities().len(), 1);
//! assert!(view.cities()[0].is_favorite);
//! # let _ = ViewState::Loading;
//! ```

use super::favorites::{annotate, favorites_subset, filter_favorites};
use super::search::{is_blank, search, sort_cities};
use crate::domain::{City, CityId};
use crate::ui::viewmodel::ViewState;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// The two independent filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Query text exactly as typed.
    pub query: String,

    /// Restricts results to favorites when set.
    pub favorites_only: bool,
}

/// A favorite change applied locally but not yet confirmed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFavorite {
    /// Intent id; only the most recent intent per city is kept.
    pub intent: u64,

    /// Desired membership.
    pub favorite: bool,

    /// Set once the store reported the write as persisted.
    pub acknowledged: bool,
}

impl PendingFavorite {
    /// A freshly issued intent.
    #[must_use]
    pub const fn new(intent: u64, favorite: bool) -> Self {
        Self {
            intent,
            favorite,
            acknowledged: false,
        }
    }
}

/// Central application state container.
///
/// Mutated only by [`handle_event`](super::handler::handle_event), which the
/// engine serializes behind a single lock.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Loaded collection, sorted by name then country. `None` until the first
    /// successful load; replaced wholesale on reload.
    pub cities: Option<Arc<[City]>>,

    /// Message of the most recent failed load. Only surfaced as
    /// [`ViewState::Error`] while no collection is loaded.
    pub load_error: Option<String>,

    /// Request id of the most recent load. Responses carrying any other id
    /// are stale.
    pub latest_load: u64,

    /// Favorites set as last emitted by the store.
    pub confirmed_favorites: HashSet<CityId>,

    /// Observed favorites: confirmed set plus pending intents.
    pub favorites: HashSet<CityId>,

    /// Latest unconfirmed intent per city.
    pub pending_favorites: HashMap<CityId, PendingFavorite>,

    /// Counter for intent ids.
    pub next_intent: u64,

    /// Query text and favorites-only flag.
    pub search: SearchState,

    /// Last derived view.
    pub view: ViewState,
}

impl AppState {
    /// Creates an empty state in [`ViewState::Loading`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once a collection has been loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.cities.is_some()
    }

    /// Starts a new load request and returns its id.
    ///
    /// A previous load error is forgotten only when there is no collection
    /// to fall back to, so a retry shows [`ViewState::Loading`].
    pub fn begin_load(&mut self) -> u64 {
        self.latest_load += 1;
        if self.cities.is_none() {
            self.load_error = None;
        }
        self.latest_load
    }

    /// Replaces the collection with a freshly loaded one.
    pub fn set_cities(&mut self, cities: &[City]) {
        let mut sorted = cities.to_vec();
        sort_cities(&mut sorted);
        self.cities = Some(Arc::from(sorted));
        self.load_error = None;
    }

    /// Allocates the next intent id.
    pub fn next_intent(&mut self) -> u64 {
        self.next_intent += 1;
        self.next_intent
    }

    /// Returns `true` if the city is in the observed favorites set.
    #[must_use]
    pub fn is_favorite(&self, city_id: CityId) -> bool {
        self.favorites.contains(&city_id)
    }

    /// Looks up a city in the loaded collection.
    #[must_use]
    pub fn find_city(&self, city_id: CityId) -> Option<&City> {
        self.cities
            .as_deref()
            .and_then(|cities| cities.iter().find(|city| city.id == city_id))
    }

    /// Drops acknowledged intents after a store emission and returns the
    /// cities whose intent the store contradicted.
    pub fn settle_acknowledged(&mut self) -> Vec<CityId> {
        let confirmed = &self.confirmed_favorites;
        let mut contradicted = Vec::new();
        self.pending_favorites.retain(|city_id, pending| {
            if !pending.acknowledged {
                return true;
            }
            if confirmed.contains(city_id) != pending.favorite {
                contradicted.push(*city_id);
            }
            false
        });
        contradicted
    }

    /// Rebuilds the observed favorites from the confirmed set and pending intents.
    pub fn recompute_favorites(&mut self) {
        let mut favorites = self.confirmed_favorites.clone();
        for (city_id, pending) in &self.pending_favorites {
            if pending.favorite {
                favorites.insert(*city_id);
            } else {
                favorites.remove(city_id);
            }
        }
        self.favorites = favorites;
    }

    /// Re-derives the view and stores it. Returns `true` if it changed.
    pub fn refresh_view(&mut self) -> bool {
        let next = derive_view_state(
            self.cities.as_deref(),
            &self.favorites,
            &self.search,
            self.load_error.as_deref(),
        );

        if next == self.view {
            false
        } else {
            tracing::debug!(from = self.view.kind(), to = next.kind(), "view state changed");
            self.view = next;
            true
        }
    }
}

/// Maps the engine inputs to the view published to consumers.
///
/// # Algorithm
///
/// 1. No collection: [`ViewState::Error`] if the last load failed, otherwise
///    [`ViewState::Loading`]
/// 2. Favorites-only with a blank query: favorites subset of the sorted
///    collection. Otherwise: prefix search, then the favorites filter when
///    favorites-only is set
/// 3. Annotate every row with its favorite flag and labels
/// 4. Zero rows collapse to [`ViewState::Empty`]
///
/// The function is pure: identical inputs always produce identical output.
#[must_use]
pub fn derive_view_state(
    cities: Option<&[City]>,
    favorites: &HashSet<CityId>,
    search_state: &SearchState,
    load_error: Option<&str>,
) -> ViewState {
    let _span = tracing::debug_span!(
        "derive_view_state",
        loaded = cities.is_some(),
        favorites = favorites.len(),
        favorites_only = search_state.favorites_only
    )
    .entered();

    let Some(cities) = cities else {
        return load_error.map_or(ViewState::Loading, |message| ViewState::Error {
            message: message.to_string(),
        });
    };

    let views = if search_state.favorites_only && is_blank(&search_state.query) {
        let mut subset = favorites_subset(cities, favorites);
        sort_cities(&mut subset);
        annotate(subset, favorites)
    } else {
        let annotated = annotate(search(cities, &search_state.query), favorites);
        if search_state.favorites_only {
            filter_favorites(annotated)
        } else {
            annotated
        }
    };

    if views.is_empty() {
        ViewState::Empty
    } else {
        ViewState::Success {
            cities: views,
            query: search_state.query.clone(),
            favorites_only: search_state.favorites_only,
        }
    }
}
