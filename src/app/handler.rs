//! Event handling and state transition logic.
//!
//! This module implements the reducer that every engine input flows through:
//! user intents, favorites emissions from the store, and worker responses.
//! It is synchronous and performs no I/O. Side effects are returned as
//! [`Action`]s for the engine to execute.
//!
//! # Event Types
//!
//! - **Intents**: `LoadCities`, `SetQuery`, `ToggleFavoritesOnly`, `ToggleFavorite`
//! - **Store**: `FavoritesChanged` with the store's authoritative set
//! - **Worker**: `WorkerResponse` with typed completion variants
//!
//! # Stale Responses
//!
//! City loads and favorite writes carry ids. A load response is applied only
//! if it answers the latest load request. A favorite response is applied only
//! if it answers the latest pending intent for that city; anything older is
//! superseded and dropped.
//!
//! # Example
//!
//! ```rust
//! use citysearch::app::{handle_event, AppState, Event};
//!
//! let mut state = AppState::new();
//! let (changed, actions) = handle_event(&mut state, &Event::SetQuery("Al".into()));
//! assert!(!changed); // still loading, the view did not move
//! assert!(actions.is_empty());
//! assert_eq!(state.search.query, "Al");
//! ```

use crate::app::state::PendingFavorite;
use crate::app::{Action, AppState};
use crate::domain::CityId;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::collections::{HashMap, HashSet};

/// Inputs to the state machine.
///
/// Events are processed strictly one at a time, which makes every transition
/// deterministic given the event order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Requests a (re)load of the city collection.
    LoadCities,

    /// Replaces the query text.
    SetQuery(String),

    /// Flips the favorites-only filter.
    ToggleFavoritesOnly,

    /// Flips the favorite membership of one city, optimistically.
    ToggleFavorite(CityId),

    /// Reports the favorites store's current set.
    FavoritesChanged(HashSet<CityId>),

    /// Wraps a response from the background worker.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Short name for spans and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LoadCities => "load_cities",
            Self::SetQuery(_) => "set_query",
            Self::ToggleFavoritesOnly => "toggle_favorites_only",
            Self::ToggleFavorite(_) => "toggle_favorite",
            Self::FavoritesChanged(_) => "favorites_changed",
            Self::WorkerResponse(response) => response.name(),
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// A tuple of:
/// - `bool`: whether the derived [`ViewState`](crate::ui::ViewState) changed
///   and must be published
/// - `Vec<Action>`: side effects to execute in order
///
/// # Tracing
///
/// Each call creates a debug-level span named after the event. Payloads are
/// logged as counts inside the handling branches.
pub fn handle_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::LoadCities => {
            let request = state.begin_load();
            tracing::debug!(request, reload = state.is_loaded(), "loading cities");
            (
                state.refresh_view(),
                vec![Action::PostToWorker(WorkerMessage::load_cities(request))],
            )
        }
        Event::SetQuery(query) => {
            if &state.search.query == query {
                return (false, vec![]);
            }
            state.search.query.clone_from(query);
            tracing::trace!(query = %state.search.query, "search query updated");
            (state.refresh_view(), vec![])
        }
        Event::ToggleFavoritesOnly => {
            state.search.favorites_only = !state.search.favorites_only;
            tracing::debug!(favorites_only = state.search.favorites_only, "favorites filter toggled");
            (state.refresh_view(), vec![])
        }
        Event::ToggleFavorite(city_id) => {
            let favorite = !state.is_favorite(*city_id);
            let intent = state.next_intent();

            state
                .pending_favorites
                .insert(*city_id, PendingFavorite::new(intent, favorite));
            state.recompute_favorites();

            tracing::debug!(city_id, favorite, intent, "favorite toggled optimistically");

            (
                state.refresh_view(),
                vec![Action::PostToWorker(WorkerMessage::set_favorite(
                    *city_id, favorite, intent,
                ))],
            )
        }
        Event::FavoritesChanged(favorites) => {
            if &state.confirmed_favorites == favorites {
                return (false, vec![]);
            }
            tracing::debug!(
                count = favorites.len(),
                pending = state.pending_favorites.len(),
                "favorites emitted by store"
            );
            state.confirmed_favorites.clone_from(favorites);
            for city_id in state.settle_acknowledged() {
                tracing::warn!(city_id, "store emission disagrees with persisted intent");
            }
            state.recompute_favorites();
            (state.refresh_view(), vec![])
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::CitiesLoaded { request, cities } => {
            if *request != state.latest_load {
                tracing::debug!(request, latest = state.latest_load, "discarding stale city load");
                return (false, vec![]);
            }
            tracing::debug!(request, count = cities.len(), "cities loaded");
            state.set_cities(cities);
            (state.refresh_view(), vec![])
        }
        WorkerResponse::CitiesFailed { request, message } => {
            if *request != state.latest_load {
                tracing::debug!(request, latest = state.latest_load, "discarding stale city load failure");
                return (false, vec![]);
            }
            if state.is_loaded() {
                tracing::warn!(request, error = %message, "reload failed, keeping previous cities");
            } else {
                tracing::warn!(request, error = %message, "city load failed");
            }
            state.load_error = Some(message.clone());
            (state.refresh_view(), vec![])
        }
        WorkerResponse::FavoriteSaved { city_id, intent } => {
            let Some(pending) = latest_intent(&mut state.pending_favorites, *city_id, *intent) else {
                tracing::debug!(city_id, intent, "ignoring confirmation of superseded intent");
                return (false, vec![]);
            };
            if state.confirmed_favorites.contains(city_id) != pending.favorite {
                tracing::debug!(city_id, intent, "favorite persisted, awaiting store emission");
                pending.acknowledged = true;
                return (false, vec![]);
            }
            state.pending_favorites.remove(city_id);
            tracing::debug!(city_id, intent, "favorite confirmed by store");
            state.recompute_favorites();
            (state.refresh_view(), vec![])
        }
        WorkerResponse::FavoriteFailed {
            city_id,
            intent,
            message,
        } => {
            if latest_intent(&mut state.pending_favorites, *city_id, *intent).is_none() {
                tracing::debug!(city_id, intent, error = %message, "ignoring failure of superseded intent");
                return (false, vec![]);
            }
            state.pending_favorites.remove(city_id);
            tracing::warn!(city_id, intent, error = %message, "favorite not persisted, rolling back");
            state.recompute_favorites();
            (state.refresh_view(), vec![])
        }
    }
}

/// Returns the pending intent for `city_id` if `intent` is still the latest one.
fn latest_intent(
    pending_favorites: &mut HashMap<CityId, PendingFavorite>,
    city_id: CityId,
    intent: u64,
) -> Option<&mut PendingFavorite> {
    pending_favorites
        .get_mut(&city_id)
        .filter(|pending| pending.intent == intent)
}
