//! Background worker executing store operations for the engine.
//!
//! The worker owns the store handles and processes [`WorkerMessage`]s from a
//! single queue. Favorite writes run one at a time in queue order, so the
//! store always ends up with the most recent intent. City loads are spawned
//! onto their own tasks so a slow fetch never delays a favorite write; their
//! ordering is resolved by the engine's stale-response rule instead.

use crate::domain::error::Result;
use crate::domain::CityId;
use crate::source::CityStore;
use crate::storage::FavoritesStore;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Instrument;

/// Worker state: the two external stores.
pub struct CitySearchWorker {
    cities: Arc<dyn CityStore>,
    favorites: Arc<dyn FavoritesStore>,
}

impl CitySearchWorker {
    pub fn new(cities: Arc<dyn CityStore>, favorites: Arc<dyn FavoritesStore>) -> Self {
        Self { cities, favorites }
    }

    /// Processes messages until the queue closes or nobody listens for responses.
    pub async fn run(
        self,
        mut messages: mpsc::UnboundedReceiver<WorkerMessage>,
        responses: mpsc::UnboundedSender<WorkerResponse>,
    ) {
        tracing::debug!("worker started");

        while let Some(message) = messages.recv().await {
            let span = tracing::debug_span!("worker_handle_message", message_type = ?message);

            match message {
                WorkerMessage::LoadCities { request } => {
                    let store = Arc::clone(&self.cities);
                    let responses = responses.clone();
                    tokio::spawn(
                        async move {
                            let response = Self::handle_load_cities(store.as_ref(), request).await;
                            if responses.send(response).is_err() {
                                tracing::debug!(request, "engine gone, dropping city load result");
                            }
                        }
                        .instrument(span),
                    );
                }
                WorkerMessage::SetFavorite {
                    city_id,
                    favorite,
                    intent,
                } => {
                    let response = self
                        .handle_set_favorite(city_id, favorite, intent)
                        .instrument(span)
                        .await;
                    if responses.send(response).is_err() {
                        break;
                    }
                }
            }
        }

        tracing::debug!("worker stopped");
    }

    /// Maps a store result to a response with consistent logging.
    fn handle_store_result<T>(
        operation: &str,
        result: Result<T>,
        on_success: impl FnOnce(T) -> WorkerResponse,
        on_failure: impl FnOnce(String) -> WorkerResponse,
    ) -> WorkerResponse {
        match result {
            Ok(value) => {
                tracing::debug!(operation, "store operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation, error = %e, "store operation failed");
                on_failure(e.to_string())
            }
        }
    }

    async fn handle_load_cities(store: &dyn CityStore, request: u64) -> WorkerResponse {
        Self::handle_store_result(
            "load cities",
            store.fetch_all_cities().await,
            |cities| WorkerResponse::CitiesLoaded { request, cities },
            |message| WorkerResponse::CitiesFailed { request, message },
        )
    }

    async fn handle_set_favorite(&self, city_id: CityId, favorite: bool, intent: u64) -> WorkerResponse {
        Self::handle_store_result(
            "set favorite",
            self.favorites.set_favorite(city_id, favorite).await,
            |()| WorkerResponse::FavoriteSaved { city_id, intent },
            |message| WorkerResponse::FavoriteFailed {
                city_id,
                intent,
                message,
            },
        )
    }
}

impl std::fmt::Debug for CitySearchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CitySearchWorker").finish_non_exhaustive()
    }
}
