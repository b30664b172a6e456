//! The running state engine.
//!
//! [`Engine`] owns one [`AppState`] behind a lock and wires it to the outside
//! world:
//!
//! ```text
//! intents ──┐
//! favorites ├─► dispatch ─► handle_event ─► watch<ViewState> ─► observers
//! worker  ──┘                   │
//!    ▲                          └─► Action::PostToWorker ─► worker queue
//!    └──────────── WorkerResponse ◄─────────────────────────────┘
//! ```
//!
//! Every input is applied under the same lock, so transitions are serialized
//! and the published view never moves backwards. Before each transition the
//! engine pulls the store's latest favorites set, which means a derivation
//! always sees the newest emission even if the forwarding task has not run
//! yet.
//!
//! Background tasks hold only weak references and stop once the last
//! [`Engine`] handle is dropped.

use crate::app::handler::{handle_event, Event};
use crate::app::selection::SharedSelection;
use crate::app::state::{AppState, SearchState};
use crate::app::Action;
use crate::domain::{City, CityId};
use crate::source::CityStore;
use crate::storage::FavoritesStore;
use crate::ui::ViewState;
use crate::worker::{CitySearchWorker, WorkerMessage, WorkerResponse};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::{Arc, Weak};
use tokio::sync::{mpsc, watch};

/// State guarded by the engine lock.
struct Core {
    state: AppState,
    favorites: watch::Receiver<HashSet<CityId>>,
}

impl Core {
    /// Returns the store's set if it changed since the last look.
    fn take_favorites_update(&mut self) -> Option<HashSet<CityId>> {
        match self.favorites.has_changed() {
            Ok(true) => Some(self.favorites.borrow_and_update().clone()),
            _ => None,
        }
    }
}

struct Inner {
    core: Mutex<Core>,
    view: watch::Sender<ViewState>,
    worker: mpsc::UnboundedSender<WorkerMessage>,
    selection: SharedSelection,
    /// Dropped together with `Inner`; background tasks watch for that.
    _alive: watch::Sender<()>,
}

impl Inner {
    /// Applies pending favorites, then `event`, then publishes and executes.
    fn process(&self, event: Option<Event>) {
        let mut core = self.core.lock();
        let mut publish = false;
        let mut actions = Vec::new();

        if let Some(favorites) = core.take_favorites_update() {
            let (changed, emitted) = handle_event(&mut core.state, &Event::FavoritesChanged(favorites));
            publish |= changed;
            actions.extend(emitted);
        }

        if let Some(event) = event {
            let (changed, emitted) = handle_event(&mut core.state, &event);
            publish |= changed;
            actions.extend(emitted);
        }

        if publish {
            self.view.send_replace(core.state.view.clone());
        }

        for action in actions {
            self.execute(action);
        }
    }

    fn execute(&self, action: Action) {
        match action {
            Action::PostToWorker(message) => {
                if let Err(e) = self.worker.send(message) {
                    tracing::error!(worker_message = ?e.0, "worker queue closed");
                }
            }
        }
    }
}

/// Handle to a running engine. Cheap to clone; clones share one state.
///
/// # Examples
///
/// ```no_run
/// use citysearch::app::{Engine, SharedSelection};
/// use citysearch::source::FileCityStore;
/// use citysearch::storage::InMemoryFavoritesStore;
/// use std::sync::Arc;
///
/// # async fn run() {
/// let engine = Engine::start(
///     Arc::new(FileCityStore::new("cities.json")),
///     Arc::new(InMemoryFavoritesStore::new()),
///     SharedSelection::new(),
/// );
///
/// let mut view = engine.observe_view_state();
/// engine.set_query("Al");
/// view.changed().await.ok();
/// println!("{:?}", *view.borrow());
/// # }
/// ```
#[derive(Clone)]
pub struct Engine {
    inner: Arc<Inner>,
}

impl Engine {
    /// Starts the engine with its worker and begins the initial city load.
    ///
    /// The favorites set the store holds right now is applied before the
    /// first view is derived; later emissions are picked up automatically.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(
        cities: Arc<dyn CityStore>,
        favorites: Arc<dyn FavoritesStore>,
        selection: SharedSelection,
    ) -> Self {
        let _span = tracing::debug_span!("engine_start").entered();

        let (worker_tx, worker_rx) = mpsc::unbounded_channel();
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        let (alive_tx, alive_rx) = watch::channel(());

        let favorites_rx = favorites.observe_favorites();
        let initial = favorites_rx.borrow().clone();
        let watcher = favorites_rx.clone();

        let state = AppState::new();
        let (view_tx, _view_rx) = watch::channel(state.view.clone());

        let inner = Arc::new(Inner {
            core: Mutex::new(Core {
                state,
                favorites: favorites_rx,
            }),
            view: view_tx,
            worker: worker_tx,
            selection,
            _alive: alive_tx,
        });

        tokio::spawn(CitySearchWorker::new(cities, favorites).run(worker_rx, response_tx));
        tokio::spawn(pump_responses(Arc::downgrade(&inner), response_rx));
        tokio::spawn(forward_favorites(Arc::downgrade(&inner), watcher, alive_rx));

        inner.process(Some(Event::FavoritesChanged(initial)));
        inner.process(Some(Event::LoadCities));

        tracing::info!("engine started");
        Self { inner }
    }

    /// Feeds an event through the state machine.
    pub fn dispatch(&self, event: Event) {
        self.inner.process(Some(event));
    }

    /// Requests a fresh load of the collection. Used for retry after an error.
    pub fn load_cities(&self) {
        self.dispatch(Event::LoadCities);
    }

    /// Replaces the query text. The view is updated before this returns.
    pub fn set_query(&self, query: impl Into<String>) {
        self.dispatch(Event::SetQuery(query.into()));
    }

    /// Flips the favorites-only filter.
    pub fn toggle_favorites_only(&self) {
        self.dispatch(Event::ToggleFavoritesOnly);
    }

    /// Flips a city's favorite flag optimistically and persists it in the background.
    pub fn toggle_favorite(&self, city_id: CityId) {
        self.dispatch(Event::ToggleFavorite(city_id));
    }

    /// Subscribes to the view. The receiver starts at the current value.
    #[must_use]
    pub fn observe_view_state(&self) -> watch::Receiver<ViewState> {
        self.inner.view.subscribe()
    }

    /// Snapshot of the current view.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.inner.view.borrow().clone()
    }

    /// Snapshot of the query text and favorites-only flag.
    #[must_use]
    pub fn search_state(&self) -> SearchState {
        self.inner.core.lock().state.search.clone()
    }

    /// Observed favorites, including unconfirmed intents.
    #[must_use]
    pub fn favorites(&self) -> HashSet<CityId> {
        self.inner.core.lock().state.favorites.clone()
    }

    /// Looks up a city in the loaded collection.
    #[must_use]
    pub fn find_city(&self, city_id: CityId) -> Option<City> {
        self.inner.core.lock().state.find_city(city_id).cloned()
    }

    /// Selects a loaded city by id. Returns `false` if it is unknown.
    pub fn select_city(&self, city_id: CityId) -> bool {
        match self.find_city(city_id) {
            Some(city) => {
                self.inner.selection.select(city);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn selection(&self) -> &SharedSelection {
        &self.inner.selection
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("view", &self.inner.view.borrow().kind())
            .finish_non_exhaustive()
    }
}

async fn pump_responses(engine: Weak<Inner>, mut responses: mpsc::UnboundedReceiver<WorkerResponse>) {
    while let Some(response) = responses.recv().await {
        let Some(inner) = engine.upgrade() else {
            break;
        };
        inner.process(Some(Event::WorkerResponse(response)));
    }
    tracing::debug!("response pump stopped");
}

async fn forward_favorites(
    engine: Weak<Inner>,
    mut favorites: watch::Receiver<HashSet<CityId>>,
    mut alive: watch::Receiver<()>,
) {
    loop {
        tokio::select! {
            changed = favorites.changed() => {
                if changed.is_err() {
                    break;
                }
                let _ = favorites.borrow_and_update();
                let Some(inner) = engine.upgrade() else {
                    break;
                };
                inner.process(None);
            }
            _ = alive.changed() => break,
        }
    }
    tracing::debug!("favorites forwarding stopped");
}
