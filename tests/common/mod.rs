#![allow(dead_code)]

use async_trait::async_trait;
use citysearch::source::CityStore;
use citysearch::storage::{FavoritesStore, InMemoryFavoritesStore};
use citysearch::{City, CityId, CitySearchError, Coordinates, Engine, Result, ViewState};
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};

pub fn city(id: CityId, name: &str, country: &str) -> City {
    City::new(id, name, country, Coordinates::new(f64::from(id), -f64::from(id)))
}

/// The five reference cities, deliberately out of order.
pub fn sample_cities() -> Vec<City> {
    vec![
        city(5, "Sydney", "AU"),
        city(3, "Anaheim", "US"),
        city(1, "Alabama", "US"),
        city(4, "Arizona", "US"),
        city(2, "Albuquerque", "US"),
    ]
}

pub fn names(cities: &[City]) -> Vec<&str> {
    cities.iter().map(|c| c.name.as_str()).collect()
}

pub fn view_ids(view: &ViewState) -> Vec<CityId> {
    view.cities().iter().map(|row| row.id()).collect()
}

pub fn favorite_ids(view: &ViewState) -> Vec<CityId> {
    view.cities()
        .iter()
        .filter(|row| row.is_favorite)
        .map(|row| row.id())
        .collect()
}

/// City store whose fetches are answered one by one, in call order.
#[derive(Default)]
pub struct ControlledCityStore {
    pending: Mutex<VecDeque<oneshot::Receiver<Result<Vec<City>>>>>,
    calls: AtomicUsize,
}

impl ControlledCityStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a response that the returned sender completes later.
    pub fn respond_later(&self) -> oneshot::Sender<Result<Vec<City>>> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().push_back(rx);
        tx
    }

    /// Queues an immediate response.
    pub fn respond_with(&self, result: Result<Vec<City>>) {
        let _ = self.respond_later().send(result);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CityStore for ControlledCityStore {
    async fn fetch_all_cities(&self) -> Result<Vec<City>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.pending.lock().pop_front();
        match next {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(CitySearchError::Load("response dropped".to_string()))),
            None => Err(CitySearchError::Load("no scripted response".to_string())),
        }
    }
}

/// In-memory favorites store whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyFavoritesStore {
    inner: InMemoryFavoritesStore,
    failing: AtomicBool,
}

impl FlakyFavoritesStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn current(&self) -> HashSet<CityId> {
        self.inner.observe_favorites().borrow().clone()
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(CitySearchError::Persist("disk full".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FavoritesStore for FlakyFavoritesStore {
    fn observe_favorites(&self) -> watch::Receiver<HashSet<CityId>> {
        self.inner.observe_favorites()
    }

    async fn add_favorite(&self, city_id: CityId) -> Result<()> {
        self.check()?;
        self.inner.add_favorite(city_id).await
    }

    async fn remove_favorite(&self, city_id: CityId) -> Result<()> {
        self.check()?;
        self.inner.remove_favorite(city_id).await
    }

    async fn toggle_favorite(&self, city_id: CityId) -> Result<()> {
        self.check()?;
        self.inner.toggle_favorite(city_id).await
    }

    async fn clear_favorites(&self) -> Result<()> {
        self.check()?;
        self.inner.clear_favorites().await
    }
}

/// Favorites store that publishes each write some time after returning `Ok`.
pub struct LateFavoritesStore {
    favorites: Arc<watch::Sender<HashSet<CityId>>>,
    delay: Duration,
}

impl LateFavoritesStore {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            favorites: Arc::new(watch::Sender::new(HashSet::new())),
            delay,
        })
    }

    fn publish_later(&self, change: impl FnOnce(&mut HashSet<CityId>) + Send + 'static) {
        let favorites = Arc::clone(&self.favorites);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            favorites.send_modify(change);
        });
    }
}

#[async_trait]
impl FavoritesStore for LateFavoritesStore {
    fn observe_favorites(&self) -> watch::Receiver<HashSet<CityId>> {
        self.favorites.subscribe()
    }

    async fn add_favorite(&self, city_id: CityId) -> Result<()> {
        self.publish_later(move |set| {
            set.insert(city_id);
        });
        Ok(())
    }

    async fn remove_favorite(&self, city_id: CityId) -> Result<()> {
        self.publish_later(move |set| {
            set.remove(&city_id);
        });
        Ok(())
    }

    async fn toggle_favorite(&self, city_id: CityId) -> Result<()> {
        self.publish_later(move |set| {
            if !set.remove(&city_id) {
                set.insert(city_id);
            }
        });
        Ok(())
    }

    async fn clear_favorites(&self) -> Result<()> {
        self.publish_later(|set| set.clear());
        Ok(())
    }
}

/// Waits until the engine publishes a view matching `predicate`.
pub async fn wait_for(engine: &Engine, predicate: impl Fn(&ViewState) -> bool) -> ViewState {
    let mut views = engine.observe_view_state();
    let wait = async {
        loop {
            {
                let view = views.borrow_and_update();
                if predicate(&*view) {
                    return view.clone();
                }
            }
            views.changed().await.expect("engine dropped");
        }
    };
    tokio::time::timeout(Duration::from_secs(5), wait)
        .await
        .expect("timed out waiting for view state")
}

/// Polls `condition` until it holds.
pub async fn eventually(condition: impl Fn() -> bool) {
    let wait = async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    };
    tokio::time::timeout(Duration::from_secs(5), wait)
        .await
        .expect("condition not reached in time");
}
