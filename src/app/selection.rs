//! Cross-screen selected city.
//!
//! A [`SharedSelection`] is created once by the session root and cloned into
//! every consumer that needs it (list, detail, map). Clones share one cell.
//! Writes are last-writer-wins and every observer sees the latest value on
//! subscribe.
//!
//! # Example
//!
//! ```rust
//! use citysearch::app::SharedSelection;
//! use citysearch::domain::{City, Coordinates};
//!
//! let selection = SharedSelection::new();
//! let detail = selection.clone();
//!
//! selection.select(City::new(5, "Sydney", "AU", Coordinates::new(-33.86, 151.2)));
//! assert_eq!(detail.current().map(|c| c.id), Some(5));
//!
//! detail.clear();
//! assert!(selection.current().is_none());
//! ```

use crate::domain::City;
use std::sync::Arc;
use tokio::sync::watch;

/// Handle to the currently selected city.
#[derive(Debug, Clone)]
pub struct SharedSelection {
    sender: Arc<watch::Sender<Option<City>>>,
}

impl SharedSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Sets the selection, replacing any previous one.
    pub fn select(&self, city: City) {
        tracing::debug!(city_id = city.id, city_name = %city.name, "city selected");
        self.sender.send_replace(Some(city));
    }

    /// Resets the selection to empty.
    pub fn clear(&self) {
        tracing::debug!("selection cleared");
        self.sender.send_replace(None);
    }

    /// Returns a copy of the current selection.
    #[must_use]
    pub fn current(&self) -> Option<City> {
        self.sender.borrow().clone()
    }

    /// Subscribes to selection changes. The receiver starts at the current value.
    #[must_use]
    pub fn observe_selection(&self) -> watch::Receiver<Option<City>> {
        self.sender.subscribe()
    }
}

impl Default for SharedSelection {
    fn default() -> Self {
        Self::new()
    }
}
