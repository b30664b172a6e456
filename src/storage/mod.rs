//! Storage layer for the persisted favorites set.
//!
//! # Modules
//!
//! - `backend`: [`FavoritesStore`] trait abstraction for backend implementations
//! - `json`: JSON file-based implementation
//! - `memory`: Process-local implementation
//! - `models`: On-disk record types separate from the engine's set type

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::FavoritesStore;
pub use json::JsonFavoritesStore;
pub use memory::InMemoryFavoritesStore;
pub use models::FavoritesRecord;
