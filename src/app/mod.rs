//! Application layer coordinating state, events, and actions.
//!
//! This module holds the core logic of the search screen, sitting between the
//! consumers (the CLI in main.rs, tests) and the domain/storage/worker layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Intents → Events → Event Handler → State Mutations → Actions → Side Effects
//!                        ↑                                  ↓
//!                        └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`engine`]: Running engine wiring state, worker, and observers together
//! - [`favorites`]: Favorite annotation and filtering
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`search`]: Prefix search over the sorted collection
//! - [`selection`]: Selected city shared across consumers
//! - [`state`]: Central application state container and view derivation
//!
//! # Example
//!
//! ```rust
//! use citysearch::app::{handle_event, AppState, Event};
//!
//! let mut state = AppState::new();
//! let (_changed, actions) = handle_event(&mut state, &Event::LoadCities);
//! assert_eq!(actions.len(), 1);
//! ```

pub mod actions;
pub mod engine;
pub mod favorites;
pub mod handler;
pub mod search;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use engine::Engine;
pub use handler::{handle_event, Event};
pub use selection::SharedSelection;
pub use state::{derive_view_state, AppState, SearchState};
