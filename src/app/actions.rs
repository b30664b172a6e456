//! Actions representing side effects to be executed by the engine.
//!
//! The event handler stays pure: instead of calling stores it returns a
//! `Vec<Action>` that the engine executes after the transition, in order.
//!
//! # Example
//!
//! ```rust
//! use citysearch::app::Action;
//! use citysearch::worker::WorkerMessage;
//!
//! let actions = vec![Action::PostToWorker(WorkerMessage::load_cities(1))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Posts a message to the background worker.
    ///
    /// Used for every store interaction: city loads and favorite writes.
    PostToWorker(WorkerMessage),
}
