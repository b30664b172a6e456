//! Background worker for store operations.
//!
//! - [`messages`]: Request/response protocol between engine and worker
//! - [`handler`]: The worker loop executing requests against the stores

pub mod handler;
pub mod messages;

pub use handler::CitySearchWorker;
pub use messages::{WorkerMessage, WorkerResponse};
