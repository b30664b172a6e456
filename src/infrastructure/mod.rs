//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where the application keeps its files and normalizes
//! user-supplied paths.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
