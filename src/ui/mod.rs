//! Presentation layer: view models and text rendering.
//!
//! # Architecture
//!
//! ```text
//! AppState → derive_view_state → ViewState → render → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: The published [`ViewState`] and its display rows
//! - [`renderer`]: Plain-text rendering used by the CLI
//!
//! # Example
//!
//! ```rust
//! use citysearch::ui::{render, ViewState};
//!
//! print!("{}", render(&ViewState::default()));
//! ```

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_selection};
pub use viewmodel::{CityView, ViewState};
