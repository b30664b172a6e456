//! Domain layer for the city search engine.
//!
//! Core value types and errors, independent of any store, runtime, or
//! presentation concern.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`city`]: City and coordinates value types
//!
//! # Examples
//!
//! ```
//! use citysearch::domain::{City, Coordinates, Result};
//!
//! fn make_city() -> Result<City> {
//!     Ok(City::new(1, "Alabama", "US", Coordinates::new(0.0, 0.0)))
//! }
//! ```

pub mod city;
pub mod error;

pub use city::{City, CityId, Coordinates};
pub use error::{CitySearchError, Result};
