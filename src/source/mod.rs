//! City sources: where the session's city collection comes from.
//!
//! # Modules
//!
//! - `backend`: [`CityStore`] trait abstraction
//! - `dto`: Wire types for the JSON feed and their mapping to domain cities
//! - `http`: Feed fetched over HTTP
//! - `file`: Feed read from disk

pub mod backend;
pub mod dto;
pub mod file;
pub mod http;

pub use backend::CityStore;
pub use dto::{decode_cities, CityDto, CoordinatesDto};
pub use file::FileCityStore;
pub use http::HttpCityStore;
