//! Wire types for the city JSON feed.
//!
//! The feed is a JSON array of objects shaped like:
//!
//! ```json
//! {"country": "UA", "name": "Hurzuf", "_id": 707860, "coord": {"lon": 34.283333, "lat": 44.549999}}
//! ```

use crate::domain::error::{CitySearchError, Result};
use crate::domain::{City, CityId, Coordinates};
use serde::{Deserialize, Serialize};

/// One city entry as it appears in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityDto {
    #[serde(rename = "_id")]
    pub id: CityId,
    pub name: String,
    pub country: String,
    #[serde(rename = "coord")]
    pub coordinates: CoordinatesDto,
}

/// Position as it appears in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinatesDto {
    pub lon: f64,
    pub lat: f64,
}

impl From<CityDto> for City {
    fn from(dto: CityDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            country: dto.country,
            coordinates: dto.coordinates.into(),
        }
    }
}

impl From<CoordinatesDto> for Coordinates {
    fn from(dto: CoordinatesDto) -> Self {
        Self::new(dto.lat, dto.lon)
    }
}

/// Decodes a feed document into domain cities, keeping the feed order.
///
/// # Errors
///
/// Returns [`CitySearchError::Load`] if the document is not a valid feed.
///
/// # Examples
///
/// ```
/// use citysearch::source::decode_cities;
///
/// let json = r#"[{"_id": 5, "name": "Sydney", "country": "AU", "coord": {"lon": 151.2, "lat": -33.86}}]"#;
/// let cities = decode_cities(json.as_bytes())?;
/// assert_eq!(cities[0].coordinates.latitude, -33.86);
/// # Ok::<(), citysearch::CitySearchError>(())
/// ```
pub fn decode_cities(bytes: &[u8]) -> Result<Vec<City>> {
    let dtos: Vec<CityDto> = serde_json::from_slice(bytes)
        .map_err(|e| CitySearchError::Load(format!("invalid city feed: {e}")))?;
    Ok(dtos.into_iter().map(City::from).collect())
}
