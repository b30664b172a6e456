//! Prefix search over the loaded city collection.
//!
//! The collection is small enough (tens of thousands of entries) and immutable
//! after load, so search is a linear scan followed by a sort. No persistent
//! index is maintained.
//!
//! # Matching
//!
//! A city matches when its lowercased name starts with the normalized query.
//! Countries are not matched. A blank query matches every city.
//!
//! # Ordering
//!
//! Results are ordered by name (case-insensitive), then country
//! (case-insensitive), independent of the input order. Remaining ties fall
//! back to the exact name, exact country, and finally the id, so the output is
//! fully deterministic.
//!
//! # Example
//!
//! ```rust
//! use citysearch::app::search::search;
//! use citysearch::domain::{City, Coordinates};
//!
//! let origin = Coordinates::new(0.0, 0.0);
//! let cities = vec![
//!     City::new(5, "Sydney", "AU", origin),
//!     City::new(2, "Albuquerque", "US", origin),
//!     City::new(1, "Alabama", "US", origin),
//! ];
//!
//! let names: Vec<_> = search(&cities, "  al ").into_iter().map(|c| c.name).collect();
//! assert_eq!(names, vec!["Alabama", "Albuquerque"]);
//! ```

use crate::domain::City;

/// Trims surrounding whitespace and lowercases the query.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Returns `true` when the query is empty after normalization.
#[must_use]
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Checks whether `city` matches an already normalized query.
#[must_use]
pub fn matches(city: &City, normalized_query: &str) -> bool {
    normalized_query.is_empty() || city.name.to_lowercase().starts_with(normalized_query)
}

/// Sorts cities in place by name, then country.
///
/// Sort keys are computed once per city rather than once per comparison.
pub fn sort_cities(cities: &mut [City]) {
    cities.sort_by_cached_key(|city| {
        (
            city.name.to_lowercase(),
            city.country.to_lowercase(),
            city.name.clone(),
            city.country.clone(),
            city.id,
        )
    });
}

/// Returns the cities whose name starts with `query`, sorted by name then country.
///
/// The input is never modified. An empty collection yields an empty result.
///
/// # Tracing
///
/// Creates a debug-level span with the collection size and query length.
#[must_use]
pub fn search(cities: &[City], query: &str) -> Vec<City> {
    let _span = tracing::debug_span!(
        "search",
        total_cities = cities.len(),
        query_len = query.len()
    )
    .entered();

    let normalized = normalize_query(query);

    let mut results: Vec<City> = cities
        .iter()
        .filter(|city| matches(city, &normalized))
        .cloned()
        .collect();

    sort_cities(&mut results);

    tracing::debug!(matched = results.len(), "search completed");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;

    fn city(id: i32, name: &str, country: &str) -> City {
        City::new(id, name, country, Coordinates::new(0.0, 0.0))
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_query("  AlB \t"), "alb");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn ties_fall_back_to_country_then_id() {
        let mut cities = vec![
            city(3, "Springfield", "US"),
            city(2, "springfield", "CA"),
            city(1, "Springfield", "US"),
        ];
        sort_cities(&mut cities);
        let ids: Vec<_> = cities.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
