//! Merging search results with the observed favorites set.
//!
//! These functions are side-effect free: they never touch the favorites store
//! and never reorder their input.

use crate::domain::{City, CityId};
use crate::ui::viewmodel::CityView;
use std::collections::HashSet;

/// Annotates each city with its favorite flag and display labels, preserving order.
#[must_use]
pub fn annotate(cities: Vec<City>, favorite_ids: &HashSet<CityId>) -> Vec<CityView> {
    cities
        .into_iter()
        .map(|city| {
            let is_favorite = favorite_ids.contains(&city.id);
            CityView::new(city, is_favorite)
        })
        .collect()
}

/// Keeps only the rows marked as favorite, preserving order.
#[must_use]
pub fn filter_favorites(views: Vec<CityView>) -> Vec<CityView> {
    views.into_iter().filter(|view| view.is_favorite).collect()
}

/// Keeps only the cities whose id is in `favorite_ids`, preserving order.
#[must_use]
pub fn favorites_subset(cities: &[City], favorite_ids: &HashSet<CityId>) -> Vec<City> {
    cities
        .iter()
        .filter(|city| favorite_ids.contains(&city.id))
        .cloned()
        .collect()
}
