mod common;

use citysearch::app::favorites::{annotate, favorites_subset, filter_favorites};
use citysearch::app::search::search;
use citysearch::app::{derive_view_state, SearchState};
use citysearch::{CityId, ViewState};
use common::{favorite_ids, sample_cities, view_ids};
use std::collections::HashSet;

fn set(ids: &[CityId]) -> HashSet<CityId> {
    ids.iter().copied().collect()
}

fn search_state(query: &str, favorites_only: bool) -> SearchState {
    SearchState {
        query: query.to_string(),
        favorites_only,
    }
}

#[test]
fn annotate_preserves_order_and_marks_favorites() {
    let views = annotate(sample_cities(), &set(&[3, 5]));

    let ids: Vec<_> = views.iter().map(|v| v.id()).collect();
    assert_eq!(ids, vec![5, 3, 1, 4, 2]);

    let flags: Vec<_> = views.iter().map(|v| v.is_favorite).collect();
    assert_eq!(flags, vec![true, true, false, false, false]);
    assert_eq!(views[0].display_name, "Sydney, AU");
}

#[test]
fn filter_keeps_only_favorites_in_order() {
    let views = filter_favorites(annotate(sample_cities(), &set(&[2, 5])));
    let ids: Vec<_> = views.iter().map(|v| v.id()).collect();
    assert_eq!(ids, vec![5, 2]);
}

#[test]
fn subset_ignores_unknown_ids() {
    let subset = favorites_subset(&sample_cities(), &set(&[4, 99]));
    assert_eq!(subset.len(), 1);
    assert_eq!(subset[0].id, 4);
}

#[test]
fn favorites_only_with_blank_query_shows_favorite_subset() {
    let cities = sample_cities();
    let view = derive_view_state(Some(&cities), &set(&[2]), &search_state("", true), None);

    match &view {
        ViewState::Success {
            cities,
            query,
            favorites_only,
        } => {
            assert_eq!(cities.len(), 1);
            assert_eq!(cities[0].city.name, "Albuquerque");
            assert!(cities[0].is_favorite);
            assert_eq!(query, "");
            assert!(*favorites_only);
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[test]
fn favorites_only_without_favorites_is_empty() {
    let cities = sample_cities();
    let view = derive_view_state(Some(&cities), &set(&[]), &search_state("A", true), None);
    assert_eq!(view, ViewState::Empty);
}

#[test]
fn favorites_only_intersects_with_search() {
    let cities = sample_cities();
    let favorites = set(&[1, 3, 5]);

    for query in ["A", "al", "s", " an ", "z"] {
        let view = derive_view_state(Some(&cities), &favorites, &search_state(query, true), None);
        let expected: Vec<CityId> = search(&cities, query)
            .iter()
            .map(|c| c.id)
            .filter(|id| favorites.contains(id))
            .collect();

        if expected.is_empty() {
            assert_eq!(view, ViewState::Empty, "query {query:?}");
        } else {
            assert_eq!(view_ids(&view), expected, "query {query:?}");
        }
    }
}

#[test]
fn favorites_subset_is_sorted_by_name() {
    let cities = sample_cities();
    let view = derive_view_state(Some(&cities), &set(&[5, 4, 1]), &search_state("  ", true), None);
    assert_eq!(view_ids(&view), vec![1, 4, 5]);
}

#[test]
fn all_results_carry_favorite_flags() {
    let cities = sample_cities();
    let view = derive_view_state(Some(&cities), &set(&[2, 4]), &search_state("A", false), None);
    assert_eq!(view_ids(&view), vec![1, 2, 3, 4]);
    assert_eq!(favorite_ids(&view), vec![2, 4]);
}

#[test]
fn no_match_collapses_to_empty() {
    let cities = sample_cities();
    let view = derive_view_state(Some(&cities), &set(&[]), &search_state("Q", false), None);
    assert_eq!(view, ViewState::Empty);
}

#[test]
fn unloaded_collection_is_loading_or_error() {
    let favorites = set(&[1]);
    let search = search_state("A", true);

    assert_eq!(derive_view_state(None, &favorites, &search, None), ViewState::Loading);
    assert_eq!(
        derive_view_state(None, &favorites, &search, Some("offline")),
        ViewState::Error {
            message: "offline".to_string()
        }
    );
}

#[test]
fn loaded_collection_hides_stale_error() {
    let cities = sample_cities();
    let view = derive_view_state(Some(&cities), &set(&[]), &search_state("s", false), Some("offline"));
    assert_eq!(view_ids(&view), vec![5]);
}

#[test]
fn derivation_is_idempotent() {
    let cities = sample_cities();
    let favorites = set(&[2, 3]);

    for search in [search_state("", false), search_state("a", true), search_state("x", false)] {
        let first = derive_view_state(Some(&cities), &favorites, &search, None);
        let second = derive_view_state(Some(&cities), &favorites, &search, None);
        assert_eq!(first, second);
    }
}

#[test]
fn coordinates_are_preformatted() {
    let cities = sample_cities();
    let view = derive_view_state(Some(&cities), &set(&[]), &search_state("Syd", false), None);
    assert_eq!(view.cities()[0].coordinates_text, "5.0000, -5.0000");
}
