mod common;

use citysearch::app::search::search;
use common::{city, names, sample_cities};

#[test]
fn prefix_a_returns_sorted_matches() {
    let result = search(&sample_cities(), "A");
    assert_eq!(names(&result), vec!["Alabama", "Albuquerque", "Anaheim", "Arizona"]);
}

#[test]
fn lowercase_prefix_matches_capitalized_name() {
    let result = search(&sample_cities(), "s");
    assert_eq!(names(&result), vec!["Sydney"]);
}

#[test]
fn query_is_trimmed_and_case_folded() {
    let result = search(&sample_cities(), "  al ");
    assert_eq!(names(&result), vec!["Alabama", "Albuquerque"]);
}

#[test]
fn empty_query_returns_everything_sorted() {
    let mut reversed = sample_cities();
    reversed.reverse();

    for input in [sample_cities(), reversed] {
        let result = search(&input, "");
        assert_eq!(
            names(&result),
            vec!["Alabama", "Albuquerque", "Anaheim", "Arizona", "Sydney"]
        );
    }
}

#[test]
fn whitespace_only_query_is_blank() {
    assert_eq!(search(&sample_cities(), " \t ").len(), 5);
}

#[test]
fn substring_and_country_do_not_match() {
    let cities = sample_cities();
    assert!(search(&cities, "buquer").is_empty());
    assert!(search(&cities, "AU").is_empty());
    assert!(search(&cities, "US").is_empty());
}

#[test]
fn empty_collection_yields_empty_result() {
    assert!(search(&[], "A").is_empty());
    assert!(search(&[], "").is_empty());
}

#[test]
fn equal_names_are_ordered_by_country() {
    let cities = vec![
        city(10, "Paris", "US"),
        city(11, "paris", "FR"),
        city(12, "Parma", "IT"),
    ];
    let result = search(&cities, "par");
    let pairs: Vec<_> = result.iter().map(|c| (c.name.as_str(), c.country.as_str())).collect();
    assert_eq!(pairs, vec![("paris", "FR"), ("Paris", "US"), ("Parma", "IT")]);
}

#[test]
fn input_is_left_untouched() {
    let cities = sample_cities();
    let before = cities.clone();
    let _ = search(&cities, "A");
    assert_eq!(cities, before);
}

#[test]
fn every_result_matches_and_nothing_is_missed() {
    let cities = sample_cities();
    for query in ["a", "Al", "ar", "syd", "x", "alabamaa"] {
        let result = search(&cities, query);
        let expected = cities
            .iter()
            .filter(|c| c.name.to_lowercase().starts_with(&query.to_lowercase()))
            .count();
        assert_eq!(result.len(), expected, "query {query:?}");
        assert!(result.windows(2).all(|w| w[0].name.to_lowercase() <= w[1].name.to_lowercase()));
    }
}
