//! Plain-text rendering of the view state.
//!
//! The renderer is a pure function from [`ViewState`] to text. It performs no
//! filtering of its own: whatever the engine published is what gets drawn.
//!
//! # Layout
//!
//! ```text
//! Cities (2) query: "Al" [favorites only]
//!   ★ 2  Albuquerque, US      35.0844, -106.6504
//!     1  Alabama, US          32.3182, -86.9023
//! ```

use crate::domain::City;
use crate::ui::viewmodel::{CityView, ViewState};
use std::fmt::Write;

const FAVORITE_MARKER: &str = "★";
const NOT_FAVORITE_MARKER: &str = " ";

/// Renders a view state as a block of text ending with a newline.
///
/// # Example
///
/// ```rust
/// use citysearch::ui::{render, ViewState};
///
/// assert_eq!(render(&ViewState::Loading), "Loading cities...\n");
/// assert!(render(&ViewState::Empty).starts_with("No cities match"));
/// ```
#[must_use]
pub fn render(view: &ViewState) -> String {
    match view {
        ViewState::Loading => "Loading cities...\n".to_string(),
        ViewState::Empty => "No cities match the current filters.\n".to_string(),
        ViewState::Error { message } => {
            format!("Could not load cities: {message}\nType `reload` to retry.\n")
        }
        ViewState::Success {
            cities,
            query,
            favorites_only,
        } => render_list(cities, query, *favorites_only),
    }
}

fn render_list(cities: &[CityView], query: &str, favorites_only: bool) -> String {
    let mut out = format!("Cities ({})", cities.len());
    if !query.is_empty() {
        let _ = write!(out, " query: {query:?}");
    }
    if favorites_only {
        out.push_str(" [favorites only]");
    }
    out.push('\n');

    let id_width = cities
        .iter()
        .map(|row| row.id().to_string().len())
        .max()
        .unwrap_or(0);
    let name_width = cities
        .iter()
        .map(|row| row.display_name.chars().count())
        .max()
        .unwrap_or(0);

    for row in cities {
        let marker = if row.is_favorite {
            FAVORITE_MARKER
        } else {
            NOT_FAVORITE_MARKER
        };
        let _ = writeln!(
            out,
            "  {marker} {id:>id_width$}  {name:<name_width$}  {coords}",
            id = row.id(),
            name = row.display_name,
            coords = row.coordinates_text,
        );
    }

    out
}

/// Renders the detail block for the selected city.
#[must_use]
pub fn render_selection(selected: Option<&City>) -> String {
    match selected {
        None => "No city selected.\n".to_string(),
        Some(city) => format!(
            "Selected: {} (id {})\n  lat {:.4}, lon {:.4}\n",
            city.display_name(),
            city.id,
            city.coordinates.latitude,
            city.coordinates.longitude
        ),
    }
}
