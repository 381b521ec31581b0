use std::fmt::Write;

use crate::models::{ControllerSnapshot, RecommendationItem, SearchResultItem};

/// Renders the whole session state as text
pub fn render(snapshot: &ControllerSnapshot) -> String {
    let mut out = String::new();

    if !snapshot.search_results.is_empty() {
        let _ = writeln!(out, "Search results:");
        out.push_str(&render_search_results(&snapshot.search_results));
    }

    match snapshot.selected_id {
        Some(id) => {
            let _ = writeln!(out, "Selected movie id: {}", id);
        }
        None => {
            let _ = writeln!(out, "Selected movie id: none");
        }
    }

    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "! {}", error.message);
    }

    if !snapshot.recommendations.is_empty() {
        let _ = writeln!(out, "Recommendations:");
        out.push_str(&render_recommendations(&snapshot.recommendations));
    }

    out
}

pub fn render_search_results(results: &[SearchResultItem]) -> String {
    let mut out = String::new();
    for (position, movie) in results.iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}  id {}", position + 1, movie.label(), movie.id);
    }
    out
}

pub fn render_recommendations(recommendations: &[RecommendationItem]) -> String {
    let mut out = String::new();
    for (rank, movie) in recommendations.iter().enumerate() {
        let year = movie
            .year
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        let poster = if movie.has_poster() {
            movie.poster_url.as_str()
        } else {
            "no poster"
        };
        let _ = writeln!(
            out,
            "  {}. {}{}  score {}  [{}]",
            rank + 1,
            movie.title,
            year,
            movie.similarity_score,
            poster
        );
    }
    out
}
