use serde::{Deserialize, Serialize};

/// Identifier of a movie in the recommendation service's index
pub type MovieId = i64;

/// A candidate movie returned by a free-text search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    pub id: MovieId,
    pub title: String,
    pub year: Option<i32>,
}

/// A movie recommended for the selected movie, with its server-side score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationItem {
    pub id: MovieId,
    pub title: String,
    pub year: Option<i32>,
    /// Poster URL as sent by the service; may be an empty placeholder
    pub poster_url: String,
    pub similarity_score: f64,
}

impl SearchResultItem {
    /// Label used when listing the item, e.g. `Batman Begins (2005)`
    pub fn label(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}

impl RecommendationItem {
    pub fn has_poster(&self) -> bool {
        !self.poster_url.trim().is_empty()
    }
}
