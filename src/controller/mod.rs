//! Interaction controller
//!
//! Owns the client state (query text, search results, selected movie,
//! recommendations, current error) and is its only writer. The presentation
//! layer reads snapshots and calls the operations below.
//!
//! Requests never hold the state lock while awaiting the service. Each
//! dispatch is tagged with a per-kind sequence number and a response is only
//! applied while it is still the latest of its kind; older responses are
//! dropped.
//!
//! `set_query` and `submit_search` model a text field with a submit gesture;
//! the console drives every search through them. `search_by_name` is the
//! single operation both trigger surfaces end up in.

use std::sync::Arc;

use crate::models::{ControllerSnapshot, MovieId, Operation};
use crate::services::providers::RecommendationService;

pub mod state;

pub use state::ControllerState;

/// What an operation ended up doing to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Input was empty; nothing was sent and nothing changed
    Skipped,
    /// The response was stored
    Applied,
    /// The request failed. The error slot is only written when no newer
    /// attempt of either kind started meanwhile; otherwise the failure is
    /// visible only as `TrackPhase::Failed` on its track.
    Failed,
    /// A newer request of the same kind superseded this one
    Discarded,
}

#[derive(Clone)]
pub struct InteractionController {
    service: Arc<dyn RecommendationService>,
    state: ControllerState,
}

impl InteractionController {
    pub fn new(service: Arc<dyn RecommendationService>) -> Self {
        Self {
            service,
            state: ControllerState::new(),
        }
    }

    /// Current state, copied out for rendering
    pub async fn snapshot(&self) -> ControllerSnapshot {
        self.state.inner.read().await.snapshot()
    }

    /// Updates the query text as the user types
    pub async fn set_query(&self, text: &str) {
        self.state.inner.write().await.query = text.to_string();
    }

    /// Submit gesture on the query field: searches the current query text
    pub async fn submit_search(&self) -> Outcome {
        let query = self.state.inner.read().await.query.clone();
        self.search_by_name(&query).await
    }

    /// Searches movies by name and replaces the search results.
    ///
    /// A blank query is a no-op. On failure the results are cleared and a
    /// search error is recorded.
    pub async fn search_by_name(&self, query: &str) -> Outcome {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            tracing::debug!("Skipping search for blank query");
            return Outcome::Skipped;
        }

        let ticket = {
            let mut inner = self.state.inner.write().await;
            inner.query = query.to_string();
            inner.search_results.clear();
            inner.begin(Operation::Search)
        };

        tracing::info!(query = %trimmed, seq = ticket.seq, "Dispatching movie search");

        let result = self.service.search_movies(trimmed).await;

        let mut inner = self.state.inner.write().await;
        if !inner.is_current(&ticket) {
            tracing::debug!(query = %trimmed, seq = ticket.seq, "Discarding stale search response");
            return Outcome::Discarded;
        }

        match result {
            Ok(movies) => {
                tracing::info!(query = %trimmed, results = movies.len(), "Search results updated");
                inner.search_results = movies;
                inner.record_success(&ticket);
                Outcome::Applied
            }
            Err(e) => {
                tracing::error!(
                    operation = %Operation::Search,
                    query = %trimmed,
                    error = %e,
                    error_kind = e.kind(),
                    provider = self.service.name(),
                    "Movie search failed"
                );
                inner.search_results.clear();
                inner.record_failure(&ticket);
                Outcome::Failed
            }
        }
    }

    /// Commits to a search result: sets the selection and clears the query
    /// and the result list. Outstanding searches become stale.
    pub async fn select_movie(&self, id: MovieId) {
        let mut inner = self.state.inner.write().await;
        if inner.selected_id != Some(id) {
            inner.invalidate_recommend();
        }
        inner.selected_id = Some(id);
        inner.search_results.clear();
        inner.query.clear();
        inner.invalidate_search();
        tracing::info!(movie_id = id, "Movie selected");
    }

    /// Direct numeric entry of the movie id; `None` unsets the selection.
    /// Changing the id makes an outstanding recommend for the old one stale.
    pub async fn enter_movie_id(&self, id: Option<MovieId>) {
        let mut inner = self.state.inner.write().await;
        if inner.selected_id != id {
            inner.invalidate_recommend();
        }
        inner.selected_id = id;
    }

    /// Requests recommendations for the selected movie.
    ///
    /// Without a selection this is a no-op. Otherwise the previous results
    /// and error are cleared before the request goes out.
    pub async fn recommend(&self) -> Outcome {
        let (ticket, movie_id) = {
            let mut inner = self.state.inner.write().await;
            let Some(movie_id) = inner.selected_id else {
                tracing::debug!("Skipping recommend without a selected movie");
                return Outcome::Skipped;
            };
            inner.recommendations.clear();
            (inner.begin(Operation::Recommend), movie_id)
        };

        tracing::info!(movie_id = movie_id, seq = ticket.seq, "Dispatching recommend");

        let result = self.service.recommend(movie_id).await;

        let mut inner = self.state.inner.write().await;
        if !inner.is_current(&ticket) {
            tracing::debug!(movie_id = movie_id, seq = ticket.seq, "Discarding stale recommend response");
            return Outcome::Discarded;
        }

        match result {
            Ok(recommendations) => {
                tracing::info!(
                    movie_id = movie_id,
                    results = recommendations.len(),
                    "Recommendations updated"
                );
                inner.recommendations = recommendations;
                inner.record_success(&ticket);
                Outcome::Applied
            }
            Err(e) => {
                tracing::error!(
                    operation = %Operation::Recommend,
                    movie_id = movie_id,
                    error = %e,
                    error_kind = e.kind(),
                    provider = self.service.name(),
                    "Recommend failed"
                );
                inner.recommendations.clear();
                inner.record_failure(&ticket);
                Outcome::Failed
            }
        }
    }
}
