/// Recommendation service abstraction
///
/// The remote service owns the movie index and the graph-based similarity
/// computation. The client only sees its two read endpoints, so the trait
/// mirrors them one to one. Implementations must validate payloads and report
/// any mismatch as an error rather than panicking.
use crate::{
    error::AppResult,
    models::{MovieId, RecommendationItem, SearchResultItem},
};

pub mod cinegraph;

pub use cinegraph::CineGraphProvider;

/// Trait for recommendation service backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationService: Send + Sync {
    /// Search movies by free-text name
    ///
    /// Results come back in the service's ranking order. The caller is
    /// responsible for never passing an empty query.
    async fn search_movies(&self, query: &str) -> AppResult<Vec<SearchResultItem>>;

    /// Fetch recommendations for one movie, in similarity order
    async fn recommend(&self, movie_id: MovieId) -> AppResult<Vec<RecommendationItem>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
