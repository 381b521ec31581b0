/// CineGraph HTTP provider
///
/// Talks to the CineGraph recommendation API over plain JSON/HTTP.
///
/// API Flow:
/// 1. Search: /api/search?query=... → candidate movies with their ids
/// 2. Recommend: /api/recommend/{id} → similar movies with poster and score
use crate::{
    config::Config,
    error::{AppError, AppResult},
    middleware::{make_span_with_request_id, with_request_id},
    models::{
        ApiErrorDetail, ApiMovie, ApiRecommendation, ApiResults, ApiStatus, MovieId,
        RecommendationItem, SearchResultItem,
    },
    services::providers::RecommendationService,
};
use reqwest::{Client as HttpClient, Method, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::Instrument;

const PROVIDER_NAME: &str = "cinegraph";
const MAX_DETAIL_LEN: usize = 200;

#[derive(Clone, Debug)]
pub struct CineGraphProvider {
    http_client: HttpClient,
    api_url: Url,
}

impl CineGraphProvider {
    /// Creates a provider for the service rooted at `api_url`.
    ///
    /// Without a timeout the transport default applies.
    pub fn new(api_url: &str, timeout: Option<Duration>) -> AppResult<Self> {
        let parsed = Url::parse(api_url)
            .map_err(|e| AppError::Config(format!("Invalid API URL {:?}: {}", api_url, e)))?;

        if parsed.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "API URL cannot be used as a base: {}",
                api_url
            )));
        }

        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            api_url: parsed,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(&config.api_url, config.request_timeout())
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Checks that the service is up by reading its root status message
    pub async fn ping(&self) -> AppResult<String> {
        let url = self.endpoint(&[])?;
        let status: ApiStatus = self.get_json(url, None).await?;
        Ok(status.message)
    }

    /// Appends path segments to the base URL, encoding each one
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("API URL cannot be a base: {}", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: Option<(&str, &str)>,
    ) -> AppResult<T> {
        let mut request = self.http_client.get(url.clone());
        if let Some(pair) = query {
            request = request.query(&[pair]);
        }

        let (request, request_id) = with_request_id(request);
        let span = make_span_with_request_id(&Method::GET, &url, &request_id);

        async move {
            let response = request.send().await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::UnexpectedStatus {
                    status,
                    detail: error_detail(&body),
                });
            }

            let body = response.text().await?;
            tracing::debug!(bytes = body.len(), "Raw recommendation service response");

            serde_json::from_str::<T>(&body).map_err(|e| {
                tracing::error!(
                    error = %e,
                    response = %body,
                    "Failed to deserialize recommendation service response"
                );
                AppError::InvalidResponse(e.to_string())
            })
        }
        .instrument(span)
        .await
    }
}

/// Pulls a readable message out of an error body.
///
/// FastAPI answers errors with `{"detail": ...}`; anything else is passed
/// through, shortened.
fn error_detail(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorDetail>(body) {
        return match parsed.detail {
            serde_json::Value::String(message) => message,
            other => other.to_string(),
        };
    }

    let body = body.trim();
    if body.is_empty() {
        return "<empty body>".to_string();
    }
    body.chars().take(MAX_DETAIL_LEN).collect()
}

#[async_trait::async_trait]
impl RecommendationService for CineGraphProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<SearchResultItem>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = self.endpoint(&["api", "search"])?;
        let envelope: ApiResults<ApiMovie> = self.get_json(url, Some(("query", query))).await?;

        let movies: Vec<SearchResultItem> = envelope
            .results
            .into_iter()
            .map(SearchResultItem::from)
            .collect();

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = PROVIDER_NAME,
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn recommend(&self, movie_id: MovieId) -> AppResult<Vec<RecommendationItem>> {
        let id_segment = movie_id.to_string();
        let url = self.endpoint(&["api", "recommend", &id_segment])?;
        let envelope: ApiResults<ApiRecommendation> = self.get_json(url, None).await?;

        let recommendations: Vec<RecommendationItem> = envelope
            .results
            .into_iter()
            .map(RecommendationItem::from)
            .collect();

        tracing::info!(
            movie_id = movie_id,
            results = recommendations.len(),
            provider = PROVIDER_NAME,
            "Recommendations fetched"
        );

        Ok(recommendations)
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
