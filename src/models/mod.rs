use serde::{de, Deserialize, Deserializer};

pub mod movie;
pub mod state;

pub use movie::{MovieId, RecommendationItem, SearchResultItem};
pub use state::{ClientError, ControllerSnapshot, Operation, TrackPhase};

// ============================================================================
// Recommendation Service API Types
// ============================================================================

/// Envelope shared by both read endpoints: `{ "results": [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResults<T> {
    pub results: Vec<T>,
}

/// Raw search hit from GET /api/search
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMovie {
    pub id: MovieId,
    pub titulo: String,
    #[serde(default, deserialize_with = "deserialize_year")]
    pub ano: Option<i32>,
}

impl From<ApiMovie> for SearchResultItem {
    fn from(movie: ApiMovie) -> Self {
        SearchResultItem {
            id: movie.id,
            title: movie.titulo,
            year: movie.ano,
        }
    }
}

/// Raw recommendation from GET /api/recommend/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRecommendation {
    pub id: MovieId,
    pub titulo: String,
    #[serde(default, deserialize_with = "deserialize_year")]
    pub ano: Option<i32>,
    #[serde(default)]
    pub poster: String,
    pub score_similaridade: f64,
}

impl From<ApiRecommendation> for RecommendationItem {
    fn from(rec: ApiRecommendation) -> Self {
        RecommendationItem {
            id: rec.id,
            title: rec.titulo,
            year: rec.ano,
            poster_url: rec.poster,
            similarity_score: rec.score_similaridade,
        }
    }
}

/// Body of GET /
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    pub message: String,
}

/// FastAPI error body, e.g. `{"detail": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub detail: serde_json::Value,
}

/// The service sends `ano` as an integer, null, or an empty string when the
/// year is unknown.
fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYear {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Option::<RawYear>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawYear::Int(year)) => i32::try_from(year)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("year out of range: {}", year))),
        Some(RawYear::Float(year)) if year.fract() == 0.0 && year.abs() <= i32::MAX as f64 => {
            Ok(Some(year as i32))
        }
        Some(RawYear::Float(year)) => Err(de::Error::custom(format!("invalid year: {}", year))),
        Some(RawYear::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse::<i32>()
                    .map(Some)
                    .map_err(|_| de::Error::custom(format!("invalid year: {:?}", text)))
            }
        }
    }
}
