use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Display;

use super::{MovieId, RecommendationItem, SearchResultItem};

/// The two outbound operations of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Search,
    Recommend,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Search => write!(f, "search"),
            Operation::Recommend => write!(f, "recommend"),
        }
    }
}

/// User-facing error attributed to the operation that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientError {
    pub message: String,
    pub operation: Operation,
    pub occurred_at: DateTime<Utc>,
    /// Global attempt number of the failed request
    #[serde(skip)]
    pub(crate) attempt: u64,
}

/// Where one operation track currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackPhase {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Read-only copy of the controller state handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ControllerSnapshot {
    pub query: String,
    pub search_results: Vec<SearchResultItem>,
    pub selected_id: Option<MovieId>,
    pub recommendations: Vec<RecommendationItem>,
    pub error: Option<ClientError>,
    pub search_phase: TrackPhase,
    pub recommend_phase: TrackPhase,
}

impl ControllerSnapshot {
    pub fn error_for(&self, operation: Operation) -> Option<&ClientError> {
        self.error.as_ref().filter(|e| e.operation == operation)
    }
}
