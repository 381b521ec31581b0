use reqwest::StatusCode;

use crate::models::Operation;

/// Client-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Recommendation service returned status {status}: {detail}")]
    UnexpectedStatus { status: StatusCode, detail: String },

    #[error("Invalid response from recommendation service: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Short machine-friendly label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::HttpClient(_) => "transport",
            AppError::UnexpectedStatus { .. } => "status",
            AppError::InvalidResponse(_) => "payload",
            AppError::InvalidInput(_) => "input",
            AppError::Config(_) => "config",
        }
    }
}

/// Message shown to the user when `operation` fails.
///
/// Every failure kind maps to the same text for a given operation; the
/// technical error is only logged.
pub fn user_message(operation: Operation) -> &'static str {
    match operation {
        Operation::Search => {
            "Could not search movies. Check that the recommendation service is running."
        }
        Operation::Recommend => {
            "Could not get recommendations. Is the service running and has the movie graph been loaded?"
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
