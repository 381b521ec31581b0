use serde::Deserialize;
use std::time::Duration;

/// Environment variable prefix for all client settings
pub const ENV_PREFIX: &str = "CINEGRAPH_";

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the recommendation service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds; unset keeps the transport default
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX)
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Apply command-line overrides on top of the environment
    pub fn with_overrides(mut self, api_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if timeout_secs.is_some() {
            self.request_timeout_secs = timeout_secs;
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
