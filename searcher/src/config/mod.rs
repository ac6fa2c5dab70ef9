//! Connection settings for the searcher.

use std::env;
use std::time::Duration;

use tracing::info;

use crate::SearcherError;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Settings used to build the client behind a [`crate::Searcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearcherConfig {
    /// OpenSearch server URL.
    pub url: String,
    /// Timeout applied to every request by the transport.
    pub request_timeout: Option<Duration>,
    /// Refuse to connect to an unhealthy cluster.
    pub verify_health: bool,
}

impl Default for SearcherConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OPENSEARCH_URL.to_string(),
            request_timeout: None,
            verify_health: true,
        }
    }
}

impl SearcherConfig {
    /// Create a config pointing at the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Skip the health check when connecting.
    pub fn without_health_check(mut self) -> Self {
        self.verify_health = false;
        self
    }

    /// Load the config from environment variables, reading `.env` first if present.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_TIMEOUT_SECS`: request timeout in seconds (default: none)
    /// - `OPENSEARCH_VERIFY_HEALTH`: `true` or `false` (default: true)
    pub fn from_env() -> Result<Self, SearcherError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SearcherError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());

        let request_timeout = match lookup("OPENSEARCH_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    SearcherError::config(format!("Invalid OPENSEARCH_TIMEOUT_SECS '{}': {}", raw, e))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let verify_health = match lookup("OPENSEARCH_VERIFY_HEALTH") {
            Some(raw) => raw.trim().parse::<bool>().map_err(|e| {
                SearcherError::config(format!("Invalid OPENSEARCH_VERIFY_HEALTH '{}': {}", raw, e))
            })?,
            None => true,
        };

        info!(
            url = %url,
            timeout = ?request_timeout,
            verify_health,
            "Loaded searcher config"
        );

        Ok(Self {
            url,
            request_timeout,
            verify_health,
        })
    }
}
