use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_analyze_url() -> String {
    "http://127.0.0.1:8080/analyze".to_string()
}

/// Analyzer backend connection settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    /// Full URL of the `POST /analyze` endpoint
    #[serde(default = "default_analyze_url")]
    pub analyze_url: String,
    /// Per-request timeout. Requests wait indefinitely when unset
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            analyze_url: default_analyze_url(),
            timeout_seconds: None,
        }
    }
}

impl NetworkConfig {
    pub fn new() -> Self {
        let analyze_url = env::var("ANALYZE_URL").unwrap_or_else(|_| default_analyze_url());

        let timeout_seconds = env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs| *secs > 0);

        Self {
            analyze_url,
            timeout_seconds,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}
