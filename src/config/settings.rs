//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;

use super::constants::DEFAULT_FEED_INTERVAL_SECS;

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Base URL of the hosted document database
    pub store_url: String,
    /// Base URL of the hosted authentication service
    pub auth_url: String,
    /// Base URL of the generative text completion endpoint
    pub assistant_url: String,
    assistant_api_key: String,
    /// Path of the local preference file
    pub prefs_path: PathBuf,
    /// Seconds between pending-order feed re-fetches
    pub feed_interval_secs: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("store_url", &self.store_url)
            .field("auth_url", &self.auth_url)
            .field("assistant_url", &self.assistant_url)
            .field("assistant_api_key", &"[REDACTED]")
            .field("prefs_path", &self.prefs_path)
            .field("feed_interval_secs", &self.feed_interval_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let assistant_api_key = env::var("ASSISTANT_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("ASSISTANT_API_KEY not set, assistant calls will be rejected upstream");
            String::new()
        });

        Self {
            store_url: env::var("STORE_URL")
                .unwrap_or_else(|_| "http://localhost:8585".to_string()),
            auth_url: env::var("AUTH_URL").unwrap_or_else(|_| "http://localhost:8686".to_string()),
            assistant_url: env::var("ASSISTANT_URL")
                .unwrap_or_else(|_| "http://localhost:8787".to_string()),
            assistant_api_key,
            prefs_path: env::var("PREFS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("bakehouse-prefs.json")),
            feed_interval_secs: env::var("FEED_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_FEED_INTERVAL_SECS),
        }
    }

    /// Bearer key for the completion endpoint.
    pub fn assistant_api_key(&self) -> &str {
        &self.assistant_api_key
    }
}
