//! Black-box generative text completion boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Completion endpoint trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a prompt and return the free-text completion
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    text: String,
}

/// REST implementation of [`CompletionClient`].
#[derive(Clone)]
pub struct RestCompletionClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RestCompletionClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.assistant_url.trim_end_matches('/').to_string(),
            api_key: config.assistant_api_key().to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionClient for RestCompletionClient {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let response = self
            .client
            .post(format!("{}/complete", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest { prompt })
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "Completion call failed upstream");
            return Err(AppError::internal(format!(
                "Completion endpoint returned {}",
                response.status()
            )));
        }

        let body: CompletionResponse = response.json().await?;
        Ok(body.text)
    }
}
