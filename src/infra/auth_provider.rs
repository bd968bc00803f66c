//! Black-box authentication service boundary.
//!
//! Credential issuance and session persistence live in the hosted
//! service; this client only exchanges credentials for an identity and
//! maps its failure conditions onto the local error taxonomy.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Identity returned by the auth service. Role arrives as a raw string
/// and is narrowed to [`crate::domain::UserRole`] at the service layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
}

/// Authentication provider trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchange credentials for an identity
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthUser>;

    /// Create an account and return its identity
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthUser>;
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct FailureBody {
    #[serde(default)]
    code: String,
}

/// REST implementation of [`AuthProvider`].
#[derive(Clone)]
pub struct RestAuthProvider {
    base_url: String,
    client: reqwest::Client,
}

impl RestAuthProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.auth_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn post(&self, path: &str, email: &str, password: &str) -> AppResult<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .json(&Credentials { email, password })
            .send()
            .await?)
    }
}

#[async_trait]
impl AuthProvider for RestAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthUser> {
        let response = self.post("signin", email, password).await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::UNAUTHORIZED => Err(AppError::InvalidCredentials),
            status => {
                tracing::error!(%status, "Sign-in failed upstream");
                Err(AppError::internal(format!("Auth service returned {}", status)))
            }
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthUser> {
        let response = self.post("signup", email, password).await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::CONFLICT => Err(AppError::conflict("Email")),
            StatusCode::UNPROCESSABLE_ENTITY => {
                let failure: FailureBody = response.json().await.unwrap_or(FailureBody {
                    code: String::new(),
                });
                let message = match failure.code.as_str() {
                    "invalid_email" => "Email address is not valid",
                    "weak_password" => "Password is too weak",
                    _ => "Sign-up was rejected",
                };
                Err(AppError::validation(message))
            }
            status => {
                tracing::error!(%status, "Sign-up failed upstream");
                Err(AppError::internal(format!("Auth service returned {}", status)))
            }
        }
    }
}
