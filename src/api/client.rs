//! HTTP client for the remote auth service.
//!
//! This module provides the `AuthClient` struct wrapping the three
//! endpoints the session manager depends on. Response payloads are
//! passed through opaquely; the server owns all input validation.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    user: Value,
}

/// Client for the auth service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Exchange credentials for a bearer token via `POST /login`.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let url = format!("{}/login", self.base_url);
        let body = serde_json::json!({ "username": username, "password": password });

        let response = self.client.post(&url).json(&body).send().await?;
        let response = Self::check_response(response).await?;

        let login: LoginResponse = response.json().await?;
        Ok(login.token)
    }

    /// Fetch the authenticated user's profile via `GET /user/me`.
    /// The `user` payload is returned as-is; no fields are interpreted here.
    pub async fn fetch_current_user(&self, token: &str) -> Result<Value, ApiError> {
        let url = format!("{}/user/me", self.base_url);

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        let response = Self::check_response(response).await?;

        let me: MeResponse = response.json().await?;
        Ok(me.user)
    }

    /// Submit a registration via `POST /register`. The caller-supplied
    /// fields are forwarded unvalidated; the success body is ignored.
    pub async fn register(&self, fields: &Value) -> Result<(), ApiError> {
        let url = format!("{}/register", self.base_url);

        let response = self.client.post(&url).json(fields).send().await?;
        Self::check_response(response).await?;
        Ok(())
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!(%status, "Auth service request failed");
            Err(ApiError::from_status(status, &body))
        }
    }
}
