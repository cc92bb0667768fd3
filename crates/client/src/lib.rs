//! Outreach API client
//!
//! Thin typed wrappers over the campaign backend endpoints, plus stored
//! credentials and retry policy. Expired sessions surface as
//! [`ApiError::AuthRequired`] so callers can park the interrupted action
//! and resume it after re-login.

pub mod auth;
pub mod error;
pub mod retry;

#[cfg(test)]
mod api_test;

pub use auth::{clear_credentials, load_credentials, save_credentials, Credentials};
pub use error::{ApiError, FieldError, Result};
pub use retry::RetryConfig;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use outreach_config::ApiConfig;
use outreach_segment::SegmentRules;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct PreviewResponse {
    count: u64,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

/// Payload for creating a campaign
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    /// Campaign name
    pub name: String,
    /// Campaign description
    pub description: String,
    /// Message body
    pub message: String,
    /// Normalized segmentation rules
    pub rules: SegmentRules,
}

/// A created campaign as returned by the server
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    /// Server-assigned campaign id
    pub id: String,
    /// Campaign name
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// HTTP client for the Outreach API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    retry: RetryConfig,
}

impl ApiClient {
    /// Create a client from config, unauthenticated
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: None,
            retry: RetryConfig {
                max_attempts: config.retry_max_attempts,
                base_delay_ms: config.retry_base_delay_ms,
                ..RetryConfig::default()
            },
        })
    }

    /// Attach a bearer token to all subsequent requests
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Whether a bearer token is attached
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Log in with email and password, returning credentials ready to store
    pub async fn login(&self, email: &str, password: &str) -> Result<Credentials> {
        let response: LoginResponse = self
            .post_json("/api/v1/auth/login", &LoginRequest { email, password })
            .await?;

        Ok(Credentials {
            access_token: response.access_token,
            api_url: self.base_url.clone(),
            email: email.to_string(),
        })
    }

    /// Count the customers the given rule set matches.
    ///
    /// This is an idempotent read, so transient failures are retried with
    /// capped backoff before surfacing an error.
    pub async fn preview_audience(&self, rules: &SegmentRules) -> Result<u64> {
        let mut attempt = 0;
        loop {
            match self
                .post_json::<_, PreviewResponse>("/api/v1/audience/preview", rules)
                .await
            {
                Ok(response) => return Ok(response.count),
                Err(e) if attempt + 1 < self.retry.max_attempts
                    && retry::is_retryable_error(&e) =>
                {
                    let delay = self.retry.delay_for(attempt);
                    debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "preview request failed, will retry"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Create a campaign. Never retried automatically.
    pub async fn create_campaign(
        &self,
        request: &CreateCampaignRequest,
    ) -> Result<CampaignResponse> {
        self.post_json("/api/v1/campaigns", request).await
    }

    /// Turn a natural-language prompt into a candidate rule set.
    ///
    /// Returns the raw JSON: the model output is untrusted and the caller
    /// must normalize it before use.
    pub async fn rules_from_prompt(&self, prompt: &str) -> Result<serde_json::Value> {
        self.post_json("/api/v1/segments/generate", &GenerateRequest { prompt })
            .await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: for<'de> Deserialize<'de>,
    {
        let mut request = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response_parts(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}
