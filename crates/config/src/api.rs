//! API configuration
//!
//! Connection settings for the Outreach API server.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// API client configuration
///
/// # Example
///
/// ```toml
/// [api]
/// url = "http://localhost:3000"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API server URL
    /// Default: "http://localhost:3000"
    pub url: String,

    /// Request timeout in seconds
    /// Default: 30
    pub timeout_secs: u64,

    /// Maximum attempts for retryable requests (first try included)
    /// Default: 3
    pub retry_max_attempts: u32,

    /// Base delay for retry backoff in milliseconds
    /// Default: 400
    pub retry_base_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
            retry_max_attempts: 3,
            retry_base_delay_ms: 400,
        }
    }
}

impl ApiConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::invalid_value("api", "url", "must not be empty"));
        }
        if self.retry_max_attempts == 0 {
            return Err(ConfigError::invalid_value(
                "api",
                "retry_max_attempts",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
