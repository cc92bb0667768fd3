//! API error taxonomy
//!
//! Callers branch on these variants: `AuthRequired` triggers the re-login
//! flow with a pending action, `Validation` maps to field-level form
//! errors, the rest surface as banners.

use serde::Deserialize;
use thiserror::Error;

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// A single field-level validation error from the server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    /// Field path (e.g. "name", "rules.conditions.0.value"); absent for
    /// form-wide errors
    #[serde(default)]
    pub field: Option<String>,
    /// Human-readable message
    pub message: String,
}

/// Validation error body shape
#[derive(Debug, Deserialize)]
struct ValidationBody {
    errors: Vec<FieldError>,
}

/// Errors from API calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// Session expired or not logged in (HTTP 401)
    #[error("session expired, please log in again")]
    AuthRequired,

    /// Rate limited by the server (HTTP 429)
    #[error("rate limited by server")]
    RateLimited,

    /// Request rejected with field-level errors (HTTP 400/422)
    #[error("validation failed: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Other non-success status
    #[error("server error (status {0})")]
    Server(u16),

    /// Connection, DNS or timeout failure
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Failed to access stored credentials
    #[error("credential storage error: {0}")]
    CredentialStore(String),
}

impl ApiError {
    /// Classify a non-success response from its status and body.
    ///
    /// A 400/422 whose body does not carry a parsable error list is
    /// reported as a plain server error.
    pub fn from_response_parts(status: u16, body: &str) -> Self {
        match status {
            401 => Self::AuthRequired,
            429 => Self::RateLimited,
            400 | 422 => match serde_json::from_str::<ValidationBody>(body) {
                Ok(parsed) => Self::Validation(parsed.errors),
                Err(_) => Self::Server(status),
            },
            _ => Self::Server(status),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Server(status.as_u16())
        } else {
            Self::Network(e.to_string())
        }
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| match &e.field {
            Some(field) => format!("{}: {}", field, e.message),
            None => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}
