//! Audience preview configuration
//!
//! Timing knobs for the debounced audience-preview scheduler.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Preview scheduler configuration
///
/// # Example
///
/// ```toml
/// [preview]
/// debounce_ms = 500
/// grace_ms = 300
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Debounce window after the last rule edit before a preview request
    /// is issued, in milliseconds.
    /// Default: 500
    pub debounce_ms: u64,

    /// Grace period before an in-flight preview surfaces a loading state,
    /// in milliseconds. Fast responses never show as loading.
    /// Default: 300
    pub grace_ms: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            grace_ms: 300,
        }
    }
}

impl PreviewConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::invalid_value(
                "preview",
                "debounce_ms",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}
