//! Autosave configuration

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Autosave configuration
///
/// # Example
///
/// ```toml
/// [autosave]
/// idle_ms = 2000
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AutosaveConfig {
    /// Idle window after the last form edit before the draft is written,
    /// in milliseconds.
    /// Default: 2000
    pub idle_ms: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self { idle_ms: 2000 }
    }
}

impl AutosaveConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.idle_ms == 0 {
            return Err(ConfigError::invalid_value(
                "autosave",
                "idle_ms",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AutosaveConfig::default();
        assert_eq!(config.idle_ms, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_idle_rejected() {
        let config: AutosaveConfig = toml::from_str("idle_ms = 0").unwrap();
        assert!(config.validate().is_err());
    }
}
