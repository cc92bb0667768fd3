//! Outreach configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Minimal config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use outreach_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[api]\nurl = \"http://localhost:3000\"").unwrap();
//! ```
//!
//! # Example Full Config
//!
//! ```toml
//! [api]
//! url = "https://api.outreach.example"
//! timeout_secs = 30
//!
//! [preview]
//! debounce_ms = 500
//! grace_ms = 300
//!
//! [autosave]
//! idle_ms = 2000
//!
//! [drafts]
//! dir = "/var/lib/outreach/drafts"
//!
//! [log]
//! level = "info"
//! ```

mod api;
mod autosave;
mod drafts;
mod error;
pub mod logging;
mod preview;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use api::ApiConfig;
pub use autosave::AutosaveConfig;
pub use drafts::DraftsConfig;
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use preview::PreviewConfig;

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API client configuration
    pub api: ApiConfig,

    /// Audience preview scheduler timing
    pub preview: PreviewConfig,

    /// Draft autosave timing
    pub autosave: AutosaveConfig,

    /// Draft storage location
    pub drafts: DraftsConfig,

    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.preview.validate()?;
        self.autosave.validate()?;
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
