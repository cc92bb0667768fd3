//! Draft storage configuration

use std::path::PathBuf;

use serde::Deserialize;

/// Draft storage configuration
///
/// # Example
///
/// ```toml
/// [drafts]
/// dir = "/var/lib/outreach/drafts"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftsConfig {
    /// Directory for draft files
    /// Default: ~/.outreach/drafts
    pub dir: Option<PathBuf>,
}

impl DraftsConfig {
    /// Resolve the draft directory, falling back to `~/.outreach/drafts`
    pub fn resolve_dir(&self) -> Option<PathBuf> {
        match &self.dir {
            Some(dir) => Some(dir.clone()),
            None => dirs::home_dir().map(|home| home.join(".outreach").join("drafts")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unset() {
        let config = DraftsConfig::default();
        assert!(config.dir.is_none());
    }

    #[test]
    fn test_explicit_dir_wins() {
        let config: DraftsConfig = toml::from_str("dir = \"/tmp/outreach-drafts\"").unwrap();
        assert_eq!(
            config.resolve_dir(),
            Some(PathBuf::from("/tmp/outreach-drafts"))
        );
    }
}
