//! Application configuration stored in `config.yaml`.
//!
//! ```yaml
//! # ~/.medprofile/config.yaml
//! user_id: alice
//! ```

use serde::{Deserialize, Serialize};

use medprofile_core::DEFAULT_USER;

#[cfg(feature = "native")]
use std::fs;
#[cfg(feature = "native")]
use std::path::Path;

/// Configuration stored in config.yaml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Whose profile the screen edits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub const FILE_NAME: &'static str = "config.yaml";

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_saphyr::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Pick the user id: command line first, then config, then the default user.
    /// Blank values are skipped.
    pub fn resolve_user(&self, cli_user: Option<&str>) -> String {
        [cli_user, self.user_id.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|u| !u.is_empty())
            .unwrap_or(DEFAULT_USER)
            .to_string()
    }
}

#[cfg(feature = "native")]
impl AppConfig {
    /// Load `config.yaml` from the data directory. A missing file yields defaults.
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = data_dir.join(Self::FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| ConfigError::Io(format!("Failed to read config: {}", e)))?;
        Self::from_yaml(&content)
    }

    /// Like [`AppConfig::load`], but logs and falls back to defaults on error.
    pub fn load_or_default(data_dir: &Path) -> Self {
        Self::load(data_dir).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using default configuration");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_user_precedence() {
        let config = AppConfig {
            user_id: Some("from-config".to_string()),
        };
        assert_eq!(config.resolve_user(Some("from-cli")), "from-cli");
        assert_eq!(config.resolve_user(None), "from-config");
        assert_eq!(AppConfig::default().resolve_user(None), DEFAULT_USER);
        assert_eq!(config.resolve_user(Some("  ")), "from-config");
        assert_eq!(AppConfig::default().resolve_user(Some("  ")), DEFAULT_USER);
    }

    #[test]
    fn test_from_yaml() {
        let config = AppConfig::from_yaml("user_id: alice\n").unwrap();
        assert_eq!(config.user_id.as_deref(), Some("alice"));
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_load_missing_and_invalid() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(AppConfig::load(dir.path()).unwrap(), AppConfig::default());

        fs::write(dir.path().join(AppConfig::FILE_NAME), "user_id: [unclosed").unwrap();
        assert!(matches!(
            AppConfig::load(dir.path()),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(AppConfig::load_or_default(dir.path()), AppConfig::default());
    }
}
