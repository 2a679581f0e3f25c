//! Core configuration types and loading.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::defaults::{
    default_download_dir, default_log_filter, default_max_away_length,
    default_max_rename_attempts, default_max_topic_length, default_nick, default_topic_history,
};
use super::validation::ValidationError;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Tracing filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Local user identity.
    #[serde(default)]
    pub user: UserConfig,
    /// Chat limits enforced by the session layer.
    #[serde(default)]
    pub chat: ChatConfig,
    /// File transfer settings.
    #[serde(default)]
    pub transfers: TransferConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            user: UserConfig::default(),
            chat: ChatConfig::default(),
            transfers: TransferConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        super::validation::validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Load the file at `path`, or fall back to defaults when it does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path.as_ref()) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.as_ref().display(), "No config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }
}

/// Local user identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    /// Nick name announced to other clients.
    #[serde(default = "default_nick")]
    pub nick: String,
    /// Numeric user code. Generated at startup when absent.
    #[serde(default)]
    pub code: Option<u32>,
    /// Directory where received files are stored.
    #[serde(default = "default_download_dir")]
    pub download_dir: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            nick: default_nick(),
            code: None,
            download_dir: default_download_dir(),
        }
    }
}

impl UserConfig {
    pub fn download_path(&self) -> PathBuf {
        PathBuf::from(&self.download_dir)
    }
}

/// Chat limits.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Longest away message the session accepts (default: 200).
    #[serde(default = "default_max_away_length")]
    pub max_away_length: usize,
    /// Longest topic the session accepts (default: 200).
    #[serde(default = "default_max_topic_length")]
    pub max_topic_length: usize,
    /// Number of previous topics remembered (default: 16).
    #[serde(default = "default_topic_history")]
    pub topic_history: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_away_length: default_max_away_length(),
            max_topic_length: default_max_topic_length(),
            topic_history: default_topic_history(),
        }
    }
}

/// File transfer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferConfig {
    /// Candidate names tried before giving up on a colliding download (default: 1000).
    #[serde(default = "default_max_rename_attempts")]
    pub max_rename_attempts: u32,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            max_rename_attempts: default_max_rename_attempts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.user.nick, "Guest");
        assert_eq!(config.user.code, None);
        assert_eq!(config.chat.max_away_length, 200);
        assert_eq!(config.chat.topic_history, 16);
        assert_eq!(config.transfers.max_rename_attempts, 1000);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = Config::from_toml(
            r#"
            log_filter = "debug"

            [user]
            nick = "Niles"
            code = 1234
            download_dir = "/tmp/incoming"

            [transfers]
            max_rename_attempts = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.user.nick, "Niles");
        assert_eq!(config.user.code, Some(1234));
        assert_eq!(config.user.download_path(), PathBuf::from("/tmp/incoming"));
        assert_eq!(config.transfers.max_rename_attempts, 5);
        assert_eq!(config.chat.max_topic_length, 200);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = Config::from_toml(
            r#"
            [user]
            nick = "this nick is far too long"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref errors) if errors.len() == 1));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.user.nick, "Guest");
    }
}
