//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use crate::state::is_valid_nick;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("user.nick '{0}' is not a valid nick name (1-10 letters, digits, '-', '_' or '.')")]
    InvalidNick(String),
    #[error("user.download_dir must not be empty")]
    EmptyDownloadDir,
    #[error("chat.max_away_length must be greater than 0")]
    ZeroAwayLength,
    #[error("chat.max_topic_length must be greater than 0")]
    ZeroTopicLength,
    #[error("transfers.max_rename_attempts must be greater than 0")]
    ZeroRenameAttempts,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_valid_nick(&config.user.nick) {
        errors.push(ValidationError::InvalidNick(config.user.nick.clone()));
    }
    if config.user.download_dir.trim().is_empty() {
        errors.push(ValidationError::EmptyDownloadDir);
    }

    if config.chat.max_away_length == 0 {
        errors.push(ValidationError::ZeroAwayLength);
    }
    if config.chat.max_topic_length == 0 {
        errors.push(ValidationError::ZeroTopicLength);
    }

    if config.transfers.max_rename_attempts == 0 {
        errors.push(ValidationError::ZeroRenameAttempts);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
