//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

// =============================================================================
// Logging Defaults
// =============================================================================

pub fn default_log_filter() -> String {
    "info".to_string()
}

// =============================================================================
// User Defaults
// =============================================================================

pub fn default_nick() -> String {
    "Guest".to_string()
}

pub fn default_download_dir() -> String {
    "downloads".to_string()
}

// =============================================================================
// Chat Defaults
// =============================================================================

pub fn default_max_away_length() -> usize {
    200
}

pub fn default_max_topic_length() -> usize {
    200
}

pub fn default_topic_history() -> usize {
    16
}

// =============================================================================
// Transfer Defaults
// =============================================================================

/// Upper bound on `name_<n>.ext` candidates tried when a received file collides.
pub fn default_max_rename_attempts() -> u32 {
    1000
}
