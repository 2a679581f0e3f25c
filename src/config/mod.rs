//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions (Config, UserConfig, ChatConfig, TransferConfig)
//! - [`defaults`]: serde default value functions
//! - [`validation`]: startup validation collecting every problem found

mod defaults;
mod types;
pub mod validation;

pub use types::{ChatConfig, Config, ConfigError, TransferConfig, UserConfig};
