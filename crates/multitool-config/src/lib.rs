// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! # MultiTool Configuration System
//!
//! Type-safe configuration for the MultiTool core with support for:
//! - TOML file parsing
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! Every section defaults to the values the reference board ships with, so an
//! empty file (or no file at all via [`MultitoolConfig::default`]) is a valid
//! configuration.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use multitool_config::{load_config, MultitoolConfig};
//!
//! let config = load_config(None, None).expect("Failed to load config");
//! println!("Advertising as {}", config.device.name);
//! println!("IR carrier: {} Hz", config.ir.carrier_frequency_hz);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_config};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MultitoolConfig::default();
        assert!(validate_config(&config).is_ok());
    }
}
