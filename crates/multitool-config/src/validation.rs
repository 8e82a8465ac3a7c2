// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that values are within the ranges the hardware and the codec can
//! honour, and that sections don't conflict with each other.

use multitool_hal::nus::MAX_NOTIFY_CHUNK;

use crate::{ConfigError, ConfigResult, MultitoolConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
    PinConflict { pin: u8 },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
            Self::PinConflict { pin } => {
                write!(f, "Pin conflict: ir.rx_pin and ir.tx_pin both use GPIO {}", pin)
            }
        }
    }
}

/// Validate the complete configuration
///
/// All problems are collected before returning, so one run reports every
/// offending field.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &MultitoolConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

fn collect_errors(config: &MultitoolConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_required_fields(config, &mut errors);
    validate_ir(config, &mut errors);
    validate_link(config, &mut errors);
    validate_device(config, &mut errors);
    errors
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigValidationError {
    ConfigValidationError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn validate_required_fields(config: &MultitoolConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.device.name.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "device.name".to_string(),
        });
    }
    if config.logging.level.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "logging.level".to_string(),
        });
    }
}

fn validate_ir(config: &MultitoolConfig, errors: &mut Vec<ConfigValidationError>) {
    let ir = &config.ir;

    if ir.rx_pin == ir.tx_pin {
        errors.push(ConfigValidationError::PinConflict { pin: ir.rx_pin });
    }
    if ir.carrier_frequency_hz == 0 {
        errors.push(invalid("ir.carrier_frequency_hz", "must be greater than 0"));
    }
    if ir.carrier_duty == 0 {
        errors.push(invalid("ir.carrier_duty", "must be greater than 0"));
    }
    if ir.max_pulses == 0 {
        errors.push(invalid("ir.max_pulses", "must be greater than 0"));
    }
    if ir.min_pulses > ir.max_pulses {
        errors.push(invalid(
            "ir.min_pulses",
            format!("{} exceeds ir.max_pulses ({})", ir.min_pulses, ir.max_pulses),
        ));
    }
    if ir.header_timeout_us == 0 {
        errors.push(invalid("ir.header_timeout_us", "must be greater than 0"));
    }
    if ir.silence_timeout_us == 0 {
        errors.push(invalid("ir.silence_timeout_us", "must be greater than 0"));
    }
}

fn validate_link(config: &MultitoolConfig, errors: &mut Vec<ConfigValidationError>) {
    let link = &config.link;

    if link.chunk_size == 0 || link.chunk_size > MAX_NOTIFY_CHUNK {
        errors.push(invalid(
            "link.chunk_size",
            format!("{} is outside 1..={}", link.chunk_size, MAX_NOTIFY_CHUNK),
        ));
    }
    if link.command_queue_capacity == 0 {
        errors.push(invalid("link.command_queue_capacity", "must be greater than 0"));
    }
    if link.max_line_len == 0 {
        errors.push(invalid("link.max_line_len", "must be greater than 0"));
    }
    if link.advertising_interval_us == 0 {
        errors.push(invalid("link.advertising_interval_us", "must be greater than 0"));
    }
}

fn validate_device(config: &MultitoolConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.device.tick_interval_ms == 0 {
        errors.push(invalid("device.tick_interval_ms", "must be greater than 0"));
    }
    if config.device.idle_return_ms == 0 {
        errors.push(invalid("device.idle_return_ms", "must be greater than 0"));
    }
}
