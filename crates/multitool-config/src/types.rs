// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `multitool.toml`.

use multitool_hal::nus::{DEFAULT_DEVICE_NAME, DEFAULT_NOTIFY_CHUNK};
use multitool_hal::DEFAULT_DATA_BLOCK;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MultitoolConfig {
    pub device: DeviceConfig,
    pub ir: IrConfig,
    pub link: LinkConfig,
    pub rfid: RfidConfig,
    pub logging: LoggingConfig,
}

/// Device identity and main loop pacing
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Advertised BLE name
    pub name: String,
    /// Sleep between two loop ticks
    pub tick_interval_ms: u32,
    /// Redraw the idle screen after this long without UI activity
    pub idle_return_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DEVICE_NAME.to_string(),
            tick_interval_ms: 200,
            idle_return_ms: 3000,
        }
    }
}

/// IR receiver/transmitter wiring and capture timing
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IrConfig {
    /// GPIO of the demodulating receiver output
    pub rx_pin: u8,
    /// GPIO driving the IR LED transistor
    pub tx_pin: u8,
    pub carrier_frequency_hz: u32,
    /// 16-bit PWM duty during marks (32768 = 50 %)
    pub carrier_duty: u16,
    /// Captures shorter than this are discarded as noise
    pub min_pulses: usize,
    /// Capture stops after this many durations
    pub max_pulses: usize,
    /// Give up waiting for the first falling edge after this long
    pub header_timeout_us: u64,
    /// A level held longer than this ends the frame
    pub silence_timeout_us: u64,
}

impl Default for IrConfig {
    fn default() -> Self {
        Self {
            rx_pin: 14,
            tx_pin: 15,
            carrier_frequency_hz: 38_000,
            carrier_duty: 32_768,
            min_pulses: 10,
            max_pulses: 1000,
            header_timeout_us: 2_000_000,
            silence_timeout_us: 50_000,
        }
    }
}

/// Line transport over the radio link
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Notification payload size
    pub chunk_size: usize,
    /// Pause after every notification
    pub chunk_delay_ms: u32,
    pub advertising_interval_us: u32,
    /// Completed lines waiting for the main loop
    pub command_queue_capacity: usize,
    /// Longest inbound line before the accumulator is reset
    pub max_line_len: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_NOTIFY_CHUNK,
            chunk_delay_ms: 10,
            advertising_interval_us: 500_000,
            command_queue_capacity: 32,
            max_line_len: 512,
        }
    }
}

/// Tag reader settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RfidConfig {
    /// Block used by WRITE_NFC, RFID_SCAN and background scans
    pub data_block: u8,
}

impl Default for RfidConfig {
    fn default() -> Self {
        Self {
            data_block: DEFAULT_DATA_BLOCK,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level (trace, debug, info, warn, error)
    pub level: String,
    /// Also write JSON logs to `log_dir` (host builds with `file-logging`)
    pub file_logging: bool,
    pub log_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: false,
            log_dir: PathBuf::from("./logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: MultitoolConfig = toml::from_str(
            r#"
            [ir]
            carrier_frequency_hz = 36000

            [link]
            chunk_size = 64
            "#,
        )
        .unwrap();

        assert_eq!(config.ir.carrier_frequency_hz, 36_000);
        assert_eq!(config.ir.silence_timeout_us, 50_000);
        assert_eq!(config.link.chunk_size, 64);
        assert_eq!(config.link.chunk_delay_ms, 10);
        assert_eq!(config.device, DeviceConfig::default());
    }

    #[test]
    fn test_defaults_follow_board_constants() {
        let config = MultitoolConfig::default();
        assert_eq!(config.device.name, DEFAULT_DEVICE_NAME);
        assert_eq!(config.link.chunk_size, DEFAULT_NOTIFY_CHUNK);
        assert_eq!(config.link.advertising_interval_us, 500_000);
        assert_eq!(config.rfid.data_block, DEFAULT_DATA_BLOCK);
    }
}
