// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three layers, later ones winning:
//! 1. TOML file (base values, missing keys fall back to defaults)
//! 2. Environment variables (`MULTITOOL_*`)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, MultitoolConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File name searched for when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "multitool.toml";

/// Environment variable pointing at a config file
pub const CONFIG_PATH_ENV: &str = "MULTITOOL_CONFIG_PATH";

/// Find the MultiTool configuration file
///
/// Search order:
/// 1. `MULTITOOL_CONFIG_PATH` environment variable
/// 2. Current working directory: `./multitool.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(path) = search_paths.iter().find(|p| p.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, the file is searched for.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Returns
///
/// Complete `MultitoolConfig` with all overrides applied
///
/// # Errors
///
/// Returns error if the config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<MultitoolConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: MultitoolConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

fn parse_into<T: FromStr>(value: &str, target: &mut T) {
    if let Ok(parsed) = value.trim().parse::<T>() {
        *target = parsed;
    }
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `MULTITOOL_DEVICE_NAME` -> `device.name`
/// - `MULTITOOL_TICK_INTERVAL_MS` -> `device.tick_interval_ms`
/// - `MULTITOOL_IR_RX_PIN` -> `ir.rx_pin`
/// - `MULTITOOL_IR_TX_PIN` -> `ir.tx_pin`
/// - `MULTITOOL_IR_CARRIER_HZ` -> `ir.carrier_frequency_hz`
/// - `MULTITOOL_LINK_CHUNK_SIZE` -> `link.chunk_size`
/// - `MULTITOOL_LINK_CHUNK_DELAY_MS` -> `link.chunk_delay_ms`
/// - `MULTITOOL_RFID_DATA_BLOCK` -> `rfid.data_block`
/// - `MULTITOOL_LOG_LEVEL` -> `logging.level`
/// - `MULTITOOL_FILE_LOGGING` -> `logging.file_logging`
///
/// Unparseable values are ignored.
pub fn apply_environment_overrides(config: &mut MultitoolConfig) {
    if let Ok(value) = env::var("MULTITOOL_DEVICE_NAME") {
        config.device.name = value;
    }
    if let Ok(value) = env::var("MULTITOOL_TICK_INTERVAL_MS") {
        parse_into(&value, &mut config.device.tick_interval_ms);
    }

    if let Ok(value) = env::var("MULTITOOL_IR_RX_PIN") {
        parse_into(&value, &mut config.ir.rx_pin);
    }
    if let Ok(value) = env::var("MULTITOOL_IR_TX_PIN") {
        parse_into(&value, &mut config.ir.tx_pin);
    }
    if let Ok(value) = env::var("MULTITOOL_IR_CARRIER_HZ") {
        parse_into(&value, &mut config.ir.carrier_frequency_hz);
    }

    if let Ok(value) = env::var("MULTITOOL_LINK_CHUNK_SIZE") {
        parse_into(&value, &mut config.link.chunk_size);
    }
    if let Ok(value) = env::var("MULTITOOL_LINK_CHUNK_DELAY_MS") {
        parse_into(&value, &mut config.link.chunk_delay_ms);
    }

    if let Ok(value) = env::var("MULTITOOL_RFID_DATA_BLOCK") {
        parse_into(&value, &mut config.rfid.data_block);
    }

    if let Ok(value) = env::var("MULTITOOL_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("MULTITOOL_FILE_LOGGING") {
        config.logging.file_logging = parse_flag(&value);
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - Map of CLI arguments (e.g., `{"device_name": "Bench", "chunk_size": "64"}`)
pub fn apply_cli_overrides(config: &mut MultitoolConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("device_name") {
        config.device.name = value.clone();
    }
    if let Some(value) = cli_args.get("tick_interval_ms") {
        parse_into(value, &mut config.device.tick_interval_ms);
    }
    if let Some(value) = cli_args.get("idle_return_ms") {
        parse_into(value, &mut config.device.idle_return_ms);
    }

    if let Some(value) = cli_args.get("carrier_frequency_hz") {
        parse_into(value, &mut config.ir.carrier_frequency_hz);
    }
    if let Some(value) = cli_args.get("header_timeout_us") {
        parse_into(value, &mut config.ir.header_timeout_us);
    }

    if let Some(value) = cli_args.get("chunk_size") {
        parse_into(value, &mut config.link.chunk_size);
    }
    if let Some(value) = cli_args.get("chunk_delay_ms") {
        parse_into(value, &mut config.link.chunk_delay_ms);
    }

    if let Some(value) = cli_args.get("data_block") {
        parse_into(value, &mut config.rfid.data_block);
    }

    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("file_logging") {
        config.logging.file_logging = parse_flag(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("bench.toml");
        File::create(&config_path).unwrap();

        env::set_var(CONFIG_PATH_ENV, config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing_file() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("absent.toml");

        env::set_var(CONFIG_PATH_ENV, config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var(CONFIG_PATH_ENV);

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let saved_chunk = env::var("MULTITOOL_LINK_CHUNK_SIZE").ok();
        env::remove_var("MULTITOOL_LINK_CHUNK_SIZE");

        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[device]").unwrap();
        writeln!(file, "name = \"Bench\"").unwrap();
        writeln!(file, "[link]").unwrap();
        writeln!(file, "chunk_size = 64").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.device.name, "Bench");
        assert_eq!(config.device.tick_interval_ms, 200);
        assert_eq!(config.link.chunk_size, 64);

        if let Some(value) = saved_chunk {
            env::set_var("MULTITOOL_LINK_CHUNK_SIZE", value);
        }
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[ir").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = MultitoolConfig::default();

        env::set_var("MULTITOOL_DEVICE_NAME", "Lab Unit");
        env::set_var("MULTITOOL_IR_CARRIER_HZ", "36000");
        env::set_var("MULTITOOL_LINK_CHUNK_DELAY_MS", "not-a-number");

        apply_environment_overrides(&mut config);

        env::remove_var("MULTITOOL_DEVICE_NAME");
        env::remove_var("MULTITOOL_IR_CARRIER_HZ");
        env::remove_var("MULTITOOL_LINK_CHUNK_DELAY_MS");

        assert_eq!(config.device.name, "Lab Unit");
        assert_eq!(config.ir.carrier_frequency_hz, 36_000);
        assert_eq!(config.link.chunk_delay_ms, 10);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = MultitoolConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("chunk_size".to_string(), "128".to_string());
        cli_args.insert("file_logging".to_string(), "yes".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.link.chunk_size, 128);
        assert!(config.logging.file_logging);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[device]").unwrap();
        writeln!(file, "name = \"file-name\"").unwrap();
        writeln!(file, "tick_interval_ms = 100").unwrap();

        env::set_var("MULTITOOL_DEVICE_NAME", "env-name");
        env::set_var("MULTITOOL_TICK_INTERVAL_MS", "50");

        let mut cli_args = HashMap::new();
        cli_args.insert("device_name".to_string(), "cli-name".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("MULTITOOL_DEVICE_NAME");
        env::remove_var("MULTITOOL_TICK_INTERVAL_MS");

        // CLI wins for the name, env wins for the interval (no CLI override)
        assert_eq!(config.device.name, "cli-name");
        assert_eq!(config.device.tick_interval_ms, 50);
    }
}
