// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for host builds
//!
//! Console output always goes to stderr (the simulator owns stdout for link
//! traffic). With `file-logging`, a JSON copy is written to a timestamped run
//! folder:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       └── multitool.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::ObservabilityError;

/// Number of run folders kept by default
pub const DEFAULT_RETENTION_RUNS: usize = 10;

/// Keeps file writers alive; logs are flushed when it is dropped
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving log files, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Build the `EnvFilter` for the given flags and default level
///
/// # Errors
/// Returns `ObservabilityError::InvalidFilter` if `default_level` is not a
/// valid directive.
pub fn build_filter(
    debug_flags: &CrateDebugFlags,
    default_level: &str,
) -> Result<EnvFilter, ObservabilityError> {
    let filter = debug_flags.to_filter_string(default_level);
    EnvFilter::try_new(&filter).map_err(|e| ObservabilityError::InvalidFilter {
        filter,
        reason: e.to_string(),
    })
}

/// Initialize the global subscriber
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags
/// * `default_level` - Level for everything not flagged (e.g. "info")
/// * `log_dir` - Base folder for JSON log files; ignored without `file-logging`
pub fn init_logging(
    debug_flags: &CrateDebugFlags,
    default_level: &str,
    log_dir: Option<PathBuf>,
) -> Result<LoggingGuard> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_filter(build_filter(debug_flags, default_level)?)
        .boxed();
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let (file_guards, run_folder) = match log_dir {
        Some(base) => {
            let (layer, guard, run_folder) = file_layer(&base, debug_flags, default_level)?;
            layers.push(layer);
            (vec![guard], Some(run_folder))
        }
        None => (Vec::new(), None),
    };

    #[cfg(not(feature = "file-logging"))]
    let run_folder: Option<PathBuf> = {
        if log_dir.is_some() {
            eprintln!("Warning: file logging requested but the `file-logging` feature is disabled");
        }
        None
    };

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|_| ObservabilityError::AlreadyInitialised)?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir: run_folder,
    })
}

#[cfg(feature = "file-logging")]
fn file_layer(
    base_log_dir: &Path,
    debug_flags: &CrateDebugFlags,
    default_level: &str,
) -> Result<(
    Box<dyn Layer<Registry> + Send + Sync>,
    tracing_appender::non_blocking::WorkerGuard,
    PathBuf,
)> {
    use anyhow::Context;

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let run_folder = base_log_dir.join(format!("run_{}", timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    cleanup_old_runs(base_log_dir, DEFAULT_RETENTION_RUNS)?;

    let appender = tracing_appender::rolling::never(&run_folder, "multitool.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_filter(build_filter(debug_flags, default_level)?)
        .boxed();

    Ok((layer, guard, run_folder))
}

/// Remove all but the `keep` most recent `run_*` folders
#[cfg(feature = "file-logging")]
fn cleanup_old_runs(base_log_dir: &Path, keep: usize) -> Result<()> {
    if !base_log_dir.exists() {
        return Ok(());
    }

    let mut runs: Vec<PathBuf> = std::fs::read_dir(base_log_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|n| n.strip_prefix("run_"))
                    .map(|ts| chrono::NaiveDateTime::parse_from_str(ts, "%Y%m%d_%H%M%S").is_ok())
                    .unwrap_or(false)
        })
        .collect();

    // Timestamps sort lexically
    runs.sort();

    if runs.len() > keep {
        let excess = runs.len() - keep;
        for path in runs.iter().take(excess) {
            if let Err(e) = std::fs::remove_dir_all(path) {
                eprintln!(
                    "Warning: Failed to remove old log directory {}: {}",
                    path.display(),
                    e
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_levels() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-multitool-ir".to_string()]);
        assert!(build_filter(&flags, "info").is_ok());
        assert!(build_filter(&flags, "warn").is_ok());
    }

    #[test]
    fn test_build_filter_rejects_garbage() {
        let result = build_filter(&CrateDebugFlags::default(), "multitool_ir=loud");
        assert!(matches!(
            result,
            Err(ObservabilityError::InvalidFilter { .. })
        ));
    }

    #[cfg(feature = "file-logging")]
    #[test]
    fn test_cleanup_keeps_most_recent_runs() {
        let dir = tempfile::tempdir().unwrap();
        for ts in ["20250101_000000", "20250102_000000", "20250103_000000"] {
            std::fs::create_dir_all(dir.path().join(format!("run_{}", ts))).unwrap();
        }
        std::fs::create_dir_all(dir.path().join("notes")).unwrap();

        cleanup_old_runs(dir.path(), 2).unwrap();

        assert!(!dir.path().join("run_20250101_000000").exists());
        assert!(dir.path().join("run_20250102_000000").exists());
        assert!(dir.path().join("run_20250103_000000").exists());
        assert!(dir.path().join("notes").exists());
    }
}
