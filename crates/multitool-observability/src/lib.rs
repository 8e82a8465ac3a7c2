// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! # multitool-observability
//!
//! Logging setup shared by the MultiTool host tools.
//!
//! Library crates only emit `tracing` events; binaries call [`init_logging`]
//! once at startup. Per-crate verbosity is controlled by `--debug-<crate>`
//! flags or the `MULTITOOL_DEBUG` environment variable.
//!
//! ## Features
//! - `file-logging`: JSON log files in a timestamped run folder

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known MultiTool crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "multitool",
    "multitool-config",
    "multitool-hal",
    "multitool-hal-mock",
    "multitool-ir",
    "multitool-transport",
    "multitool-dispatch",
    "multitool-runtime",
];

/// Logging setup failures
#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    /// The filter directive string did not parse
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Offending directive string
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber was already installed
    #[error("logging already initialised")]
    AlreadyInitialised,
}
