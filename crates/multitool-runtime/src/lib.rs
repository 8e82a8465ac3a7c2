// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! # multitool-runtime
//!
//! The device main loop. One [`Device::tick`]:
//!
//! 1. handles at most one queued command and sends its replies
//! 2. in RFID/READ, scans for a tag and reports new UIDs
//! 3. in IR/READ, captures IR and reports new codes
//! 4. redraws the idle screen when connectivity changed
//! 5. redraws the idle screen after a quiet period
//! 6. sleeps the tick interval
//!
//! Business logic runs on this one context; only the
//! [`LinkEventHandler`](multitool_transport::LinkEventHandler) returned by
//! [`Device::new`] lives wherever the radio stack calls back.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod device;

pub use device::{BoardParts, Device, TickOutcome};
