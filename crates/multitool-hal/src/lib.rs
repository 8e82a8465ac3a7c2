// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # MultiTool HAL
//!
//! Hardware abstraction for the MultiTool handheld.
//!
//! This crate provides:
//! - **HAL traits** (`hal` module) - the collaborators the core talks to: time
//!   source, IR receiver pin, IR carrier output, radio link, tag reader and
//!   status display
//! - **Nordic UART Service definitions** (`nus` module) - the BLE service the
//!   command channel is exposed on
//! - **Platform implementations** (`platforms` module) - std-backed pieces for
//!   host builds
//!
//! ## Feature Flags
//!
//! - `host` (default) - `StdClock` backed by `std::time::Instant`

/// Hardware abstraction traits shared by all boards.
pub mod hal;

/// Nordic UART Service UUIDs and default advertised name.
pub mod nus;

/// Concrete platform implementations.
pub mod platforms;

pub use hal::{
    BlockPayload, Board, CarrierOutput, ConnectionId, InputPin, LinkError, LinkProvider,
    StatusDisplay, TagReader, TagUid, TagUidParseError, TimeProvider, DEFAULT_DATA_BLOCK,
    DEFAULT_KEY_A,
};

#[cfg(feature = "host")]
pub use platforms::StdClock;

/// Prelude module for convenient imports
///
/// ```no_run
/// use multitool_hal::prelude::*;
/// ```
pub mod prelude {
    pub use crate::hal::*;
    pub use crate::nus::*;

    #[cfg(feature = "host")]
    pub use crate::platforms::StdClock;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
