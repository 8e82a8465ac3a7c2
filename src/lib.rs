// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! # MultiTool - handheld IR / RFID / BLE multi-tool core
//!
//! Board-independent core of the MultiTool handheld: it captures and replays
//! infrared remote codes, reads and writes RFID tags, and takes commands from
//! a phone over a line-oriented BLE UART channel.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! multitool = "0.3"
//! ```
//!
//! ## Feature Flags
//!
//! - **`host-sim`** (default): the `multitool-sim` binary, a mock board wired
//!   to stdin/stdout
//! - **`file-logging`**: JSON log files in a timestamped run folder
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::atomic::AtomicBool;
//! use std::sync::Arc;
//!
//! use multitool::prelude::*;
//! use multitool::hal_mock::{
//!     FakeClock, MockBoard, MockTagReader, RecordingCarrier, RecordingDisplay, RecordingLink,
//!     ScriptedIrReceiver,
//! };
//!
//! let clock = FakeClock::with_auto_advance(1);
//! let parts = BoardParts::<MockBoard<FakeClock>> {
//!     clock: clock.clone(),
//!     ir_receiver: ScriptedIrReceiver::new(clock.clone()),
//!     ir_carrier: RecordingCarrier::new(clock.clone()),
//!     tags: MockTagReader::new(),
//!     display: Arc::new(RecordingDisplay::new()),
//!     link: Arc::new(RecordingLink::new()),
//! };
//!
//! let (mut device, mut handler) = Device::new(parts, &MultitoolConfig::default());
//! handler.on_connect(1);
//! handler.on_bytes_received(1, b"SET_MODE:IR|SUBMODE:SEND\n");
//! device.tick();
//!
//! let running = AtomicBool::new(true);
//! device.run(&running);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: multitool-config, multitool-observability  │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Platform: multitool-hal (traits), multitool-hal-mock   │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Core: multitool-ir, multitool-transport,               │
//! │        multitool-dispatch                               │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application: multitool-runtime (device loop)           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use multitool_config as config;
pub use multitool_observability as observability;

// Re-export platform layer
pub use multitool_hal as hal;
pub use multitool_hal_mock as hal_mock;

// Re-export core
pub use multitool_dispatch as dispatch;
pub use multitool_ir as ir;
pub use multitool_transport as transport;

// Re-export application
pub use multitool_runtime as runtime;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::config::{load_config, validate_config, MultitoolConfig};
    pub use crate::dispatch::{Command, Dispatcher, Mode, ModeState, Reply, Submode};
    pub use crate::hal::prelude::*;
    pub use crate::ir::{decode_nec, encode_nec, Code, NecFrame, PulseCodec, PulseSequence};
    pub use crate::runtime::{BoardParts, Device, TickOutcome};
    pub use crate::transport::{LineTransport, LinkEventHandler};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_crate_versions_match() {
        assert_eq!(VERSION, runtime::VERSION);
        assert_eq!(VERSION, ir::VERSION);
        assert_eq!(VERSION, config::VERSION);
    }
}
