// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! # multitool-ir
//!
//! Infrared pulse-train codec.
//!
//! A demodulating receiver turns a 38 kHz burst into a low level on its output
//! pin. [`PulseCodec::capture`] busy-polls that pin and records how long each
//! level lasts, producing a [`PulseSequence`] of microsecond durations that
//! starts with a mark. [`decode_nec`] recognises NEC frames in such a
//! sequence, [`encode_nec`] builds one, and [`PulseCodec::transmit`] replays
//! any sequence on the IR LED by switching the PWM carrier on for marks and
//! off for spaces.
//!
//! ```rust
//! use multitool_ir::{decode_nec, encode_nec, NecFrame};
//!
//! let frame = NecFrame::new(0xA2, 0x34);
//! let pulses = encode_nec(frame);
//! assert_eq!(pulses.len(), 67);
//! assert_eq!(decode_nec(pulses.as_slice()), Some(frame));
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod code;
pub mod codec;
pub mod error;
pub mod nec;
pub mod sequence;

pub use code::Code;
pub use codec::PulseCodec;
pub use error::{CaptureError, IrError, IrResult};
pub use nec::{decode_nec, encode_nec, NecFrame};
pub use sequence::{PulseSequence, MAX_PULSES};
