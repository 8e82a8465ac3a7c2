// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

/// IR carrier (PWM) output.
pub mod carrier;
/// Status display notifications.
pub mod display;
/// General-purpose input pins.
pub mod gpio;
/// Radio link (BLE) collaborator.
pub mod link;
/// RFID/NFC tag reader collaborator.
pub mod tag;
/// Timekeeping abstractions (monotonic timers, delays).
pub mod time;

// Re-export trait types
pub use carrier::CarrierOutput;
pub use display::StatusDisplay;
pub use gpio::InputPin;
pub use link::{ConnectionId, LinkError, LinkProvider};
pub use tag::{BlockPayload, TagReader, TagUid, TagUidParseError, DEFAULT_DATA_BLOCK, DEFAULT_KEY_A};
pub use time::TimeProvider;

/// Bundle of every collaborator type a concrete board provides
///
/// A board is a type-level description: the runtime is generic over one
/// `Board` instead of over six separate collaborator parameters.
pub trait Board {
    /// Monotonic time source, shared by the codec, the transport and the loop
    type Clock: TimeProvider + Clone;

    /// IR receiver output pin (idle high, pulled low while a carrier is seen)
    type IrReceiver: InputPin;

    /// IR LED driver
    type IrCarrier: CarrierOutput;

    /// RFID/NFC reader
    type Tags: TagReader;

    /// Status display
    type Display: StatusDisplay + Send + Sync + 'static;

    /// Radio link
    type Link: LinkProvider + 'static;

    /// Board name (e.g., "RP2040 MultiTool", "Host simulator")
    const NAME: &'static str;
}
