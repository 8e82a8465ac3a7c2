// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Nordic UART Service (NUS) definitions
//!
//! The command channel rides on NUS, a widely supported BLE service that
//! mimics a UART:
//!
//! - **Service UUID**: `6E400001-B5A3-F393-E0A9-E50E24DCCA9E`
//! - **RX Characteristic**: `6E400002-B5A3-F393-E0A9-E50E24DCCA9E` (Write)
//!   - Phone → Device (command lines, possibly fragmented)
//! - **TX Characteristic**: `6E400003-B5A3-F393-E0A9-E50E24DCCA9E` (Notify)
//!   - Device → Phone (reply lines, split into 20-byte notifications)
//!
//! ## Usage
//!
//! ```rust
//! use multitool_hal::nus::*;
//!
//! let service_uuid = NUS_SERVICE_UUID;
//! let rx_uuid = NUS_RX_CHAR_UUID; // Phone writes here
//! let tx_uuid = NUS_TX_CHAR_UUID; // Phone subscribes here
//! assert_eq!(uuid_to_string(&service_uuid), "6e400001-b5a3-f393-e0a9-e50e24dcca9e");
//! ```

/// Nordic UART Service UUID: 6E400001-B5A3-F393-E0A9-E50E24DCCA9E
pub const NUS_SERVICE_UUID: [u8; 16] = [
    0x6e, 0x40, 0x00, 0x01, 0xb5, 0xa3, 0xf3, 0x93,
    0xe0, 0xa9, 0xe5, 0x0e, 0x24, 0xdc, 0xca, 0x9e,
];

/// NUS TX Characteristic UUID: 6E400003-B5A3-F393-E0A9-E50E24DCCA9E
///
/// **Direction**: Device → Phone (Notify)
pub const NUS_TX_CHAR_UUID: [u8; 16] = [
    0x6e, 0x40, 0x00, 0x03, 0xb5, 0xa3, 0xf3, 0x93,
    0xe0, 0xa9, 0xe5, 0x0e, 0x24, 0xdc, 0xca, 0x9e,
];

/// NUS RX Characteristic UUID: 6E400002-B5A3-F393-E0A9-E50E24DCCA9E
///
/// **Direction**: Phone → Device (Write)
pub const NUS_RX_CHAR_UUID: [u8; 16] = [
    0x6e, 0x40, 0x00, 0x02, 0xb5, 0xa3, 0xf3, 0x93,
    0xe0, 0xa9, 0xe5, 0x0e, 0x24, 0xdc, 0xca, 0x9e,
];

/// Default advertised device name
pub const DEFAULT_DEVICE_NAME: &str = "MultiTool";

/// Default BLE notification payload (ATT MTU 23 minus 3 bytes of header)
pub const DEFAULT_NOTIFY_CHUNK: usize = 20;

/// Largest notification payload a 247-byte MTU allows
pub const MAX_NOTIFY_CHUNK: usize = 244;

/// Convert UUID byte array to standard UUID string format
///
/// Example: `[0x6e, 0x40, ...]` → `"6e400001-b5a3-f393-e0a9-e50e24dcca9e"`
pub fn uuid_to_string(uuid: &[u8; 16]) -> String {
    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        uuid[0], uuid[1], uuid[2], uuid[3],
        uuid[4], uuid[5],
        uuid[6], uuid[7],
        uuid[8], uuid[9],
        uuid[10], uuid[11], uuid[12], uuid[13], uuid[14], uuid[15]
    )
}
