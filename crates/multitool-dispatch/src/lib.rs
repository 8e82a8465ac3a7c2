// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! # multitool-dispatch
//!
//! Routes text commands to hardware actions according to the current
//! mode/submode and produces the reply tokens sent back over the link.
//!
//! ## Command Table
//!
//! | Mode | Submode | Command | Reply |
//! |------|---------|---------|-------|
//! | any | any | `SET_MODE:<m>[\|SUBMODE:<s>]` | `OK` |
//! | RFID | READ | `read_nfc` | `UID:<uid>` / `ERR:NoUID` |
//! | RFID | READ | `RFID_SCAN` | `UID:<uid>` + `DATA:<d>` / `ERR:NoData`; or `ERR:NoUID` |
//! | RFID | READ | other | `ERR:UnknownCommand` |
//! | RFID | WRITE | `WRITE_NFC:<d>` | `WRITE_OK` / `WRITE_FAIL` |
//! | RFID | EMIT | `EMIT_UID:<d>` | `EMIT_OK` / `EMIT_FAIL` |
//! | RFID | other | any | `IGNORED:WrongSubmode` |
//! | IR | READ | `IR_READ` | `IR_CODE:<code>`, nothing if no code yet |
//! | IR | any | `IR_SEND:<payload>` | `IR_OK` / `IR_FAIL` |
//! | IR | other | any | `IGNORED:WrongSubmode` |
//! | other | any | any | `IGNORED:WrongMode` |

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod command;
pub mod dispatcher;
pub mod mode;
pub mod reply;

pub use command::Command;
pub use dispatcher::{Dispatcher, IrPort, Peripherals, RFID_SCAN_SETTLE_MS};
pub use mode::{Mode, ModeState, Submode};
pub use reply::{Replies, Reply, MAX_REPLIES};
