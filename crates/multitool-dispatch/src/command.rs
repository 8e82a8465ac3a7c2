// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

use crate::mode::{Mode, Submode};

const SET_MODE: &str = "SET_MODE:";
const SUBMODE: &str = "SUBMODE:";
const WRITE_NFC: &str = "WRITE_NFC:";
const EMIT_UID: &str = "EMIT_UID:";
const IR_SEND: &str = "IR_SEND:";

/// One parsed command line
///
/// Parsing never fails: lines that match no command become `Unknown` and are
/// answered according to the current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET_MODE:<mode>[|SUBMODE:<submode>]`
    SetMode { mode: Mode, submode: Submode },
    /// `read_nfc`
    ReadNfc,
    /// `RFID_SCAN`
    RfidScan,
    /// `WRITE_NFC:<data>`
    WriteNfc(String),
    /// `EMIT_UID:<data>`
    EmitUid(String),
    /// `IR_READ`
    IrRead,
    /// `IR_SEND:<payload>`
    IrSend(String),
    Unknown(String),
}

impl Command {
    /// Parse a trimmed line
    ///
    /// Prefixed commands keep everything after their first `:` verbatim, so
    /// payloads may themselves contain colons (`IR_SEND:NEC:A2:34`).
    pub fn parse(line: &str) -> Self {
        if let Some(rest) = line.strip_prefix(SET_MODE) {
            let mut fields = rest.split('|');
            let mode = Mode::parse(fields.next().unwrap_or(""));
            let submode = fields
                .next()
                .and_then(|field| field.strip_prefix(SUBMODE))
                .map(Submode::parse)
                .unwrap_or_default();
            return Command::SetMode { mode, submode };
        }

        match line {
            "read_nfc" => return Command::ReadNfc,
            "RFID_SCAN" => return Command::RfidScan,
            "IR_READ" => return Command::IrRead,
            _ => {}
        }

        if let Some(data) = line.strip_prefix(WRITE_NFC) {
            Command::WriteNfc(data.to_string())
        } else if let Some(data) = line.strip_prefix(EMIT_UID) {
            Command::EmitUid(data.to_string())
        } else if let Some(payload) = line.strip_prefix(IR_SEND) {
            Command::IrSend(payload.to_string())
        } else {
            Command::Unknown(line.to_string())
        }
    }
}
