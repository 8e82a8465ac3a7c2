// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

use core::fmt;

/// Top-level operating mode
///
/// Names are matched exactly; anything unrecognised is kept verbatim and
/// behaves like `IDLE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Idle,
    Rfid,
    Ir,
    Other(String),
}

impl Mode {
    pub fn parse(name: &str) -> Self {
        match name {
            "IDLE" => Mode::Idle,
            "RFID" => Mode::Rfid,
            "IR" => Mode::Ir,
            other => Mode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Mode::Idle => "IDLE",
            Mode::Rfid => "RFID",
            Mode::Ir => "IR",
            Mode::Other(name) => name,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action selector within a mode; empty when not given
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Submode {
    #[default]
    None,
    Read,
    Write,
    Emit,
    Send,
    Other(String),
}

impl Submode {
    pub fn parse(name: &str) -> Self {
        match name {
            "" => Submode::None,
            "READ" => Submode::Read,
            "WRITE" => Submode::Write,
            "EMIT" => Submode::Emit,
            "SEND" => Submode::Send,
            other => Submode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Submode::None => "",
            Submode::Read => "READ",
            Submode::Write => "WRITE",
            Submode::Emit => "EMIT",
            Submode::Send => "SEND",
            Submode::Other(name) => name,
        }
    }
}

impl fmt::Display for Submode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode and submode, always replaced together
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ModeState {
    pub mode: Mode,
    pub submode: Submode,
}

impl ModeState {
    pub fn new(mode: Mode, submode: Submode) -> Self {
        Self { mode, submode }
    }

    /// True for exactly this mode/submode pair
    pub fn is(&self, mode: &Mode, submode: &Submode) -> bool {
        self.mode == *mode && self.submode == *submode
    }

    /// Text shown on the display: `MODE` or `MODE/SUBMODE`
    pub fn label(&self) -> String {
        match self.submode {
            Submode::None => self.mode.to_string(),
            ref submode => format!("{}/{}", self.mode, submode),
        }
    }
}
