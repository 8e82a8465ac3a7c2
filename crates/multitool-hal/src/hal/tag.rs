// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! RFID/NFC tag reader collaborator
//!
//! The reader driver (PN532 over SPI on the reference board) is opaque to the
//! core: it handles card selection, authentication and its own ~500 ms read
//! timeout. This module only fixes the interface and the two text formats the
//! command channel depends on: the UID rendering and the block payload shape.

use core::fmt;
use core::str::FromStr;

use heapless::Vec;

/// Block read/written by `WRITE_NFC` and `RFID_SCAN`
pub const DEFAULT_DATA_BLOCK: u8 = 4;

/// Factory key A used to authenticate MIFARE Classic sectors
pub const DEFAULT_KEY_A: [u8; 6] = [0xFF; 6];

/// Longest ISO 14443-A UID (triple size)
const MAX_UID_LEN: usize = 10;

/// Tag reader trait
///
/// All calls are synchronous and bounded by the driver's own timeout.
/// `Ok(None)` / `Ok(false)` mean "no card" or "card refused"; `Err` means the
/// driver itself failed. The dispatcher maps both to the same failure reply.
pub trait TagReader {
    /// Platform-specific error type
    type Error: fmt::Debug;

    /// Read the UID of the card in the field
    fn read_uid(&mut self) -> Result<Option<TagUid>, Self::Error>;

    /// Read a data block and decode it as trimmed UTF-8 text
    fn read_data_block(&mut self, block: u8) -> Result<Option<String>, Self::Error>;

    /// Write `data` to a block
    ///
    /// Drivers shape the bytes with [`BlockPayload::for_uid`].
    fn write_block(&mut self, data: &str, block: u8) -> Result<bool, Self::Error>;

    /// Emulate a card with the given UID
    fn emit_uid(&mut self, data: &str) -> Result<bool, Self::Error>;
}

/// Card UID (4, 7 or 10 bytes)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagUid(Vec<u8, MAX_UID_LEN>);

impl TagUid {
    /// Build a UID from raw bytes
    ///
    /// Returns `None` for an empty or over-long UID.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        Vec::from_slice(bytes).ok().map(Self)
    }

    /// Raw UID bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// MIFARE Classic cards carry a 4-byte UID; NTAG/Ultralight carry 7
    pub fn is_mifare_classic(&self) -> bool {
        self.0.len() == 4
    }
}

/// Uppercase hex bytes joined by `-`, e.g. `04-A1-B2-C3`
impl fmt::Display for TagUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

/// Failure to parse a dash-separated UID
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagUidParseError {
    /// A segment was not a two-digit hex byte
    #[error("invalid UID byte: {0:?}")]
    InvalidByte(String),

    /// More than ten bytes
    #[error("UID must have 1 to 10 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for TagUid {
    type Err = TagUidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes: Vec<u8, MAX_UID_LEN> = Vec::new();
        for part in s.trim().split('-') {
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(TagUidParseError::InvalidByte(part.to_string()));
            }
            let byte = u8::from_str_radix(part, 16)
                .map_err(|_| TagUidParseError::InvalidByte(part.to_string()))?;
            if bytes.push(byte).is_err() {
                return Err(TagUidParseError::InvalidLength(s.trim().split('-').count()));
            }
        }
        Ok(Self(bytes))
    }
}

/// Bytes actually written to a tag block
///
/// MIFARE Classic blocks hold 16 bytes, NTAG/Ultralight pages hold 4. Text is
/// truncated to the block size and zero-padded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPayload(Vec<u8, 16>);

impl BlockPayload {
    /// Shape `data` for the card identified by `uid`
    pub fn for_uid(uid: &TagUid, data: &str) -> Self {
        let size = if uid.is_mifare_classic() { 16 } else { 4 };
        let mut bytes: Vec<u8, 16> = Vec::new();
        for &byte in data.as_bytes().iter().take(size) {
            // capacity is 16 and size <= 16
            let _ = bytes.push(byte);
        }
        while bytes.len() < size {
            let _ = bytes.push(0);
        }
        Self(bytes)
    }

    /// Payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
