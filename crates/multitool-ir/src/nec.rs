// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! NEC protocol framing
//!
//! A frame is a 9 ms header mark, a 4.5 ms header space, 32 data bits and a
//! trailing mark. Each bit is a 562 µs mark followed by a 562 µs (0) or
//! 1687 µs (1) space. The bits carry address, inverted address, command and
//! inverted command, each byte least significant bit first.

use core::fmt;
use core::ops::RangeInclusive;
use core::str::FromStr;

use crate::error::IrError;
use crate::sequence::PulseSequence;

const HEADER_MARK_US: u32 = 9000;
const HEADER_SPACE_US: u32 = 4500;
const BIT_MARK_US: u32 = 562;
const ZERO_SPACE_US: u32 = 562;
const ONE_SPACE_US: u32 = 1687;

// Acceptance windows, exclusive bounds expressed as inclusive ranges
const HEADER_MARK_WINDOW: RangeInclusive<u32> = 8001..=9999;
const HEADER_SPACE_WINDOW: RangeInclusive<u32> = 4001..=4999;
const BIT_MARK_WINDOW: RangeInclusive<u32> = 401..=699;
const ZERO_SPACE_WINDOW: RangeInclusive<u32> = 401..=999;
const ONE_SPACE_WINDOW: RangeInclusive<u32> = 1401..=1999;

const FRAME_BITS: usize = 32;

/// Decoded NEC address/command pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NecFrame {
    pub address: u8,
    pub command: u8,
}

impl NecFrame {
    pub fn new(address: u8, command: u8) -> Self {
        Self { address, command }
    }
}

/// `NEC:AA:CC` in uppercase hex
impl fmt::Display for NecFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NEC:{:02X}:{:02X}", self.address, self.command)
    }
}

fn parse_hex_byte(part: &str) -> Option<u8> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(part, 16).ok()
}

/// Accepts `NEC AA:BB` (command syntax) and `NEC:AA:BB` (capture syntax)
impl FromStr for NecFrame {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IrError::InvalidNecCode(s.to_string());

        let rest = s.trim().strip_prefix("NEC").ok_or_else(invalid)?;
        let hexes = match rest.strip_prefix(':') {
            Some(hexes) => hexes,
            None if rest.starts_with(char::is_whitespace) => rest.trim_start(),
            None => return Err(invalid()),
        };

        let (address, command) = hexes.trim_end().split_once(':').ok_or_else(invalid)?;
        Ok(Self {
            address: parse_hex_byte(address).ok_or_else(invalid)?,
            command: parse_hex_byte(command).ok_or_else(invalid)?,
        })
    }
}

/// Decode an NEC frame from captured durations
///
/// Returns `None` unless the header falls in its windows, exactly 32 bits
/// decode, and both complement bytes check. There is no partial decode.
pub fn decode_nec(pulses: &[u32]) -> Option<NecFrame> {
    let (&header_mark, &header_space) = (pulses.first()?, pulses.get(1)?);
    if !HEADER_MARK_WINDOW.contains(&header_mark) || !HEADER_SPACE_WINDOW.contains(&header_space) {
        return None;
    }

    let mut bits: u32 = 0;
    let mut count: usize = 0;
    for pair in pulses[2..].chunks_exact(2) {
        if count == FRAME_BITS {
            break;
        }
        let (mark, space) = (pair[0], pair[1]);
        if !BIT_MARK_WINDOW.contains(&mark) {
            return None;
        }
        let bit: u32 = if ZERO_SPACE_WINDOW.contains(&space) {
            0
        } else if ONE_SPACE_WINDOW.contains(&space) {
            1
        } else {
            return None;
        };
        bits |= bit << count;
        count += 1;
    }

    if count != FRAME_BITS {
        return None;
    }

    let [address, address_inv, command, command_inv] = bits.to_le_bytes();
    if address ^ address_inv != 0xFF || command ^ command_inv != 0xFF {
        return None;
    }
    Some(NecFrame { address, command })
}

/// Build the 67-entry pulse sequence for a frame
pub fn encode_nec(frame: NecFrame) -> PulseSequence {
    let mut pulses = Vec::with_capacity(3 + 2 * FRAME_BITS);
    pulses.push(HEADER_MARK_US);
    pulses.push(HEADER_SPACE_US);
    for byte in [frame.address, !frame.address, frame.command, !frame.command] {
        for i in 0..8 {
            pulses.push(BIT_MARK_US);
            pulses.push(if (byte >> i) & 1 == 0 {
                ZERO_SPACE_US
            } else {
                ONE_SPACE_US
            });
        }
    }
    pulses.push(BIT_MARK_US);

    PulseSequence::from_frame(pulses)
}
