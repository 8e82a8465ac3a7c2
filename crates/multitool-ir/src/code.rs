// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

use core::fmt;

use crate::nec::NecFrame;
use crate::sequence::PulseSequence;

/// A captured IR code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Code {
    /// Recognised NEC frame
    Nec(NecFrame),
    /// Anything else, kept verbatim for replay
    Raw(PulseSequence),
}

/// `NEC:AA:CC` or `RAW:<csv>`; both forms are accepted back by `IR_SEND`
impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Nec(frame) => write!(f, "{}", frame),
            Code::Raw(pulses) => write!(f, "RAW:{}", pulses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_text() {
        assert_eq!(Code::Nec(NecFrame::new(0xA2, 0x34)).to_string(), "NEC:A2:34");
        let raw: PulseSequence = "100,200,300".parse().unwrap();
        assert_eq!(Code::Raw(raw).to_string(), "RAW:100,200,300");
    }
}
