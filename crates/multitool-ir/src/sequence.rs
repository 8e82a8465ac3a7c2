// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

use core::fmt;
use core::str::FromStr;

use crate::error::IrError;

/// Longest sequence a capture records or a payload may carry
pub const MAX_PULSES: usize = 1000;

/// Microsecond durations of alternating levels, mark first
///
/// Never empty and never longer than [`MAX_PULSES`]. Text form is decimal
/// microseconds joined by commas with no trailing comma.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PulseSequence(Vec<u32>);

impl PulseSequence {
    /// Wrap durations
    ///
    /// # Errors
    /// `EmptySequence` or `SequenceTooLong`.
    pub fn new(durations: Vec<u32>) -> Result<Self, IrError> {
        if durations.is_empty() {
            return Err(IrError::EmptySequence);
        }
        if durations.len() > MAX_PULSES {
            return Err(IrError::SequenceTooLong(durations.len()));
        }
        Ok(Self(durations))
    }

    /// Wrap durations known to be non-empty and short enough
    pub(crate) fn from_frame(durations: Vec<u32>) -> Self {
        debug_assert!(!durations.is_empty() && durations.len() <= MAX_PULSES);
        Self(durations)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total airtime in microseconds
    pub fn total_us(&self) -> u64 {
        self.0.iter().map(|&d| u64::from(d)).sum()
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }
}

impl fmt::Display for PulseSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

/// Parse comma-separated decimal microseconds
///
/// Empty fields (e.g. a trailing comma) are skipped; anything else that is not
/// a non-negative integer rejects the whole text.
impl FromStr for PulseSequence {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut durations = Vec::new();
        for field in s.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            if !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(IrError::InvalidDuration(field.to_string()));
            }
            let us = field
                .parse::<u32>()
                .map_err(|_| IrError::InvalidDuration(field.to_string()))?;
            durations.push(us);
        }
        Self::new(durations)
    }
}
