// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Why a capture produced no sequence
///
/// Both cases are routine: the main loop polls for IR every tick and simply
/// skips when nothing was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// No falling edge within the header timeout
    #[error("no IR signal before header timeout")]
    NoSignal,

    /// A burst was seen but it was too short to be a code
    #[error("IR burst too short: {count} durations (minimum {min})")]
    TooShort { count: usize, min: usize },
}

/// IR codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// Raw pulse text was empty
    #[error("pulse sequence is empty")]
    EmptySequence,

    /// Raw pulse text had more entries than a capture can hold
    #[error("pulse sequence has {0} entries (maximum {})", crate::MAX_PULSES)]
    SequenceTooLong(usize),

    /// A raw pulse entry was not a non-negative integer
    #[error("invalid pulse duration: {0:?}")]
    InvalidDuration(String),

    /// NEC text was not `NEC AA:BB` / `NEC:AA:BB`
    #[error("invalid NEC code: {0:?}")]
    InvalidNecCode(String),

    /// The carrier driver refused a change
    #[error("carrier output error: {0}")]
    Carrier(String),
}

/// Result type for IR operations
pub type IrResult<T> = Result<T, IrError>;
