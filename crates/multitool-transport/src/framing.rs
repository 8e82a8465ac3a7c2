// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Reassembly of LF-terminated lines from arbitrary fragments

use thiserror::Error;

/// A line that could not be delivered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The line was not valid UTF-8; only that line is lost
    #[error("dropped {len}-byte line with invalid UTF-8")]
    InvalidUtf8 { len: usize },

    /// The line grew past the limit; it is skipped up to its terminator
    #[error("dropped line longer than {max} bytes")]
    Overflow { max: usize },
}

/// Byte accumulator that yields complete, trimmed lines
///
/// Bytes after the last `\n` stay buffered until a later fragment completes
/// them. A line that outgrows `max_len` is dropped as a whole: the buffer is
/// cleared and the remaining bytes up to the next terminator are discarded,
/// so its tail never surfaces as a command of its own.
#[derive(Debug, Clone)]
pub struct LineAccumulator {
    buffer: Vec<u8>,
    max_len: usize,
    discarding: bool,
}

impl LineAccumulator {
    pub fn new(max_len: usize) -> Self {
        Self {
            buffer: Vec::new(),
            max_len: max_len.max(1),
            discarding: false,
        }
    }

    /// Append a fragment and split off every line it completes
    ///
    /// Returns zero or more results in arrival order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Result<String, FrameError>> {
        let mut lines = Vec::new();

        for &byte in chunk {
            if byte == b'\n' {
                if self.discarding {
                    self.discarding = false;
                    continue;
                }
                let raw = std::mem::take(&mut self.buffer);
                lines.push(match String::from_utf8(raw) {
                    Ok(line) => Ok(line.trim().to_string()),
                    Err(e) => Err(FrameError::InvalidUtf8 {
                        len: e.as_bytes().len(),
                    }),
                });
            } else if self.discarding {
                continue;
            } else if self.buffer.len() >= self.max_len {
                self.buffer.clear();
                self.discarding = true;
                lines.push(Err(FrameError::Overflow { max: self.max_len }));
            } else {
                self.buffer.push(byte);
            }
        }

        lines
    }

    /// Bytes waiting for a terminator
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Forget any partial line
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }
}
