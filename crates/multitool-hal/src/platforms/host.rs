// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

use std::time::{Duration, Instant};

use crate::hal::TimeProvider;

/// Monotonic clock for host builds
///
/// Clones share the same origin, so every component sees one timeline.
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: Instant,
}

impl StdClock {
    /// Start a clock at "boot" = now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for StdClock {
    fn get_time_us(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }

    fn delay_us(&self, us: u32) {
        std::thread::sleep(Duration::from_micros(us as u64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic_and_shared() {
        let clock = StdClock::new();
        let copy = clock;
        let before = clock.get_time_us();
        clock.delay_us(200);
        assert!(copy.get_time_us() >= before + 200);
        assert!(clock.elapsed_us(before) >= 200);
    }
}
