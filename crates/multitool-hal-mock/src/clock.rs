// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use multitool_hal::TimeProvider;
use parking_lot::Mutex;

/// Simulated microsecond clock
///
/// Delays advance time instantly. Optionally every `get_time_us` read also
/// advances time by a fixed step, so busy-poll loops make progress without a
/// second thread.
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    now_us: Arc<AtomicU64>,
    step_us: u64,
    delays: Arc<Mutex<Vec<u32>>>,
}

impl FakeClock {
    /// Clock frozen at 0 until advanced or delayed
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock that advances `step_us` on every read
    pub fn with_auto_advance(step_us: u64) -> Self {
        Self {
            step_us,
            ..Self::default()
        }
    }

    /// Current time without advancing
    pub fn now_us(&self) -> u64 {
        self.now_us.load(Ordering::SeqCst)
    }

    /// Advance the simulated time
    pub fn advance_us(&self, us: u64) {
        self.now_us.fetch_add(us, Ordering::SeqCst);
    }

    /// Advance the simulated time in milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1000);
    }

    /// Set the simulated time to a specific value
    pub fn set_time_us(&self, us: u64) {
        self.now_us.store(us, Ordering::SeqCst);
    }

    /// Every `delay_us` argument, in call order
    pub fn delays(&self) -> Vec<u32> {
        self.delays.lock().clone()
    }

    /// Forget recorded delays
    pub fn clear_delays(&self) {
        self.delays.lock().clear();
    }
}

impl TimeProvider for FakeClock {
    fn get_time_us(&self) -> u64 {
        self.now_us.fetch_add(self.step_us, Ordering::SeqCst)
    }

    fn delay_us(&self, us: u32) {
        self.delays.lock().push(us);
        self.advance_us(u64::from(us));
    }
}
