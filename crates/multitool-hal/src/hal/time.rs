// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

/// Time and delay abstraction
///
/// IR capture busy-polls this source, so `get_time_us` must be cheap and
/// monotonic.
pub trait TimeProvider {
    /// Get current time in microseconds since system boot
    ///
    /// # Returns
    /// Monotonic timestamp in microseconds
    fn get_time_us(&self) -> u64;

    /// Block for the specified number of microseconds
    ///
    /// # Arguments
    /// * `us` - Microseconds to delay
    fn delay_us(&self, us: u32);

    /// Block for the specified number of milliseconds
    ///
    /// # Arguments
    /// * `ms` - Milliseconds to delay
    fn delay_ms(&self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }

    /// Microseconds elapsed since an earlier `get_time_us` reading
    fn elapsed_us(&self, since_us: u64) -> u64 {
        self.get_time_us().saturating_sub(since_us)
    }

    /// Milliseconds since boot
    fn uptime_ms(&self) -> u64 {
        self.get_time_us() / 1000
    }
}

impl<T: TimeProvider + ?Sized> TimeProvider for Arc<T> {
    fn get_time_us(&self) -> u64 {
        (**self).get_time_us()
    }

    fn delay_us(&self, us: u32) {
        (**self).delay_us(us)
    }
}

impl<T: TimeProvider + ?Sized> TimeProvider for &T {
    fn get_time_us(&self) -> u64 {
        (**self).get_time_us()
    }

    fn delay_us(&self, us: u32) {
        (**self).delay_us(us)
    }
}
