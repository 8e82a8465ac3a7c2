// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

/// Digital input pin
///
/// Reads are infallible: the IR capture loop polls the pin thousands of times
/// per frame and has no way to recover from a mid-frame read error anyway.
pub trait InputPin {
    /// Read pin state
    ///
    /// # Returns
    /// True if pin is high, false if low
    fn is_high(&self) -> bool;

    /// Read pin state (inverted)
    ///
    /// # Returns
    /// True if pin is low, false if high
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<P: InputPin + ?Sized> InputPin for &P {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}
