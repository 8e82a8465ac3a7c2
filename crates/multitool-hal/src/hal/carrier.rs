// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

/// PWM-driven IR LED output
///
/// The codec modulates the LED by switching the duty cycle between the
/// configured "on" duty (mark) and zero (space).
pub trait CarrierOutput {
    /// Platform-specific error type
    type Error: core::fmt::Debug;

    /// Set the carrier frequency
    ///
    /// # Arguments
    /// * `frequency_hz` - Carrier frequency (38 kHz for NEC receivers)
    fn set_frequency(&mut self, frequency_hz: u32) -> Result<(), Self::Error>;

    /// Set the 16-bit duty cycle (0 = idle, 65535 = always on)
    ///
    /// # Arguments
    /// * `duty` - Duty cycle
    fn set_duty(&mut self, duty: u16) -> Result<(), Self::Error>;

    /// Force the output idle
    fn idle(&mut self) -> Result<(), Self::Error> {
        self.set_duty(0)
    }
}
