// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! IR receiver and carrier fakes

use std::sync::Arc;

use multitool_hal::{CarrierOutput, InputPin, TimeProvider};
use parking_lot::Mutex;

#[derive(Debug, Clone)]
struct ScriptedFrame {
    start_us: u64,
    durations: Vec<u32>,
}

impl ScriptedFrame {
    fn end_us(&self) -> u64 {
        self.start_us + self.durations.iter().map(|&d| u64::from(d)).sum::<u64>()
    }

    /// Level at `t`, or `None` if `t` is outside the frame
    fn level_at(&self, t: u64) -> Option<bool> {
        if t < self.start_us || t >= self.end_us() {
            return None;
        }
        let mut edge = self.start_us;
        for (i, &d) in self.durations.iter().enumerate() {
            edge += u64::from(d);
            if t < edge {
                // Even entries are marks; the demodulator pulls low during marks
                return Some(i % 2 == 1);
            }
        }
        None
    }
}

/// Demodulating IR receiver driven by a timing script
///
/// The output idles high. Each scheduled frame pulls it low at `start_us` and
/// then alternates levels for the given durations. The level is derived from
/// the shared clock on every read, so the codec's busy-poll loop sees edges
/// exactly where a real receiver would produce them.
#[derive(Debug, Clone)]
pub struct ScriptedIrReceiver<C> {
    clock: C,
    frames: Arc<Mutex<Vec<ScriptedFrame>>>,
}

impl<C: TimeProvider> ScriptedIrReceiver<C> {
    /// Receiver with nothing scheduled (always idle)
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            frames: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Schedule a frame whose first falling edge is at `start_us`
    pub fn schedule_frame(&self, start_us: u64, durations: &[u32]) {
        self.frames.lock().push(ScriptedFrame {
            start_us,
            durations: durations.to_vec(),
        });
    }

    /// Schedule a frame starting `delay_us` from now
    pub fn schedule_frame_in(&self, delay_us: u64, durations: &[u32]) {
        let start_us = self.clock.get_time_us() + delay_us;
        self.schedule_frame(start_us, durations);
    }

    /// Number of scheduled frames that have not finished yet
    pub fn pending_frames(&self) -> usize {
        let now = self.clock.get_time_us();
        self.frames.lock().iter().filter(|f| f.end_us() > now).count()
    }
}

impl<C: TimeProvider> InputPin for ScriptedIrReceiver<C> {
    fn is_high(&self) -> bool {
        let t = self.clock.get_time_us();
        self.frames
            .lock()
            .iter()
            .find_map(|frame| frame.level_at(t))
            .unwrap_or(true)
    }
}

/// Carrier change observed by [`RecordingCarrier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierEvent {
    /// `set_frequency` call
    Frequency(u32),
    /// `set_duty` call and the clock reading when it happened
    Duty { duty: u16, at_us: u64 },
}

/// Error returned by a carrier configured to fail
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MockCarrierError {
    #[error("carrier rejected duty {0}")]
    Rejected(u16),
}

#[derive(Debug, Default)]
struct CarrierState {
    events: Vec<CarrierEvent>,
    duty: u16,
    fail_marks_after: Option<usize>,
    marks: usize,
}

/// PWM carrier that records every change with a timestamp
#[derive(Debug, Clone)]
pub struct RecordingCarrier<C> {
    clock: C,
    state: Arc<Mutex<CarrierState>>,
}

impl<C: TimeProvider> RecordingCarrier<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: Arc::new(Mutex::new(CarrierState::default())),
        }
    }

    /// Reject every nonzero duty after `marks` successful marks
    ///
    /// Setting the duty to zero keeps working, so the idle guarantee can be
    /// observed.
    pub fn fail_marks_after(&self, marks: usize) {
        self.state.lock().fail_marks_after = Some(marks);
    }

    pub fn events(&self) -> Vec<CarrierEvent> {
        self.state.lock().events.clone()
    }

    /// Current duty (0 = idle)
    pub fn duty(&self) -> u16 {
        self.state.lock().duty
    }

    pub fn is_idle(&self) -> bool {
        self.duty() == 0
    }

    /// Last configured frequency
    pub fn frequency(&self) -> Option<u32> {
        self.state.lock().events.iter().rev().find_map(|e| match e {
            CarrierEvent::Frequency(hz) => Some(*hz),
            CarrierEvent::Duty { .. } => None,
        })
    }

    /// Durations between consecutive duty changes
    ///
    /// For a transmitted sequence this reproduces the sequence itself: each
    /// entry starts with a duty change and the trailing idle closes the last.
    pub fn transmitted_durations(&self) -> Vec<u32> {
        let stamps: Vec<u64> = self
            .state
            .lock()
            .events
            .iter()
            .filter_map(|e| match e {
                CarrierEvent::Duty { at_us, .. } => Some(*at_us),
                CarrierEvent::Frequency(_) => None,
            })
            .collect();
        stamps
            .windows(2)
            .map(|w| (w[1] - w[0]) as u32)
            .collect()
    }

    /// Forget recorded events
    pub fn clear(&self) {
        self.state.lock().events.clear();
    }
}

impl<C: TimeProvider> CarrierOutput for RecordingCarrier<C> {
    type Error = MockCarrierError;

    fn set_frequency(&mut self, frequency_hz: u32) -> Result<(), Self::Error> {
        self.state
            .lock()
            .events
            .push(CarrierEvent::Frequency(frequency_hz));
        Ok(())
    }

    fn set_duty(&mut self, duty: u16) -> Result<(), Self::Error> {
        let at_us = self.clock.get_time_us();
        let mut state = self.state.lock();
        if duty != 0 {
            if let Some(limit) = state.fail_marks_after {
                if state.marks >= limit {
                    return Err(MockCarrierError::Rejected(duty));
                }
            }
            state.marks += 1;
        }
        state.duty = duty;
        state.events.push(CarrierEvent::Duty { duty, at_us });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FakeClock;

    #[test]
    fn test_receiver_idles_high() {
        let clock = FakeClock::new();
        let rx = ScriptedIrReceiver::new(clock.clone());
        assert!(rx.is_high());
        clock.advance_ms(100);
        assert!(rx.is_high());
    }

    #[test]
    fn test_receiver_follows_script() {
        let clock = FakeClock::new();
        let rx = ScriptedIrReceiver::new(clock.clone());
        rx.schedule_frame(1000, &[500, 300, 200]);

        clock.set_time_us(999);
        assert!(rx.is_high());
        clock.set_time_us(1000);
        assert!(rx.is_low());
        clock.set_time_us(1499);
        assert!(rx.is_low());
        clock.set_time_us(1500);
        assert!(rx.is_high());
        clock.set_time_us(1800);
        assert!(rx.is_low());
        clock.set_time_us(2000);
        assert!(rx.is_high());
        assert_eq!(rx.pending_frames(), 0);
    }

    #[test]
    fn test_carrier_durations_from_timestamps() {
        let clock = FakeClock::new();
        let mut carrier = RecordingCarrier::new(clock.clone());
        carrier.set_frequency(38_000).unwrap();
        carrier.set_duty(100).unwrap();
        clock.delay_us(560);
        carrier.set_duty(0).unwrap();
        clock.delay_us(1690);
        carrier.idle().unwrap();

        assert_eq!(carrier.frequency(), Some(38_000));
        assert_eq!(carrier.transmitted_durations(), vec![560, 1690]);
        assert!(carrier.is_idle());
    }

    #[test]
    fn test_carrier_mark_failure_keeps_idle_working() {
        let clock = FakeClock::new();
        let mut carrier = RecordingCarrier::new(clock);
        carrier.fail_marks_after(1);
        carrier.set_duty(100).unwrap();
        assert_eq!(carrier.set_duty(100), Err(MockCarrierError::Rejected(100)));
        carrier.idle().unwrap();
        assert!(carrier.is_idle());
    }
}
