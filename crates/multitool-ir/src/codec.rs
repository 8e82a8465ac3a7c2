// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Capture and transmit against real (or fake) pins

use multitool_config::IrConfig;
use multitool_hal::{CarrierOutput, InputPin, TimeProvider};
use tracing::{debug, trace, warn};

use crate::code::Code;
use crate::error::{CaptureError, IrError, IrResult};
use crate::nec::{decode_nec, encode_nec, NecFrame};
use crate::sequence::{PulseSequence, MAX_PULSES};

/// IR pulse codec bound to one receiver pin and one carrier output
///
/// Capture and transmit block for their whole duration. `&mut self` on both
/// keeps them sequenced: one context owns the codec.
pub struct PulseCodec<P, O, C> {
    receiver: P,
    carrier: O,
    clock: C,
    config: IrConfig,
    last_code: Option<Code>,
}

impl<P, O, C> PulseCodec<P, O, C>
where
    P: InputPin,
    O: CarrierOutput,
    C: TimeProvider,
{
    /// Create a codec
    ///
    /// The carrier is forced idle; a failure to do so is logged, and the next
    /// transmit retries it.
    pub fn new(receiver: P, mut carrier: O, clock: C, config: &IrConfig) -> Self {
        if let Err(e) = carrier.idle() {
            warn!(error = ?e, "IR carrier did not go idle at startup");
        }
        let mut config = config.clone();
        config.max_pulses = config.max_pulses.min(MAX_PULSES);
        Self {
            receiver,
            carrier,
            clock,
            config,
            last_code: None,
        }
    }

    /// Most recent successfully captured code
    pub fn last_code(&self) -> Option<&Code> {
        self.last_code.as_ref()
    }

    pub fn config(&self) -> &IrConfig {
        &self.config
    }

    /// Record one burst from the receiver
    ///
    /// Waits up to the header timeout for the first falling edge, then times
    /// each level until the pulse limit or a level outlasting the silence
    /// timeout. That final over-long level is not part of the code and is
    /// dropped. On success the raw sequence becomes the last code.
    ///
    /// # Errors
    /// `NoSignal` if no edge arrived, `TooShort` if fewer than the minimum
    /// number of durations remain.
    pub fn capture(&mut self) -> Result<PulseSequence, CaptureError> {
        let silence = self.config.silence_timeout_us;

        let start = self.clock.get_time_us();
        while self.receiver.is_high() {
            if self.clock.elapsed_us(start) > self.config.header_timeout_us {
                return Err(CaptureError::NoSignal);
            }
        }

        let mut durations: Vec<u32> = Vec::with_capacity(self.config.max_pulses.min(128));
        let mut last_edge = self.clock.get_time_us();
        while durations.len() < self.config.max_pulses {
            let level = self.receiver.is_high();
            while self.receiver.is_high() == level {
                if self.clock.elapsed_us(last_edge) > silence {
                    break;
                }
            }
            let now = self.clock.get_time_us();
            let dt = now.saturating_sub(last_edge);
            durations.push(u32::try_from(dt).unwrap_or(u32::MAX));
            last_edge = now;
            if dt > silence {
                break;
            }
        }

        if durations.last().is_some_and(|&d| u64::from(d) > silence) {
            durations.pop();
        }

        if durations.len() < self.config.min_pulses.max(1) {
            trace!(count = durations.len(), "IR burst discarded as noise");
            return Err(CaptureError::TooShort {
                count: durations.len(),
                min: self.config.min_pulses,
            });
        }

        let sequence = PulseSequence::from_frame(durations);
        debug!(pulses = sequence.len(), "IR burst captured");
        self.last_code = Some(Code::Raw(sequence.clone()));
        Ok(sequence)
    }

    /// Capture and classify: NEC if it decodes, raw otherwise
    ///
    /// # Errors
    /// Propagates the capture failure; a failed decode is not an error.
    pub fn read_code(&mut self) -> Result<Code, CaptureError> {
        let sequence = self.capture()?;
        let code = match decode_nec(sequence.as_slice()) {
            Some(frame) => Code::Nec(frame),
            None => Code::Raw(sequence),
        };
        debug!(%code, "IR code read");
        self.last_code = Some(code.clone());
        Ok(code)
    }

    /// Replay a sequence on the carrier
    ///
    /// Even entries are marks (carrier at the configured duty), odd entries are
    /// spaces (carrier off). The carrier is left idle afterwards, also when the
    /// driver fails part-way.
    ///
    /// # Errors
    /// `Carrier` if the driver rejects a change.
    pub fn transmit(&mut self, sequence: &PulseSequence) -> IrResult<()> {
        let driven = self.drive(sequence);
        let idled = self.carrier.idle();

        if let Err(e) = &driven {
            warn!(error = %e, "IR transmit aborted");
        }
        driven?;
        idled.map_err(|e| IrError::Carrier(format!("{:?}", e)))?;

        debug!(pulses = sequence.len(), airtime_us = sequence.total_us(), "IR sequence sent");
        Ok(())
    }

    fn drive(&mut self, sequence: &PulseSequence) -> IrResult<()> {
        self.carrier
            .set_frequency(self.config.carrier_frequency_hz)
            .map_err(|e| IrError::Carrier(format!("{:?}", e)))?;

        for (i, &us) in sequence.as_slice().iter().enumerate() {
            let duty = if i % 2 == 0 { self.config.carrier_duty } else { 0 };
            self.carrier
                .set_duty(duty)
                .map_err(|e| IrError::Carrier(format!("{:?}", e)))?;
            self.clock.delay_us(us);
        }
        Ok(())
    }

    /// Transmit an NEC frame
    pub fn send_nec(&mut self, frame: NecFrame) -> IrResult<()> {
        self.transmit(&encode_nec(frame))
    }

    /// Transmit an `IR_SEND` payload
    ///
    /// Text starting with `NEC` is an NEC code (`NEC AA:BB` or `NEC:AA:BB`);
    /// anything else is raw comma-separated microseconds, optionally prefixed
    /// with `RAW:`. Captured codes can therefore be replayed verbatim.
    ///
    /// # Errors
    /// Parse errors for malformed text, `Carrier` for driver failures.
    pub fn send_payload(&mut self, payload: &str) -> IrResult<()> {
        let payload = payload.trim();
        if payload.starts_with("NEC") {
            let frame: NecFrame = payload.parse()?;
            return self.send_nec(frame);
        }
        let raw = payload.strip_prefix("RAW:").unwrap_or(payload);
        let sequence: PulseSequence = raw.parse()?;
        self.transmit(&sequence)
    }

    /// Release the pins
    pub fn into_parts(self) -> (P, O, C) {
        (self.receiver, self.carrier, self.clock)
    }
}
