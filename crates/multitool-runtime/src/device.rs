// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Device wiring and the cooperative main loop

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use multitool_config::MultitoolConfig;
use multitool_dispatch::{Dispatcher, ModeState, Mode, Peripherals, Reply, Submode};
use multitool_hal::{Board, StatusDisplay, TagReader, TagUid, TimeProvider};
use multitool_ir::{Code, PulseCodec};
use multitool_transport::{channel, LineTransport, LinkEventHandler};
use tracing::{debug, error, info, trace, warn};

/// Collaborator instances of one board
pub struct BoardParts<B: Board> {
    pub clock: B::Clock,
    pub ir_receiver: B::IrReceiver,
    pub ir_carrier: B::IrCarrier,
    pub tags: B::Tags,
    pub display: Arc<B::Display>,
    pub link: Arc<B::Link>,
}

/// What one tick did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Command line handled this tick
    pub command: Option<String>,
    /// Reply lines handed to the transport
    pub replies_sent: usize,
    /// Background tag/IR reports sent
    pub background_reports: usize,
    /// A panic was caught in dispatch or a background scan
    pub recovered_panic: bool,
}

type Codec<B> = PulseCodec<<B as Board>::IrReceiver, <B as Board>::IrCarrier, <B as Board>::Clock>;

/// The MultiTool device: dispatcher, codec and transport on one context
pub struct Device<B: Board> {
    dispatcher: Dispatcher,
    codec: Codec<B>,
    tags: B::Tags,
    display: Arc<B::Display>,
    clock: B::Clock,
    transport: LineTransport<B::Link, B::Clock>,
    tick_interval_ms: u32,
    idle_return_ms: u64,
    last_uid: Option<TagUid>,
    last_ir_code: Option<Code>,
    last_connected: bool,
    last_ui_ms: u64,
}

impl<B: Board> Device<B> {
    /// Wire a board into a device
    ///
    /// Idles the IR carrier, starts advertising and draws the idle screen.
    /// The returned handler must be given to the radio stack's callbacks.
    pub fn new(parts: BoardParts<B>, config: &MultitoolConfig) -> (Self, LinkEventHandler<B::Link, B::Display>) {
        let BoardParts {
            clock,
            ir_receiver,
            ir_carrier,
            tags,
            display,
            link,
        } = parts;

        let codec = PulseCodec::new(ir_receiver, ir_carrier, clock.clone(), &config.ir);
        let (transport, handler) = channel(
            link,
            Arc::clone(&display),
            clock.clone(),
            &config.device.name,
            &config.link,
        );
        transport.start_advertising();
        display.show_idle();

        info!(
            board = B::NAME,
            name = %config.device.name,
            tick_ms = config.device.tick_interval_ms,
            "device started"
        );

        let last_ui_ms = clock.uptime_ms();
        let device = Self {
            dispatcher: Dispatcher::new(config.rfid.data_block),
            codec,
            tags,
            display,
            clock,
            transport,
            tick_interval_ms: config.device.tick_interval_ms,
            idle_return_ms: config.device.idle_return_ms,
            last_uid: None,
            last_ir_code: None,
            last_connected: false,
            last_ui_ms,
        };
        (device, handler)
    }

    /// Current mode/submode
    pub fn state(&self) -> &ModeState {
        self.dispatcher.state()
    }

    pub fn transport(&self) -> &LineTransport<B::Link, B::Clock> {
        &self.transport
    }

    pub fn codec(&self) -> &Codec<B> {
        &self.codec
    }

    pub fn codec_mut(&mut self) -> &mut Codec<B> {
        &mut self.codec
    }

    /// Run one loop iteration, including the trailing sleep
    pub fn tick(&mut self) -> TickOutcome {
        let now_ms = self.clock.uptime_ms();
        let mut outcome = TickOutcome::default();

        if let Some(line) = self.transport.next_command() {
            self.handle_line(&line, &mut outcome);
            outcome.command = Some(line);
            self.last_ui_ms = now_ms;
        }

        if self.dispatcher.state().is(&Mode::Rfid, &Submode::Read) && self.scan_tag(&mut outcome) {
            self.last_ui_ms = now_ms;
        }

        if self.dispatcher.state().is(&Mode::Ir, &Submode::Read) && self.scan_ir(&mut outcome) {
            self.last_ui_ms = now_ms;
        }

        let connected = self.transport.is_connected();
        if connected != self.last_connected {
            self.last_connected = connected;
            debug!(connected, "connectivity changed");
            self.display.show_idle();
            self.last_ui_ms = now_ms;
        }

        if now_ms.saturating_sub(self.last_ui_ms) > self.idle_return_ms {
            self.display.show_idle();
        }

        self.clock.delay_ms(self.tick_interval_ms);
        outcome
    }

    /// Tick until `running` is cleared
    ///
    /// # Returns
    /// Number of ticks run
    pub fn run(&mut self, running: &AtomicBool) -> u64 {
        info!("device loop running");
        let mut ticks = 0u64;
        while running.load(Ordering::Relaxed) {
            self.tick();
            ticks += 1;
        }
        info!(ticks, "device loop stopped");
        ticks
    }

    fn handle_line(&mut self, line: &str, outcome: &mut TickOutcome) {
        let dispatcher = &mut self.dispatcher;
        let mut hw = Peripherals {
            tags: &mut self.tags,
            ir: &mut self.codec,
            display: self.display.as_ref(),
            clock: &self.clock,
        };

        match panic::catch_unwind(AssertUnwindSafe(|| dispatcher.handle(line, &mut hw))) {
            Ok(replies) => {
                for reply in &replies {
                    self.transport.send(&reply.to_string());
                    outcome.replies_sent += 1;
                }
            }
            Err(payload) => {
                error!(command = line, panic = panic_message(&*payload), "command handler panicked");
                outcome.recovered_panic = true;
            }
        }
    }

    /// Background RFID scan; true when a new UID was seen
    fn scan_tag(&mut self, outcome: &mut TickOutcome) -> bool {
        let tags = &mut self.tags;
        let uid = match panic::catch_unwind(AssertUnwindSafe(|| tags.read_uid())) {
            Ok(Ok(uid)) => uid,
            Ok(Err(e)) => {
                trace!(error = ?e, "background tag read failed");
                None
            }
            Err(payload) => {
                error!(panic = panic_message(&*payload), "tag reader panicked");
                outcome.recovered_panic = true;
                None
            }
        };

        let Some(uid) = uid else {
            return false;
        };
        if self.last_uid.as_ref() == Some(&uid) {
            return false;
        }

        info!(uid = %uid, "tag detected");
        self.display.show_tag(&uid);
        self.last_uid = Some(uid.clone());

        if self.transport.is_connected() {
            let block = self.dispatcher.data_block();
            let tags = &mut self.tags;
            let data = match panic::catch_unwind(AssertUnwindSafe(|| tags.read_data_block(block))) {
                Ok(Ok(Some(data))) if !data.is_empty() => Some(data),
                Ok(Ok(_)) => None,
                Ok(Err(e)) => {
                    warn!(error = ?e, block, "background block read failed");
                    None
                }
                Err(payload) => {
                    error!(panic = panic_message(&*payload), "tag reader panicked");
                    outcome.recovered_panic = true;
                    None
                }
            };
            self.transport.send(&Reply::TagReport { uid, data }.to_string());
            outcome.background_reports += 1;
        }
        true
    }

    /// Background IR scan; true when a new code was seen
    fn scan_ir(&mut self, outcome: &mut TickOutcome) -> bool {
        let code = match self.codec.read_code() {
            Ok(code) => code,
            Err(e) => {
                trace!(error = %e, "no IR code this tick");
                return false;
            }
        };
        if self.last_ir_code.as_ref() == Some(&code) {
            return false;
        }

        info!(code = %code, "IR code captured");
        self.last_ir_code = Some(code.clone());
        if self.transport.is_connected() {
            self.transport.send(&Reply::IrCode(code).to_string());
            outcome.background_reports += 1;
        }
        true
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
