// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

use multitool_hal::{
    CarrierOutput, InputPin, StatusDisplay, TagReader, TimeProvider, DEFAULT_DATA_BLOCK,
};
use multitool_ir::{Code, IrResult, PulseCodec};
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::mode::{Mode, ModeState, Submode};
use crate::reply::{Replies, Reply};

/// Pause between reading the UID and the data block in `RFID_SCAN`
pub const RFID_SCAN_SETTLE_MS: u32 = 100;

/// The IR operations commands need
///
/// Implemented by [`PulseCodec`]; tests can substitute a lighter fake.
pub trait IrPort {
    /// Last captured code, if any
    fn last_code(&self) -> Option<Code>;

    /// Transmit an `IR_SEND` payload
    fn send_payload(&mut self, payload: &str) -> IrResult<()>;
}

impl<P, O, C> IrPort for PulseCodec<P, O, C>
where
    P: InputPin,
    O: CarrierOutput,
    C: TimeProvider,
{
    fn last_code(&self) -> Option<Code> {
        PulseCodec::last_code(self).cloned()
    }

    fn send_payload(&mut self, payload: &str) -> IrResult<()> {
        PulseCodec::send_payload(self, payload)
    }
}

/// Borrowed collaborators for one dispatch
pub struct Peripherals<'a, T, I, D, C> {
    pub tags: &'a mut T,
    pub ir: &'a mut I,
    pub display: &'a D,
    pub clock: &'a C,
}

/// Command dispatcher owning the mode/submode state
#[derive(Debug, Clone)]
pub struct Dispatcher {
    state: ModeState,
    data_block: u8,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_BLOCK)
    }
}

impl Dispatcher {
    /// Start in IDLE with no submode
    ///
    /// # Arguments
    /// * `data_block` - Tag block used by `WRITE_NFC` and `RFID_SCAN`
    pub fn new(data_block: u8) -> Self {
        Self {
            state: ModeState::default(),
            data_block,
        }
    }

    /// Current mode/submode
    pub fn state(&self) -> &ModeState {
        &self.state
    }

    pub fn data_block(&self) -> u8 {
        self.data_block
    }

    /// Parse and handle one command line
    pub fn handle<T, I, D, C>(&mut self, line: &str, hw: &mut Peripherals<'_, T, I, D, C>) -> Replies
    where
        T: TagReader,
        I: IrPort,
        D: StatusDisplay,
        C: TimeProvider,
    {
        self.handle_command(Command::parse(line), hw)
    }

    /// Handle one parsed command
    ///
    /// Every path yields at least one reply except `IR_READ` before any code
    /// was captured. Collaborator errors become the failure reply of their
    /// branch.
    pub fn handle_command<T, I, D, C>(
        &mut self,
        command: Command,
        hw: &mut Peripherals<'_, T, I, D, C>,
    ) -> Replies
    where
        T: TagReader,
        I: IrPort,
        D: StatusDisplay,
        C: TimeProvider,
    {
        debug!(?command, mode = %self.state.mode, submode = %self.state.submode, "dispatching");

        let mut replies = Replies::new();
        let mut reply = |r: Reply| {
            // MAX_REPLIES covers the longest branch
            let _ = replies.push(r);
        };

        if let Command::SetMode { mode, submode } = command {
            self.state = ModeState::new(mode, submode);
            let label = self.state.label();
            info!(mode = %label, "mode changed");
            hw.display.set_mode(&label);
            hw.display.show_idle();
            reply(Reply::Ok);
            return replies;
        }

        match &self.state.mode {
            Mode::Rfid => match (&self.state.submode, command) {
                (Submode::Read, Command::ReadNfc) => match read_uid(hw) {
                    Some(uid) => reply(Reply::Uid(uid)),
                    None => reply(Reply::NoUid),
                },
                (Submode::Read, Command::RfidScan) => match read_uid(hw) {
                    Some(uid) => {
                        reply(Reply::Uid(uid));
                        hw.clock.delay_ms(RFID_SCAN_SETTLE_MS);
                        match read_data(hw, self.data_block) {
                            Some(data) => reply(Reply::Data(data)),
                            None => reply(Reply::NoData),
                        }
                    }
                    None => reply(Reply::NoUid),
                },
                (Submode::Read, _) => reply(Reply::UnknownCommand),
                (Submode::Write, Command::WriteNfc(data)) => {
                    let written = match hw.tags.write_block(&data, self.data_block) {
                        Ok(written) => written,
                        Err(e) => {
                            warn!(error = ?e, "tag write failed");
                            false
                        }
                    };
                    hw.display
                        .show_message(if written { "Write OK" } else { "Write FAIL" });
                    reply(if written { Reply::WriteOk } else { Reply::WriteFail });
                }
                (Submode::Emit, Command::EmitUid(data)) => {
                    let emitted = match hw.tags.emit_uid(&data) {
                        Ok(emitted) => emitted,
                        Err(e) => {
                            warn!(error = ?e, "tag emulation failed");
                            false
                        }
                    };
                    reply(if emitted { Reply::EmitOk } else { Reply::EmitFail });
                }
                _ => reply(Reply::WrongSubmode),
            },
            Mode::Ir => match (&self.state.submode, command) {
                (Submode::Read, Command::IrRead) => {
                    if let Some(code) = hw.ir.last_code() {
                        reply(Reply::IrCode(code));
                    } else {
                        debug!("IR_READ with no captured code, no reply");
                    }
                }
                (_, Command::IrSend(payload)) => match hw.ir.send_payload(&payload) {
                    Ok(()) => reply(Reply::IrOk),
                    Err(e) => {
                        warn!(error = %e, payload = %payload, "IR send failed");
                        reply(Reply::IrFail);
                    }
                },
                _ => reply(Reply::WrongSubmode),
            },
            Mode::Idle | Mode::Other(_) => reply(Reply::WrongMode),
        }

        replies
    }
}

/// Read the UID in the field and show it; `None` for no card or a reader error
pub(crate) fn read_uid<T, I, D, C>(hw: &mut Peripherals<'_, T, I, D, C>) -> Option<multitool_hal::TagUid>
where
    T: TagReader,
    D: StatusDisplay,
{
    match hw.tags.read_uid() {
        Ok(Some(uid)) => {
            hw.display.show_tag(&uid);
            Some(uid)
        }
        Ok(None) => None,
        Err(e) => {
            warn!(error = ?e, "tag UID read failed");
            None
        }
    }
}

/// Read a data block; `None` for missing, empty or failed reads
pub(crate) fn read_data<T, I, D, C>(hw: &mut Peripherals<'_, T, I, D, C>, block: u8) -> Option<String>
where
    T: TagReader,
{
    match hw.tags.read_data_block(block) {
        Ok(Some(data)) if !data.is_empty() => Some(data),
        Ok(_) => None,
        Err(e) => {
            warn!(error = ?e, block, "tag block read failed");
            None
        }
    }
}
