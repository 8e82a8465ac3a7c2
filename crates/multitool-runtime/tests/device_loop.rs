// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Device loop driven end to end over the mock board

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use multitool_config::MultitoolConfig;
use multitool_dispatch::{Mode, ModeState, Submode};
use multitool_hal::TagUid;
use multitool_hal_mock::{
    DisplayEvent, FakeClock, MockBoard, MockTagReader, RecordingCarrier, RecordingDisplay,
    RecordingLink, ScriptedIrReceiver,
};
use multitool_ir::{encode_nec, NecFrame};
use multitool_runtime::{BoardParts, Device};
use multitool_transport::LinkEventHandler;

const PEER: u16 = 1;

struct Rig {
    clock: FakeClock,
    receiver: ScriptedIrReceiver<FakeClock>,
    carrier: RecordingCarrier<FakeClock>,
    tags: MockTagReader,
    display: Arc<RecordingDisplay>,
    link: Arc<RecordingLink>,
    device: Device<MockBoard<FakeClock>>,
    handler: LinkEventHandler<RecordingLink, RecordingDisplay>,
}

impl Rig {
    fn new() -> Self {
        Self::with(FakeClock::new(), MultitoolConfig::default())
    }

    fn with(clock: FakeClock, config: MultitoolConfig) -> Self {
        let receiver = ScriptedIrReceiver::new(clock.clone());
        let carrier = RecordingCarrier::new(clock.clone());
        let tags = MockTagReader::new();
        let display = Arc::new(RecordingDisplay::new());
        let link = Arc::new(RecordingLink::new());

        let parts = BoardParts::<MockBoard<FakeClock>> {
            clock: clock.clone(),
            ir_receiver: receiver.clone(),
            ir_carrier: carrier.clone(),
            tags: tags.clone(),
            display: Arc::clone(&display),
            link: Arc::clone(&link),
        };
        let (device, handler) = Device::new(parts, &config);

        Self {
            clock,
            receiver,
            carrier,
            tags,
            display,
            link,
            device,
            handler,
        }
    }

    fn send_line(&mut self, line: &str) {
        let mut bytes = line.as_bytes().to_vec();
        bytes.push(b'\n');
        self.handler.on_bytes_received(PEER, &bytes);
    }

    fn lines(&self) -> Vec<String> {
        self.link.received_lines(PEER)
    }
}

fn uid(text: &str) -> TagUid {
    text.parse().unwrap()
}

#[test]
fn test_boot_advertises_and_draws_idle() {
    let rig = Rig::new();

    assert_eq!(rig.link.advertised(), vec!["MultiTool".to_string()]);
    assert_eq!(rig.link.advertising_intervals(), vec![500_000]);
    assert_eq!(rig.display.events(), vec![DisplayEvent::Idle]);
    assert!(rig.carrier.is_idle());
    assert_eq!(rig.device.state(), &ModeState::default());
}

#[test]
fn test_ir_send_session() {
    let mut rig = Rig::new();
    rig.handler.on_connect(PEER);
    rig.carrier.clear();

    rig.send_line("SET_MODE:IR|SUBMODE:SEND");
    let outcome = rig.device.tick();
    assert_eq!(outcome.command.as_deref(), Some("SET_MODE:IR|SUBMODE:SEND"));
    assert_eq!(outcome.replies_sent, 1);
    assert!(rig.device.state().is(&Mode::Ir, &Submode::Send));

    rig.send_line("IR_SEND:NEC A2:34");
    rig.device.tick();

    assert_eq!(rig.lines(), vec!["OK", "IR_OK"]);
    let expected = encode_nec(NecFrame::new(0xA2, 0x34));
    assert_eq!(rig.carrier.transmitted_durations(), expected.as_slice());
    assert!(rig.carrier.is_idle());
}

#[test]
fn test_one_command_per_tick() {
    let mut rig = Rig::new();
    rig.handler.on_connect(PEER);

    rig.send_line("SET_MODE:RFID|SUBMODE:READ");
    rig.send_line("read_nfc");
    assert_eq!(rig.device.transport().pending_commands(), 2);

    rig.device.tick();
    assert_eq!(rig.lines(), vec!["OK"]);
    assert_eq!(rig.device.transport().pending_commands(), 1);

    rig.device.tick();
    assert_eq!(rig.lines(), vec!["OK", "ERR:NoUID"]);
}

#[test]
fn test_background_tag_report_once_per_uid() {
    let mut rig = Rig::new();
    rig.handler.on_connect(PEER);
    rig.tags.present_with_block(uid("04-A1-B2-C3"), 4, "hello");

    rig.send_line("SET_MODE:RFID|SUBMODE:READ");
    let outcome = rig.device.tick();
    assert_eq!(outcome.background_reports, 1);

    let outcome = rig.device.tick();
    assert_eq!(outcome.background_reports, 0);

    rig.tags.present(uid("04-11-22-33-44-55-66"));
    let outcome = rig.device.tick();
    assert_eq!(outcome.background_reports, 1);

    assert_eq!(
        rig.lines(),
        vec!["OK", "UID:04-A1-B2-C3|hello", "UID:04-11-22-33-44-55-66|N/A"]
    );
    assert!(rig
        .display
        .events()
        .contains(&DisplayEvent::Tag("04-A1-B2-C3".to_string())));
}

#[test]
fn test_background_tag_seen_while_disconnected_is_not_reported_later() {
    let mut rig = Rig::new();
    rig.send_line("SET_MODE:RFID|SUBMODE:READ");
    rig.tags.present(uid("DE-AD-BE-EF"));

    let outcome = rig.device.tick();
    assert_eq!(outcome.background_reports, 0);
    assert!(rig
        .display
        .events()
        .contains(&DisplayEvent::Tag("DE-AD-BE-EF".to_string())));

    rig.handler.on_connect(PEER);
    let outcome = rig.device.tick();
    assert_eq!(outcome.background_reports, 0);
    assert!(rig.lines().is_empty());
}

#[test]
fn test_no_background_scan_outside_rfid_read() {
    let mut rig = Rig::new();
    rig.tags.present(uid("04-A1-B2-C3"));

    rig.device.tick();
    rig.send_line("SET_MODE:RFID|SUBMODE:WRITE");
    rig.device.tick();
    rig.device.tick();

    assert_eq!(rig.tags.uid_reads(), 0);
}

#[test]
fn test_background_ir_reports_new_codes_only() {
    let mut config = MultitoolConfig::default();
    config.ir.header_timeout_us = 100_000;
    let mut rig = Rig::with(FakeClock::with_auto_advance(1), config);
    rig.handler.on_connect(PEER);

    let frame = encode_nec(NecFrame::new(0x20, 0xDF));
    rig.receiver.schedule_frame_in(50_000, frame.as_slice());
    rig.send_line("SET_MODE:IR|SUBMODE:READ");
    let outcome = rig.device.tick();
    assert_eq!(outcome.background_reports, 1);

    // Nothing on air: capture times out quietly
    let outcome = rig.device.tick();
    assert_eq!(outcome.background_reports, 0);

    rig.receiver.schedule_frame_in(50_000, frame.as_slice());
    let outcome = rig.device.tick();
    assert_eq!(outcome.background_reports, 0);
    assert_eq!(rig.receiver.pending_frames(), 0);

    rig.send_line("IR_READ");
    rig.device.tick();

    assert_eq!(rig.lines(), vec!["OK", "IR_CODE:NEC:20:DF", "IR_CODE:NEC:20:DF"]);
}

#[test]
fn test_panicking_reader_is_contained() {
    let mut rig = Rig::new();
    rig.handler.on_connect(PEER);
    rig.tags.set_panic_on_read(true);

    rig.send_line("SET_MODE:RFID|SUBMODE:READ");
    let outcome = rig.device.tick();
    assert!(outcome.recovered_panic);
    assert_eq!(rig.lines(), vec!["OK"]);

    rig.send_line("read_nfc");
    let outcome = rig.device.tick();
    assert!(outcome.recovered_panic);
    assert_eq!(outcome.replies_sent, 0);
    assert!(rig.device.state().is(&Mode::Rfid, &Submode::Read));

    rig.tags.set_panic_on_read(false);
    rig.tags.present(uid("04-A1-B2-C3"));
    rig.send_line("read_nfc");
    let outcome = rig.device.tick();
    assert!(!outcome.recovered_panic);
    assert_eq!(
        rig.lines(),
        vec!["OK", "UID:04-A1-B2-C3", "UID:04-A1-B2-C3|N/A"]
    );
}

#[test]
fn test_connectivity_change_redraws_idle() {
    let mut rig = Rig::new();
    rig.display.clear();

    rig.device.tick();
    assert_eq!(rig.display.idle_count(), 0);

    rig.handler.on_connect(PEER);
    rig.display.clear();
    rig.device.tick();
    assert_eq!(rig.display.idle_count(), 1);

    rig.device.tick();
    assert_eq!(rig.display.idle_count(), 1);

    rig.handler.on_disconnect(PEER);
    rig.display.clear();
    rig.device.tick();
    assert_eq!(rig.display.idle_count(), 1);
}

#[test]
fn test_idle_return_after_quiet_period() {
    let mut rig = Rig::new();
    rig.display.clear();

    rig.device.tick();
    assert_eq!(rig.display.idle_count(), 0);

    rig.clock.advance_ms(3_000);
    rig.device.tick();
    assert_eq!(rig.display.idle_count(), 1);

    // Keeps redrawing until something touches the UI
    rig.device.tick();
    assert_eq!(rig.display.idle_count(), 2);

    rig.send_line("PING");
    rig.display.clear();
    rig.device.tick();
    assert_eq!(rig.display.idle_count(), 0);
}

#[test]
fn test_tick_sleeps_configured_interval() {
    let mut config = MultitoolConfig::default();
    config.device.tick_interval_ms = 50;
    let mut rig = Rig::with(FakeClock::new(), config);

    rig.clock.clear_delays();
    rig.device.tick();
    rig.device.tick();

    assert_eq!(rig.clock.delays(), vec![50_000, 50_000]);
    assert_eq!(rig.clock.now_us(), 100_000);
}

#[test]
fn test_run_stops_when_flag_cleared() {
    let mut rig = Rig::new();
    let running = AtomicBool::new(false);
    assert_eq!(rig.device.run(&running), 0);

    running.store(true, Ordering::SeqCst);
    rig.send_line("SET_MODE:IDLE");
    rig.device.tick();
    running.store(false, Ordering::SeqCst);
    assert_eq!(rig.device.run(&running), 0);
    assert!(rig.device.state().is(&Mode::Idle, &Submode::None));
}
