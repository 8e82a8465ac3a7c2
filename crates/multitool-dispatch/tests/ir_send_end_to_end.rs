// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Dispatcher driving the real pulse codec

use multitool_config::IrConfig;
use multitool_dispatch::{Dispatcher, Peripherals};
use multitool_hal_mock::{FakeClock, MockTagReader, RecordingCarrier, RecordingDisplay, ScriptedIrReceiver};
use multitool_ir::{encode_nec, NecFrame, PulseCodec};

#[test]
fn test_set_mode_then_nec_send_transmits_frame() {
    let clock = FakeClock::new();
    let carrier = RecordingCarrier::new(clock.clone());
    let mut codec = PulseCodec::new(
        ScriptedIrReceiver::new(clock.clone()),
        carrier.clone(),
        clock.clone(),
        &IrConfig::default(),
    );
    carrier.clear();
    let mut tags = MockTagReader::new();
    let display = RecordingDisplay::new();
    let mut dispatcher = Dispatcher::default();

    let mut hw = Peripherals {
        tags: &mut tags,
        ir: &mut codec,
        display: &display,
        clock: &clock,
    };

    let replies = dispatcher.handle("SET_MODE:IR|SUBMODE:SEND", &mut hw);
    assert_eq!(replies.iter().map(|r| r.to_string()).collect::<Vec<_>>(), vec!["OK"]);

    let replies = dispatcher.handle("IR_SEND:NEC A2:34", &mut hw);
    assert_eq!(replies.iter().map(|r| r.to_string()).collect::<Vec<_>>(), vec!["IR_OK"]);

    let expected = encode_nec(NecFrame::new(0xA2, 0x34));
    assert_eq!(carrier.transmitted_durations(), expected.as_slice());
    assert!(carrier.is_idle());
}

#[test]
fn test_malformed_payload_replies_fail_without_transmitting() {
    let clock = FakeClock::new();
    let carrier = RecordingCarrier::new(clock.clone());
    let mut codec = PulseCodec::new(
        ScriptedIrReceiver::new(clock.clone()),
        carrier.clone(),
        clock.clone(),
        &IrConfig::default(),
    );
    carrier.clear();
    let mut tags = MockTagReader::new();
    let display = RecordingDisplay::new();
    let mut dispatcher = Dispatcher::default();
    let mut hw = Peripherals {
        tags: &mut tags,
        ir: &mut codec,
        display: &display,
        clock: &clock,
    };

    dispatcher.handle("SET_MODE:IR|SUBMODE:SEND", &mut hw);
    for payload in ["IR_SEND:NEC ZZ:34", "IR_SEND:abc", "IR_SEND:"] {
        let replies = dispatcher.handle(payload, &mut hw);
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].to_string(), "IR_FAIL", "{}", payload);
    }
    assert!(carrier.transmitted_durations().is_empty());
}
