// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Transport behaviour against a recording link and display

use std::sync::Arc;

use multitool_config::LinkConfig;
use multitool_hal_mock::{DisplayEvent, FakeClock, RecordingDisplay, RecordingLink};
use multitool_transport::{channel, LineTransport, LinkEventHandler};

struct Fixture {
    transport: LineTransport<RecordingLink, FakeClock>,
    handler: LinkEventHandler<RecordingLink, RecordingDisplay>,
    link: Arc<RecordingLink>,
    display: Arc<RecordingDisplay>,
    clock: FakeClock,
}

fn fixture_with(config: LinkConfig) -> Fixture {
    let link = Arc::new(RecordingLink::new());
    let display = Arc::new(RecordingDisplay::new());
    let clock = FakeClock::new();
    let (transport, handler) = channel(
        Arc::clone(&link),
        Arc::clone(&display),
        clock.clone(),
        "MultiTool",
        &config,
    );
    Fixture {
        transport,
        handler,
        link,
        display,
        clock,
    }
}

fn fixture() -> Fixture {
    fixture_with(LinkConfig::default())
}

fn drain(transport: &LineTransport<RecordingLink, FakeClock>) -> Vec<String> {
    std::iter::from_fn(|| transport.next_command()).collect()
}

#[test]
fn test_fragmented_writes_reassemble() {
    let mut f = fixture();
    f.handler.on_connect(1);

    assert_eq!(f.handler.on_bytes_received(1, b"SET_MODE:IR|"), 0);
    assert_eq!(f.transport.next_command(), None);
    assert_eq!(f.handler.on_bytes_received(1, b"SUBMODE:SEND\nIR_SEND:NEC A2"), 1);
    assert_eq!(f.handler.on_bytes_received(1, b":34\n"), 1);

    assert_eq!(
        drain(&f.transport),
        vec!["SET_MODE:IR|SUBMODE:SEND", "IR_SEND:NEC A2:34"]
    );
}

#[test]
fn test_one_command_per_call() {
    let mut f = fixture();
    f.handler.on_bytes_received(1, b"a\nb\nc\n");

    assert_eq!(f.transport.pending_commands(), 3);
    assert_eq!(f.transport.next_command().as_deref(), Some("a"));
    assert_eq!(f.transport.pending_commands(), 2);
}

#[test]
fn test_received_commands_shown_except_set_mode() {
    let mut f = fixture();
    f.handler.on_bytes_received(1, b"SET_MODE:RFID|SUBMODE:READ\nread_nfc\n");

    assert_eq!(f.display.messages(), vec!["read_nfc".to_string()]);
}

#[test]
fn test_peers_keep_separate_partial_lines() {
    let mut f = fixture();
    f.handler.on_bytes_received(1, b"IR_");
    f.handler.on_bytes_received(2, b"read_");
    f.handler.on_bytes_received(1, b"READ\n");
    f.handler.on_bytes_received(2, b"nfc\n");

    assert_eq!(drain(&f.transport), vec!["IR_READ", "read_nfc"]);
}

#[test]
fn test_disconnect_drops_partial_line() {
    let mut f = fixture();
    f.handler.on_connect(1);
    f.handler.on_bytes_received(1, b"IR_RE");
    assert_eq!(f.handler.pending_bytes(1), 5);

    f.handler.on_disconnect(1);
    f.handler.on_connect(1);
    f.handler.on_bytes_received(1, b"AD\n");

    assert_eq!(drain(&f.transport), vec!["AD"]);
}

#[test]
fn test_full_queue_drops_newest() {
    let mut f = fixture_with(LinkConfig {
        command_queue_capacity: 2,
        ..LinkConfig::default()
    });

    assert_eq!(f.handler.on_bytes_received(1, b"one\ntwo\nthree\n"), 2);
    assert_eq!(drain(&f.transport), vec!["one", "two"]);
}

#[test]
fn test_connectivity_refreshes_display_and_advertises() {
    let mut f = fixture();
    assert!(!f.transport.is_connected());

    f.handler.on_connect(3);
    assert!(f.transport.is_connected());
    f.handler.on_disconnect(3);
    assert!(!f.transport.is_connected());

    assert_eq!(f.display.events(), vec![DisplayEvent::Idle, DisplayEvent::Idle]);
    assert_eq!(f.link.advertised(), vec!["MultiTool", "MultiTool"]);
}

#[test]
fn test_send_chunks_with_pacing() {
    let mut f = fixture();
    f.handler.on_connect(1);

    let reply = "IR_CODE:RAW:9000,4500,560,560,560";
    assert_eq!(f.transport.send(reply), 1);

    let chunks = f.link.chunks_for(1);
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].len(), 20);
    assert_eq!(chunks[1].len(), reply.len() + 1 - 20);
    assert_eq!(f.link.received_lines(1), vec![reply.to_string()]);
    assert_eq!(f.clock.delays(), vec![10_000, 10_000]);
}

#[test]
fn test_send_exact_multiple_of_chunk() {
    let mut f = fixture_with(LinkConfig {
        chunk_size: 3,
        ..LinkConfig::default()
    });
    f.handler.on_connect(1);

    f.transport.send("OK");

    assert_eq!(f.link.chunks_for(1), vec![b"OK\n".to_vec()]);
}

#[test]
fn test_send_without_peers_is_dropped() {
    let f = fixture();
    assert_eq!(f.transport.send("OK"), 0);
    assert!(f.link.notifications().is_empty());
    assert!(f.clock.delays().is_empty());
}

#[test]
fn test_failing_peer_does_not_affect_others() {
    let mut f = fixture();
    f.handler.on_connect(1);
    f.handler.on_connect(2);
    f.handler.on_connect(3);
    f.link.fail_connection(2);

    let reply = "UID:04-A1-B2-C3|hello world";
    assert_eq!(f.transport.send(reply), 2);

    assert_eq!(f.link.received_lines(1), vec![reply.to_string()]);
    assert!(f.link.chunks_for(2).is_empty());
    assert_eq!(f.link.received_lines(3), vec![reply.to_string()]);
}

#[test]
fn test_initial_advertising() {
    let f = fixture();
    assert!(f.transport.start_advertising());
    assert_eq!(f.link.advertised(), vec!["MultiTool"]);
}

#[test]
fn test_advertising_uses_configured_interval() {
    let mut f = fixture_with(LinkConfig {
        advertising_interval_us: 250_000,
        ..LinkConfig::default()
    });

    f.transport.start_advertising();
    f.handler.on_connect(1);
    f.handler.on_disconnect(1);

    assert_eq!(f.link.advertising_intervals(), vec![250_000; 3]);
}

#[test]
fn test_only_mode_change_lines_are_not_echoed() {
    let mut f = fixture();
    f.handler.on_connect(1);
    f.display.clear();

    f.handler
        .on_bytes_received(1, b"SET_MODE:RFID|SUBMODE:READ\nSET_SUBMODE:WRITE\nSET_MODEX\nread_nfc\n");

    assert_eq!(f.display.messages(), vec!["SET_MODEX", "read_nfc"]);
    assert_eq!(drain(&f.transport).len(), 4);
}
