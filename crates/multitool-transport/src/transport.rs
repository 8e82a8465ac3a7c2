// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Main-loop side: command queue consumer and chunked reply sender

use std::collections::BTreeSet;
use std::sync::Arc;

use crossbeam::queue::ArrayQueue;
use multitool_config::LinkConfig;
use multitool_hal::{ConnectionId, LinkProvider, StatusDisplay, TimeProvider};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::handler::LinkEventHandler;

pub(crate) type ConnectionSet = Arc<Mutex<BTreeSet<ConnectionId>>>;
pub(crate) type CommandQueue = Arc<ArrayQueue<String>>;

/// Create the two halves of a transport over one link
///
/// # Arguments
/// * `link` - Radio link, shared by both halves
/// * `display` - Notified of received commands and connectivity changes
/// * `clock` - Used for the pacing delay between notifications
/// * `device_name` - Name advertised on every connectivity change
/// * `config` - Chunk size, pacing, advertising interval, queue capacity and
///   line limit
pub fn channel<L, D, C>(
    link: Arc<L>,
    display: Arc<D>,
    clock: C,
    device_name: &str,
    config: &LinkConfig,
) -> (LineTransport<L, C>, LinkEventHandler<L, D>)
where
    L: LinkProvider,
    D: StatusDisplay,
    C: TimeProvider,
{
    let queue: CommandQueue = Arc::new(ArrayQueue::new(config.command_queue_capacity.max(1)));
    let connections: ConnectionSet = Arc::new(Mutex::new(BTreeSet::new()));
    let advertising = Advertising {
        device_name: device_name.to_string(),
        interval_us: config.advertising_interval_us,
    };

    let transport = LineTransport {
        link: Arc::clone(&link),
        clock,
        queue: Arc::clone(&queue),
        connections: Arc::clone(&connections),
        advertising: advertising.clone(),
        chunk_size: config.chunk_size.max(1),
        chunk_delay_ms: config.chunk_delay_ms,
    };
    let handler = LinkEventHandler::new(
        link,
        display,
        queue,
        connections,
        advertising,
        config.max_line_len,
    );
    (transport, handler)
}

/// Name and interval used every time advertising (re)starts
#[derive(Debug, Clone)]
pub(crate) struct Advertising {
    pub(crate) device_name: String,
    pub(crate) interval_us: u32,
}

/// Start connectable advertising, logging a refusal
pub(crate) fn advertise<L: LinkProvider>(link: &L, advertising: &Advertising) -> bool {
    match link.start_advertising(&advertising.device_name, advertising.interval_us) {
        Ok(()) => {
            debug!(
                name = %advertising.device_name,
                interval_us = advertising.interval_us,
                "advertising"
            );
            true
        }
        Err(e) => {
            warn!(error = ?e, "failed to start advertising");
            false
        }
    }
}

/// Main-loop half of the transport
pub struct LineTransport<L, C> {
    link: Arc<L>,
    clock: C,
    queue: CommandQueue,
    connections: ConnectionSet,
    advertising: Advertising,
    chunk_size: usize,
    chunk_delay_ms: u32,
}

impl<L, C> LineTransport<L, C>
where
    L: LinkProvider,
    C: TimeProvider,
{
    /// Start advertising (called once at boot)
    pub fn start_advertising(&self) -> bool {
        advertise(self.link.as_ref(), &self.advertising)
    }

    /// Oldest received command, if any
    ///
    /// At most one per call; the loop handles one command per tick.
    pub fn next_command(&self) -> Option<String> {
        self.queue.pop()
    }

    /// Commands waiting to be handled
    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    /// True while at least one peer is attached
    pub fn is_connected(&self) -> bool {
        !self.connections.lock().is_empty()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Send one line to every connected peer
    ///
    /// The payload gets a trailing `\n` and is cut into chunk-sized
    /// notifications, each followed by the pacing delay. The peer set is
    /// snapshotted first. A failing peer loses the rest of this line; other
    /// peers are unaffected and nothing is reported to the caller beyond the
    /// count.
    ///
    /// # Returns
    /// Number of peers that received the whole line
    pub fn send(&self, payload: &str) -> usize {
        let peers: Vec<ConnectionId> = self.connections.lock().iter().copied().collect();
        if peers.is_empty() {
            debug!(payload, "no peer connected, reply dropped");
            return 0;
        }

        let mut message = Vec::with_capacity(payload.len() + 1);
        message.extend_from_slice(payload.as_bytes());
        message.push(b'\n');

        let mut delivered = 0;
        for connection in peers {
            if self.send_to(connection, &message) {
                delivered += 1;
            }
        }
        debug!(payload, delivered, "reply sent");
        delivered
    }

    fn send_to(&self, connection: ConnectionId, message: &[u8]) -> bool {
        for (index, chunk) in message.chunks(self.chunk_size).enumerate() {
            if let Err(e) = self.link.notify(connection, chunk) {
                warn!(connection, chunk = index, error = ?e, "notify failed, dropping rest of line");
                return false;
            }
            self.clock.delay_ms(self.chunk_delay_ms);
        }
        true
    }
}
