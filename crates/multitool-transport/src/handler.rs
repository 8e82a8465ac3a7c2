// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Radio-context side: connectivity events and inbound bytes

use std::collections::BTreeMap;
use std::sync::Arc;

use multitool_hal::{ConnectionId, LinkProvider, StatusDisplay};
use tracing::{debug, info, warn};

use crate::framing::LineAccumulator;
use crate::transport::{advertise, Advertising, CommandQueue, ConnectionSet};

/// Mode changes redraw the screen themselves and are not echoed
const SILENT_PREFIXES: [&str; 2] = ["SET_MODE:", "SET_SUBMODE:"];

/// Receives link callbacks and feeds the command queue
///
/// Each connection gets its own accumulator, so interleaved writes from two
/// peers cannot splice into one line. A peer's partial line is dropped when it
/// disconnects.
pub struct LinkEventHandler<L, D> {
    link: Arc<L>,
    display: Arc<D>,
    queue: CommandQueue,
    connections: ConnectionSet,
    accumulators: BTreeMap<ConnectionId, LineAccumulator>,
    advertising: Advertising,
    max_line_len: usize,
}

impl<L, D> LinkEventHandler<L, D>
where
    L: LinkProvider,
    D: StatusDisplay,
{
    pub(crate) fn new(
        link: Arc<L>,
        display: Arc<D>,
        queue: CommandQueue,
        connections: ConnectionSet,
        advertising: Advertising,
        max_line_len: usize,
    ) -> Self {
        Self {
            link,
            display,
            queue,
            connections,
            accumulators: BTreeMap::new(),
            advertising,
            max_line_len,
        }
    }

    /// A peer attached
    pub fn on_connect(&mut self, connection: ConnectionId) {
        let count = {
            let mut connections = self.connections.lock();
            connections.insert(connection);
            connections.len()
        };
        info!(connection, peers = count, "link connected");
        self.display.show_idle();
        advertise(self.link.as_ref(), &self.advertising);
    }

    /// A peer detached
    pub fn on_disconnect(&mut self, connection: ConnectionId) {
        let count = {
            let mut connections = self.connections.lock();
            connections.remove(&connection);
            connections.len()
        };
        self.accumulators.remove(&connection);
        info!(connection, peers = count, "link disconnected");
        self.display.show_idle();
        advertise(self.link.as_ref(), &self.advertising);
    }

    /// A write fragment arrived on the RX characteristic
    ///
    /// # Returns
    /// Number of commands queued from this fragment
    pub fn on_bytes_received(&mut self, connection: ConnectionId, chunk: &[u8]) -> usize {
        let max_line_len = self.max_line_len;
        let lines = self
            .accumulators
            .entry(connection)
            .or_insert_with(|| LineAccumulator::new(max_line_len))
            .feed(chunk);

        let mut queued = 0;
        for line in lines {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!(connection, error = %e, "inbound line dropped");
                    continue;
                }
            };

            debug!(connection, command = %line, "command received");
            if !SILENT_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
                self.display.show_message(&line);
            }

            match self.queue.push(line) {
                Ok(()) => queued += 1,
                Err(line) => warn!(command = %line, "command queue full, dropping"),
            }
        }
        queued
    }

    /// Bytes of an unfinished line buffered for a peer
    pub fn pending_bytes(&self, connection: ConnectionId) -> usize {
        self.accumulators
            .get(&connection)
            .map(LineAccumulator::pending)
            .unwrap_or(0)
    }
}
