// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Radio link fake

use std::collections::BTreeSet;

use multitool_hal::{ConnectionId, LinkError, LinkProvider};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct LinkState {
    advertised: Vec<(String, u32)>,
    notifications: Vec<(ConnectionId, Vec<u8>)>,
    failing: BTreeSet<ConnectionId>,
    max_chunk: Option<usize>,
}

/// Link that records advertising requests and notifications
#[derive(Debug, Default)]
pub struct RecordingLink {
    state: Mutex<LinkState>,
}

impl RecordingLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject notifications larger than `max` bytes
    pub fn with_max_chunk(max: usize) -> Self {
        let link = Self::default();
        link.state.lock().max_chunk = Some(max);
        link
    }

    /// Make every notification to `connection` fail
    pub fn fail_connection(&self, connection: ConnectionId) {
        self.state.lock().failing.insert(connection);
    }

    /// Names passed to `start_advertising`, in call order
    pub fn advertised(&self) -> Vec<String> {
        self.state
            .lock()
            .advertised
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Intervals passed to `start_advertising`, in call order
    pub fn advertising_intervals(&self) -> Vec<u32> {
        self.state
            .lock()
            .advertised
            .iter()
            .map(|&(_, interval_us)| interval_us)
            .collect()
    }

    /// Every delivered notification as (connection, chunk)
    pub fn notifications(&self) -> Vec<(ConnectionId, Vec<u8>)> {
        self.state.lock().notifications.clone()
    }

    /// Chunks delivered to one connection
    pub fn chunks_for(&self, connection: ConnectionId) -> Vec<Vec<u8>> {
        self.state
            .lock()
            .notifications
            .iter()
            .filter(|(conn, _)| *conn == connection)
            .map(|(_, chunk)| chunk.clone())
            .collect()
    }

    /// Everything delivered to one connection, reassembled as text
    pub fn received_text(&self, connection: ConnectionId) -> String {
        let bytes: Vec<u8> = self.chunks_for(connection).concat();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Complete lines delivered to one connection
    pub fn received_lines(&self, connection: ConnectionId) -> Vec<String> {
        self.received_text(connection)
            .split_terminator('\n')
            .map(str::to_string)
            .collect()
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.advertised.clear();
        state.notifications.clear();
    }
}

impl LinkProvider for RecordingLink {
    type Error = LinkError;

    fn start_advertising(&self, device_name: &str, interval_us: u32) -> Result<(), Self::Error> {
        self.state
            .lock()
            .advertised
            .push((device_name.to_string(), interval_us));
        Ok(())
    }

    fn notify(&self, connection: ConnectionId, chunk: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.state.lock();
        if state.failing.contains(&connection) {
            return Err(LinkError::NotConnected(connection));
        }
        if let Some(max) = state.max_chunk {
            if chunk.len() > max {
                return Err(LinkError::ChunkTooLarge {
                    size: chunk.len(),
                    max,
                });
            }
        }
        state.notifications.push((connection, chunk.to_vec()));
        Ok(())
    }
}
