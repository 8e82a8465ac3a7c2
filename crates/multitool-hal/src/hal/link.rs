// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Radio link Hardware Abstraction Layer
//!
//! The link collaborator owns advertising, connection management and the raw
//! notification primitive. Everything above the byte level (line framing,
//! chunking, pacing) lives in `multitool-transport`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ multitool-transport (LineTransport)          │
//! └─────────────────┬────────────────────────────┘
//!                   │ notify() / start_advertising()
//! ┌─────────────────▼────────────────────────────┐
//! │ LinkProvider trait (THIS FILE)               │
//! └─────────────────┬────────────────────────────┘
//!                   │ implements
//! ┌─────────────────▼────────────────────────────┐
//! │ Board BLE stack (NUS service, GATT notify)   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Inbound traffic flows the other way: the board's radio callback calls
//! `LinkEventHandler::on_bytes_received` / `on_connect` / `on_disconnect`.

/// Connection handle assigned by the radio stack
pub type ConnectionId = u16;

/// Radio link provider trait
///
/// Methods take `&self`: the same link is used from the radio callback (to
/// restart advertising) and from the main loop (to notify), so implementations
/// handle their own interior synchronisation.
pub trait LinkProvider: Send + Sync {
    /// Platform-specific error type
    type Error: core::fmt::Debug;

    /// Start (or restart) connectable advertising
    ///
    /// # Arguments
    /// * `device_name` - Name carried in the advertising payload
    /// * `interval_us` - Advertising interval
    ///
    /// # Errors
    ///
    /// Returns an error if the radio stack rejects the advertising request.
    fn start_advertising(&self, device_name: &str, interval_us: u32) -> Result<(), Self::Error>;

    /// Send one notification on the TX characteristic of a connection
    ///
    /// `chunk` is at most one negotiated notification payload; the transport
    /// does the splitting.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection is gone or the stack's buffers are
    /// full. The transport treats any error as fatal for the remaining chunks
    /// of that connection only.
    fn notify(&self, connection: ConnectionId, chunk: &[u8]) -> Result<(), Self::Error>;
}

/// Common link error for boards without a richer stack error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// The connection handle is not (or no longer) attached
    #[error("connection {0} is not attached")]
    NotConnected(ConnectionId),

    /// Notification payload larger than the link accepts
    #[error("chunk of {size} bytes exceeds link limit of {max}")]
    ChunkTooLarge {
        /// Offered size
        size: usize,
        /// Accepted size
        max: usize,
    },

    /// Radio stack refused the request
    #[error("radio stack error: {0}")]
    Stack(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_error_messages() {
        assert_eq!(
            LinkError::NotConnected(3).to_string(),
            "connection 3 is not attached"
        );
        assert_eq!(
            LinkError::ChunkTooLarge { size: 30, max: 20 }.to_string(),
            "chunk of 30 bytes exceeds link limit of 20"
        );
    }
}
