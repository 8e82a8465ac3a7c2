// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! # multitool-transport
//!
//! Newline-framed text commands over a notification-based radio link.
//!
//! The link delivers writes in arbitrary fragments and accepts notifications
//! of at most one small chunk. This crate hides both:
//!
//! ```text
//!  radio context                         main loop
//! ┌──────────────────────┐   queue   ┌──────────────────────┐
//! │ LinkEventHandler     │ ────────► │ LineTransport        │
//! │  on_bytes_received   │ (lines)   │  next_command()      │
//! │  on_connect/..       │           │  send(reply)         │──► link.notify()
//! └──────────────────────┘           └──────────────────────┘
//!            │  connection set (shared)          │
//!            └───────────────────────────────────┘
//! ```
//!
//! Both halves come from [`channel`]. The handler is moved into whatever
//! context the radio stack calls back on; the transport stays with the loop.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod framing;
pub mod handler;
pub mod transport;

pub use framing::{FrameError, LineAccumulator};
pub use handler::LinkEventHandler;
pub use transport::{channel, LineTransport};
