// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Mock HAL implementation for testing MultiTool
//!
//! Every fake is a cheap handle over shared state: clone it, hand one copy to
//! the component under test and keep the other to script inputs and inspect
//! what happened. Nothing here touches real hardware or real time (except when
//! a fake is built over [`multitool_hal::StdClock`] by the host simulator).

pub mod board;
pub mod clock;
pub mod display;
pub mod ir;
pub mod link;
pub mod tag;

pub use board::MockBoard;
pub use clock::FakeClock;
pub use display::{DisplayEvent, RecordingDisplay};
pub use ir::{CarrierEvent, MockCarrierError, RecordingCarrier, ScriptedIrReceiver};
pub use link::RecordingLink;
pub use tag::{MockTagError, MockTagReader};
