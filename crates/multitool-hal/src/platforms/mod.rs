// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Platform implementations
//!
//! Board support packages implement the HAL traits in `crate::hal`. Only the
//! std-backed host pieces live in this crate; on-target boards live with their
//! firmware images.

/// std-backed implementations for host builds.
#[cfg(feature = "host")]
pub mod host;

#[cfg(feature = "host")]
pub use host::StdClock;
