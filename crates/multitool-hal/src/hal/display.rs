// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use super::tag::TagUid;

/// Status display (128x64 OLED on the reference board)
///
/// Every call is a fire-and-forget notification: the display owns its layout
/// and any state it needs to redraw (current mode, link indicator). Methods
/// take `&self` because the transport's radio callback and the main loop both
/// notify it.
pub trait StatusDisplay {
    /// Redraw the idle screen (mode, submode, link state)
    fn show_idle(&self);

    /// Show a freshly read tag UID
    fn show_tag(&self, uid: &TagUid);

    /// Show a short message (last command, write result)
    fn show_message(&self, text: &str);

    /// Record the mode shown on subsequent screens, as `MODE` or `MODE/SUBMODE`
    fn set_mode(&self, mode: &str);
}

impl<D: StatusDisplay + ?Sized> StatusDisplay for Arc<D> {
    fn show_idle(&self) {
        (**self).show_idle()
    }

    fn show_tag(&self, uid: &TagUid) {
        (**self).show_tag(uid)
    }

    fn show_message(&self, text: &str) {
        (**self).show_message(text)
    }

    fn set_mode(&self, mode: &str) {
        (**self).set_mode(mode)
    }
}
