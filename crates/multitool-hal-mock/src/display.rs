// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Status display fake

use multitool_hal::{StatusDisplay, TagUid};
use parking_lot::Mutex;

/// Display call observed by [`RecordingDisplay`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Idle,
    Tag(String),
    Message(String),
    Mode(String),
}

/// Display that records every call in order
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    events: Mutex<Vec<DisplayEvent>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events.lock().clone()
    }

    /// Number of `show_idle` calls
    pub fn idle_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| **e == DisplayEvent::Idle)
            .count()
    }

    /// Texts passed to `show_message`
    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                DisplayEvent::Message(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Last mode string passed to `set_mode`
    pub fn mode(&self) -> Option<String> {
        self.events.lock().iter().rev().find_map(|e| match e {
            DisplayEvent::Mode(mode) => Some(mode.clone()),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl StatusDisplay for RecordingDisplay {
    fn show_idle(&self) {
        self.events.lock().push(DisplayEvent::Idle);
    }

    fn show_tag(&self, uid: &TagUid) {
        self.events.lock().push(DisplayEvent::Tag(uid.to_string()));
    }

    fn show_message(&self, text: &str) {
        self.events.lock().push(DisplayEvent::Message(text.to_string()));
    }

    fn set_mode(&self, mode: &str) {
        self.events.lock().push(DisplayEvent::Mode(mode.to_string()));
    }
}
