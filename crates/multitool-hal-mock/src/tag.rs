// Copyright 2025 MultiTool Firmware Team
// SPDX-License-Identifier: Apache-2.0

//! Tag reader fake

use std::collections::BTreeMap;
use std::sync::Arc;

use multitool_hal::{BlockPayload, TagReader, TagUid};
use parking_lot::Mutex;

/// Error returned by a reader configured to fail
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MockTagError {
    #[error("reader did not answer")]
    Timeout,
}

#[derive(Debug, Default)]
struct TagState {
    uid: Option<TagUid>,
    blocks: BTreeMap<u8, Vec<u8>>,
    faulty: bool,
    panic_on_read: bool,
    emulation_supported: bool,
    writes: Vec<(u8, BlockPayload)>,
    emitted: Vec<String>,
    uid_reads: usize,
}

/// In-memory card field
///
/// Present a card with [`MockTagReader::present`], take it away with
/// [`MockTagReader::remove`]. Writes are shaped exactly like a real driver
/// would (16-byte MIFARE Classic blocks, 4-byte NTAG pages), so reading a
/// block back shows the truncation a user would see.
#[derive(Debug, Clone)]
pub struct MockTagReader {
    state: Arc<Mutex<TagState>>,
}

impl Default for MockTagReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTagReader {
    /// Empty field, emulation supported
    pub fn new() -> Self {
        let state = TagState {
            emulation_supported: true,
            ..TagState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Put a card in the field, discarding the previous card's blocks
    pub fn present(&self, uid: TagUid) {
        let mut state = self.state.lock();
        state.uid = Some(uid);
        state.blocks.clear();
    }

    /// Put a card in the field with one block pre-written
    pub fn present_with_block(&self, uid: TagUid, block: u8, text: &str) {
        let payload = BlockPayload::for_uid(&uid, text);
        let mut state = self.state.lock();
        state.uid = Some(uid);
        state.blocks.clear();
        state.blocks.insert(block, payload.as_bytes().to_vec());
    }

    /// Take the card away
    pub fn remove(&self) {
        self.state.lock().uid = None;
    }

    /// Make every driver call fail with [`MockTagError::Timeout`]
    pub fn set_faulty(&self, faulty: bool) {
        self.state.lock().faulty = faulty;
    }

    /// Make `read_uid` panic, as a misbehaving driver would
    pub fn set_panic_on_read(&self, panic: bool) {
        self.state.lock().panic_on_read = panic;
    }

    /// Whether `emit_uid` succeeds
    pub fn set_emulation_supported(&self, supported: bool) {
        self.state.lock().emulation_supported = supported;
    }

    /// Every accepted write as (block, bytes written)
    pub fn writes(&self) -> Vec<(u8, BlockPayload)> {
        self.state.lock().writes.clone()
    }

    /// Every accepted emulation request
    pub fn emitted(&self) -> Vec<String> {
        self.state.lock().emitted.clone()
    }

    /// Number of `read_uid` calls so far
    pub fn uid_reads(&self) -> usize {
        self.state.lock().uid_reads
    }
}

impl TagReader for MockTagReader {
    type Error = MockTagError;

    fn read_uid(&mut self) -> Result<Option<TagUid>, Self::Error> {
        let mut state = self.state.lock();
        state.uid_reads += 1;
        if state.panic_on_read {
            drop(state);
            panic!("tag reader bus fault");
        }
        if state.faulty {
            return Err(MockTagError::Timeout);
        }
        Ok(state.uid.clone())
    }

    fn read_data_block(&mut self, block: u8) -> Result<Option<String>, Self::Error> {
        let state = self.state.lock();
        if state.faulty {
            return Err(MockTagError::Timeout);
        }
        if state.uid.is_none() {
            return Ok(None);
        }
        Ok(state.blocks.get(&block).and_then(|bytes| {
            let text = String::from_utf8_lossy(bytes);
            let text = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
            (!text.is_empty()).then(|| text.to_string())
        }))
    }

    fn write_block(&mut self, data: &str, block: u8) -> Result<bool, Self::Error> {
        let mut state = self.state.lock();
        if state.faulty {
            return Err(MockTagError::Timeout);
        }
        let Some(uid) = state.uid.clone() else {
            return Ok(false);
        };
        let payload = BlockPayload::for_uid(&uid, data);
        state.blocks.insert(block, payload.as_bytes().to_vec());
        state.writes.push((block, payload));
        Ok(true)
    }

    fn emit_uid(&mut self, data: &str) -> Result<bool, Self::Error> {
        let mut state = self.state.lock();
        if state.faulty {
            return Err(MockTagError::Timeout);
        }
        if !state.emulation_supported {
            return Ok(false);
        }
        state.emitted.push(data.to_string());
        Ok(true)
    }
}
