/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Linear undo/redo over serialized node-store snapshots.
//!
//! Entries are JSON strings, so they can never alias the live store and
//! duplicate detection is a plain string comparison.

use std::fmt;

use crate::persistence::types::StoreSnapshot;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug)]
pub enum HistoryError {
    Malformed(serde_json::Error),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Malformed(e) => write!(f, "Malformed history entry: {e}"),
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryError::Malformed(e) => Some(e),
        }
    }
}

/// One immutable, serialized store snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry(String);

impl HistoryEntry {
    pub fn from_snapshot(snapshot: &StoreSnapshot) -> Result<Self, HistoryError> {
        serde_json::to_string(snapshot)
            .map(Self)
            .map_err(HistoryError::Malformed)
    }

    /// Wrap already-serialized JSON without validating it.
    pub fn from_json(json: impl Into<String>) -> Self {
        Self(json.into())
    }

    pub fn as_json(&self) -> &str {
        &self.0
    }

    pub fn to_snapshot(&self) -> Result<StoreSnapshot, HistoryError> {
        serde_json::from_str(&self.0).map_err(HistoryError::Malformed)
    }
}

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    /// Index of the entry matching the live store.
    cursor: usize,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Drop everything and start over from `entry`.
    pub fn reset(&mut self, entry: HistoryEntry) {
        self.entries.clear();
        self.entries.push(entry);
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Record `entry` as the newest state. Returns `false` when it matches
    /// the entry under the cursor, in which case nothing changes and any redo
    /// future is kept. Otherwise the future is discarded, the entry appended,
    /// and the oldest entries evicted beyond capacity.
    pub fn commit(&mut self, entry: HistoryEntry) -> bool {
        if self.current() == Some(&entry) {
            return false;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(entry);
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(0..excess);
        }
        self.cursor = self.entries.len() - 1;
        true
    }

    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }
}
