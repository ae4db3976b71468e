//! Bounded trail history.
//!
//! Maintains the recent position fixes that the map draws as a trail.
//!
//! # Design
//!
//! - Stores at most 100 entries; the oldest is evicted first (FIFO)
//! - Entry ids are creation-time epoch milliseconds, bumped on collision so
//!   they stay unique within a session
//! - Ordering is arrival order, oldest first

use std::collections::VecDeque;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::location::LocationReading;

/// Maximum entries retained in the trail history.
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// One historical fix with its session-unique id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation-time epoch milliseconds, unique within the session.
    pub id: i64,
    /// The recorded fix.
    #[serde(flatten)]
    pub reading: LocationReading,
}

/// Bounded FIFO history of position fixes.
#[derive(Debug, Clone, Default)]
pub struct TrailHistory {
    entries: VecDeque<HistoryEntry>,
    last_id: i64,
}

impl TrailHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a history from persisted entries, trimming to the cap.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let mut history = Self::new();
        for entry in entries {
            history.last_id = history.last_id.max(entry.id);
            history.entries.push_back(entry);
            if history.entries.len() > MAX_HISTORY_ENTRIES {
                history.entries.pop_front();
            }
        }
        history
    }

    /// Record a fix, evicting the oldest entry when full.
    ///
    /// Returns the id assigned to the new entry.
    pub fn record(&mut self, reading: LocationReading) -> i64 {
        let id = self.next_id();
        self.entries.push_back(HistoryEntry { id, reading });
        while self.entries.len() > MAX_HISTORY_ENTRIES {
            self.entries.pop_front();
        }
        id
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Snapshot of the entries for persistence, oldest first.
    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Next session-unique id: now in epoch-ms, bumped past the last id
    /// when two entries land in the same millisecond.
    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let id = if now > self.last_id { now } else { self.last_id + 1 };
        self.last_id = id;
        id
    }
}
