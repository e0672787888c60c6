// SPDX-License-Identifier: MPL-2.0
//! Session activity log.
//!
//! Every session operation is recorded as an [`ActivityRecord`]. The log keeps
//! at most [`LogCapacity`] records, dropping the oldest first, and can be
//! dumped as JSON when reporting a problem.

mod events;

use std::collections::VecDeque;

pub use crate::domain::diagnostics::LogCapacity;
pub use events::{ActivityKind, ActivityRecord};

/// Bounded, chronological log of session activity.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    records: VecDeque<ActivityRecord>,
    capacity: LogCapacity,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(LogCapacity::default())
    }
}

impl ActivityLog {
    #[must_use]
    pub fn new(capacity: LogCapacity) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.value()),
            capacity,
        }
    }

    /// Appends a record stamped with the current time, dropping the oldest
    /// record when the log is full.
    pub fn record(&mut self, kind: ActivityKind) {
        if self.records.len() >= self.capacity.value() {
            self.records.pop_front();
        }
        self.records.push_back(ActivityRecord::now(kind));
    }

    /// Oldest first.
    pub fn records(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ActivityRecord> {
        self.records.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> LogCapacity {
        self.capacity
    }

    /// Drops every record; the capacity is kept.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Serializes all records as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.records)
    }
}
