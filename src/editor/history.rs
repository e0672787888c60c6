// SPDX-License-Identifier: MPL-2.0
//! Snapshot history bookkeeping (undo/redo).
//!
//! The history is strictly linear: pushing while the cursor is not at the end
//! discards the redoable tail first. Once the capacity is exceeded the oldest
//! entry is evicted and the cursor shifts so it keeps pointing at the same
//! logical entry.

use crate::domain::editing::HistoryCapacity;
use crate::editor::TransformState;
use std::collections::VecDeque;
use uuid::Uuid;

/// One immutable history snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    state: TransformState,
    timestamp: i64,
    id: String,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time and a fresh id.
    #[must_use]
    pub fn new(state: TransformState) -> Self {
        Self {
            state,
            timestamp: chrono::Utc::now().timestamp_millis(),
            id: Uuid::new_v4().to_string(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// Creation time in Unix milliseconds.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Opaque unique identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Bounded, cursor-indexed sequence of [`HistoryEntry`].
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: VecDeque<HistoryEntry>,
    /// `None` until the first push.
    cursor: Option<usize>,
    capacity: HistoryCapacity,
    deduplicate: bool,
}

impl HistoryStack {
    /// Creates an empty history.
    #[must_use]
    pub fn new(capacity: HistoryCapacity) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.value()),
            cursor: None,
            capacity,
            deduplicate: false,
        }
    }

    /// Skip pushes whose state equals the newest entry's state.
    ///
    /// Only applies while the cursor is at the newest entry. A push after an
    /// undo always records a new entry, so the redo tail is always discarded.
    #[must_use]
    pub fn with_deduplication(mut self, enabled: bool) -> Self {
        self.deduplicate = enabled;
        self
    }

    /// Records `state` as the new current entry.
    ///
    /// Returns `false` when deduplication is on, the cursor is at the newest
    /// entry and `state` equals it, in which case nothing changes.
    pub fn push(&mut self, state: TransformState) -> bool {
        if self.deduplicate
            && !self.can_redo()
            && self.current().is_some_and(|current| *current == state)
        {
            return false;
        }

        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push_back(HistoryEntry::new(state));

        let mut evicted = 0;
        while self.entries.len() > self.capacity.value() {
            self.entries.pop_front();
            evicted += 1;
        }
        self.cursor = Some(self.entries.len() - 1);
        if evicted > 0 {
            tracing::trace!(evicted, len = self.entries.len(), "history capacity reached");
        }
        true
    }

    /// Whether an undo operation is currently possible.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    /// Whether a redo operation is currently possible.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 < self.entries.len())
    }

    /// Steps back one entry; `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<TransformState> {
        if !self.can_undo() {
            return None;
        }
        let cursor = self.cursor.map(|cursor| cursor - 1)?;
        self.cursor = Some(cursor);
        self.entries.get(cursor).map(|entry| entry.state)
    }

    /// Steps forward one entry; `None` at the newest entry.
    pub fn redo(&mut self) -> Option<TransformState> {
        if !self.can_redo() {
            return None;
        }
        let cursor = self.cursor.map(|cursor| cursor + 1)?;
        self.cursor = Some(cursor);
        self.entries.get(cursor).map(|entry| entry.state)
    }

    /// State at the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&TransformState> {
        self.current_entry().map(HistoryEntry::state)
    }

    /// Entry at the cursor.
    #[must_use]
    pub fn current_entry(&self) -> Option<&HistoryEntry> {
        self.cursor.and_then(|cursor| self.entries.get(cursor))
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> HistoryCapacity {
        self.capacity
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::TransformPatch;

    fn rotated(degrees: f32) -> TransformState {
        TransformState::default().apply(&TransformPatch::rotation(degrees))
    }

    fn seeded(capacity: usize) -> HistoryStack {
        let mut history = HistoryStack::new(HistoryCapacity::new(capacity));
        history.push(TransformState::default());
        history
    }

    #[test]
    fn empty_history_has_no_cursor() {
        let mut history = HistoryStack::new(HistoryCapacity::default());
        assert_eq!(history.cursor(), None);
        assert!(history.current().is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn undo_redo_respect_history_bounds() {
        let mut history = seeded(20);
        history.push(rotated(10.0));
        assert!(history.can_undo());
        assert!(!history.can_redo());

        assert_eq!(history.undo(), Some(TransformState::default()));
        assert_eq!(history.cursor(), Some(0));
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));

        assert_eq!(history.redo(), Some(rotated(10.0)));
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn push_after_undo_discards_redo_tail() {
        let mut history = seeded(20);
        history.push(rotated(10.0));
        history.push(rotated(20.0));
        history.undo();
        history.push(rotated(30.0));

        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        let states: Vec<_> = history.entries().map(|e| e.state().rotation.value()).collect();
        assert_eq!(states, vec![0.0, 10.0, 30.0]);
    }

    #[test]
    fn overflow_evicts_oldest_and_keeps_cursor_on_current() {
        let mut history = seeded(3);
        for degrees in [10.0, 20.0, 30.0, 40.0] {
            history.push(rotated(degrees));
            assert!(history.len() <= 3);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert_eq!(history.current().map(|s| s.rotation.value()), Some(40.0));
        let oldest = history.entries().next().map(|e| e.state().rotation.value());
        assert_eq!(oldest, Some(20.0));
    }

    #[test]
    fn identical_states_are_pushed_by_default() {
        let mut history = seeded(20);
        history.push(TransformState::default());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn deduplication_skips_equal_states() {
        let mut history = seeded(20).with_deduplication(true);
        assert!(!history.push(TransformState::default()));
        assert!(history.push(rotated(5.0)));
        assert!(!history.push(rotated(5.0)));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn deduplicated_push_after_undo_still_discards_redo_tail() {
        let mut history = seeded(20).with_deduplication(true);
        history.push(rotated(10.0));
        history.undo();

        assert!(history.push(TransformState::default()));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
        let states: Vec<_> = history.entries().map(|e| e.state().rotation.value()).collect();
        assert_eq!(states, vec![0.0, 0.0]);
    }

    #[test]
    fn entries_have_unique_ids() {
        let mut history = seeded(20);
        history.push(TransformState::default());
        let ids: Vec<_> = history.entries().map(|e| e.id().to_string()).collect();
        assert_ne!(ids[0], ids[1]);
        assert!(history.entries().all(|e| e.timestamp() > 0));
    }

    #[test]
    fn clear_resets_cursor() {
        let mut history = seeded(20);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
    }
}
