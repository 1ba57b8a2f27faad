//! Linear undo/redo log.
//!
//! Each [`UndoRecord`] holds the text it added and removed plus the selection before and
//! after the edit. Applying the records is done by [`crate::TextEditor`]; this module only
//! keeps the history straight.

use crate::coords::{Coordinates, EditorState};

/// Default number of records kept before the oldest are dropped.
pub const DEFAULT_UNDO_LIMIT: usize = 1000;

/// One reversible edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UndoRecord {
    /// Text inserted by the edit (empty if none).
    pub added: String,
    /// Where the inserted text starts.
    pub added_start: Coordinates,
    /// Where the inserted text ends.
    pub added_end: Coordinates,
    /// Text removed by the edit (empty if none).
    pub removed: String,
    /// Where the removed text started.
    pub removed_start: Coordinates,
    /// Where the removed text ended.
    pub removed_end: Coordinates,
    /// Selection and cursor before the edit.
    pub before: EditorState,
    /// Selection and cursor after the edit.
    pub after: EditorState,
}

impl UndoRecord {
    /// Start a record from the state before the edit.
    pub fn new(before: EditorState) -> Self {
        Self {
            before,
            ..Self::default()
        }
    }

    /// Set the added span.
    pub fn set_added(&mut self, text: impl Into<String>, start: Coordinates, end: Coordinates) {
        self.added = text.into();
        self.added_start = start;
        self.added_end = end;
    }

    /// Set the removed span.
    pub fn set_removed(&mut self, text: impl Into<String>, start: Coordinates, end: Coordinates) {
        self.removed = text.into();
        self.removed_start = start;
        self.removed_end = end;
    }
}

/// History of [`UndoRecord`]s with a cursor separating the past from the undone future.
#[derive(Debug, Clone)]
pub struct UndoBuffer {
    records: Vec<UndoRecord>,
    index: usize,
    limit: usize,
}

impl Default for UndoBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_LIMIT)
    }
}

impl UndoBuffer {
    /// Create an empty history keeping at most `limit` records.
    pub fn new(limit: usize) -> Self {
        Self {
            records: Vec::new(),
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Append a record, discarding everything that was undone.
    pub fn push(&mut self, record: UndoRecord) {
        self.records.truncate(self.index);
        self.records.push(record);
        if self.records.len() > self.limit {
            let overflow = self.records.len() - self.limit;
            self.records.drain(..overflow);
        }
        self.index = self.records.len();
    }

    /// Returns `true` if there is a record to undo.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Returns `true` if there is a record to redo.
    pub fn can_redo(&self) -> bool {
        self.index < self.records.len()
    }

    /// Step back and return the record to revert.
    pub fn undo(&mut self) -> Option<&UndoRecord> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.records.get(self.index)
    }

    /// Step forward and return the record to re-apply.
    pub fn redo(&mut self) -> Option<&UndoRecord> {
        let record = self.records.get(self.index)?;
        self.index += 1;
        Some(record)
    }

    /// Number of records that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.index
    }

    /// Number of records that can be redone.
    pub fn redo_depth(&self) -> usize {
        self.records.len() - self.index
    }

    /// Forget the whole history.
    pub fn clear(&mut self) {
        self.records.clear();
        self.index = 0;
    }
}
