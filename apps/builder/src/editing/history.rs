//! Snapshot history with a cursor.
//!
//! The history always holds at least one snapshot and the cursor always
//! points at one of them. Recording after an undo discards every snapshot
//! past the cursor before appending.

use tracing::debug;

use crate::document::ResumeDocument;
use crate::errors::HistoryError;

#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<ResumeDocument>,
    cursor: usize,
    /// Maximum number of snapshots kept; the oldest are dropped first.
    /// `None` keeps everything.
    limit: Option<usize>,
}

impl History {
    pub fn new(initial: ResumeDocument) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            limit: None,
        }
    }

    /// A history that keeps at most `limit` snapshots (minimum 1).
    pub fn with_limit(initial: ResumeDocument, limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new(initial)
        }
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> &ResumeDocument {
        &self.snapshots[self.cursor]
    }

    /// Truncates the redo tail and appends `doc` as the new current snapshot.
    pub fn record(&mut self, doc: ResumeDocument) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(doc);
        self.cursor = self.snapshots.len() - 1;

        if let Some(limit) = self.limit {
            let excess = self.snapshots.len().saturating_sub(limit);
            if excess > 0 {
                self.snapshots.drain(..excess);
                self.cursor -= excess;
                debug!(dropped = excess, "history limit reached");
            }
        }
    }

    pub fn undo(&mut self) -> Result<&ResumeDocument, HistoryError> {
        if !self.can_undo() {
            return Err(HistoryError::NothingToUndo);
        }
        self.cursor -= 1;
        Ok(self.current())
    }

    pub fn redo(&mut self) -> Result<&ResumeDocument, HistoryError> {
        if !self.can_redo() {
            return Err(HistoryError::NothingToRedo);
        }
        self.cursor += 1;
        Ok(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the whole history with a single snapshot, e.g. after a load.
    pub fn reset(&mut self, doc: ResumeDocument) {
        self.snapshots.clear();
        self.snapshots.push(doc);
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::seed_document;

    fn named(name: &str) -> ResumeDocument {
        let mut doc = seed_document();
        doc.personal_info.full_name = Some(name.to_string());
        doc
    }

    #[test]
    fn test_new_history_has_nothing_to_undo() {
        let mut history = History::new(seed_document());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo().unwrap_err(), HistoryError::NothingToUndo);
        assert_eq!(history.redo().unwrap_err(), HistoryError::NothingToRedo);
        assert_eq!(history.current(), &seed_document());
    }

    #[test]
    fn test_undo_then_redo_restores_snapshot() {
        let mut history = History::new(named("A"));
        history.record(named("B"));
        history.record(named("C"));

        assert_eq!(history.undo().unwrap().full_name(), "B");
        assert_eq!(history.undo().unwrap().full_name(), "A");
        assert_eq!(history.redo().unwrap().full_name(), "B");
        assert_eq!(history.redo().unwrap().full_name(), "C");
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_after_undo_drops_redo_tail() {
        let mut history = History::new(named("A"));
        history.record(named("B"));
        history.record(named("C"));
        history.undo().unwrap();
        history.record(named("D"));

        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(history.current().full_name(), "D");
        assert_eq!(history.undo().unwrap().full_name(), "B");
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(named("A"), 3);
        for name in ["B", "C", "D", "E"] {
            history.record(named(name));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        history.undo().unwrap();
        assert_eq!(history.undo().unwrap().full_name(), "C");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_reset_collapses_to_one_snapshot() {
        let mut history = History::new(named("A"));
        history.record(named("B"));
        history.reset(named("Loaded"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert_eq!(history.current().full_name(), "Loaded");
    }
}
