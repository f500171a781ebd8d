//! Snapshot-based undo/redo.
//!
//! ```text
//! snapshot(s0); snapshot(s1)
//!   undo: [s0, s1]   redo: []
//!
//! undo(current = s2)  -> restores s1
//!   undo: [s0]       redo: [s2]
//!
//! snapshot(s3)        -> new branch, redo wiped
//!   undo: [s0, s3]   redo: []
//! ```
//!
//! Entries are whole-state copies taken *before* a mutation is applied, so
//! popping one restores the state that preceded that mutation.

/// Two stacks of immutable state snapshots, most recent at the end.
#[derive(Debug, Clone)]
pub struct History<T> {
    undo_stack: Vec<T>,
    redo_stack: Vec<T>,
    /// Maximum undo entries retained; `None` keeps everything.
    max_depth: Option<usize>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T> History<T> {
    /// Create an empty history, optionally bounded to `max_depth` undo entries.
    ///
    /// A bound of zero is treated as no bound.
    #[must_use]
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.filter(|&depth| depth > 0),
        }
    }

    /// Record the state about to be changed. Clears the redo stack.
    ///
    /// When the undo stack exceeds the depth bound the oldest entry is dropped.
    pub fn snapshot(&mut self, state: T) {
        self.redo_stack.clear();
        self.undo_stack.push(state);
        if let Some(max) = self.max_depth {
            if self.undo_stack.len() > max {
                let excess = self.undo_stack.len() - max;
                self.undo_stack.drain(..excess);
                tracing::trace!("History depth {max} reached, evicted {excess} entries");
            }
        }
    }

    /// Step back. `current` is parked on the redo stack and the most recent
    /// undo entry is returned for the caller to restore.
    ///
    /// Returns `None` and leaves both stacks untouched when there is nothing
    /// to undo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward; the mirror image of [`History::undo`].
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    /// Whether undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo entries.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redo entries.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo entries, oldest first.
    #[must_use]
    pub fn undo_entries(&self) -> &[T] {
        &self.undo_stack
    }

    /// Redo entries, oldest first.
    #[must_use]
    pub fn redo_entries(&self) -> &[T] {
        &self.redo_stack
    }

    /// Configured depth bound.
    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_then_undo_restores() {
        let mut history = History::default();
        let mut state = 1;

        history.snapshot(state);
        state = 2;

        state = history.undo(state).expect("undo available");
        assert_eq!(state, 1);
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_entries(), &[2]);
    }

    #[test]
    fn test_zero_depth_is_unbounded() {
        let mut history = History::new(Some(0));
        assert_eq!(history.max_depth(), None);
        history.snapshot(1);
        history.snapshot(2);
        assert_eq!(history.undo_entries(), &[1, 2]);
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut history: History<i32> = History::default();
        assert!(history.undo(5).is_none());
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_redo_on_empty_is_noop() {
        let mut history = History::default();
        history.snapshot(1);
        assert!(history.redo(2).is_none());
        assert_eq!(history.undo_entries(), &[1]);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut history = History::default();
        history.snapshot("a");
        history.snapshot("b");
        let current = "c";

        let current = history.undo(current).expect("undo");
        assert_eq!(current, "b");
        let current = history.undo(current).expect("undo");
        assert_eq!(current, "a");
        assert!(!history.can_undo());

        let current = history.redo(current).expect("redo");
        assert_eq!(current, "b");
        let current = history.redo(current).expect("redo");
        assert_eq!(current, "c");
        assert!(!history.can_redo());
        assert_eq!(history.undo_entries(), &["a", "b"]);
    }

    #[test]
    fn test_snapshot_clears_redo() {
        let mut history = History::default();
        history.snapshot(1);
        let _ = history.undo(2);
        assert!(history.can_redo());

        history.snapshot(3);
        assert!(!history.can_redo());
        assert_eq!(history.undo_entries(), &[3]);
    }

    #[test]
    fn test_max_depth_evicts_oldest() {
        let mut history = History::new(Some(3));
        for i in 0..5 {
            history.snapshot(i);
        }
        assert_eq!(history.undo_entries(), &[2, 3, 4]);
        assert_eq!(history.max_depth(), Some(3));
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        history.snapshot(1);
        let _ = history.undo(2);
        history.snapshot(3);
        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
