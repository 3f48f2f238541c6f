//! Undo/Redo history.
//!
//! A linear log of full-composition snapshots with a cursor. The entry
//! under the cursor is the current state; undo and redo move the cursor
//! and hand back a fresh copy of the entry they land on.
//!
//! A snapshot is recorded after each discrete completed edit and at the
//! end of each drag/resize gesture, never per pointer-move frame.

use shapes_core::model::Shape;

/// A deep, independent copy of the ordered shape list at one instant.
pub type Snapshot = Vec<Shape>;

pub struct History {
    entries: Vec<Snapshot>,
    cursor: usize,
    /// Maximum retained entries. `None` = unbounded.
    max_depth: Option<usize>,
}

impl History {
    /// Start a history whose first entry is `initial`.
    pub fn new(initial: &[Shape], max_depth: Option<usize>) -> Self {
        Self {
            entries: vec![initial.to_vec()],
            cursor: 0,
            max_depth: max_depth.map(|d| d.max(1)),
        }
    }

    /// Drop the redo branch, append a copy of `snapshot`, and move the
    /// cursor onto it.
    pub fn record(&mut self, snapshot: &[Shape]) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot.to_vec());
        self.cursor = self.entries.len() - 1;

        if let Some(max) = self.max_depth {
            while self.entries.len() > max {
                self.entries.remove(0);
                self.cursor -= 1;
            }
        }
        log::debug!(
            "history: recorded entry {} of {}",
            self.cursor + 1,
            self.entries.len()
        );
    }

    /// Step back one entry. `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward one entry. `None` at the newest entry.
    pub fn redo(&mut self) -> Option<Snapshot> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// The entry under the cursor.
    pub fn current(&self) -> &[Shape] {
        &self.entries[self.cursor]
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapes_core::model::ShapeKind;

    fn shapes(n: usize) -> Vec<Shape> {
        (0..n)
            .map(|i| Shape::create_default(ShapeKind::Square, i as f64 * 10.0, 0.0))
            .collect()
    }

    #[test]
    fn undo_and_redo_walk_the_log() {
        let s0 = shapes(0);
        let s1 = shapes(1);
        let s2 = shapes(2);
        let mut history = History::new(&s0, None);
        history.record(&s1);
        history.record(&s2);

        assert_eq!(history.undo(), Some(s1.clone()));
        assert_eq!(history.undo(), Some(s0.clone()));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some(s1));
        assert_eq!(history.redo(), Some(s2));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn record_after_undo_drops_redo_branch() {
        let mut history = History::new(&shapes(0), None);
        history.record(&shapes(1));
        history.undo();
        assert!(history.can_redo());

        let edited = shapes(3);
        history.record(&edited);
        assert!(!history.can_redo());
        assert_eq!(history.redo(), None);
        assert_eq!(history.current(), edited.as_slice());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn returned_snapshots_are_independent() {
        let s1 = shapes(1);
        let mut history = History::new(&[], None);
        history.record(&s1);
        history.record(&shapes(2));

        let mut undone = history.undo().unwrap();
        undone[0].x = 999.0;
        history.redo();
        assert_eq!(history.undo().unwrap(), s1);
    }

    #[test]
    fn capped_history_drops_oldest() {
        let mut history = History::new(&shapes(0), Some(3));
        for n in 1..=5 {
            history.record(&shapes(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.undo().map(|s| s.len()), Some(4));
        assert_eq!(history.undo().map(|s| s.len()), Some(3));
        assert_eq!(history.undo(), None);
    }
}
