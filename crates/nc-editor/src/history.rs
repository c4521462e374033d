//! Snapshot history.
//!
//! The log holds whole [`Scene`] values and a cursor into them. A commit
//! appends a snapshot after the cursor (dropping anything that was undone),
//! undo and redo only move the cursor. The log is never empty: it starts
//! with the empty scene.
//!
//! Committing a scene equal to the one under the cursor is a no-op, so
//! interactions that end where they began (a click without movement on an
//! already-raised image, a zero-length drag) leave no entry behind.

use nc_core::model::Scene;

/// Linear, branch-on-edit log of scene snapshots.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Scene>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: vec![Scene::new()],
            cursor: 0,
        }
    }

    /// Append `candidate` after the cursor unless it equals the current
    /// snapshot. Returns whether an entry was appended.
    pub fn commit(&mut self, candidate: Scene) -> bool {
        if candidate == self.entries[self.cursor] {
            return false;
        }
        let dropped = self.entries.len() - self.cursor - 1;
        self.entries.truncate(self.cursor + 1);
        self.entries.push(candidate);
        self.cursor += 1;
        log::debug!(
            "COMMIT #{} ({} images, {} redo entries dropped)",
            self.cursor,
            self.entries[self.cursor].len(),
            dropped
        );
        true
    }

    /// Step back one snapshot. Does nothing at the start of history.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        log::debug!("UNDO → #{}", self.cursor);
        true
    }

    /// Step forward one snapshot. Does nothing at the tail.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        log::debug!("REDO → #{}", self.cursor);
        true
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> &Scene {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots in the log, including the initial empty scene.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the log keeps at least the initial scene.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}
