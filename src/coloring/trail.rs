//! Undo trail for saturation rows.
//!
//! Before the exact search mutates a neighbour's saturation row it saves the
//! previous words here. Rewinding to a checkpoint restores rows in reverse
//! order, so nested assignments unwind exactly.

use super::saturation::SaturationTable;

/// A stack of saved saturation rows.
#[derive(Debug)]
pub(crate) struct Trail {
    stride: usize,
    /// Vertex whose row was saved, one per entry
    vertices: Vec<usize>,
    /// Saved words, `stride` per entry
    words: Vec<u64>,
}

impl Trail {
    pub(crate) fn new(stride: usize) -> Self {
        Self {
            stride,
            vertices: Vec::new(),
            words: Vec::new(),
        }
    }

    /// Current position, to be passed to [`Trail::undo_one`] later.
    #[inline]
    pub(crate) fn checkpoint(&self) -> usize {
        self.vertices.len()
    }

    /// Records the current row of `v` before it is modified.
    #[inline]
    pub(crate) fn save(&mut self, v: usize, table: &SaturationTable) {
        debug_assert_eq!(table.stride(), self.stride);
        self.vertices.push(v);
        self.words.extend_from_slice(table.row(v));
    }

    /// Restores the most recent entry above `checkpoint` and returns its
    /// vertex, or `None` once the trail is back at `checkpoint`.
    #[inline]
    pub(crate) fn undo_one(&mut self, checkpoint: usize, table: &mut SaturationTable) -> Option<usize> {
        if self.vertices.len() <= checkpoint {
            return None;
        }
        let v = self.vertices.pop()?;
        let start = self.words.len() - self.stride;
        table.restore(v, &self.words[start..]);
        self.words.truncate(start);
        Some(v)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.vertices.len()
    }
}
