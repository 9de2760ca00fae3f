//! Candidate selectors: strategies that choose the next vertex to color.
//!
//! Every strategy orders candidates by descending saturation first and
//! differs only in how it breaks ties:
//! - [`DenseSelector`]: linear scan, then degree, then vertex index
//! - [`SparseSelector`]: addressable heap keyed by (saturation, degree, index)
//! - [`SewellSelector`]: overlap of admissible colors with tied neighbours
//! - [`PassSelector`]: Sewell near the color budget, degree elsewhere
//!
//! Selectors never mutate coloring state. Engines call [`CandidateSelector::update`]
//! whenever a vertex's saturation changes in either direction.

mod dense;
mod pass;
mod sewell;
mod sparse;

pub use dense::DenseSelector;
pub use pass::{PassSelector, PASS_THRESHOLD};
pub use sewell::SewellSelector;
pub use sparse::{BinaryHeapSelector, FibonacciHeapSelector, SparseKey, SparseSelector};

use super::state::ColoringState;
use crate::graph::Graph;

/// The four-operation contract shared by all vertex-selection strategies.
pub trait CandidateSelector {
    /// Prepares internal structures for vertices `0..vertex_count`,
    /// discarding any previous contents.
    fn init(&mut self, vertex_count: usize);

    /// Adds an uncolored vertex to the working set.
    fn push(&mut self, v: usize, graph: &Graph, state: &ColoringState);

    /// Removes and returns the vertex this strategy colors next.
    ///
    /// # Panics
    /// Panics if the working set is empty.
    fn pop(&mut self, graph: &Graph, state: &ColoringState) -> usize;

    /// Informs the selector that the ordering key of `v` may have changed.
    fn update(&mut self, _v: usize, _graph: &Graph, _state: &ColoringState) {}

    /// Number of vertices in the working set.
    fn len(&self) -> usize;

    /// Returns `true` if no candidate remains.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: CandidateSelector + ?Sized> CandidateSelector for Box<S> {
    fn init(&mut self, vertex_count: usize) {
        (**self).init(vertex_count);
    }

    fn push(&mut self, v: usize, graph: &Graph, state: &ColoringState) {
        (**self).push(v, graph, state);
    }

    fn pop(&mut self, graph: &Graph, state: &ColoringState) -> usize {
        (**self).pop(graph, state)
    }

    fn update(&mut self, v: usize, graph: &Graph, state: &ColoringState) {
        (**self).update(v, graph, state);
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Unordered working set with O(1) insertion and removal by slot.
#[derive(Clone, Debug, Default)]
pub(crate) struct Candidates {
    items: Vec<usize>,
}

impl Candidates {
    pub(crate) fn clear(&mut self, capacity: usize) {
        self.items.clear();
        self.items.reserve(capacity);
    }

    pub(crate) fn push(&mut self, v: usize) {
        debug_assert!(!self.items.contains(&v), "vertex {v} pushed twice");
        self.items.push(v);
    }

    pub(crate) fn take(&mut self, slot: usize) -> usize {
        self.items.swap_remove(slot)
    }

    pub(crate) fn as_slice(&self) -> &[usize] {
        &self.items
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Largest saturation among the candidates.
    ///
    /// # Panics
    /// Panics if empty.
    pub(crate) fn max_saturation(&self, state: &ColoringState) -> usize {
        let sat = state.saturation();
        match self.items.iter().map(|&v| sat.saturation(v)).max() {
            Some(max) => max,
            None => panic!("pop on an empty candidate selector"),
        }
    }

    /// Removes the tied candidate (saturation `max_sat`) maximising `metric`,
    /// breaking remaining ties by the highest vertex index.
    pub(crate) fn take_best_tied<F>(&mut self, state: &ColoringState, max_sat: usize, mut metric: F) -> usize
    where
        F: FnMut(usize) -> usize,
    {
        let sat = state.saturation();
        let mut best: Option<(usize, usize, usize)> = None;
        for (slot, &v) in self.items.iter().enumerate() {
            if sat.saturation(v) != max_sat {
                continue;
            }
            let key = (metric(v), v);
            if best.map_or(true, |(_, k, w)| key > (k, w)) {
                best = Some((slot, key.0, key.1));
            }
        }
        match best {
            Some((slot, _, _)) => self.take(slot),
            None => panic!("pop on an empty candidate selector"),
        }
    }
}

/// Sum of colors admissible for both `v` and each uncolored neighbour of `v`
/// whose saturation is `max_sat`, counting only colors below `limit`.
pub(crate) fn tied_overlap(v: usize, graph: &Graph, state: &ColoringState, max_sat: usize, limit: usize) -> usize {
    let sat = state.saturation();
    graph
        .neighbors(v)
        .iter()
        .filter(|&&u| !state.is_colored(u) && sat.saturation(u) == max_sat)
        .map(|&u| sat.common_admissible(v, u, limit))
        .sum()
}

/// Colors a vertex may take without exceeding the current budget by more
/// than one new color.
#[inline]
pub(crate) fn branch_limit(state: &ColoringState) -> usize {
    state.colors_in_use() + 1
}
