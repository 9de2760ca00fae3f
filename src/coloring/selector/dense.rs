use super::{CandidateSelector, Candidates};
use crate::coloring::state::ColoringState;
use crate::graph::Graph;

/// Linear-scan selector.
///
/// Every pop scans the whole working set for the greatest
/// (saturation, degree, index) key, so no bookkeeping is needed on update.
/// Cheapest per update and best for small or dense graphs.
#[derive(Clone, Debug, Default)]
pub struct DenseSelector {
    candidates: Candidates,
}

impl DenseSelector {
    /// Creates an empty selector.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CandidateSelector for DenseSelector {
    fn init(&mut self, vertex_count: usize) {
        self.candidates.clear(vertex_count);
    }

    fn push(&mut self, v: usize, _graph: &Graph, _state: &ColoringState) {
        self.candidates.push(v);
    }

    fn pop(&mut self, graph: &Graph, state: &ColoringState) -> usize {
        let sat = state.saturation();
        let best = self
            .candidates
            .as_slice()
            .iter()
            .enumerate()
            .max_by_key(|&(_, &v)| (sat.saturation(v), graph.degree(v), v))
            .map(|(slot, _)| slot);
        match best {
            Some(slot) => self.candidates.take(slot),
            None => panic!("pop on an empty candidate selector"),
        }
    }

    fn len(&self) -> usize {
        self.candidates.len()
    }
}
