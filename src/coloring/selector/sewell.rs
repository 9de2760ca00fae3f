use super::{branch_limit, tied_overlap, CandidateSelector, Candidates};
use crate::coloring::state::ColoringState;
use crate::graph::Graph;

/// Sewell's tie-breaking rule.
///
/// Among the candidates of maximum saturation, prefers the vertex whose
/// admissible colors overlap most with those of its equally saturated
/// uncolored neighbours: coloring it removes the most options from the
/// vertices that are already closest to running out. Colors are counted up
/// to one past the colors currently in use. Remaining ties go to the highest
/// vertex index.
#[derive(Clone, Debug, Default)]
pub struct SewellSelector {
    candidates: Candidates,
}

impl SewellSelector {
    /// Creates an empty selector.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CandidateSelector for SewellSelector {
    fn init(&mut self, vertex_count: usize) {
        self.candidates.clear(vertex_count);
    }

    fn push(&mut self, v: usize, _graph: &Graph, _state: &ColoringState) {
        self.candidates.push(v);
    }

    fn pop(&mut self, graph: &Graph, state: &ColoringState) -> usize {
        let max_sat = self.candidates.max_saturation(state);
        let limit = branch_limit(state);
        self.candidates
            .take_best_tied(state, max_sat, |v| tied_overlap(v, graph, state, max_sat, limit))
    }

    fn len(&self) -> usize {
        self.candidates.len()
    }
}
