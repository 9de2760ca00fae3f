use super::{branch_limit, tied_overlap, CandidateSelector, Candidates};
use crate::coloring::state::ColoringState;
use crate::graph::Graph;

/// Largest gap between the colors in use and the maximum saturation for
/// which [`PassSelector`] still pays for the overlap metric.
pub const PASS_THRESHOLD: usize = 2;

/// Hybrid selector.
///
/// While `colors_in_use - max_saturation <= PASS_THRESHOLD`, the tied
/// candidates are ranked by the Sewell overlap metric. Otherwise the cheaper
/// degree rule applies. Remaining ties go to the highest vertex index.
#[derive(Clone, Debug, Default)]
pub struct PassSelector {
    candidates: Candidates,
}

impl PassSelector {
    /// Creates an empty selector.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CandidateSelector for PassSelector {
    fn init(&mut self, vertex_count: usize) {
        self.candidates.clear(vertex_count);
    }

    fn push(&mut self, v: usize, _graph: &Graph, _state: &ColoringState) {
        self.candidates.push(v);
    }

    fn pop(&mut self, graph: &Graph, state: &ColoringState) -> usize {
        let max_sat = self.candidates.max_saturation(state);
        let gap = state.colors_in_use().saturating_sub(max_sat);
        if gap <= PASS_THRESHOLD {
            let limit = branch_limit(state);
            self.candidates
                .take_best_tied(state, max_sat, |v| tied_overlap(v, graph, state, max_sat, limit))
        } else {
            self.candidates.take_best_tied(state, max_sat, |v| graph.degree(v))
        }
    }

    fn len(&self) -> usize {
        self.candidates.len()
    }
}
