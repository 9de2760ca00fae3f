//! Single-pass DSatur coloring.

use super::outcome::{Coloring, Outcome};
use super::selector::CandidateSelector;
use super::state::ColoringState;
use crate::graph::Graph;
use tracing::debug;

/// Colors `graph` greedily in the order chosen by `selector`.
///
/// Each popped vertex receives the smallest color none of its colored
/// neighbours holds; the new color is then pushed eagerly into the
/// saturation of every uncolored neighbour.
pub fn dsatur<S: CandidateSelector>(graph: &Graph, selector: S) -> Coloring {
    match dsatur_with_limit(graph, selector, || false) {
        Outcome::Colored(coloring) => coloring,
        Outcome::TimedOut { .. } => unreachable!("time limit never trips"),
    }
}

/// [`dsatur`] with a time-limit predicate polled before every pop.
///
/// Returns [`Outcome::TimedOut`] without an incumbent if the predicate trips:
/// a partial greedy coloring is not a coloring.
pub fn dsatur_with_limit<S, F>(graph: &Graph, mut selector: S, mut time_limit: F) -> Outcome
where
    S: CandidateSelector,
    F: FnMut() -> bool,
{
    let n = graph.vertex_count();
    let mut state = ColoringState::new(graph);
    selector.init(n);
    for v in graph.vertices() {
        selector.push(v, graph, &state);
    }

    for step in 0..n {
        if time_limit() {
            debug!(colored = step, vertices = n, "heuristic hit time limit");
            return Outcome::TimedOut { incumbent: None };
        }
        let v = selector.pop(graph, &state);
        let color = state.saturation().mex(v);
        state.commit(v, color);
        if color >= state.colors_in_use() {
            state.set_colors_in_use(color + 1);
        }
        for &u in graph.neighbors(v) {
            if !state.is_colored(u) && state.saturation_mut().mark(u, color) {
                selector.update(u, graph, &state);
            }
        }
    }

    debug!(colors = state.colors_in_use(), vertices = n, "heuristic finished");
    match state.complete_colors() {
        Some(colors) => Outcome::Colored(Coloring::new(colors)),
        None => unreachable!("every vertex is popped exactly once"),
    }
}
