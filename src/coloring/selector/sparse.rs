use super::CandidateSelector;
use crate::collections::{AddressableHeap, FibonacciHeap, IndexedBinaryHeap};
use crate::coloring::state::ColoringState;
use crate::graph::Graph;
use core::marker::PhantomData;

/// Heap key: (saturation, degree, vertex). The greatest key is colored first.
pub type SparseKey = (usize, usize, usize);

/// Priority-queue selector, generic over the heap discipline.
///
/// Keys are recomputed on every [`CandidateSelector::update`] and moved in
/// whichever direction they changed, so the selector is valid both for the
/// heuristic (keys only grow) and for the exact search (keys shrink again on
/// backtrack).
pub struct SparseSelector<H> {
    heap: H,
    _key: PhantomData<SparseKey>,
}

/// Sparse selector over an indexed binary heap.
pub type BinaryHeapSelector = SparseSelector<IndexedBinaryHeap<SparseKey>>;

/// Sparse selector over a Fibonacci heap.
pub type FibonacciHeapSelector = SparseSelector<FibonacciHeap<SparseKey>>;

#[inline]
fn key_of(v: usize, graph: &Graph, state: &ColoringState) -> SparseKey {
    (state.saturation().saturation(v), graph.degree(v), v)
}

impl<H: AddressableHeap<SparseKey>> SparseSelector<H> {
    /// Creates an empty selector.
    pub fn new() -> Self {
        Self {
            heap: H::with_ids(0),
            _key: PhantomData,
        }
    }

    /// Current key of `v`, if it is a candidate.
    pub fn key(&self, v: usize) -> Option<SparseKey> {
        self.heap.key(v).copied()
    }
}

impl<H: AddressableHeap<SparseKey>> Default for SparseSelector<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: AddressableHeap<SparseKey>> CandidateSelector for SparseSelector<H> {
    fn init(&mut self, vertex_count: usize) {
        self.heap = H::with_ids(vertex_count);
    }

    fn push(&mut self, v: usize, graph: &Graph, state: &ColoringState) {
        self.heap.push(v, key_of(v, graph, state));
    }

    fn pop(&mut self, _graph: &Graph, _state: &ColoringState) -> usize {
        match self.heap.pop() {
            Some((v, _)) => v,
            None => panic!("pop on an empty candidate selector"),
        }
    }

    fn update(&mut self, v: usize, graph: &Graph, state: &ColoringState) {
        let key = key_of(v, graph, state);
        match self.heap.key(v) {
            Some(&old) if old == key => {}
            Some(&old) if old < key => self.heap.increase_key(v, key),
            Some(_) => self.heap.change_key(v, key),
            None => {}
        }
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{drain, fill, state_with};
    use super::super::DenseSelector;
    use super::*;

    fn wheel() -> Graph {
        // hub 0 joined to the 5-cycle 1..=5
        let mut edges = vec![(1, 2), (2, 3), (3, 4), (4, 5), (5, 1)];
        edges.extend((1..=5).map(|v| (0, v)));
        Graph::from_edges(6, edges).unwrap()
    }

    fn check_matches_dense<S: CandidateSelector + Default>() {
        let graph = wheel();
        for assign in [&[][..], &[(0, 0)], &[(0, 0), (2, 1)], &[(1, 1), (3, 2)]] {
            let state = state_with(&graph, assign);
            let mut dense = DenseSelector::new();
            let mut sparse = S::default();
            fill(&mut dense, &graph, &state);
            fill(&mut sparse, &graph, &state);
            assert_eq!(drain(&mut sparse, &graph, &state), drain(&mut dense, &graph, &state));
        }
    }

    #[test]
    fn test_binary_heap_matches_dense() {
        check_matches_dense::<BinaryHeapSelector>();
    }

    #[test]
    fn test_fibonacci_heap_matches_dense() {
        check_matches_dense::<FibonacciHeapSelector>();
    }

    #[test]
    fn test_update_raises_priority() {
        let graph = wheel();
        let before = state_with(&graph, &[]);
        let mut selector = BinaryHeapSelector::new();
        fill(&mut selector, &graph, &before);
        assert_eq!(selector.key(1), Some((0, 3, 1)));

        // coloring 2 raises the saturation of 1 above every other candidate
        let after = state_with(&graph, &[(2, 0)]);
        selector.update(1, &graph, &after);
        assert_eq!(selector.key(1), Some((1, 3, 1)));
        assert_eq!(selector.pop(&graph, &after), 1);
    }

    #[test]
    fn test_update_lowers_priority_on_restore() {
        let graph = wheel();
        let marked = state_with(&graph, &[(2, 0)]);
        let mut selector = FibonacciHeapSelector::new();
        selector.init(6);
        for v in [0, 1, 3] {
            selector.push(v, &graph, &marked);
        }
        let restored = state_with(&graph, &[]);
        for v in [0, 1, 3] {
            selector.update(v, &graph, &restored);
        }
        // hub has the greatest degree once saturations are equal again
        assert_eq!(drain(&mut selector, &graph, &restored), vec![0, 3, 1]);
    }
}
