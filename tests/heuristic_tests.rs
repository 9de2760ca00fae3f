use chromatic::coloring::{
    dsatur, dsatur_with_limit, BinaryHeapSelector, DenseSelector, FibonacciHeapSelector, PassSelector, SewellSelector,
};
use chromatic::{solve, validate_coloring, Algorithm, Graph, Outcome, SolveOptions};

fn path(n: usize) -> Graph {
    Graph::from_edges(n, (1..n).map(|v| (v - 1, v))).unwrap()
}

fn cycle(n: usize) -> Graph {
    Graph::from_edges(n, (0..n).map(|v| (v, (v + 1) % n))).unwrap()
}

fn heuristics() -> impl Iterator<Item = Algorithm> {
    Algorithm::ALL.into_iter().filter(|a| !a.is_exact())
}

#[test]
fn test_path_uses_two_colors() {
    let graph = path(5);
    let coloring = dsatur(&graph, DenseSelector::new());
    assert_eq!(coloring.count(), 2);
    assert!(coloring.validate(&graph).is_ok());
    // colors alternate along the path
    for v in 1..5 {
        assert_ne!(coloring.color(v), coloring.color(v - 1));
    }
}

#[test]
fn test_odd_cycle_uses_three_colors() {
    let graph = cycle(5);
    for algorithm in heuristics() {
        assert_eq!(solve(&graph, algorithm, &SolveOptions::default()).color_count(), Some(3), "{algorithm}");
    }
}

#[test]
fn test_even_cycle_uses_two_colors() {
    let graph = cycle(8);
    for algorithm in heuristics() {
        assert_eq!(solve(&graph, algorithm, &SolveOptions::default()).color_count(), Some(2), "{algorithm}");
    }
}

#[test]
fn test_star_uses_two_colors() {
    let graph = Graph::from_edges(5, (1..5).map(|leaf| (0, leaf))).unwrap();
    let coloring = dsatur(&graph, SewellSelector::new());
    assert_eq!(coloring.count(), 2);
    // the centre has the highest degree and is colored first
    assert_eq!(coloring.color(0), 0);
}

#[test]
fn test_complete_graph_needs_every_color() {
    for k in 1..8 {
        let graph = Graph::from_edges(k, (0..k).flat_map(|u| (u + 1..k).map(move |v| (u, v)))).unwrap();
        let coloring = dsatur(&graph, PassSelector::new());
        assert_eq!(coloring.count(), k);
        let mut seen = coloring.colors().to_vec();
        seen.sort_unstable();
        assert_eq!(seen, (0..k).collect::<Vec<_>>());
    }
}

#[test]
fn test_edgeless_graph_uses_one_color() {
    let graph = Graph::empty(6);
    for algorithm in Algorithm::ALL {
        let coloring = solve(&graph, algorithm, &SolveOptions::default()).into_coloring().unwrap();
        assert_eq!(coloring.count(), 1, "{algorithm}");
        assert!(coloring.colors().iter().all(|&c| c == 0));
    }
}

#[test]
fn test_sparse_selectors_agree_with_dense_scan() {
    // wheel with a chord: enough ties to expose ordering differences
    let mut edges: Vec<(usize, usize)> = (1..8).map(|v| (0, v)).collect();
    edges.extend((1..8).map(|v| (v, v % 7 + 1)));
    edges.push((2, 5));
    let graph = Graph::from_edges(8, edges).unwrap();

    let dense = dsatur(&graph, DenseSelector::new());
    assert_eq!(dsatur(&graph, BinaryHeapSelector::new()), dense);
    assert_eq!(dsatur(&graph, FibonacciHeapSelector::new()), dense);
}

#[test]
fn test_heuristic_respects_degree_bound() {
    // crown graph: bipartite, every vertex of degree n - 1
    let n = 6;
    let mut edges = Vec::new();
    for i in 0..n {
        for j in 0..n {
            if i != j {
                edges.push((i, n + j));
            }
        }
    }
    let graph = Graph::from_edges(2 * n, edges).unwrap();
    for algorithm in heuristics() {
        let coloring = solve(&graph, algorithm, &SolveOptions::default()).into_coloring().unwrap();
        assert!(coloring.count() <= graph.max_degree() + 1, "{algorithm}");
        assert!(validate_coloring(&graph, coloring.colors()).is_ok());
    }
}

#[test]
fn test_always_true_limit_times_out() {
    let graph = cycle(7);
    let outcome = dsatur_with_limit(&graph, DenseSelector::new(), || true);
    assert_eq!(outcome, Outcome::TimedOut { incumbent: None });
    assert_eq!(outcome.color_count(), None);
}

#[test]
fn test_limit_tripping_midway_times_out() {
    let graph = cycle(9);
    let mut polls = 0;
    let outcome = dsatur_with_limit(&graph, FibonacciHeapSelector::new(), || {
        polls += 1;
        polls > 4
    });
    assert!(outcome.is_timed_out());
    assert_eq!(polls, 5);
}
