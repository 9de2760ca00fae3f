//! Connected components.
//!
//! Components are independent coloring subproblems: the chromatic number of
//! a graph is the maximum over its components.

use super::Graph;

/// Splits the vertex set into connected components.
///
/// Components are listed in order of their smallest vertex; within a
/// component, vertices appear in depth-first discovery order.
pub fn connected_components(graph: &Graph) -> Vec<Vec<usize>> {
    let n = graph.vertex_count();
    let mut seen = vec![false; n];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for root in graph.vertices() {
        if seen[root] {
            continue;
        }
        seen[root] = true;
        stack.push(root);

        let mut component = Vec::new();
        while let Some(u) = stack.pop() {
            component.push(u);
            // Reverse push keeps discovery order close to the recursive DFS.
            for &v in graph.neighbors(u).iter().rev() {
                if !seen[v] {
                    seen[v] = true;
                    stack.push(v);
                }
            }
        }
        components.push(component);
    }

    components
}

/// Returns the subgraph induced by `vertices`, relabelled `0..vertices.len()`
/// in the given order.
///
/// # Panics
/// Panics if a vertex id is out of range or listed twice.
pub fn induced_subgraph(graph: &Graph, vertices: &[usize]) -> Graph {
    let mut local = vec![usize::MAX; graph.vertex_count()];
    for (i, &v) in vertices.iter().enumerate() {
        assert_eq!(local[v], usize::MAX, "vertex {v} listed twice");
        local[v] = i;
    }

    // Rows of a simple graph restricted to a vertex set stay symmetric and
    // loop-free, so they need no re-validation.
    let rows = vertices
        .iter()
        .map(|&v| {
            graph
                .neighbors(v)
                .iter()
                .map(|&u| local[u])
                .filter(|&j| j != usize::MAX)
                .collect()
        })
        .collect();
    Graph::from_symmetric_rows(rows)
}
