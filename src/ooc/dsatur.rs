//! DSatur over the out-of-core node table.
//!
//! Loading and heap construction run in parallel; the coloring loop is
//! sequential because every step depends on the previous one; validation is
//! a parallel read-only scan that stops at the first conflict.

use super::adaptor::GraphAdaptor;
use super::load::{load_nodes, LoadOptions};
use super::node::{Node, NodeKey};
use super::progress::{Phase, Progress, PROGRESS_BATCH};
use crate::collections::{AddressableHeap, FibonacciHeap};
use crate::error::{Error, Result};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// Summary of an out-of-core run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OocReport {
    /// Number of colors used.
    pub colors: usize,
    /// Vertices colored.
    pub vertex_count: usize,
    /// Undirected edges according to the header.
    pub edge_count: u64,
    #[serde(skip)]
    assignment: Vec<u8>,
}

impl OocReport {
    /// Color of every vertex, indexed by vertex id.
    pub fn colors_of(&self) -> &[u8] {
        &self.assignment
    }
}

/// Runs DSatur over the graph behind `adaptor` with neighbour capacity `CAP`.
///
/// Fails before coloring on malformed input or a degree above `CAP`, and
/// after coloring with [`Error::InvalidColoring`] if validation finds a
/// conflict (possible only for asymmetric adjacency in the file).
pub fn color<const CAP: usize, B, P>(adaptor: &GraphAdaptor<B>, options: &LoadOptions, progress: &P) -> Result<OocReport>
where
    B: AsRef<[u8]> + Sync,
    P: Progress + ?Sized,
{
    let n = adaptor.vertex_count();
    let total = n as u64;
    let mut nodes = load_nodes::<CAP, B, P>(adaptor, options, progress)?;

    let mut heap: FibonacciHeap<NodeKey> = FibonacciHeap::par_from_fn(n, options.chunk_size, |v| nodes[v].key());
    progress.advance(Phase::Heap, total, total);
    debug!(vertices = n, "built coloring heap");

    let mut colors = 0usize;
    let mut pending = 0u64;
    while let Some((v, _)) = heap.pop() {
        let node = &mut nodes[v];
        let color = node.mex();
        node.assign(color);
        colors = colors.max(usize::from(color) + 1);

        let neighbours = *node;
        for &u in neighbours.neighbours() {
            let neighbour = &mut nodes[u as usize];
            if !neighbour.is_used() && neighbour.mark(color) {
                heap.increase_key(u as usize, neighbour.key());
            }
        }

        pending += 1;
        if pending == PROGRESS_BATCH {
            progress.advance(Phase::Color, pending, total);
            pending = 0;
        }
    }
    progress.advance(Phase::Color, pending, total);

    validate(&nodes, progress)?;
    info!(vertices = n, colors, "out-of-core coloring finished");
    Ok(OocReport {
        colors,
        vertex_count: n,
        edge_count: adaptor.edge_count(),
        assignment: nodes.iter().map(|node| node.color().unwrap_or(0)).collect(),
    })
}

/// Checks in parallel that no stored adjacency joins two equal colors.
pub fn validate<const CAP: usize, P: Progress + ?Sized>(nodes: &[Node<CAP>], progress: &P) -> Result<()> {
    let total = nodes.len() as u64;
    let conflict = nodes.par_chunks(PROGRESS_BATCH as usize).find_map_any(|chunk| {
        let found = chunk.iter().find_map(|node| {
            node.neighbours()
                .iter()
                .find(|&&u| nodes[u as usize].color() == node.color())
                .map(|&u| (node.vertex() as usize, u as usize))
        });
        progress.advance(Phase::Validate, chunk.len() as u64, total);
        found
    });
    match conflict {
        Some((vertex, neighbour)) => Err(Error::InvalidColoring { vertex, neighbour }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::ooc::node::DEFAULT_NEIGHBOUR_CAPACITY;
    use crate::ooc::progress::NoProgress;
    use crate::ooc::writer::{write_graph, write_king_grid};

    fn adaptor(graph: &Graph) -> GraphAdaptor<Vec<u8>> {
        let mut bytes = Vec::new();
        write_graph(graph, &mut bytes).unwrap();
        GraphAdaptor::from_bytes(bytes).unwrap()
    }

    #[test]
    fn test_odd_cycle() {
        let graph = Graph::from_edges(5, (0..5).map(|v| (v, (v + 1) % 5))).unwrap();
        let report = color::<DEFAULT_NEIGHBOUR_CAPACITY, _, _>(&adaptor(&graph), &LoadOptions::default(), &NoProgress).unwrap();
        assert_eq!(report.colors, 3);
        assert_eq!(report.edge_count, 5);
        let colors: Vec<usize> = report.colors_of().iter().map(|&c| usize::from(c)).collect();
        assert!(crate::coloring::validate_coloring(&graph, &colors).is_ok());
    }

    #[test]
    fn test_king_grid_uses_four_colors() {
        let mut bytes = Vec::new();
        write_king_grid(20, 15, &mut bytes).unwrap();
        let adaptor = GraphAdaptor::from_bytes(bytes).unwrap();
        let report = color::<8, _, _>(&adaptor, &LoadOptions { chunk_size: 7 }, &NoProgress).unwrap();
        assert_eq!(report.vertex_count, 300);
        assert!(report.colors >= 4);
        assert!(report.colors <= 9);
    }

    #[test]
    fn test_validation_catches_one_sided_edge() {
        // 0 lists 1 but 1 does not list 0, so 1 never learns 0's color
        let mut nodes = vec![Node::<4>::new(0, &[1]), Node::<4>::new(1, &[])];
        nodes[0].assign(0);
        nodes[1].assign(0);
        assert!(matches!(
            validate(&nodes, &NoProgress),
            Err(Error::InvalidColoring { vertex: 0, neighbour: 1 })
        ));
    }

    #[test]
    fn test_empty_graph() {
        let report = color::<4, _, _>(&adaptor(&Graph::empty(0)), &LoadOptions::default(), &NoProgress).unwrap();
        assert_eq!(report.colors, 0);
        assert!(report.colors_of().is_empty());
    }
}
