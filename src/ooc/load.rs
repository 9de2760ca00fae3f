//! Parallel population of the node table.

use super::adaptor::GraphAdaptor;
use super::node::Node;
use super::progress::{Phase, Progress};
use crate::error::{Error, Result};
use rayon::prelude::*;
use tracing::debug;

/// Knobs for loading a binary graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Vertices per rayon work item.
    pub chunk_size: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { chunk_size: 4096 }
    }
}

/// Reads every record of `adaptor` into a contiguous node table.
///
/// The vertex range is split into chunks of `options.chunk_size`; each
/// worker owns a disjoint slice of the table. Fails with
/// [`Error::DegreeOverCapacity`] if any degree exceeds `CAP`, and with the
/// usual input errors for out-of-range ids or self-loops.
///
/// # Panics
/// Panics if `options.chunk_size == 0`.
pub fn load_nodes<const CAP: usize, B, P>(
    adaptor: &GraphAdaptor<B>,
    options: &LoadOptions,
    progress: &P,
) -> Result<Vec<Node<CAP>>>
where
    B: AsRef<[u8]> + Sync,
    P: Progress + ?Sized,
{
    assert!(options.chunk_size != 0, "chunk_size must be > 0");
    let n = adaptor.vertex_count();
    let total = n as u64;
    let mut nodes = vec![Node::<CAP>::empty(); n];

    nodes
        .par_chunks_mut(options.chunk_size)
        .enumerate()
        .try_for_each(|(chunk, slice)| -> Result<()> {
            let base = chunk * options.chunk_size;
            let mut buf = [0u32; CAP];
            for (offset, node) in slice.iter_mut().enumerate() {
                let v = base + offset;
                let ids = adaptor.checked_neighbours(v)?;
                let degree = ids.len();
                if degree > CAP {
                    return Err(Error::DegreeOverCapacity {
                        vertex: v,
                        degree,
                        capacity: CAP,
                    });
                }
                for (slot, u) in buf.iter_mut().zip(ids) {
                    // checked_neighbours bounds every id by the u32 vertex count
                    *slot = u as u32;
                }
                *node = Node::new(v as u32, &buf[..degree]);
            }
            progress.advance(Phase::Load, slice.len() as u64, total);
            Ok(())
        })?;

    debug!(vertices = n, capacity = CAP, "loaded node table");
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::ooc::progress::{LogProgress, NoProgress};
    use crate::ooc::writer::write_graph;

    fn adaptor(graph: &Graph) -> GraphAdaptor<Vec<u8>> {
        let mut bytes = Vec::new();
        write_graph(graph, &mut bytes).unwrap();
        GraphAdaptor::from_bytes(bytes).unwrap()
    }

    #[test]
    fn test_load_small_chunks() {
        let graph = Graph::from_edges(10, (0..9).map(|v| (v, v + 1))).unwrap();
        let progress = LogProgress::new();
        let nodes = load_nodes::<4, _, _>(&adaptor(&graph), &LoadOptions { chunk_size: 3 }, &progress).unwrap();
        assert_eq!(nodes.len(), 10);
        for (v, node) in nodes.iter().enumerate() {
            assert_eq!(node.vertex() as usize, v);
            let ids: Vec<usize> = node.neighbours().iter().map(|&u| u as usize).collect();
            assert_eq!(ids, graph.neighbors(v));
        }
        assert_eq!(progress.completed(Phase::Load), 10);
    }

    #[test]
    fn test_degree_over_capacity() {
        let star = Graph::from_edges(6, (1..6).map(|v| (0, v))).unwrap();
        let err = load_nodes::<4, _, _>(&adaptor(&star), &LoadOptions::default(), &NoProgress).unwrap_err();
        assert!(matches!(
            err,
            Error::DegreeOverCapacity {
                vertex: 0,
                degree: 5,
                capacity: 4
            }
        ));
        assert!(err.is_unsupported_instance());
    }
}
