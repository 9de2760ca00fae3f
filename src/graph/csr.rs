//! A compact, immutable undirected graph in CSR (compressed sparse row) form.
//!
//! Layout:
//! - `offsets`: `Vec<usize>` of length `n + 1`
//! - `edges`: contiguous neighbour ids, each undirected edge stored in both rows
//!
//! Topology never changes once built; all per-solve coloring state lives in
//! separate arenas indexed by vertex id (see [`crate::coloring::ColoringState`]).

use crate::error::{Error, Result};

/// An undirected simple graph on vertices `0..n`.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `neighbors` | \(O(1)\) | Returns a slice of the row |
/// | `degree` | \(O(1)\) | Row length |
/// | `has_edge` | \(O(\log \deg)\) | Rows are sorted |
/// | `max_degree` | \(O(1)\) | Cached at build time |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    offsets: Vec<usize>,
    edges: Vec<usize>,
    max_degree: usize,
}

impl Graph {
    /// Creates a graph with `vertex_count` vertices and no edges.
    pub fn empty(vertex_count: usize) -> Self {
        Self {
            offsets: vec![0; vertex_count + 1],
            edges: Vec::new(),
            max_degree: 0,
        }
    }

    /// Builds a graph from an edge list.
    ///
    /// Duplicate edges (in either orientation) are merged.
    ///
    /// # Errors
    /// Returns [`Error::VertexOutOfRange`] or [`Error::SelfLoop`] for
    /// inconsistent input.
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut builder = GraphBuilder::new(vertex_count);
        for (u, v) in edges {
            builder.add_edge(u, v)?;
        }
        Ok(builder.build())
    }

    /// Builds a graph from symmetric adjacency lists.
    ///
    /// Every `v` in `adjacency[u]` also yields the edge `v -> u`, so the
    /// lists need not be symmetric on input.
    ///
    /// # Errors
    /// Same as [`Graph::from_edges`].
    pub fn from_adjacency(adjacency: &[Vec<usize>]) -> Result<Self> {
        let mut builder = GraphBuilder::new(adjacency.len());
        for (u, nbrs) in adjacency.iter().enumerate() {
            for &v in nbrs {
                builder.add_edge(u, v)?;
            }
        }
        Ok(builder.build())
    }

    /// Builds a graph from rows that are already in range, symmetric and
    /// free of self-loops. Rows are sorted and deduplicated here.
    pub(crate) fn from_symmetric_rows(adjacency: Vec<Vec<usize>>) -> Self {
        debug_assert!(adjacency
            .iter()
            .enumerate()
            .all(|(u, row)| row.iter().all(|&v| v < adjacency.len() && v != u && adjacency[v].contains(&u))));
        GraphBuilder { adjacency }.build()
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Returns `true` when the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Sorted neighbours of `v`.
    ///
    /// # Panics
    /// Panics if `v >= vertex_count()`.
    #[inline]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.edges[self.offsets[v]..self.offsets[v + 1]]
    }

    /// Degree of `v`.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.offsets[v + 1] - self.offsets[v]
    }

    /// Largest vertex degree (0 for an edgeless graph).
    #[inline]
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Checks whether `u` and `v` are adjacent.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        u < self.vertex_count() && v < self.vertex_count() && self.neighbors(u).binary_search(&v).is_ok()
    }

    /// Iterates over vertex ids.
    pub fn vertices(&self) -> core::ops::Range<usize> {
        0..self.vertex_count()
    }

    /// Iterates over each undirected edge once, as `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.vertices().flat_map(move |u| {
            self.neighbors(u)
                .iter()
                .copied()
                .filter(move |&v| u < v)
                .map(move |v| (u, v))
        })
    }
}

/// Incremental, validating builder for [`Graph`].
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    adjacency: Vec<Vec<usize>>,
}

impl GraphBuilder {
    /// Starts a builder for `vertex_count` vertices.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    /// Number of vertices the graph will have.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Adds the undirected edge `{u, v}`.
    ///
    /// # Errors
    /// [`Error::VertexOutOfRange`] if an endpoint does not exist,
    /// [`Error::SelfLoop`] if `u == v`.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<&mut Self> {
        let n = self.adjacency.len();
        for vertex in [u, v] {
            if vertex >= n {
                return Err(Error::VertexOutOfRange {
                    vertex,
                    vertex_count: n,
                });
            }
        }
        if u == v {
            return Err(Error::SelfLoop(u));
        }
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
        Ok(self)
    }

    /// Freezes the builder into a CSR graph, merging duplicate edges.
    pub fn build(self) -> Graph {
        let n = self.adjacency.len();
        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0);
        let mut edges = Vec::with_capacity(self.adjacency.iter().map(Vec::len).sum());
        let mut max_degree = 0;

        for mut row in self.adjacency {
            row.sort_unstable();
            row.dedup();
            max_degree = max_degree.max(row.len());
            edges.extend_from_slice(&row);
            offsets.push(edges.len());
        }

        Graph {
            offsets,
            edges,
            max_degree,
        }
    }
}
