//! Result types returned by the coloring engines.

use crate::error::{Error, Result};
use crate::graph::Graph;
use serde::Serialize;

/// A complete vertex coloring.
///
/// Colors are `0..count()`; `count()` is the number of distinct colors used
/// (0 for the empty graph).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Coloring {
    colors: Vec<usize>,
    count: usize,
}

impl Coloring {
    /// Wraps a vertex → color assignment.
    pub fn new(colors: Vec<usize>) -> Self {
        let count = colors.iter().max().map_or(0, |&c| c + 1);
        Self { colors, count }
    }

    /// Number of colors used.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Color of every vertex, indexed by vertex id.
    #[inline]
    pub fn colors(&self) -> &[usize] {
        &self.colors
    }

    /// Color of `v`.
    #[inline]
    pub fn color(&self, v: usize) -> usize {
        self.colors[v]
    }

    /// Consumes the coloring, returning the assignment.
    pub fn into_colors(self) -> Vec<usize> {
        self.colors
    }

    /// Vertices grouped by color.
    pub fn classes(&self) -> Vec<Vec<usize>> {
        let mut classes = vec![Vec::new(); self.count];
        for (v, &c) in self.colors.iter().enumerate() {
            classes[c].push(v);
        }
        classes
    }

    /// Checks that no edge of `graph` joins two equal colors.
    pub fn validate(&self, graph: &Graph) -> Result<()> {
        validate_coloring(graph, &self.colors)
    }
}

/// Checks that `colors` is a proper coloring of `graph`.
///
/// # Panics
/// Panics if `colors.len()` differs from the vertex count.
pub fn validate_coloring(graph: &Graph, colors: &[usize]) -> Result<()> {
    assert_eq!(
        colors.len(),
        graph.vertex_count(),
        "coloring covers {} vertices, graph has {}",
        colors.len(),
        graph.vertex_count()
    );
    for (u, v) in graph.edges() {
        if colors[u] == colors[v] {
            return Err(Error::InvalidColoring {
                vertex: u,
                neighbour: v,
            });
        }
    }
    Ok(())
}

/// What a solve produced.
///
/// A time-out is never a color count: the best coloring known at the time
/// travels separately in `incumbent` and may be far from optimal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The engine ran to completion.
    Colored(Coloring),
    /// The time limit tripped first.
    TimedOut {
        /// Best complete coloring found before the limit, if any.
        incumbent: Option<Coloring>,
    },
}

impl Outcome {
    /// The finished coloring, or `None` on time-out.
    pub fn coloring(&self) -> Option<&Coloring> {
        match self {
            Outcome::Colored(c) => Some(c),
            Outcome::TimedOut { .. } => None,
        }
    }

    /// Consumes the outcome, returning the finished coloring.
    pub fn into_coloring(self) -> Option<Coloring> {
        match self {
            Outcome::Colored(c) => Some(c),
            Outcome::TimedOut { .. } => None,
        }
    }

    /// Number of colors of a finished run.
    pub fn color_count(&self) -> Option<usize> {
        self.coloring().map(Coloring::count)
    }

    /// Returns `true` for [`Outcome::TimedOut`].
    pub fn is_timed_out(&self) -> bool {
        matches!(self, Outcome::TimedOut { .. })
    }
}
