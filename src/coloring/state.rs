//! Mutable per-run coloring state shared by engines and selectors.

use super::saturation::SaturationTable;
use crate::graph::Graph;

/// Colored flags, assigned colors and saturation of a run in progress.
///
/// Engines own the state and mutate it; selectors only read it.
#[derive(Clone, Debug)]
pub struct ColoringState {
    colored: Vec<bool>,
    colors: Vec<usize>,
    saturation: SaturationTable,
    colors_in_use: usize,
}

impl ColoringState {
    /// Creates a fresh state with every vertex uncolored.
    pub fn new(graph: &Graph) -> Self {
        let n = graph.vertex_count();
        Self {
            colored: vec![false; n],
            colors: vec![0; n],
            saturation: SaturationTable::for_graph(graph),
            colors_in_use: 0,
        }
    }

    /// Number of vertices tracked.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.colored.len()
    }

    /// Returns `true` once `v` holds a color.
    #[inline]
    pub fn is_colored(&self, v: usize) -> bool {
        self.colored[v]
    }

    /// Color of `v`, if assigned.
    #[inline]
    pub fn color(&self, v: usize) -> Option<usize> {
        self.colored[v].then_some(self.colors[v])
    }

    /// Saturation bitmasks.
    #[inline]
    pub fn saturation(&self) -> &SaturationTable {
        &self.saturation
    }

    #[inline]
    pub(crate) fn saturation_mut(&mut self) -> &mut SaturationTable {
        &mut self.saturation
    }

    /// Number of distinct colors the current partial assignment may use
    /// without opening a new one.
    #[inline]
    pub fn colors_in_use(&self) -> usize {
        self.colors_in_use
    }

    #[inline]
    pub(crate) fn set_colors_in_use(&mut self, count: usize) {
        self.colors_in_use = count;
    }

    #[inline]
    pub(crate) fn commit(&mut self, v: usize, color: usize) {
        debug_assert!(!self.colored[v], "vertex {v} colored twice");
        self.colored[v] = true;
        self.colors[v] = color;
    }

    #[inline]
    pub(crate) fn uncommit(&mut self, v: usize) {
        self.colored[v] = false;
    }

    /// Snapshot of the assignment if every vertex is colored.
    pub fn complete_colors(&self) -> Option<Vec<usize>> {
        self.colored
            .iter()
            .all(|&c| c)
            .then(|| self.colors.clone())
    }
}
