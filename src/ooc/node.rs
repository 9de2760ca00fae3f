//! Fixed-layout vertex records for the out-of-core coloring path.

use core::cmp::Reverse;

/// Neighbour capacity used when callers do not pick one.
pub const DEFAULT_NEIGHBOUR_CAPACITY: usize = 16;

/// Heap key of a node: more saturated first, then higher degree, then the
/// lower vertex id.
pub type NodeKey = (u8, u8, Reverse<u32>);

/// One vertex with its adjacency stored inline.
///
/// `CAP` bounds the degree. Because saturation never exceeds the degree,
/// every color DSatur assigns is `<= CAP`, so the forbidden colors fit in a
/// single `u64` as long as `CAP < 64`; this is checked at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node<const CAP: usize> {
    vertex: u32,
    degree: u8,
    color: u8,
    used: bool,
    saturation: u64,
    neighbours: [u32; CAP],
}

impl<const CAP: usize> Node<CAP> {
    const CAPACITY_FITS_MASK: () = assert!(CAP < 64, "neighbour capacity must be below 64");

    /// An isolated, uncolored vertex 0.
    pub const fn empty() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_FITS_MASK;
        Self {
            vertex: 0,
            degree: 0,
            color: 0,
            used: false,
            saturation: 0,
            neighbours: [0; CAP],
        }
    }

    /// An uncolored vertex with the given adjacency.
    ///
    /// # Panics
    /// Panics if `neighbours.len() > CAP`.
    pub fn new(vertex: u32, neighbours: &[u32]) -> Self {
        assert!(neighbours.len() <= CAP, "degree {} exceeds capacity {CAP}", neighbours.len());
        let mut node = Self::empty();
        node.vertex = vertex;
        // CAP < 64, so the degree fits
        node.degree = neighbours.len() as u8;
        node.neighbours[..neighbours.len()].copy_from_slice(neighbours);
        node
    }

    /// Vertex id.
    #[inline]
    pub fn vertex(&self) -> u32 {
        self.vertex
    }

    /// Number of neighbours.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree as usize
    }

    /// Neighbour ids.
    #[inline]
    pub fn neighbours(&self) -> &[u32] {
        &self.neighbours[..self.degree as usize]
    }

    /// Assigned color, if any.
    #[inline]
    pub fn color(&self) -> Option<u8> {
        self.used.then_some(self.color)
    }

    /// Returns `true` once colored.
    #[inline]
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Number of distinct colors among colored neighbours.
    #[inline]
    pub fn saturation(&self) -> u8 {
        self.saturation.count_ones() as u8
    }

    /// Smallest color no colored neighbour holds.
    #[inline]
    pub fn mex(&self) -> u8 {
        self.saturation.trailing_ones() as u8
    }

    /// Priority of this node in the coloring heap.
    #[inline]
    pub fn key(&self) -> NodeKey {
        (self.saturation(), self.degree, Reverse(self.vertex))
    }

    /// Forbids `color`; returns `true` if it was newly forbidden.
    #[inline]
    pub(crate) fn mark(&mut self, color: u8) -> bool {
        let bit = 1u64 << color;
        let fresh = self.saturation & bit == 0;
        self.saturation |= bit;
        fresh
    }

    #[inline]
    pub(crate) fn assign(&mut self, color: u8) {
        self.color = color;
        self.used = true;
    }
}
