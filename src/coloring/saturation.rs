//! Per-vertex saturation bitmasks.
//!
//! Bit `c` of a vertex's row is set iff some already-colored neighbour holds
//! color `c`. All rows live in one contiguous `u64` arena with a fixed stride,
//! so the table supports arbitrarily many colors without a heap allocation
//! per vertex.
//!
//! The width of a row is a capacity invariant, not a truncation: marking a
//! color at or beyond [`SaturationTable::width`] panics. Sizing the table for
//! a graph with [`SaturationTable::for_graph`] uses `max_degree + 1`, which is
//! an upper bound on every color a DSatur-family search assigns.

use crate::graph::Graph;

const WORD_BITS: usize = u64::BITS as usize;

/// Saturation bitmasks for every vertex of a graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaturationTable {
    width: usize,
    stride: usize,
    words: Vec<u64>,
}

/// Mask selecting the colors `< limit` inside word `word`.
#[inline]
fn limit_mask(word: usize, limit: usize) -> u64 {
    let lo = word * WORD_BITS;
    if limit <= lo {
        0
    } else if limit - lo >= WORD_BITS {
        !0
    } else {
        (1u64 << (limit - lo)) - 1
    }
}

impl SaturationTable {
    /// Creates an all-clear table for `vertex_count` vertices and colors
    /// `0..width`.
    pub fn new(vertex_count: usize, width: usize) -> Self {
        let stride = width.div_ceil(WORD_BITS).max(1);
        Self {
            width,
            stride,
            words: vec![0; vertex_count * stride],
        }
    }

    /// Creates a table wide enough for any DSatur coloring of `graph`.
    pub fn for_graph(graph: &Graph) -> Self {
        Self::new(graph.vertex_count(), graph.max_degree() + 1)
    }

    /// Number of representable colors.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of `u64` words per vertex.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw bitmask words of `v`.
    #[inline]
    pub fn row(&self, v: usize) -> &[u64] {
        &self.words[v * self.stride..(v + 1) * self.stride]
    }

    #[inline]
    fn row_mut(&mut self, v: usize) -> &mut [u64] {
        &mut self.words[v * self.stride..(v + 1) * self.stride]
    }

    /// Forbids `color` for `v`. Returns `true` if the bit was previously clear.
    ///
    /// # Panics
    /// Panics if `color >= width()`.
    #[inline]
    pub fn mark(&mut self, v: usize, color: usize) -> bool {
        assert!(
            color < self.width,
            "color {color} exceeds saturation width {}",
            self.width
        );
        let mask = 1u64 << (color % WORD_BITS);
        let word = &mut self.row_mut(v)[color / WORD_BITS];
        let fresh = *word & mask == 0;
        *word |= mask;
        fresh
    }

    /// Returns `true` if `color` is forbidden for `v`.
    #[inline]
    pub fn is_forbidden(&self, v: usize, color: usize) -> bool {
        color < self.width && self.row(v)[color / WORD_BITS] & (1u64 << (color % WORD_BITS)) != 0
    }

    /// Saturation degree: number of distinct forbidden colors.
    #[inline]
    pub fn saturation(&self, v: usize) -> usize {
        self.row(v).iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Minimum excludant: the smallest color not forbidden for `v`.
    #[inline]
    pub fn mex(&self, v: usize) -> usize {
        for (i, &w) in self.row(v).iter().enumerate() {
            if w != !0 {
                return i * WORD_BITS + (!w).trailing_zeros() as usize;
            }
        }
        self.stride * WORD_BITS
    }

    /// Colors `< limit` (and `< width()`) that are still admissible for `v`,
    /// in ascending order.
    pub fn admissible(&self, v: usize, limit: usize) -> impl Iterator<Item = usize> + '_ {
        let limit = limit.min(self.width);
        self.row(v).iter().enumerate().flat_map(move |(i, &w)| {
            let mut free = !w & limit_mask(i, limit);
            core::iter::from_fn(move || {
                if free == 0 {
                    return None;
                }
                let bit = free.trailing_zeros() as usize;
                free &= free - 1;
                Some(i * WORD_BITS + bit)
            })
        })
    }

    /// Number of admissible colors `< limit`.
    pub fn admissible_count(&self, v: usize, limit: usize) -> usize {
        let limit = limit.min(self.width);
        self.row(v)
            .iter()
            .enumerate()
            .map(|(i, &w)| (!w & limit_mask(i, limit)).count_ones() as usize)
            .sum()
    }

    /// Returns `true` if at least one color `< limit` is admissible for `v`.
    pub fn has_admissible(&self, v: usize, limit: usize) -> bool {
        let limit = limit.min(self.width);
        self.row(v)
            .iter()
            .enumerate()
            .any(|(i, &w)| !w & limit_mask(i, limit) != 0)
    }

    /// Number of colors `< limit` admissible for both `v` and `u`.
    pub fn common_admissible(&self, v: usize, u: usize, limit: usize) -> usize {
        let limit = limit.min(self.width);
        self.row(v)
            .iter()
            .zip(self.row(u))
            .enumerate()
            .map(|(i, (&a, &b))| (!a & !b & limit_mask(i, limit)).count_ones() as usize)
            .sum()
    }

    /// Overwrites the row of `v` with previously saved words.
    ///
    /// # Panics
    /// Panics if `saved.len() != stride()`.
    #[inline]
    pub fn restore(&mut self, v: usize, saved: &[u64]) {
        self.row_mut(v).copy_from_slice(saved);
    }

    /// Clears every bit of `v`.
    pub fn clear(&mut self, v: usize) {
        self.row_mut(v).fill(0);
    }
}
