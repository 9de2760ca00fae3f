//! # `chromatic` - Graph Coloring Engine
//!
//! Computes and bounds the chromatic number of undirected graphs with the
//! saturation-degree (DSatur) family of algorithms.
//!
//! ## Key Features
//!
//! - **Heuristic DSatur** with interchangeable vertex selectors: linear scan,
//!   binary heap, Fibonacci heap, Sewell and Pass tie-breaking
//! - **Exact branch-and-bound** built on the same selectors, with look-ahead
//!   pruning, an incumbent bound and cooperative time limits
//! - **Out-of-core coloring** over memory-mapped `DSHUV1.0` files, loaded and
//!   validated in parallel
//! - **DIMACS** reading and writing
//!
//! ## Architecture
//!
//! 1. **Graph** (`graph`): an immutable CSR [`Graph`]; all per-solve state lives
//!    in separate arenas indexed by vertex id.
//! 2. **Collections** (`collections`): addressable max-heaps behind the
//!    [`collections::AddressableHeap`] trait.
//! 3. **Coloring** (`coloring`): saturation bitmasks, selectors, the heuristic
//!    and exact engines, and [`solve`].
//! 4. **Out-of-core** (`ooc`): binary format, memory map, fixed-capacity node
//!    table and the parallel/sequential DSatur pipeline.
//!
//! ## Example
//!
//! ```
//! use chromatic::{solve, Algorithm, Graph, SolveOptions};
//!
//! let cycle = Graph::from_edges(5, (0..5).map(|v| (v, (v + 1) % 5)))?;
//! let outcome = solve(&cycle, Algorithm::BnbDsatur, &SolveOptions::default());
//! assert_eq!(outcome.color_count(), Some(3));
//! # Ok::<(), chromatic::Error>(())
//! ```
//!
//! A time-out is reported as [`Outcome::TimedOut`], never as a color count.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod collections;
pub mod coloring;
pub mod error;
pub mod graph;
pub mod io;
pub mod ooc;

pub use coloring::{
    dsatur, solve, solve_by_components, validate_coloring, Algorithm, CandidateSelector, Coloring, Deadline,
    ExactSearch, Outcome, SolveOptions,
};
pub use error::{Error, Result};
pub use graph::{Graph, GraphBuilder};
