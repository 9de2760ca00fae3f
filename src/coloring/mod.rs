//! The DSatur coloring engine.
//!
//! - `saturation`: per-vertex forbidden-color bitmasks
//! - `state`: colored flags and assignments of a run in progress
//! - `selector`: the vertex-selection strategies
//! - `heuristic`: single-pass DSatur
//! - `exact`: branch-and-bound DSatur with scoped undo
//! - `algorithm`: named algorithms and [`solve`]
//!
//! Every engine takes its time limit as an injected `FnMut() -> bool`;
//! [`Deadline`] builds one from a wall-clock budget.

pub mod algorithm;
pub mod deadline;
pub mod exact;
pub mod heuristic;
pub mod outcome;
pub mod saturation;
pub mod selector;
pub mod state;
mod trail;

pub use algorithm::{solve, solve_by_components, Algorithm, SolveOptions};
pub use deadline::Deadline;
pub use exact::{ExactSearch, SearchStats};
pub use heuristic::{dsatur, dsatur_with_limit};
pub use outcome::{validate_coloring, Coloring, Outcome};
pub use saturation::SaturationTable;
pub use selector::{
    BinaryHeapSelector, CandidateSelector, DenseSelector, FibonacciHeapSelector, PassSelector, SewellSelector,
    SparseSelector,
};
pub use state::ColoringState;
