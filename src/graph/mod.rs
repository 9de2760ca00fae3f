//! In-memory graph model.
//!
//! - `csr`: the immutable [`Graph`] and its validating [`GraphBuilder`]
//! - `components`: connected components and induced subgraphs

pub mod components;
pub mod csr;

pub use components::{connected_components, induced_subgraph};
pub use csr::{Graph, GraphBuilder};
