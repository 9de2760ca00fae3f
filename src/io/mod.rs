//! Text interchange formats.

pub mod dimacs;
