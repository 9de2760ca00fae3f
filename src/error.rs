//! Error taxonomy shared by every fallible operation in the crate.
//!
//! Time-limit aborts are deliberately absent here: a search that runs out of
//! time produces [`Outcome::TimedOut`](crate::coloring::Outcome::TimedOut),
//! which is a result, not a failure.

use core::fmt;
use std::io;

/// Convenience alias for `Result<T, chromatic::Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors produced while building graphs, reading instances or coloring them.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// An algorithm name did not match any known selector.
    UnknownAlgorithm(String),

    /// The binary file does not start with the expected magic/version tag.
    BadMagic([u8; 8]),

    /// The binary file ended before the named section was complete.
    Truncated {
        /// Section that could not be read in full.
        what: &'static str,
    },

    /// The binary file is structurally inconsistent.
    Corrupt(String),

    /// An edge endpoint is not a vertex of the graph.
    VertexOutOfRange {
        /// Offending vertex id.
        vertex: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },

    /// An edge joins a vertex to itself; such graphs have no proper coloring.
    SelfLoop(usize),

    /// A vertex has more neighbours than the chosen representation can hold.
    DegreeOverCapacity {
        /// Offending vertex id.
        vertex: usize,
        /// Its degree.
        degree: usize,
        /// The representation's neighbour capacity.
        capacity: usize,
    },

    /// A count does not fit the field the binary format reserves for it.
    Overflow {
        /// The quantity that overflowed.
        what: &'static str,
    },

    /// Validation found an edge whose endpoints share a color.
    InvalidColoring {
        /// One endpoint of the conflicting edge.
        vertex: usize,
        /// The other endpoint.
        neighbour: usize,
    },

    /// A text instance could not be parsed.
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Underlying I/O failure.
    Io(io::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Returns `true` for errors that reject the instance itself rather than
    /// the environment (unsupported sizes, inconsistent input).
    pub fn is_unsupported_instance(&self) -> bool {
        matches!(
            self,
            Self::DegreeOverCapacity { .. }
                | Self::Overflow { .. }
                | Self::VertexOutOfRange { .. }
                | Self::SelfLoop(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAlgorithm(name) => write!(f, "unknown algorithm `{name}`"),
            Self::BadMagic(tag) => write!(
                f,
                "unknown graph format tag {:?}",
                String::from_utf8_lossy(tag)
            ),
            Self::Truncated { what } => write!(f, "graph file truncated while reading {what}"),
            Self::Corrupt(msg) => write!(f, "corrupt graph file: {msg}"),
            Self::VertexOutOfRange {
                vertex,
                vertex_count,
            } => write!(f, "vertex {vertex} out of range for {vertex_count} vertices"),
            Self::SelfLoop(v) => write!(f, "self-loop on vertex {v}"),
            Self::DegreeOverCapacity {
                vertex,
                degree,
                capacity,
            } => write!(
                f,
                "unsupported instance: vertex {vertex} has degree {degree}, capacity is {capacity}"
            ),
            Self::Overflow { what } => write!(f, "unsupported instance: {what} overflows the binary format"),
            Self::InvalidColoring { vertex, neighbour } => write!(
                f,
                "invalid coloring: vertices {vertex} and {neighbour} share a color"
            ),
            Self::Parse { line, message } => write!(f, "line {line}: {message}"),
            Self::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
