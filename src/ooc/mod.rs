//! Out-of-core coloring for graphs too large to hold comfortably in memory.
//!
//! The graph lives in a `DSHUV1.0` file that is memory-mapped read-only.
//! [`GraphAdaptor`] gives zero-copy access to its records, [`load_nodes`]
//! copies them in parallel into a flat table of fixed-capacity [`Node`]s, and
//! [`color`] runs DSatur over that table.
//!
//! ```no_run
//! use chromatic::ooc::{self, GraphAdaptor, LoadOptions, LogProgress, DEFAULT_NEIGHBOUR_CAPACITY};
//!
//! let adaptor = GraphAdaptor::open("grid.bin")?;
//! let report = ooc::color::<DEFAULT_NEIGHBOUR_CAPACITY, _, _>(&adaptor, &LoadOptions::default(), &LogProgress::new())?;
//! println!("{} colors", report.colors);
//! # Ok::<(), chromatic::Error>(())
//! ```

pub mod adaptor;
pub mod dsatur;
pub mod format;
pub mod load;
pub mod mmap;
pub mod node;
pub mod progress;
pub mod writer;

pub use adaptor::{GraphAdaptor, Neighbours};
pub use dsatur::{color, validate, OocReport};
pub use format::{Header, MAGIC};
pub use load::{load_nodes, LoadOptions};
pub use mmap::MappedFile;
pub use node::{Node, NodeKey, DEFAULT_NEIGHBOUR_CAPACITY};
pub use progress::{LogProgress, NoProgress, Phase, Progress, PROGRESS_BATCH};
pub use writer::{write_graph, write_king_grid, write_to_path};
