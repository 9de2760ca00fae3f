//! Layout of the `DSHUV1.0` binary graph format.
//!
//! All integers are little-endian:
//!
//! ```text
//! [8]  magic "DSHUV1.0"
//! [4]  u32 vertex count n
//! [8]  u64 adjacency entry count (sum of degrees)
//! [8n] u64 absolute byte offset of each vertex record
//! per vertex: u8 degree, degree x u32 neighbour id
//! ```

use core::mem::size_of;
use zerocopy::byteorder::little_endian::{U32, U64};
use zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned};

/// Format and version tag.
pub const MAGIC: [u8; 8] = *b"DSHUV1.0";

/// Largest degree a record can encode.
pub const MAX_RECORD_DEGREE: usize = u8::MAX as usize;

/// Size of [`Header`] on disk.
pub const HEADER_LEN: usize = size_of::<Header>();

/// Size of one offset table entry.
pub const OFFSET_LEN: usize = size_of::<U64>();

/// Fixed-size file prefix.
#[derive(Clone, Copy, Debug, FromZeroes, FromBytes, AsBytes, Unaligned)]
#[repr(C)]
pub struct Header {
    /// Must equal [`MAGIC`].
    pub magic: [u8; 8],
    vertex_count: U32,
    arc_count: U64,
}

impl Header {
    /// A header for `vertex_count` vertices whose degrees sum to `arc_count`.
    pub fn new(vertex_count: u32, arc_count: u64) -> Self {
        Self {
            magic: MAGIC,
            vertex_count: U32::new(vertex_count),
            arc_count: U64::new(arc_count),
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count.get() as usize
    }

    /// Sum of all degrees; every undirected edge is counted from both ends.
    pub fn arc_count(&self) -> u64 {
        self.arc_count.get()
    }
}

/// Byte position of the first vertex record.
pub fn records_start(vertex_count: usize) -> u64 {
    (HEADER_LEN + vertex_count * OFFSET_LEN) as u64
}

/// On-disk size of a record with `degree` neighbours.
pub fn record_len(degree: usize) -> u64 {
    1 + (degree * size_of::<U32>()) as u64
}
