//! Zero-copy view over a `DSHUV1.0` image.

use super::format::{records_start, Header, HEADER_LEN, MAGIC, OFFSET_LEN};
use super::mmap::MappedFile;
use crate::error::{Error, Result};
use crate::graph::{Graph, GraphBuilder};
use std::path::Path;
use tracing::debug;
use zerocopy::byteorder::little_endian::{U32, U64};
use zerocopy::FromBytes;

/// Random access to the adjacency stored in a binary graph image.
///
/// The header and the offset table are validated once on construction;
/// individual records are bounds-checked when they are read. Nothing is
/// copied out of `bytes` until a caller asks for it.
pub struct GraphAdaptor<B = MappedFile> {
    bytes: B,
    vertex_count: usize,
    arc_count: u64,
}

impl GraphAdaptor<MappedFile> {
    /// Memory-maps the file at `path` and validates it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mapped = MappedFile::open(path)?;
        debug!(path = %path.display(), bytes = mapped.len(), "mapped graph file");
        Self::from_bytes(mapped)
    }
}

impl<B: AsRef<[u8]>> GraphAdaptor<B> {
    /// Validates an in-memory image.
    pub fn from_bytes(bytes: B) -> Result<Self> {
        let data = bytes.as_ref();
        let header = Header::read_from_prefix(data).ok_or(Error::Truncated { what: "header" })?;
        if header.magic != MAGIC {
            return Err(Error::BadMagic(header.magic));
        }
        let vertex_count = header.vertex_count();
        let table_end = HEADER_LEN + vertex_count * OFFSET_LEN;
        if data.len() < table_end {
            return Err(Error::Truncated { what: "offset table" });
        }
        Ok(Self {
            arc_count: header.arc_count(),
            vertex_count,
            bytes,
        })
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Sum of degrees as recorded in the header.
    pub fn arc_count(&self) -> u64 {
        self.arc_count
    }

    /// Undirected edge count implied by the header.
    pub fn edge_count(&self) -> u64 {
        self.arc_count / 2
    }

    /// The raw image.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    fn offsets(&self) -> &[U64] {
        let table = &self.as_bytes()[HEADER_LEN..HEADER_LEN + self.vertex_count * OFFSET_LEN];
        U64::slice_from(table).unwrap_or(&[])
    }

    /// Neighbours of `v`, decoded lazily from its record.
    ///
    /// # Panics
    /// Panics if `v >= vertex_count()`.
    pub fn neighbours(&self, v: usize) -> Result<Neighbours<'_>> {
        assert!(v < self.vertex_count, "vertex {v} out of range");
        let data = self.as_bytes();
        let offset = self.offsets()[v].get();
        if offset < records_start(self.vertex_count) {
            return Err(Error::Corrupt(format!(
                "record of vertex {v} at {offset} overlaps the offset table"
            )));
        }
        let start = usize::try_from(offset).map_err(|_| Error::Truncated { what: "vertex record" })?;
        let degree = *data.get(start).ok_or(Error::Truncated { what: "vertex record" })? as usize;
        let ids = data
            .get(start + 1..start + 1 + degree * 4)
            .and_then(U32::slice_from)
            .ok_or(Error::Truncated { what: "vertex record" })?;
        Ok(Neighbours { ids: ids.iter() })
    }

    /// Degree of `v`.
    pub fn degree(&self, v: usize) -> Result<usize> {
        Ok(self.neighbours(v)?.len())
    }

    /// Like [`GraphAdaptor::neighbours`], additionally rejecting ids out of
    /// range and self-loops.
    pub fn checked_neighbours(&self, v: usize) -> Result<Neighbours<'_>> {
        let ids = self.neighbours(v)?;
        for u in ids.clone() {
            if u >= self.vertex_count {
                return Err(Error::VertexOutOfRange {
                    vertex: u,
                    vertex_count: self.vertex_count,
                });
            }
            if u == v {
                return Err(Error::SelfLoop(v));
            }
        }
        Ok(ids)
    }

    /// Materialises the image as an in-memory [`Graph`].
    ///
    /// One-sided adjacency entries are symmetrised and duplicates merged.
    pub fn to_graph(&self) -> Result<Graph> {
        let mut builder = GraphBuilder::new(self.vertex_count);
        for v in 0..self.vertex_count {
            for u in self.neighbours(v)? {
                builder.add_edge(v, u)?;
            }
        }
        Ok(builder.build())
    }
}

impl<B> std::fmt::Debug for GraphAdaptor<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphAdaptor")
            .field("vertex_count", &self.vertex_count)
            .field("arc_count", &self.arc_count)
            .finish_non_exhaustive()
    }
}

/// Iterator over the neighbour ids of one record.
#[derive(Clone, Debug)]
pub struct Neighbours<'a> {
    ids: core::slice::Iter<'a, U32>,
}

impl Iterator for Neighbours<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.ids.next().map(|id| id.get() as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for Neighbours<'_> {}
