//! Streaming encoders for the `DSHUV1.0` format.
//!
//! Offsets are derived from the degrees in a first pass, so records can be
//! written strictly front to back and the output never needs to seek.

use super::format::{record_len, records_start, Header, MAX_RECORD_DEGREE};
use crate::error::{Error, Result};
use crate::graph::Graph;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;
use zerocopy::AsBytes;

/// Writes `vertex_count` records, asking `neighbours` for each vertex's
/// adjacency twice: once for the offset table, once for the record.
fn encode<W, F>(mut writer: W, vertex_count: usize, mut neighbours: F) -> Result<()>
where
    W: Write,
    F: FnMut(usize, &mut Vec<u32>),
{
    let n = u32::try_from(vertex_count).map_err(|_| Error::Overflow { what: "vertex count" })?;
    let mut buf = Vec::with_capacity(MAX_RECORD_DEGREE);

    let mut arcs = 0u64;
    for v in 0..vertex_count {
        buf.clear();
        neighbours(v, &mut buf);
        if buf.len() > MAX_RECORD_DEGREE {
            return Err(Error::DegreeOverCapacity {
                vertex: v,
                degree: buf.len(),
                capacity: MAX_RECORD_DEGREE,
            });
        }
        arcs += buf.len() as u64;
    }
    writer.write_all(Header::new(n, arcs).as_bytes())?;

    let mut offset = records_start(vertex_count);
    for v in 0..vertex_count {
        buf.clear();
        neighbours(v, &mut buf);
        writer.write_all(&offset.to_le_bytes())?;
        offset += record_len(buf.len());
    }

    for v in 0..vertex_count {
        buf.clear();
        neighbours(v, &mut buf);
        // checked in the first pass
        writer.write_all(&[buf.len() as u8])?;
        for &u in &buf {
            writer.write_all(&u.to_le_bytes())?;
        }
    }
    writer.flush()?;
    debug!(vertices = vertex_count, arcs, bytes = offset, "encoded graph");
    Ok(())
}

/// Encodes `graph`.
pub fn write_graph<W: Write>(graph: &Graph, writer: W) -> Result<()> {
    encode(writer, graph.vertex_count(), |v, out| {
        // vertex_count fits in u32, so every id does too
        out.extend(graph.neighbors(v).iter().map(|&u| u as u32));
    })
}

/// Encodes `graph` into a new file at `path`.
pub fn write_to_path(graph: &Graph, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    write_graph(graph, BufWriter::new(file))
}

/// Encodes a `width` x `height` king grid: every cell is adjacent to the up
/// to eight cells around it. Cell `(x, y)` is vertex `y * width + x`.
///
/// Grids with billions of cells are written without building a [`Graph`].
pub fn write_king_grid<W: Write>(width: u32, height: u32, writer: W) -> Result<()> {
    let cells = u64::from(width) * u64::from(height);
    let n = u32::try_from(cells).map_err(|_| Error::Overflow { what: "grid cell count" })?;
    let (w, h) = (i64::from(width), i64::from(height));
    encode(writer, n as usize, |v, out| {
        let (x, y) = ((v as i64) % w, (v as i64) / w);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (nx, ny) = (x + dx, y + dy);
                if (dx, dy) != (0, 0) && (0..w).contains(&nx) && (0..h).contains(&ny) {
                    out.push((ny * w + nx) as u32);
                }
            }
        }
    })
}
