//! DIMACS `p edge` graphs.
//!
//! ```text
//! c comment
//! p edge <vertices> <edges>
//! e <u> <v>        (1-based)
//! ```
//!
//! The edge count on the problem line is advisory: files in the wild often
//! list each edge in both directions, and duplicates are merged.

use crate::error::{Error, Result};
use crate::graph::{Graph, GraphBuilder};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Parses a DIMACS graph.
pub fn read<R: BufRead>(reader: R) -> Result<Graph> {
    let mut builder: Option<GraphBuilder> = None;
    let mut declared_edges = 0usize;
    let mut seen_edges = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let mut fields = line.split_whitespace();
        match fields.next() {
            None | Some("c") => {}
            Some("p") => {
                if builder.is_some() {
                    return Err(Error::parse(number, "second problem line"));
                }
                let _kind = fields.next().ok_or_else(|| Error::parse(number, "missing problem kind"))?;
                let n = parse_field(fields.next(), number, "vertex count")?;
                declared_edges = parse_field(fields.next(), number, "edge count")?;
                builder = Some(GraphBuilder::new(n));
            }
            Some("e") => {
                let graph = builder
                    .as_mut()
                    .ok_or_else(|| Error::parse(number, "edge before problem line"))?;
                let u: usize = parse_field(fields.next(), number, "edge endpoint")?;
                let v: usize = parse_field(fields.next(), number, "edge endpoint")?;
                if u == 0 || v == 0 {
                    return Err(Error::parse(number, "vertices are numbered from 1"));
                }
                graph.add_edge(u - 1, v - 1).map_err(|err| Error::parse(number, err.to_string()))?;
                seen_edges += 1;
            }
            Some(other) => {
                return Err(Error::parse(number, format!("unknown line type `{other}`")));
            }
        }
    }

    let builder = builder.ok_or_else(|| Error::parse(0, "no problem line"))?;
    let graph = builder.build();
    if seen_edges != declared_edges && seen_edges != 2 * declared_edges {
        warn!(declared = declared_edges, seen = seen_edges, "edge count differs from problem line");
    }
    debug!(vertices = graph.vertex_count(), edges = graph.edge_count(), "read DIMACS graph");
    Ok(graph)
}

fn parse_field<T: std::str::FromStr>(field: Option<&str>, line: usize, what: &str) -> Result<T> {
    let field = field.ok_or_else(|| Error::parse(line, format!("missing {what}")))?;
    field
        .parse()
        .map_err(|_| Error::parse(line, format!("invalid {what} `{field}`")))
}

/// Writes `graph` with one `e` line per undirected edge.
pub fn write<W: Write>(graph: &Graph, mut writer: W) -> Result<()> {
    writeln!(writer, "p edge {} {}", graph.vertex_count(), graph.edge_count())?;
    for (u, v) in graph.edges() {
        writeln!(writer, "e {} {}", u + 1, v + 1)?;
    }
    writer.flush()?;
    Ok(())
}
