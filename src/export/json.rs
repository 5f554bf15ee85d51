//! JSON export implementation.
//!
//! Exports the adjacency view and resolved name lists in JSON format for
//! machine-readable output.

use super::{AdjacencyEntry, Exporter};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable node for JSON output.
#[derive(Serialize)]
struct JsonNode<'a> {
    name: &'a str,
    kind: String,
    neighbors: &'a [String],
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, entries: &[AdjacencyEntry], writer: &mut W) -> io::Result<()> {
        let nodes: Vec<JsonNode<'_>> = entries
            .iter()
            .map(|e| JsonNode {
                name: &e.name,
                kind: e.kind.to_string(),
                neighbors: &e.neighbors,
            })
            .collect();

        serde_json::to_writer_pretty(&mut *writer, &nodes).map_err(io::Error::from)?;
        writeln!(writer)?;
        Ok(())
    }
}

/// Write a list of names as a JSON array.
pub fn write_name_list<W: Write, S: AsRef<str>>(names: &[S], writer: &mut W) -> io::Result<()> {
    let names: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
    serde_json::to_writer(&mut *writer, &names).map_err(io::Error::from)?;
    writeln!(writer)?;
    Ok(())
}
