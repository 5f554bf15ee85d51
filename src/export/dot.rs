//! Graphviz DOT export.
//!
//! Writes the adjacency view as a `digraph`. Every node is declared,
//! including isolated ones, followed by one statement per edge. The
//! output is meant to be fed to `tred` for transitive reduction and then
//! to `dot` for rendering.

use super::{AdjacencyEntry, Exporter};
use std::io::{self, Write};

/// DOT exporter implementation.
#[derive(Debug, Clone)]
pub struct DotExporter {
    /// Name of the emitted `digraph`
    pub graph_name: String,
}

impl Default for DotExporter {
    fn default() -> Self {
        Self {
            graph_name: "dependencies".to_string(),
        }
    }
}

impl DotExporter {
    /// Quote an identifier for DOT, escaping quotes and backslashes.
    fn quote(value: &str) -> String {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');
        for c in value.chars() {
            match c {
                '"' | '\\' => {
                    quoted.push('\\');
                    quoted.push(c);
                }
                '\n' => quoted.push_str("\\n"),
                _ => quoted.push(c),
            }
        }
        quoted.push('"');
        quoted
    }
}

impl Exporter for DotExporter {
    fn export<W: Write>(&self, entries: &[AdjacencyEntry], writer: &mut W) -> io::Result<()> {
        writeln!(writer, "digraph {} {{", Self::quote(&self.graph_name))?;

        for entry in entries {
            writeln!(writer, "    {};", Self::quote(&entry.name))?;
        }

        for entry in entries {
            let from = Self::quote(&entry.name);
            for neighbor in &entry.neighbors {
                writeln!(writer, "    {} -> {};", from, Self::quote(neighbor))?;
            }
        }

        writeln!(writer, "}}")
    }
}
