//! Export functionality for target graphs and query results.
//!
//! Whole graphs are exported through a flat adjacency view: every node
//! passing the name filter with the filtered list of its direct
//! neighbours. The view can be written as a DOT `digraph` (ready for
//! `tred` and `dot`) or as JSON. Resolved name lists are written one per
//! line, comma separated or as a JSON array.

pub mod dot;
pub mod json;

use crate::filter::NameFilter;
use crate::graph::{NodeKind, TargetGraph};
use std::io::{self, Write};

/// Graph export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Graphviz DOT - input for transitive reduction and rendering
    #[default]
    Dot,
    /// JSON format - machine-readable adjacency list
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "gv" | "graphviz" => Ok(ExportFormat::Dot),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: dot, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Dot => write!(f, "dot"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// How a list of names is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStyle {
    /// One name per line
    #[default]
    Lines,
    /// All names on one line, joined with commas
    CommaSeparated,
    /// A JSON array of strings
    Json,
}

impl std::str::FromStr for ListStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" => Ok(ListStyle::Lines),
            "comma" | "comma-separated" => Ok(ListStyle::CommaSeparated),
            "json" => Ok(ListStyle::Json),
            _ => Err(format!(
                "Unknown list style: '{}'. Valid styles: lines, comma, json",
                s
            )),
        }
    }
}

/// One node of the adjacency view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyEntry {
    /// Node name
    pub name: String,
    /// Node kind
    pub kind: NodeKind,
    /// Direct neighbours passing the filter, first-seen order, no duplicates
    pub neighbors: Vec<String>,
}

/// Builds the filtered adjacency view of `graph`.
///
/// Nodes failing the filter are dropped, and so is every edge with an
/// endpoint failing it. Duplicate edges appear once.
///
/// # Example
///
/// ```
/// use targetscope::export::adjacency;
/// use targetscope::filter::NameFilter;
/// use targetscope::graph::TargetGraph;
///
/// let mut graph = TargetGraph::default();
/// graph.add_edge("App", "Core");
/// graph.add_edge("App", "libz.a");
///
/// let view = adjacency(&graph, &NameFilter::new("^[A-Z]").unwrap());
/// assert_eq!(view.len(), 2);
/// assert_eq!(view[0].neighbors, vec!["Core"]);
/// ```
pub fn adjacency(graph: &TargetGraph, filter: &NameFilter) -> Vec<AdjacencyEntry> {
    graph
        .nodes()
        .filter(|node| filter.matches(&node.name))
        .map(|node| AdjacencyEntry {
            name: node.name.clone(),
            kind: node.kind,
            neighbors: graph
                .neighbors(&node.name)
                .into_iter()
                .filter(|neighbor| filter.matches_edge(&node.name, neighbor))
                .map(str::to_string)
                .collect(),
        })
        .collect()
}

/// Trait for graph exporters.
pub trait Exporter {
    /// Export the adjacency view to the given writer.
    fn export<W: Write>(&self, entries: &[AdjacencyEntry], writer: &mut W) -> io::Result<()>;
}

/// Export an adjacency view in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    entries: &[AdjacencyEntry],
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Dot => dot::DotExporter::default().export(entries, writer),
        ExportFormat::Json => json::JsonExporter.export(entries, writer),
    }
}

/// Export an adjacency view to a string.
pub fn export_to_string(format: ExportFormat, entries: &[AdjacencyEntry]) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, entries, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write a list of names in the given style.
pub fn write_names<W: Write, S: AsRef<str>>(
    style: ListStyle,
    names: &[S],
    writer: &mut W,
) -> io::Result<()> {
    match style {
        ListStyle::Lines => {
            for name in names {
                writeln!(writer, "{}", name.as_ref())?;
            }
            Ok(())
        }
        ListStyle::CommaSeparated => {
            let joined: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
            writeln!(writer, "{}", joined.join(","))
        }
        ListStyle::Json => json::write_name_list(names, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::TargetRecord;

    fn sample_graph() -> TargetGraph {
        let mut graph = TargetGraph::default();
        graph.add_target_info(&[
            TargetRecord::new("App", ["Core", "libz.a", "Core"]),
            TargetRecord::new("Core", ["Utils"]),
            TargetRecord::leaf("Utils"),
        ]);
        graph
    }

    fn names_to_string(style: ListStyle, names: &[&str]) -> String {
        let mut buffer = Vec::new();
        write_names(style, names, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("dot".parse::<ExportFormat>().unwrap(), ExportFormat::Dot);
        assert_eq!("GV".parse::<ExportFormat>().unwrap(), ExportFormat::Dot);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("png".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_display() {
        assert_eq!(format!("{}", ExportFormat::Dot), "dot");
        assert_eq!(format!("{}", ExportFormat::Json), "json");
    }

    #[test]
    fn test_list_style_from_str() {
        assert_eq!("lines".parse::<ListStyle>().unwrap(), ListStyle::Lines);
        assert_eq!("comma".parse::<ListStyle>().unwrap(), ListStyle::CommaSeparated);
        assert_eq!("JSON".parse::<ListStyle>().unwrap(), ListStyle::Json);
        assert!("xml".parse::<ListStyle>().is_err());
    }

    #[test]
    fn test_adjacency_unfiltered() {
        let view = adjacency(&sample_graph(), &NameFilter::default());
        let names: Vec<&str> = view.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["App", "Core", "libz.a", "Utils"]);
        assert_eq!(view[0].neighbors, vec!["Core", "libz.a"]);
        assert_eq!(view[1].neighbors, vec!["Utils"]);
        assert!(view[3].neighbors.is_empty());
    }

    #[test]
    fn test_adjacency_filter_drops_edges_with_failing_endpoint() {
        let filter = NameFilter::new("^(App|Utils|libz\\.a)$").unwrap();
        let view = adjacency(&sample_graph(), &filter);

        for entry in &view {
            assert!(filter.matches(&entry.name));
            for neighbor in &entry.neighbors {
                assert!(filter.matches(neighbor));
            }
        }
        // App -> Core is dropped because Core fails, even though App passes.
        assert_eq!(view[0].name, "App");
        assert_eq!(view[0].neighbors, vec!["libz.a"]);
        assert!(!view.iter().any(|e| e.name == "Core"));
    }

    #[test]
    fn test_write_names_lines() {
        assert_eq!(names_to_string(ListStyle::Lines, &["Core", "Utils"]), "Core\nUtils\n");
        assert_eq!(names_to_string(ListStyle::Lines, &[]), "");
    }

    #[test]
    fn test_write_names_comma_separated() {
        assert_eq!(
            names_to_string(ListStyle::CommaSeparated, &["Core", "Utils"]),
            "Core,Utils\n"
        );
    }

    #[test]
    fn test_write_names_json() {
        let output = names_to_string(ListStyle::Json, &["Core", "Utils"]);
        let parsed: Vec<String> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, vec!["Core", "Utils"]);
    }

    #[test]
    fn test_export_to_string_dispatches() {
        let view = adjacency(&sample_graph(), &NameFilter::default());
        assert!(export_to_string(ExportFormat::Dot, &view)
            .unwrap()
            .starts_with("digraph"));
        assert!(export_to_string(ExportFormat::Json, &view)
            .unwrap()
            .trim_start()
            .starts_with('['));
    }
}
