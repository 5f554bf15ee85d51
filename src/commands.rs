//! Command flows behind the CLI.
//!
//! Each command takes a project model, explicit options and a writer, so
//! the same flows run against files, stdout or an in-memory buffer.

use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, info};

use crate::export::{self, ExportFormat, ListStyle};
use crate::filter::NameFilter;
use crate::graph::TargetGraph;
use crate::project::ProjectModel;

/// Options for listing targets.
#[derive(Debug, Clone, Default)]
pub struct TargetsOptions {
    pub filter: NameFilter,
    pub style: ListStyle,
}

/// Options for a dependency query.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Target to resolve; exempt from the filter
    pub target: String,
    /// Resolve dependents instead of dependencies
    pub reverse: bool,
    /// Include frameworks and libraries found in linker flags
    pub implicit_dependencies: bool,
    pub filter: NameFilter,
    pub style: ListStyle,
}

/// Options for a whole-graph export.
#[derive(Debug, Clone, Default)]
pub struct GraphOptions {
    pub filter: NameFilter,
    pub format: ExportFormat,
}

/// Lists the targets of the project matching the filter.
pub fn list_targets<M, W>(model: &M, options: &TargetsOptions, writer: &mut W) -> Result<Vec<String>>
where
    M: ProjectModel,
    W: Write,
{
    let names = model.target_names(&options.filter);
    info!(targets = names.len(), "Listing targets");

    export::write_names(options.style, &names, writer).context("Failed to write target list")?;
    Ok(names)
}

/// Builds the graph for a query.
pub fn build_graph<M: ProjectModel>(model: &M, reverse: bool, implicit_dependencies: bool) -> TargetGraph {
    let mut graph = TargetGraph::new(reverse);
    graph.add_target_info(&model.targets());
    if implicit_dependencies {
        graph.add_other_ld_flags_info(&model.linker_flags());
    }
    graph
}

/// Resolves the dependencies (or dependents) of a target and writes the
/// filtered names.
///
/// An unknown target is not an error; it simply has nothing to report.
pub fn query<M, W>(model: &M, options: &QueryOptions, writer: &mut W) -> Result<Vec<String>>
where
    M: ProjectModel,
    W: Write,
{
    let graph = build_graph(model, options.reverse, options.implicit_dependencies);
    if graph.has_cycles() {
        debug!("Target graph contains cycles");
    }
    if !graph.contains(&options.target) {
        info!(target_name = %options.target, "Target not found in project");
    }

    let resolved = graph.resolve_dependency_names(&options.target);
    let names = options.filter.apply(resolved);
    info!(
        target_name = %options.target,
        reverse = options.reverse,
        results = names.len(),
        "Query complete"
    );

    export::write_names(options.style, &names, writer).context("Failed to write query result")?;
    Ok(names)
}

/// Exports the whole forward graph, filtered on both edge endpoints.
///
/// Transitive reduction and rendering are left to Graphviz (`tred`,
/// `dot`) run on the DOT output.
pub fn dependency_graph<M, W>(model: &M, options: &GraphOptions, writer: &mut W) -> Result<()>
where
    M: ProjectModel,
    W: Write,
{
    let graph = build_graph(model, false, false);
    let view = export::adjacency(&graph, &options.filter);
    info!(
        nodes = view.len(),
        edges = view.iter().map(|e| e.neighbors.len()).sum::<usize>(),
        format = %options.format,
        "Exporting dependency graph"
    );

    export::export(options.format, &view, writer)
        .with_context(|| format!("Failed to write {} graph", options.format))
}
