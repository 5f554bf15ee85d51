//! Target graph implementation using petgraph.
//!
//! Provides a directed graph of build targets built from project records,
//! with implicit linker-flag dependencies and a fixed edge orientation.

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, trace};

use super::linker_flags::{parse_linker_flags, static_library_name, ImplicitDependency};
use super::resolver::Resolver;
use crate::project::{LinkerFlagsRecord, TargetRecord};

/// Direction of the edges stored in a [`TargetGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Edges point from a target to the things it depends on.
    #[default]
    Forward,
    /// Edges point from a dependency to the targets that depend on it.
    Reverse,
}

impl Orientation {
    /// Maps a `reverse` flag onto an orientation.
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Self::Reverse
        } else {
            Self::Forward
        }
    }

    /// Returns true for [`Orientation::Reverse`].
    pub fn is_reverse(&self) -> bool {
        matches!(self, Self::Reverse)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Reverse => write!(f, "reverse"),
        }
    }
}

/// What a node stands for.
///
/// Nodes first seen through linker flags are frameworks or libraries;
/// everything else, including dependency names never declared as a
/// target themselves, is a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    #[default]
    Target,
    Framework,
    Library,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target => write!(f, "target"),
            Self::Framework => write!(f, "framework"),
            Self::Library => write!(f, "library"),
        }
    }
}

/// A node in the target graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetNode {
    /// Target, framework or library name
    pub name: String,
    /// Kind of node, fixed when the node is created
    pub kind: NodeKind,
}

impl TargetNode {
    /// Creates a new target node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Target,
        }
    }

    /// Creates a node of the given kind.
    pub fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Where an edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeKind {
    /// Declared in the project description
    #[default]
    Explicit,
    /// Inferred from linker flags
    Implicit,
}

/// A directed graph of build targets.
///
/// Nodes are created on demand, so every edge endpoint is always a node
/// of the graph. Edges are stored as added, duplicates included, and
/// deduplicated when read back through [`TargetGraph::neighbors`].
///
/// # Example
///
/// ```rust
/// use targetscope::graph::TargetGraph;
/// use targetscope::project::TargetRecord;
///
/// let mut graph = TargetGraph::new(false);
/// graph.add_target_info(&[
///     TargetRecord::new("App", ["Core"]),
///     TargetRecord::new("Core", ["Utils"]),
///     TargetRecord::leaf("Utils"),
/// ]);
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.neighbors("App"), vec!["Core"]);
/// ```
#[derive(Debug, Clone)]
pub struct TargetGraph {
    /// The underlying directed graph
    graph: DiGraph<TargetNode, EdgeKind>,
    /// Maps names to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
    orientation: Orientation,
}

impl Default for TargetGraph {
    fn default() -> Self {
        Self::new(false)
    }
}

impl TargetGraph {
    /// Creates a new empty graph.
    ///
    /// With `reverse` set, edges point from a dependency to its
    /// dependents, so resolving a name yields everything that depends on
    /// it. The orientation cannot be changed afterwards.
    ///
    /// # Example
    ///
    /// ```rust
    /// use targetscope::graph::{Orientation, TargetGraph};
    ///
    /// let graph = TargetGraph::new(true);
    /// assert_eq!(graph.orientation(), Orientation::Reverse);
    /// assert!(graph.is_empty());
    /// ```
    pub fn new(reverse: bool) -> Self {
        Self::with_orientation(Orientation::from_reverse(reverse))
    }

    /// Creates a new empty graph with the given orientation.
    pub fn with_orientation(orientation: Orientation) -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            orientation,
        }
    }

    /// Returns the orientation fixed at construction.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the node for `name`, creating it if needed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use targetscope::graph::TargetGraph;
    ///
    /// let mut graph = TargetGraph::default();
    /// let first = graph.ensure_node("Core");
    /// let second = graph.ensure_node("Core");
    /// assert_eq!(first, second);
    /// assert_eq!(graph.node_count(), 1);
    /// ```
    pub fn ensure_node(&mut self, name: &str) -> NodeIndex {
        self.ensure_node_with_kind(name, NodeKind::Target)
    }

    fn ensure_node_with_kind(&mut self, name: &str, kind: NodeKind) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(name) {
            return idx;
        }

        trace!(name, %kind, "Adding node");
        let idx = self.graph.add_node(TargetNode::with_kind(name, kind));
        self.node_indices.insert(name.to_string(), idx);
        idx
    }

    /// Records that `from` depends on `to`.
    ///
    /// Both nodes are created if missing. In a reverse graph the stored
    /// edge points from `to` to `from`.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);
        self.insert_edge(from_idx, to_idx, EdgeKind::Explicit);
    }

    fn insert_edge(&mut self, from: NodeIndex, to: NodeIndex, kind: EdgeKind) {
        let (source, target) = match self.orientation {
            Orientation::Forward => (from, to),
            Orientation::Reverse => (to, from),
        };
        self.graph.add_edge(source, target, kind);
    }

    /// Adds every target and its direct dependencies.
    ///
    /// Targets are processed in order; order only affects node creation
    /// order.
    pub fn add_target_info(&mut self, targets: &[TargetRecord]) {
        for target in targets {
            self.ensure_node(&target.name);
            for dependency in &target.direct_dependencies {
                self.add_edge(&target.name, dependency);
            }
        }

        debug!(
            targets = targets.len(),
            nodes = self.node_count(),
            edges = self.edge_count(),
            orientation = %self.orientation,
            "Added target info"
        );
    }

    /// Adds implicit dependencies found in linker flags.
    ///
    /// Libraries are named with [`static_library_name`]. Call this before
    /// resolving anything.
    ///
    /// # Example
    ///
    /// ```rust
    /// use targetscope::graph::TargetGraph;
    /// use targetscope::project::LinkerFlagsRecord;
    ///
    /// let mut graph = TargetGraph::default();
    /// graph.add_other_ld_flags_info(&[LinkerFlagsRecord::new("App", "-framework Foo -lBar")]);
    ///
    /// assert_eq!(graph.neighbors("App"), vec!["Foo", "libBar.a"]);
    /// ```
    pub fn add_other_ld_flags_info(&mut self, records: &[LinkerFlagsRecord]) {
        self.add_other_ld_flags_info_with(records, static_library_name);
    }

    /// Adds implicit dependencies found in linker flags, naming libraries
    /// with `library_name`.
    pub fn add_other_ld_flags_info_with<F>(&mut self, records: &[LinkerFlagsRecord], library_name: F)
    where
        F: Fn(&str) -> String,
    {
        let mut added = 0;

        for record in records {
            let from = self.ensure_node(&record.target_name);
            for dependency in parse_linker_flags(&record.raw_flags) {
                let to = match dependency {
                    ImplicitDependency::Framework(name) => {
                        self.ensure_node_with_kind(name, NodeKind::Framework)
                    }
                    ImplicitDependency::Library(name) => {
                        self.ensure_node_with_kind(&library_name(name), NodeKind::Library)
                    }
                };
                self.insert_edge(from, to, EdgeKind::Implicit);
                added += 1;
            }
        }

        debug!(
            records = records.len(),
            implicit_edges = added,
            "Added linker flag info"
        );
    }

    /// Gets a node by name.
    pub fn node(&self, name: &str) -> Option<&TargetNode> {
        self.node_indices
            .get(name)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.node_indices.get(name).copied()
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &TargetNode {
        &self.graph[idx]
    }

    /// Direct neighbours of `idx` in edge insertion order, each once.
    pub(crate) fn neighbor_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        // petgraph walks a node's edge list newest first.
        let mut edges: Vec<_> = self
            .graph
            .edges(idx)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        edges.sort_by_key(|(id, _)| id.index());

        let mut seen = HashSet::with_capacity(edges.len());
        edges
            .into_iter()
            .map(|(_, target)| target)
            .filter(|target| seen.insert(*target))
            .collect()
    }

    /// Gets the direct neighbours of a node.
    ///
    /// In a forward graph these are the direct dependencies, in a reverse
    /// graph the direct dependents. Duplicate edges are reported once, in
    /// the order first added. Unknown names have no neighbours.
    ///
    /// # Example
    ///
    /// ```rust
    /// use targetscope::graph::TargetGraph;
    ///
    /// let mut graph = TargetGraph::default();
    /// graph.add_edge("App", "Core");
    /// graph.add_edge("App", "Utils");
    /// graph.add_edge("App", "Core");
    ///
    /// assert_eq!(graph.edge_count(), 3);
    /// assert_eq!(graph.neighbors("App"), vec!["Core", "Utils"]);
    /// assert!(graph.neighbors("Missing").is_empty());
    /// ```
    pub fn neighbors(&self, name: &str) -> Vec<&str> {
        let Some(idx) = self.index_of(name) else {
            return Vec::new();
        };

        self.neighbor_indices(idx)
            .into_iter()
            .map(|n| self.graph[n].name.as_str())
            .collect()
    }

    /// Iterates over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &TargetNode> {
        self.graph.node_weights()
    }

    /// Returns a resolver over this graph.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self)
    }

    /// Gets every node reachable from `start`, excluding `start` itself.
    ///
    /// See [`Resolver::resolve_dependencies`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use targetscope::graph::TargetGraph;
    /// use targetscope::project::TargetRecord;
    ///
    /// let targets = [
    ///     TargetRecord::new("App", ["Core"]),
    ///     TargetRecord::new("Core", ["Utils"]),
    ///     TargetRecord::leaf("Utils"),
    /// ];
    ///
    /// let mut graph = TargetGraph::new(false);
    /// graph.add_target_info(&targets);
    /// let deps: Vec<&str> = graph
    ///     .resolve_dependencies("App")
    ///     .iter()
    ///     .map(|n| n.name.as_str())
    ///     .collect();
    /// assert_eq!(deps, vec!["Core", "Utils"]);
    ///
    /// let mut reverse = TargetGraph::new(true);
    /// reverse.add_target_info(&targets);
    /// let dependents: Vec<&str> = reverse
    ///     .resolve_dependencies("Utils")
    ///     .iter()
    ///     .map(|n| n.name.as_str())
    ///     .collect();
    /// assert_eq!(dependents, vec!["Core", "App"]);
    /// ```
    pub fn resolve_dependencies(&self, start: &str) -> Vec<&TargetNode> {
        self.resolver().resolve_dependencies(start)
    }

    /// Like [`TargetGraph::resolve_dependencies`], returning owned names.
    pub fn resolve_dependency_names(&self, start: &str) -> Vec<String> {
        self.resolver().resolve_dependency_names(start)
    }

    /// Checks if the graph contains cycles.
    ///
    /// Target graphs may legitimately be cyclic; this is diagnostic only.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of stored edges, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Checks if a node exists in the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }

    /// Gets nodes filtered by kind.
    pub fn nodes_by_kind(&self, kind: NodeKind) -> Vec<&TargetNode> {
        self.graph
            .node_weights()
            .filter(|node| node.kind == kind)
            .collect()
    }

    /// Returns the number of implicit (linker flag) edges.
    pub fn implicit_edge_count(&self) -> usize {
        self.graph
            .edge_weights()
            .filter(|kind| **kind == EdgeKind::Implicit)
            .count()
    }
}
