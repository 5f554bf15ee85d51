//! Reachability queries over a [`TargetGraph`].
//!
//! Resolution is a queue-based breadth-first walk with a visited set, so
//! it terminates on cyclic graphs and reports each node once. Nodes come
//! out in order of distance from the start; ties follow edge insertion
//! order.

use petgraph::graph::NodeIndex;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, trace};

use super::target_graph::{TargetGraph, TargetNode};

/// Read-only reachability queries over a graph.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'g> {
    graph: &'g TargetGraph,
}

impl<'g> Resolver<'g> {
    /// Creates a resolver over `graph`.
    pub fn new(graph: &'g TargetGraph) -> Self {
        Self { graph }
    }

    /// Gets every node reachable from `start` by following edges.
    ///
    /// In a forward graph this is the transitive dependency set of
    /// `start`; in a reverse graph, its transitive dependents. The start
    /// node is never part of the result, and an unknown start yields an
    /// empty result.
    ///
    /// # Example
    ///
    /// ```rust
    /// use targetscope::graph::{Resolver, TargetGraph};
    ///
    /// let mut graph = TargetGraph::default();
    /// graph.add_edge("A", "B");
    /// graph.add_edge("B", "A");
    ///
    /// let resolver = Resolver::new(&graph);
    /// assert_eq!(resolver.resolve_dependency_names("A"), vec!["B"]);
    /// assert!(resolver.resolve_dependency_names("Unknown").is_empty());
    /// ```
    pub fn resolve_dependencies(&self, start: &str) -> Vec<&'g TargetNode> {
        let Some(start_idx) = self.graph.index_of(start) else {
            debug!(start, "Target not in graph, nothing to resolve");
            return Vec::new();
        };

        let resolved: Vec<&'g TargetNode> = self
            .reachable_from(start_idx)
            .into_iter()
            .map(|idx| self.graph.node_at(idx))
            .collect();

        debug!(
            start,
            orientation = %self.graph.orientation(),
            resolved = resolved.len(),
            "Resolved dependencies"
        );
        resolved
    }

    /// Like [`Resolver::resolve_dependencies`], returning owned names.
    pub fn resolve_dependency_names(&self, start: &str) -> Vec<String> {
        self.resolve_dependencies(start)
            .into_iter()
            .map(|node| node.name.clone())
            .collect()
    }

    fn reachable_from(&self, start: NodeIndex) -> Vec<NodeIndex> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        let mut order = Vec::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.graph.neighbor_indices(current) {
                if visited.insert(neighbor) {
                    trace!(
                        from = %self.graph.node_at(current).name,
                        to = %self.graph.node_at(neighbor).name,
                        "Visiting"
                    );
                    order.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        order
    }
}
