//! Graph module for build-target dependency modeling.
//!
//! This module provides the [`TargetGraph`] struct for building a
//! directed graph of targets from project records, and the [`Resolver`]
//! for transitive dependency and dependent queries.
//!
//! # Example
//!
//! ```rust
//! use targetscope::graph::TargetGraph;
//! use targetscope::project::{LinkerFlagsRecord, TargetRecord};
//!
//! let mut graph = TargetGraph::new(false);
//! graph.add_target_info(&[
//!     TargetRecord::new("App", ["Core"]),
//!     TargetRecord::leaf("Core"),
//! ]);
//! graph.add_other_ld_flags_info(&[LinkerFlagsRecord::new("Core", "-lz")]);
//!
//! assert_eq!(graph.resolve_dependency_names("App"), vec!["Core", "libz.a"]);
//! ```

pub mod linker_flags;
mod resolver;
mod target_graph;

pub use linker_flags::{dynamic_library_name, static_library_name, ImplicitDependency};
pub use resolver::Resolver;
pub use target_graph::{EdgeKind, NodeKind, Orientation, TargetGraph, TargetNode};
