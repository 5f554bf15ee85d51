//! Shared input types for graph construction.
//!
//! These are the plain records a project model hands to the graph
//! builder: one [`TargetRecord`] per build target and, optionally, one
//! [`LinkerFlagsRecord`] per target and build configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A build target and the names of the targets it directly depends on.
///
/// # Example
///
/// ```
/// use targetscope::project::TargetRecord;
///
/// let target = TargetRecord::new("App", ["Core", "Networking"]);
/// assert_eq!(target.name, "App");
/// assert_eq!(target.direct_dependencies.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRecord {
    /// Target name, unique within a project.
    pub name: String,

    /// Direct dependencies in declaration order.
    #[serde(default, rename = "dependencies")]
    pub direct_dependencies: Vec<String>,
}

impl TargetRecord {
    /// Creates a new target record.
    pub fn new<I, S>(name: impl Into<String>, direct_dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            direct_dependencies: direct_dependencies.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a target with no dependencies.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direct_dependencies: Vec::new(),
        }
    }

    /// Returns true if the target declares no direct dependencies.
    pub fn is_leaf(&self) -> bool {
        self.direct_dependencies.is_empty()
    }
}

impl fmt::Display for TargetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The raw linker flags of a target for one build configuration.
///
/// `raw_flags` is whitespace separated and may mention frameworks
/// (`-framework Foo`) and libraries (`-lBar`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkerFlagsRecord {
    /// Name of the target the flags belong to.
    pub target_name: String,

    /// Whitespace-separated linker flags.
    pub raw_flags: String,
}

impl LinkerFlagsRecord {
    /// Creates a new linker flags record.
    pub fn new(target_name: impl Into<String>, raw_flags: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
            raw_flags: raw_flags.into(),
        }
    }
}
