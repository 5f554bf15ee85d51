//! Project model providers.
//!
//! A project model yields the build targets of a project together with
//! their direct dependencies and, optionally, their raw linker flags.
//! The graph builder only ever sees the plain records from [`types`].
//!
//! # Example
//!
//! ```
//! use targetscope::filter::NameFilter;
//! use targetscope::project::{manifest, ProjectModel};
//!
//! let manifest = manifest::parse_str(r#"{
//!     "targets": [
//!         {"name": "App", "dependencies": ["AppKit"]},
//!         {"name": "AppTests", "dependencies": ["App"]}
//!     ]
//! }"#).unwrap();
//!
//! let filter = NameFilter::new("Tests$").unwrap();
//! assert_eq!(manifest.target_names(&filter), vec!["AppTests"]);
//! ```

pub mod manifest;
pub mod types;

pub use manifest::{ManifestError, ManifestResult, Workspace};
pub use types::{LinkerFlagsRecord, TargetRecord};

use crate::filter::NameFilter;

/// Source of target and linker flag records.
pub trait ProjectModel {
    /// Every target in the project, in declaration order.
    fn targets(&self) -> Vec<TargetRecord>;

    /// Linker flags, one record per target and build configuration.
    fn linker_flags(&self) -> Vec<LinkerFlagsRecord>;

    /// Names of the targets whose name matches `filter`.
    fn target_names(&self, filter: &NameFilter) -> Vec<String> {
        self.targets()
            .into_iter()
            .map(|t| t.name)
            .filter(|name| filter.matches(name))
            .collect()
    }
}
