//! Parser for JSON project manifests.
//!
//! A manifest lists the build targets of one project, their direct
//! dependencies and, per build configuration, their raw linker flags:
//!
//! ```json
//! {
//!   "name": "MyProject",
//!   "targets": [
//!     { "name": "App", "dependencies": ["Core"],
//!       "linker_flags": { "Debug": "-framework UIKit -lz" } },
//!     { "name": "Core" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{LinkerFlagsRecord, TargetRecord};
use super::ProjectModel;

/// Errors that can occur while loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Failed to read the file from disk.
    #[error("Failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The manifest parsed but describes something unusable.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),
}

/// Result type alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// One target entry of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestTarget {
    /// Target name.
    pub name: String,

    /// Direct dependencies in declaration order.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Raw linker flags keyed by build configuration name.
    #[serde(default)]
    pub linker_flags: BTreeMap<String, String>,
}

/// A single project manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Optional project name, used only for diagnostics.
    pub name: Option<String>,

    /// Targets in declaration order.
    #[serde(default)]
    pub targets: Vec<ManifestTarget>,
}

impl ProjectModel for Manifest {
    fn targets(&self) -> Vec<TargetRecord> {
        self.targets
            .iter()
            .map(|t| TargetRecord::new(t.name.clone(), t.dependencies.iter().cloned()))
            .collect()
    }

    fn linker_flags(&self) -> Vec<LinkerFlagsRecord> {
        self.targets
            .iter()
            .flat_map(|t| {
                t.linker_flags
                    .values()
                    .map(move |flags| LinkerFlagsRecord::new(t.name.clone(), flags.clone()))
            })
            .collect()
    }
}

/// Several manifests treated as one project model.
///
/// Targets are concatenated in manifest order, so a workspace of
/// several projects behaves like one large project.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    manifests: Vec<Manifest>,
}

impl Workspace {
    /// Creates a workspace from already parsed manifests.
    pub fn new(manifests: Vec<Manifest>) -> Self {
        Self { manifests }
    }

    /// Loads and validates every manifest in `paths`.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> ManifestResult<Self> {
        let manifests = paths
            .iter()
            .map(|path| parse_file(path.as_ref()))
            .collect::<ManifestResult<Vec<_>>>()?;
        Ok(Self::new(manifests))
    }

    /// Returns the manifests making up this workspace.
    pub fn manifests(&self) -> &[Manifest] {
        &self.manifests
    }
}

impl ProjectModel for Workspace {
    fn targets(&self) -> Vec<TargetRecord> {
        self.manifests.iter().flat_map(|m| m.targets()).collect()
    }

    fn linker_flags(&self) -> Vec<LinkerFlagsRecord> {
        self.manifests.iter().flat_map(|m| m.linker_flags()).collect()
    }
}

/// Parses and validates a manifest file.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use targetscope::project::manifest::parse_file;
///
/// let manifest = parse_file(Path::new("targetscope.json")).unwrap();
/// println!("{} targets", manifest.targets.len());
/// ```
pub fn parse_file(path: &Path) -> ManifestResult<Manifest> {
    let content = fs::read_to_string(path)?;
    let manifest = parse_str(&content)?;
    debug!(
        path = %path.display(),
        targets = manifest.targets.len(),
        "Loaded manifest"
    );
    Ok(manifest)
}

/// Parses and validates a manifest from a string.
///
/// # Example
///
/// ```
/// use targetscope::project::manifest::parse_str;
///
/// let manifest = parse_str(r#"{"targets": [{"name": "App"}]}"#).unwrap();
/// assert_eq!(manifest.targets[0].name, "App");
/// ```
pub fn parse_str(content: &str) -> ManifestResult<Manifest> {
    let manifest: Manifest = serde_json::from_str(content)?;
    validate(&manifest)?;
    Ok(manifest)
}

/// Checks that every target and dependency has a non-empty name.
pub fn validate(manifest: &Manifest) -> ManifestResult<()> {
    for (position, target) in manifest.targets.iter().enumerate() {
        if target.name.trim().is_empty() {
            return Err(ManifestError::InvalidManifest(format!(
                "target #{} has an empty name",
                position + 1
            )));
        }
        if target.dependencies.iter().any(|d| d.trim().is_empty()) {
            return Err(ManifestError::InvalidManifest(format!(
                "target '{}' lists an empty dependency name",
                target.name
            )));
        }
    }
    Ok(())
}
