//! Project root and manifest loading

use crate::core::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Manifest file read once per run
pub const MANIFEST_FILE: &str = "package.json";

/// Represents the project being indexed
#[derive(Debug, Clone)]
pub struct Project {
    /// Absolute path to project root
    pub root: PathBuf,
    /// Name of the project (manifest name, else directory name)
    pub name: String,
    /// Declared dependencies
    pub manifest: ProjectManifest,
}

impl Project {
    /// Create project from explicit path (must exist)
    pub fn from_path(path: &Path) -> Result<Self> {
        let root = path.canonicalize().map_err(|_| Error::ProjectNotFound {
            path: path.to_path_buf(),
        })?;

        if !root.is_dir() {
            return Err(Error::ProjectNotFound { path: root });
        }

        let manifest = ProjectManifest::load(&root);
        let name = manifest
            .name
            .clone()
            .or_else(|| root.file_name().map(|n| n.to_string_lossy().to_string()))
            .unwrap_or_else(|| "unknown".to_string());

        Ok(Self {
            root,
            name,
            manifest,
        })
    }

    /// Project-relative path with `/` separators
    pub fn relative(&self, path: &Path) -> String {
        relative_path(&self.root, path)
    }
}

/// Render `path` relative to `root` using forward slashes
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
    name: Option<String>,
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, String>,
}

/// Dependency names (production + development) and their version specs
#[derive(Debug, Clone, Default)]
pub struct ProjectManifest {
    pub name: Option<String>,
    dependencies: BTreeMap<String, String>,
}

impl ProjectManifest {
    /// Load `package.json`, substituting an empty manifest on any failure
    pub fn load(root: &Path) -> Self {
        let path = root.join(MANIFEST_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No readable manifest");
                return Self::default();
            }
        };

        match Self::parse(&content) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Manifest unparseable, continuing without dependencies");
                Self::default()
            }
        }
    }

    /// Parse manifest text
    pub fn parse(content: &str) -> Result<Self> {
        let pkg: PackageJson = serde_json::from_str(content)?;
        let mut dependencies = pkg.dev_dependencies;
        // Production entries win when a name is declared twice
        dependencies.extend(pkg.dependencies);
        Ok(Self {
            name: pkg.name,
            dependencies,
        })
    }

    /// Build a manifest from dependency names (versions unknown)
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            dependencies: names
                .into_iter()
                .map(|n| (n.into(), "*".to_string()))
                .collect(),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }

    /// Whether any declared dependency starts with `prefix`
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.dependencies.keys().any(|k| k.starts_with(prefix))
    }

    pub fn version(&self, name: &str) -> Option<&str> {
        self.dependencies.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }
}
