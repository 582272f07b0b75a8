//! Directory summaries for the walked file set

use super::types::DirectoryRecord;
use crate::core::project::relative_path;
use crate::extract::classify_dir;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Purpose labels by directory name; the deepest known segment wins
const PURPOSES: &[(&str, &str)] = &[
    ("api", "API routes"),
    ("app", "App router"),
    ("pages", "Pages router"),
    ("components", "UI components"),
    ("hooks", "React hooks"),
    ("lib", "Shared utilities"),
    ("utils", "Shared utilities"),
    ("styles", "Stylesheets"),
    ("services", "Service layer"),
    ("store", "State management"),
    ("context", "React context"),
    ("types", "Type definitions"),
];

/// Human label for a project-relative directory
pub fn infer_purpose(dir: &str) -> String {
    dir.rsplit('/')
        .find_map(|segment| {
            PURPOSES
                .iter()
                .find(|(name, _)| *name == segment)
                .map(|(_, label)| label.to_string())
        })
        .unwrap_or_else(|| "Source files".to_string())
}

/// One record per directory that directly contains walked files
pub fn build_directories(root: &Path, files: &[PathBuf]) -> BTreeMap<String, DirectoryRecord> {
    let mut directories: BTreeMap<String, DirectoryRecord> = BTreeMap::new();

    for file in files {
        let dir = file
            .parent()
            .map(|p| relative_path(root, p))
            .unwrap_or_default();
        let dir = if dir.is_empty() { ".".to_string() } else { dir };

        let ext = file
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let modified: Option<DateTime<Utc>> = std::fs::metadata(file)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from);

        let record = directories.entry(dir.clone()).or_insert_with(|| DirectoryRecord {
            file_count: 0,
            extensions: BTreeMap::new(),
            purpose: infer_purpose(&dir),
            role: classify_dir(&dir),
            last_modified: None,
        });
        record.file_count += 1;
        *record.extensions.entry(ext).or_insert(0) += 1;
        if modified > record.last_modified {
            record.last_modified = modified;
        }
    }

    directories
}
