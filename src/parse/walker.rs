use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Extensions parsed into syntax trees
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Extra extensions recorded in full mode
pub const ASSET_EXTENSIONS: &[&str] = &["json", "css", "scss"];

/// Walks the project's critical directories
pub struct FileWalker {
    root: PathBuf,
    critical_dirs: Vec<String>,
    skip_dirs: Arc<Vec<String>>,
    extensions: Vec<String>,
    respect_gitignore: bool,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            critical_dirs: Vec::new(),
            skip_dirs: Arc::new(vec!["node_modules".to_string()]),
            extensions: SCRIPT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            respect_gitignore: false,
        }
    }

    pub fn critical_dirs(mut self, dirs: &[String]) -> Self {
        self.critical_dirs = dirs.to_vec();
        self
    }

    pub fn skip_dirs(mut self, dirs: &[String]) -> Self {
        self.skip_dirs = Arc::new(dirs.to_vec());
        self
    }

    pub fn extensions(mut self, exts: &[&str]) -> Self {
        self.extensions = exts.iter().map(|e| e.to_lowercase()).collect();
        self
    }

    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.respect_gitignore = yes;
        self
    }

    /// Walk all relevant files under the critical directories.
    ///
    /// Unreadable entries are dropped; the result is sorted per directory and
    /// free of duplicates.
    pub fn walk(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let mut seen = BTreeSet::new();

        for dir_name in &self.critical_dirs {
            if is_skipped_name(dir_name, &self.skip_dirs) {
                continue;
            }
            let dir = self.root.join(dir_name);
            if !dir.is_dir() {
                continue;
            }

            let skip = Arc::clone(&self.skip_dirs);
            let walker = WalkBuilder::new(&dir)
                .hidden(true)
                .parents(self.respect_gitignore)
                .ignore(self.respect_gitignore)
                .git_ignore(self.respect_gitignore)
                .git_global(self.respect_gitignore)
                .git_exclude(self.respect_gitignore)
                .require_git(false)
                .follow_links(false)
                .sort_by_file_name(|a, b| a.cmp(b))
                .filter_entry(move |entry| {
                    let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                    let name = entry.file_name().to_string_lossy();
                    if name.starts_with('.') {
                        return false;
                    }
                    !(is_dir && skip.iter().any(|s| s.as_str() == name.as_ref()))
                })
                .build();

            for entry in walker {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        debug!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                        continue;
                    }
                };

                if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                    continue;
                }

                let path = entry.path();
                if !self.has_relevant_extension(path) {
                    continue;
                }
                if seen.insert(path.to_path_buf()) {
                    files.push(path.to_path_buf());
                }
            }
        }

        files
    }

    fn has_relevant_extension(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            }
            None => false,
        }
    }
}

fn is_skipped_name(name: &str, skip_dirs: &[String]) -> bool {
    name.starts_with('.') || skip_dirs.iter().any(|s| s == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export const x = 1;\n").unwrap();
    }

    fn rel(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| crate::core::project::relative_path(root, f))
            .collect()
    }

    fn walker(root: &Path) -> FileWalker {
        FileWalker::new(root)
            .critical_dirs(&["src".to_string(), "components".to_string()])
            .skip_dirs(&["node_modules".to_string(), "dist".to_string()])
    }

    #[test]
    fn test_walks_only_critical_dirs() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/index.ts");
        touch(temp.path(), "components/Button.tsx");
        touch(temp.path(), "scripts/deploy.js");

        let files = walker(temp.path()).walk();
        assert_eq!(
            rel(temp.path(), &files),
            vec!["src/index.ts", "components/Button.tsx"]
        );
    }

    #[test]
    fn test_skips_hidden_and_dependency_dirs() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/app.ts");
        touch(temp.path(), "src/node_modules/lib/index.js");
        touch(temp.path(), "src/.cache/chunk.js");
        touch(temp.path(), "src/dist/bundle.js");
        touch(temp.path(), "src/.env.js");

        let files = walker(temp.path()).walk();
        assert_eq!(rel(temp.path(), &files), vec!["src/app.ts"]);
    }

    #[test]
    fn test_filters_extensions() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/a.tsx");
        touch(temp.path(), "src/README");
        touch(temp.path(), "src/notes.md");
        touch(temp.path(), "src/theme.css");

        let files = walker(temp.path()).walk();
        assert_eq!(rel(temp.path(), &files), vec!["src/a.tsx"]);

        let mut exts: Vec<&str> = SCRIPT_EXTENSIONS.to_vec();
        exts.extend_from_slice(ASSET_EXTENSIONS);
        let files = walker(temp.path()).extensions(&exts).walk();
        assert_eq!(rel(temp.path(), &files), vec!["src/a.tsx", "src/theme.css"]);
    }

    #[test]
    fn test_deterministic_and_deduplicated() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/b.ts");
        touch(temp.path(), "src/a.ts");
        touch(temp.path(), "src/nested/c.ts");

        let w = FileWalker::new(temp.path())
            .critical_dirs(&["src".to_string(), "src".to_string()]);
        let first = w.walk();
        let second = w.walk();
        assert_eq!(first, second);
        assert_eq!(
            rel(temp.path(), &first),
            vec!["src/a.ts", "src/b.ts", "src/nested/c.ts"]
        );
    }

    #[test]
    fn test_missing_critical_dir_is_ignored() {
        let temp = TempDir::new().unwrap();
        assert!(walker(temp.path()).walk().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subtree_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/a.ts");
        touch(temp.path(), "src/locked/b.ts");
        touch(temp.path(), "src/z.ts");
        let locked = temp.path().join("src/locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores directory permissions, so the subtree may still be listed
        let readable = fs::read_dir(&locked).is_ok();
        let files = walker(temp.path()).walk();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let expected = if readable {
            vec!["src/a.ts", "src/locked/b.ts", "src/z.ts"]
        } else {
            vec!["src/a.ts", "src/z.ts"]
        };
        assert_eq!(rel(temp.path(), &files), expected);
    }
}
