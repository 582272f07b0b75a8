//! Project-wide pattern detection from the manifest and well-known files

use super::routes::{
    basename_stem, find_root, route_files, APP_ROOTS, APP_SPECIAL_FILES, PAGES_ROOTS,
};
use super::{ProjectFacts, RouterStyle};
use crate::core::project::ProjectManifest;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// (dependency, label) in priority order
const STATE_LIBRARIES: &[(&str, &str)] = &[
    ("@reduxjs/toolkit", "redux"),
    ("redux", "redux"),
    ("zustand", "zustand"),
    ("jotai", "jotai"),
    ("recoil", "recoil"),
    ("mobx", "mobx"),
    ("valtio", "valtio"),
    ("xstate", "xstate"),
];

const STYLING_LIBRARIES: &[(&str, &str)] = &[
    ("tailwindcss", "tailwind"),
    ("styled-components", "styled-components"),
    ("@emotion/react", "emotion"),
    ("@emotion/styled", "emotion"),
    ("sass", "sass"),
    ("@mui/material", "mui"),
    ("@chakra-ui/react", "chakra"),
];

const DATA_LIBRARIES: &[(&str, &str)] = &[
    ("@tanstack/react-query", "react-query"),
    ("react-query", "react-query"),
    ("swr", "swr"),
    ("@apollo/client", "apollo"),
    ("urql", "urql"),
    ("@trpc/client", "trpc"),
    ("axios", "axios"),
];

const FRAMEWORKS: &[(&str, &str)] = &[
    ("next", "nextjs"),
    ("@remix-run/react", "remix"),
    ("gatsby", "gatsby"),
    ("@sveltejs/kit", "sveltekit"),
    ("nuxt", "nuxt"),
    ("vue", "vue"),
    ("react", "react"),
    ("express", "express"),
];

const TAILWIND_CONFIGS: &[&str] = &[
    "tailwind.config.js",
    "tailwind.config.cjs",
    "tailwind.config.mjs",
    "tailwind.config.ts",
];

/// Global stylesheets checked for Tailwind directives
const GLOBAL_STYLESHEETS: &[&str] = &[
    "app/globals.css",
    "src/app/globals.css",
    "styles/globals.css",
    "src/styles/globals.css",
    "src/index.css",
    "src/App.css",
];

static TAILWIND_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    // @tailwind base;  or  @import "tailwindcss";
    Regex::new(r#"(?m)^\s*@(tailwind\s+\w+|import\s+["']tailwindcss)"#).unwrap()
});

/// Inspects manifest and filesystem for project-level facts
pub struct PatternDetector<'a> {
    root: &'a Path,
    manifest: &'a ProjectManifest,
    skip_dirs: &'a [String],
    verify_router_files: bool,
}

impl<'a> PatternDetector<'a> {
    pub fn new(root: &'a Path, manifest: &'a ProjectManifest, skip_dirs: &'a [String]) -> Self {
        Self {
            root,
            manifest,
            skip_dirs,
            verify_router_files: false,
        }
    }

    /// Require routable files, not just a routing directory
    pub fn verify_router_files(mut self, yes: bool) -> Self {
        self.verify_router_files = yes;
        self
    }

    /// Detect all facts; routes are filled in separately
    pub fn detect(&self) -> ProjectFacts {
        let tailwind = self.has_tailwind();
        let styling = if tailwind {
            "tailwind".to_string()
        } else {
            first_match(self.manifest, STYLING_LIBRARIES, "css")
        };

        ProjectFacts {
            router: self.router_style(),
            typescript: self.has_typescript(),
            tailwind,
            styling,
            state_management: first_match(self.manifest, STATE_LIBRARIES, "context"),
            data_fetching: first_match(self.manifest, DATA_LIBRARIES, "fetch"),
            routes: Default::default(),
        }
    }

    pub fn has_typescript(&self) -> bool {
        self.root.join("tsconfig.json").is_file()
            || self.manifest.has("typescript")
            || self.manifest.has_prefix("@types/")
    }

    pub fn has_tailwind(&self) -> bool {
        if self.manifest.has("tailwindcss") {
            return true;
        }
        if TAILWIND_CONFIGS.iter().any(|c| self.root.join(c).is_file()) {
            return true;
        }
        GLOBAL_STYLESHEETS.iter().any(|sheet| {
            std::fs::read_to_string(self.root.join(sheet))
                .map(|css| TAILWIND_DIRECTIVE.is_match(&css))
                .unwrap_or(false)
        })
    }

    /// App router wins over pages router when both exist
    pub fn router_style(&self) -> RouterStyle {
        if self.has_router(APP_ROOTS, is_app_route_file) {
            RouterStyle::App
        } else if self.has_router(PAGES_ROOTS, is_pages_route_file) {
            RouterStyle::Pages
        } else {
            RouterStyle::Unknown
        }
    }

    fn has_router(&self, candidates: &[&str], routable: fn(&Path) -> bool) -> bool {
        if !self.verify_router_files {
            return find_root(self.root, candidates).is_some();
        }
        candidates
            .iter()
            .map(|c| self.root.join(c))
            .filter(|dir| dir.is_dir())
            .any(|dir| {
                route_files(self.root, &dir, self.skip_dirs)
                    .iter()
                    .any(|f| routable(f))
            })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn is_app_route_file(path: &Path) -> bool {
    APP_SPECIAL_FILES.contains(&basename_stem(&file_name(path)))
}

fn is_pages_route_file(path: &Path) -> bool {
    !file_name(path).starts_with('_')
}

/// Label of the first library in `table` that the manifest declares
fn first_match(manifest: &ProjectManifest, table: &[(&str, &str)], default: &str) -> String {
    table
        .iter()
        .find(|(dep, _)| manifest.has(dep))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| default.to_string())
}

/// Framework label and declared version
pub fn detect_framework(manifest: &ProjectManifest) -> (String, Option<String>) {
    FRAMEWORKS
        .iter()
        .find(|(dep, _)| manifest.has(dep))
        .map(|(dep, label)| (label.to_string(), manifest.version(dep).map(str::to_string)))
        .unwrap_or_else(|| ("unknown".to_string(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn facts(root: &Path, manifest: &ProjectManifest, verify: bool) -> ProjectFacts {
        PatternDetector::new(root, manifest, &[])
            .verify_router_files(verify)
            .detect()
    }

    #[test]
    fn test_defaults_for_empty_project() {
        let temp = TempDir::new().unwrap();
        let f = facts(temp.path(), &ProjectManifest::default(), false);
        assert_eq!(f.router, RouterStyle::Unknown);
        assert!(!f.typescript);
        assert!(!f.tailwind);
        assert_eq!(f.styling, "css");
        assert_eq!(f.state_management, "context");
        assert_eq!(f.data_fetching, "fetch");
    }

    #[test]
    fn test_priority_order() {
        let temp = TempDir::new().unwrap();
        let manifest = ProjectManifest::from_names(["axios", "swr", "jotai", "zustand", "sass"]);
        let f = facts(temp.path(), &manifest, false);
        assert_eq!(f.state_management, "zustand");
        assert_eq!(f.data_fetching, "swr");
        assert_eq!(f.styling, "sass");
    }

    #[test]
    fn test_typescript_signals() {
        let temp = TempDir::new().unwrap();
        let manifest = ProjectManifest::from_names(["@types/react"]);
        assert!(facts(temp.path(), &manifest, false).typescript);

        write(temp.path(), "tsconfig.json", "{}");
        assert!(facts(temp.path(), &ProjectManifest::default(), false).typescript);
    }

    #[test]
    fn test_tailwind_from_directive() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "src/app/globals.css",
            "@tailwind base;\n@tailwind components;\n",
        );
        let f = facts(temp.path(), &ProjectManifest::from_names(["sass"]), false);
        assert!(f.tailwind);
        assert_eq!(f.styling, "tailwind");
    }

    #[test]
    fn test_tailwind_v4_import() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "app/globals.css", "@import \"tailwindcss\";\n");
        assert!(facts(temp.path(), &ProjectManifest::default(), false).tailwind);
    }

    #[test]
    fn test_router_by_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src/pages")).unwrap();
        assert_eq!(
            facts(temp.path(), &ProjectManifest::default(), false).router,
            RouterStyle::Pages
        );

        fs::create_dir_all(temp.path().join("app")).unwrap();
        assert_eq!(
            facts(temp.path(), &ProjectManifest::default(), false).router,
            RouterStyle::App
        );
    }

    #[test]
    fn test_router_verification_requires_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "app/components/Nav.tsx", "export {}");
        write(temp.path(), "pages/_app.tsx", "export {}");
        let empty = ProjectManifest::default();

        assert_eq!(facts(temp.path(), &empty, false).router, RouterStyle::App);
        assert_eq!(facts(temp.path(), &empty, true).router, RouterStyle::Unknown);

        write(temp.path(), "pages/about.tsx", "export {}");
        assert_eq!(facts(temp.path(), &empty, true).router, RouterStyle::Pages);

        write(temp.path(), "app/dashboard/page.tsx", "export {}");
        assert_eq!(facts(temp.path(), &empty, true).router, RouterStyle::App);
    }

    #[test]
    fn test_framework_detection() {
        let manifest = ProjectManifest::parse(
            r#"{"dependencies": {"next": "14.2.3", "react": "18.3.1"}}"#,
        )
        .unwrap();
        assert_eq!(
            detect_framework(&manifest),
            ("nextjs".to_string(), Some("14.2.3".to_string()))
        );
        assert_eq!(
            detect_framework(&ProjectManifest::default()),
            ("unknown".to_string(), None)
        );
    }
}
