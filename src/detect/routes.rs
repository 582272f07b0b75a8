//! Route extraction for file-system routers
//!
//! Pages-style: every non-underscore file is a route, `index` maps to its
//! directory. App-style: only the special files below are routable and each
//! maps to its directory. `[id]` becomes `:id`, catch-alls become `:slug*`.

use crate::core::project::relative_path;
use crate::extract::classify::is_api_path;
use crate::parse::{FileWalker, SCRIPT_EXTENSIONS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Conventional app-router roots, in lookup order
pub const APP_ROOTS: &[&str] = &["app", "src/app"];

/// Conventional pages-router roots, in lookup order
pub const PAGES_ROOTS: &[&str] = &["pages", "src/pages"];

/// Basenames the app router treats as route segments
pub const APP_SPECIAL_FILES: &[&str] = &["page", "layout", "loading", "error", "not-found", "template"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteKind {
    Page,
    Layout,
    Loading,
    Error,
    NotFound,
    Template,
    Api,
}

impl RouteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Page => "page",
            RouteKind::Layout => "layout",
            RouteKind::Loading => "loading",
            RouteKind::Error => "error",
            RouteKind::NotFound => "not-found",
            RouteKind::Template => "template",
            RouteKind::Api => "api",
        }
    }
}

/// One routable file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub route: String,
    /// Project-relative source file
    pub file: String,
    pub kind: RouteKind,
}

/// Routes grouped by router style
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub app: Vec<RouteRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<RouteRecord>,
}

impl RouteTable {
    pub fn is_empty(&self) -> bool {
        self.app.is_empty() && self.pages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.app.len() + self.pages.len()
    }
}

/// First existing routing root among `candidates`
pub fn find_root(project_root: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|c| project_root.join(c))
        .find(|p| p.is_dir())
}

/// Script files under a routing root, in walk order
pub fn route_files(project_root: &Path, routing_root: &Path, skip_dirs: &[String]) -> Vec<PathBuf> {
    let rel = relative_path(project_root, routing_root);
    FileWalker::new(project_root)
        .critical_dirs(&[rel])
        .skip_dirs(skip_dirs)
        .extensions(SCRIPT_EXTENSIONS)
        .walk()
}

fn split_stem(path: &str) -> (&str, &str) {
    let (dir, file) = match path.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", path),
    };
    let stem = file.rsplit_once('.').map(|(s, _)| s).unwrap_or(file);
    (dir, stem)
}

/// Stem of the file name, without extension
pub fn basename_stem(path: &str) -> &str {
    split_stem(path).1
}

fn dynamic_segment(segment: &str) -> String {
    if let Some(inner) = segment.strip_prefix("[[...").and_then(|s| s.strip_suffix("]]")) {
        format!(":{}*", inner)
    } else if let Some(inner) = segment.strip_prefix("[...").and_then(|s| s.strip_suffix(']')) {
        format!(":{}*", inner)
    } else if let Some(inner) = segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        format!(":{}", inner)
    } else {
        segment.to_string()
    }
}

fn join_route<'a, I: IntoIterator<Item = &'a str>>(segments: I) -> String {
    let parts: Vec<String> = segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(dynamic_segment)
        .collect();
    format!("/{}", parts.join("/"))
}

/// Route for a file relative to a pages root; `None` for private files
pub fn pages_route(rel: &str) -> Option<String> {
    if rel.split('/').any(|segment| segment.starts_with('_')) {
        return None;
    }
    let (dir, stem) = split_stem(rel);
    let mut path = if dir.is_empty() {
        stem.to_string()
    } else {
        format!("{}/{}", dir, stem)
    };
    if path == "index" {
        return Some("/".to_string());
    }
    if let Some(stripped) = path.strip_suffix("/index") {
        path = stripped.to_string();
    }
    Some(join_route(path.split('/')))
}

/// Route for a file relative to an app root; `None` unless it is a special file
pub fn app_route(rel: &str) -> Option<String> {
    let (dir, stem) = split_stem(rel);
    if !APP_SPECIAL_FILES.contains(&stem) {
        return None;
    }
    // Route groups such as `(marketing)` do not appear in the URL
    let segments = dir
        .split('/')
        .filter(|s| !(s.starts_with('(') && s.ends_with(')')));
    Some(join_route(segments))
}

/// Kind by basename, else api under an API segment, else page
pub fn route_kind(project_rel: &str) -> RouteKind {
    match basename_stem(project_rel) {
        "page" => RouteKind::Page,
        "layout" => RouteKind::Layout,
        "loading" => RouteKind::Loading,
        "error" => RouteKind::Error,
        "not-found" => RouteKind::NotFound,
        "template" => RouteKind::Template,
        _ if is_api_path(project_rel) => RouteKind::Api,
        _ => RouteKind::Page,
    }
}

/// Routes from every existing root among `candidates`; on a duplicate
/// (route, kind) the earlier root wins
fn collect_routes(
    project_root: &Path,
    candidates: &[&str],
    skip_dirs: &[String],
    derive: fn(&str) -> Option<String>,
) -> Vec<RouteRecord> {
    let mut seen = HashSet::new();
    let mut routes = Vec::new();
    let roots = candidates
        .iter()
        .map(|c| project_root.join(c))
        .filter(|p| p.is_dir());

    for routing_root in roots {
        for file in route_files(project_root, &routing_root, skip_dirs) {
            let Some(route) = derive(&relative_path(&routing_root, &file)) else {
                continue;
            };
            let project_rel = relative_path(project_root, &file);
            let kind = route_kind(&project_rel);
            // page + layout for one directory are distinct entries
            if seen.insert((route.clone(), kind)) {
                routes.push(RouteRecord {
                    route,
                    file: project_rel,
                    kind,
                });
            }
        }
    }
    routes
}

/// Extract routes from every routing root present in the project
pub fn extract_routes(project_root: &Path, skip_dirs: &[String]) -> RouteTable {
    RouteTable {
        app: collect_routes(project_root, APP_ROOTS, skip_dirs, app_route),
        pages: collect_routes(project_root, PAGES_ROOTS, skip_dirs, pages_route),
    }
}
