//! Path and name heuristics
//!
//! Roles are inferred from naming conventions only: a lower-case React
//! component or a hook that skips the `use` prefix is misclassified. That is
//! a known limitation; no semantic inference is attempted.

use crate::parse::Language;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// HTTP verbs recognized as route handlers inside API paths
pub const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// Semantic role of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileRole {
    Page,
    Layout,
    Component,
    Hook,
    ApiHandler,
    Utility,
    Style,
    Source,
}

impl FileRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileRole::Page => "page",
            FileRole::Layout => "layout",
            FileRole::Component => "component",
            FileRole::Hook => "hook",
            FileRole::ApiHandler => "api-handler",
            FileRole::Utility => "utility",
            FileRole::Style => "style",
            FileRole::Source => "source",
        }
    }
}

impl std::fmt::Display for FileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Semantic role of a declared function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymbolRole {
    Component,
    Hook,
    ApiHandler,
    Function,
}

impl SymbolRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolRole::Component => "component",
            SymbolRole::Hook => "hook",
            SymbolRole::ApiHandler => "api-handler",
            SymbolRole::Function => "function",
        }
    }
}

impl std::fmt::Display for SymbolRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Leading-slash form so segment checks also match the first component
fn anchored(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

/// Whether a project-relative path lies under an `api` directory
pub fn is_api_path(path: &str) -> bool {
    anchored(path).contains("/api/")
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Classify a file by its project-relative path. First matching rule wins.
pub fn classify_file(path: &str) -> FileRole {
    let p = anchored(path);
    let name = file_name(&p);

    if Language::from_path(Path::new(&p)).is_stylesheet() {
        FileRole::Style
    } else if p.contains("/api/") {
        FileRole::ApiHandler
    } else if p.contains("/pages/") {
        FileRole::Page
    } else if p.contains("/app/") && name.starts_with("page.") {
        FileRole::Page
    } else if p.contains("/app/") && name.starts_with("layout.") {
        FileRole::Layout
    } else if p.contains("/components/") {
        FileRole::Component
    } else if p.contains("/hooks/") {
        FileRole::Hook
    } else if p.contains("/lib/") || p.contains("/utils/") {
        FileRole::Utility
    } else {
        FileRole::Source
    }
}

/// Classify a directory with the file rules
pub fn classify_dir(dir: &str) -> FileRole {
    classify_file(&format!("{}/", dir.trim_end_matches('/')))
}

/// Upper-case first character
pub fn is_component_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

/// `use` prefix followed by an upper-case character
pub fn is_hook_name(name: &str) -> bool {
    name.starts_with("use") && name.chars().nth(3).is_some_and(|c| c.is_uppercase())
}

pub fn is_http_method(name: &str) -> bool {
    HTTP_METHODS.contains(&name)
}

/// Classify a declared function.
///
/// API context is checked first, so an upper-case verb such as `GET` is a
/// handler inside `/api/` and a component everywhere else.
pub fn classify_symbol(path: &str, name: &str) -> SymbolRole {
    if is_api_path(path) && (is_http_method(name) || name == "default") {
        SymbolRole::ApiHandler
    } else if is_component_name(name) {
        SymbolRole::Component
    } else if is_hook_name(name) {
        SymbolRole::Hook
    } else {
        SymbolRole::Function
    }
}
