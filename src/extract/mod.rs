//! Symbol extraction
//!
//! Walks a parsed file once and produces an immutable [`FileAnalysis`]:
//! external imports, exported names, declared functions with their
//! parameters, and framework data-fetching markers.

pub mod classify;
pub mod params;
pub mod symbols;

pub use classify::{classify_dir, classify_file, classify_symbol, FileRole, SymbolRole};
pub use symbols::extract;

use std::collections::BTreeSet;

/// Next.js data-fetching entry points recorded as framework features
pub const DATA_FETCHING_ENTRY_POINTS: &[&str] =
    &["getServerSideProps", "getStaticProps", "getStaticPaths"];

/// Caps applied while collecting
#[derive(Debug, Clone, Copy)]
pub struct ExtractLimits {
    pub max_imports: usize,
    pub max_exports: usize,
}

impl Default for ExtractLimits {
    fn default() -> Self {
        Self {
            max_imports: 10,
            max_exports: 10,
        }
    }
}

/// A function declaration or arrow-function variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFunction {
    pub name: String,
    pub params: Vec<String>,
    pub is_async: bool,
    pub exported: bool,
    /// 1-based
    pub start_line: usize,
    pub end_line: usize,
    /// Body renders JSX
    pub has_jsx: bool,
    /// Hooks called inside the body, in first-call order
    pub hooks_used: Vec<String>,
}

/// Everything extracted from one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAnalysis {
    pub imports: BTreeSet<String>,
    pub exports: Vec<String>,
    pub functions: Vec<ExtractedFunction>,
    pub framework_features: BTreeSet<String>,
}

/// Accumulates one file's analysis during the tree walk
#[derive(Debug)]
pub struct AnalysisBuilder {
    limits: ExtractLimits,
    analysis: FileAnalysis,
}

impl AnalysisBuilder {
    pub fn new(limits: ExtractLimits) -> Self {
        Self {
            limits,
            analysis: FileAnalysis::default(),
        }
    }

    /// Record an import source; relative and absolute paths are dropped
    pub fn add_import(&mut self, source: &str) {
        if source.is_empty() || source.starts_with('.') || source.starts_with('/') {
            return;
        }
        let imports = &mut self.analysis.imports;
        if imports.len() < self.limits.max_imports || imports.contains(source) {
            imports.insert(source.to_string());
        }
    }

    pub fn add_export(&mut self, name: &str) {
        let exports = &mut self.analysis.exports;
        if exports.len() < self.limits.max_exports && !exports.iter().any(|e| e == name) {
            exports.push(name.to_string());
        }
    }

    /// Record a function and return its index for later body annotations
    pub fn add_function(&mut self, function: ExtractedFunction) -> usize {
        self.analysis.functions.push(function);
        self.analysis.functions.len() - 1
    }

    pub fn mark_jsx(&mut self, index: usize) {
        if let Some(f) = self.analysis.functions.get_mut(index) {
            f.has_jsx = true;
        }
    }

    pub fn add_hook_use(&mut self, index: usize, hook: &str) {
        if let Some(f) = self.analysis.functions.get_mut(index) {
            if !f.hooks_used.iter().any(|h| h == hook) {
                f.hooks_used.push(hook.to_string());
            }
        }
    }

    pub fn add_feature(&mut self, name: &str) {
        self.analysis.framework_features.insert(name.to_string());
    }

    pub fn finish(self) -> FileAnalysis {
        self.analysis
    }
}

pub fn is_data_fetching_entry_point(name: &str) -> bool {
    DATA_FETCHING_ENTRY_POINTS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_cap_and_filter() {
        let mut builder = AnalysisBuilder::new(ExtractLimits {
            max_imports: 2,
            max_exports: 2,
        });
        builder.add_import("./local");
        builder.add_import("/abs/path");
        builder.add_import("react");
        builder.add_import("next/link");
        builder.add_import("react");
        builder.add_import("zod");

        let analysis = builder.finish();
        assert_eq!(analysis.imports.len(), 2);
        assert!(analysis.imports.contains("react"));
        assert!(analysis.imports.contains("next/link"));
    }

    #[test]
    fn test_export_cap_keeps_order() {
        let mut builder = AnalysisBuilder::new(ExtractLimits {
            max_imports: 10,
            max_exports: 3,
        });
        for name in ["b", "a", "b", "c", "d"] {
            builder.add_export(name);
        }
        assert_eq!(builder.finish().exports, vec!["b", "a", "c"]);
    }
}
