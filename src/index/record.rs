//! Turning one file's analysis into index entries

use super::types::{symbol_key, DeepDetail, FileRecord, FunctionInfo, SymbolDescriptor};
use crate::extract::{classify_file, classify_symbol, ExtractedFunction, FileAnalysis, SymbolRole};
use std::collections::{BTreeMap, BTreeSet};

fn info(f: &ExtractedFunction) -> FunctionInfo {
    FunctionInfo {
        name: f.name.clone(),
        params: f.params.clone(),
        is_async: f.is_async,
        exported: f.exported,
        line: f.start_line,
    }
}

impl FileRecord {
    /// Record for a parsed source file; functions are split by symbol role
    pub fn from_analysis(path: &str, analysis: &FileAnalysis) -> Self {
        let mut record = Self::bare(path);
        record.imports = analysis.imports.clone();
        record.exports = analysis.exports.clone();
        record.framework_features = analysis.framework_features.clone();

        for f in &analysis.functions {
            let bucket = match classify_symbol(path, &f.name) {
                SymbolRole::ApiHandler => &mut record.api_handlers,
                SymbolRole::Component => &mut record.components,
                SymbolRole::Hook => &mut record.hooks,
                SymbolRole::Function => &mut record.functions,
            };
            bucket.push(info(f));
        }
        record
    }

    /// Record for a file that is listed but not parsed (json, stylesheets)
    pub fn bare(path: &str) -> Self {
        Self {
            path: path.to_string(),
            role: classify_file(path),
            imports: BTreeSet::new(),
            exports: Vec::new(),
            functions: Vec::new(),
            components: Vec::new(),
            hooks: Vec::new(),
            api_handlers: Vec::new(),
            framework_features: BTreeSet::new(),
        }
    }
}

/// Descriptors for the exported functions of one file
pub fn exported_symbols(path: &str, analysis: &FileAnalysis) -> BTreeMap<String, SymbolDescriptor> {
    analysis
        .functions
        .iter()
        .filter(|f| f.exported)
        .map(|f| {
            let descriptor = SymbolDescriptor {
                file: path.to_string(),
                name: f.name.clone(),
                kind: classify_symbol(path, &f.name),
                params: f.params.clone(),
                is_async: f.is_async,
                signature: info(f).signature(),
            };
            (symbol_key(path, &f.name), descriptor)
        })
        .collect()
}

/// Deep detail for every function of one file
pub fn deep_details(path: &str, analysis: &FileAnalysis) -> BTreeMap<String, DeepDetail> {
    analysis
        .functions
        .iter()
        .map(|f| {
            let detail = DeepDetail {
                file: path.to_string(),
                name: f.name.clone(),
                kind: classify_symbol(path, &f.name),
                params: f.params.clone(),
                is_async: f.is_async,
                exported: f.exported,
                start_line: f.start_line,
                end_line: f.end_line,
                renders_jsx: f.has_jsx,
                hooks_used: f.hooks_used.clone(),
            };
            (symbol_key(path, &f.name), detail)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::FileRole;

    fn function(name: &str, exported: bool) -> ExtractedFunction {
        ExtractedFunction {
            name: name.to_string(),
            params: vec!["props".to_string()],
            is_async: false,
            exported,
            start_line: 1,
            end_line: 4,
            has_jsx: name == "Dashboard",
            hooks_used: Vec::new(),
        }
    }

    fn analysis() -> FileAnalysis {
        FileAnalysis {
            functions: vec![
                function("Dashboard", true),
                function("useStats", true),
                function("formatDate", false),
                function("GET", true),
            ],
            ..Default::default()
        }
    }

    fn names(functions: &[FunctionInfo]) -> Vec<String> {
        functions.iter().map(|f| f.name.clone()).collect()
    }

    #[test]
    fn test_functions_split_by_role() {
        let record = FileRecord::from_analysis("app/dashboard/page.tsx", &analysis());
        assert_eq!(record.role, FileRole::Page);
        // GET outside an API path is treated as a component
        assert_eq!(names(&record.components), vec!["Dashboard", "GET"]);
        assert_eq!(names(&record.hooks), vec!["useStats"]);
        assert_eq!(names(&record.functions), vec!["formatDate"]);
        assert!(record.api_handlers.is_empty());
    }

    #[test]
    fn test_api_handlers_in_api_path() {
        let record = FileRecord::from_analysis("app/api/stats/route.ts", &analysis());
        assert_eq!(record.api_handlers.len(), 1);
        assert_eq!(record.api_handlers[0].name, "GET");
    }

    #[test]
    fn test_only_exported_symbols_are_described() {
        let symbols = exported_symbols("app/dashboard/page.tsx", &analysis());
        let keys: Vec<&str> = symbols.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "app/dashboard/page.tsx:Dashboard",
                "app/dashboard/page.tsx:GET",
                "app/dashboard/page.tsx:useStats",
            ]
        );
        assert_eq!(symbols["app/dashboard/page.tsx:useStats"].kind, SymbolRole::Hook);
    }

    #[test]
    fn test_deep_details_cover_all_functions() {
        let details = deep_details("app/dashboard/page.tsx", &analysis());
        assert_eq!(details.len(), 4);
        let dash = &details["app/dashboard/page.tsx:Dashboard"];
        assert!(dash.renders_jsx);
        assert_eq!((dash.start_line, dash.end_line), (1, 4));
    }
}
