//! Index document types
//!
//! Everything here serializes with camelCase keys; maps are `BTreeMap` so two
//! runs over an unchanged project produce identical documents apart from
//! timestamps.

use crate::detect::ProjectFacts;
use crate::extract::{FileRole, SymbolRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Generation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Scripts only, silent parse skips, no routes or deep detail
    Compact,
    /// Assets too, warned parse skips, verified router, routes, deep detail
    Full,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Compact => "compact",
            Mode::Full => "full",
        }
    }
}

/// A declared function as stored in a file record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
    pub name: String,
    pub params: Vec<String>,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub exported: bool,
    pub line: usize,
}

impl FunctionInfo {
    /// `async name(a, {b, c})`
    pub fn signature(&self) -> String {
        format!(
            "{}{}({})",
            if self.is_async { "async " } else { "" },
            self.name,
            self.params.join(", ")
        )
    }
}

/// One analyzed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub path: String,
    pub role: FileRole,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub imports: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<FunctionInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<FunctionInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub api_handlers: Vec<FunctionInfo>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub framework_features: BTreeSet<String>,
}

/// One directory containing walked files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryRecord {
    pub file_count: usize,
    /// Extension (without dot) to file count
    pub extensions: BTreeMap<String, usize>,
    pub purpose: String,
    pub role: FileRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Exported function keyed by `path:name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolDescriptor {
    pub file: String,
    pub name: String,
    pub kind: SymbolRole,
    pub params: Vec<String>,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub signature: String,
}

/// On-demand elaboration of one function, keyed by `path:name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepDetail {
    pub file: String,
    pub name: String,
    pub kind: SymbolRole,
    pub params: Vec<String>,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub exported: bool,
    pub start_line: usize,
    pub end_line: usize,
    pub renders_jsx: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hooks_used: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMetadata {
    pub generated_at: DateTime<Utc>,
    pub generator: String,
    pub project: String,
    pub mode: Mode,
    pub framework: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework_version: Option<String>,
    pub files_walked: usize,
    pub files_indexed: usize,
    pub token_estimate: usize,
    pub token_budget: usize,
    /// File analysis stopped at the budget threshold
    pub truncated: bool,
}

/// Root document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIndex {
    pub metadata: IndexMetadata,
    pub directories: BTreeMap<String, DirectoryRecord>,
    pub files: BTreeMap<String, FileRecord>,
    pub symbols: BTreeMap<String, SymbolDescriptor>,
    pub facts: ProjectFacts,
    /// Free-form values so entries written by other tools survive a merge
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub deep_detail: BTreeMap<String, serde_json::Value>,
}

/// `path:name` key shared by symbols and deep detail
pub fn symbol_key(path: &str, name: &str) -> String {
    format!("{}:{}", path, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature() {
        let f = FunctionInfo {
            name: "getUser".to_string(),
            params: vec!["id".to_string(), "{include}".to_string()],
            is_async: true,
            exported: true,
            line: 3,
        };
        assert_eq!(f.signature(), "async getUser(id, {include})");
    }

    #[test]
    fn test_file_record_keys_are_camel_case() {
        let record = FileRecord {
            path: "pages/api/login.ts".to_string(),
            role: FileRole::ApiHandler,
            imports: BTreeSet::new(),
            exports: vec!["default".to_string()],
            functions: Vec::new(),
            components: Vec::new(),
            hooks: Vec::new(),
            api_handlers: vec![FunctionInfo {
                name: "default".to_string(),
                params: vec!["req".to_string(), "res".to_string()],
                is_async: false,
                exported: true,
                line: 1,
            }],
            framework_features: BTreeSet::new(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["role"], "api-handler");
        assert_eq!(json["apiHandlers"][0]["async"], false);
        assert!(json.get("imports").is_none());
    }
}
