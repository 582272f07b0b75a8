//! Budgeted accumulation of index entries
//!
//! Token usage is estimated as serialized JSON characters divided by a fixed
//! ratio. Once the estimate passes the soft limit the assembler reports
//! itself exhausted and callers stop analyzing files; project-level facts are
//! still attached by [`IndexAssembler::finish`].

use super::types::{
    DirectoryRecord, FileRecord, IndexMetadata, ProjectIndex, SymbolDescriptor,
};
use crate::core::config::BudgetConfig;
use crate::detect::ProjectFacts;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Running token estimate against a budget
#[derive(Debug, Clone)]
pub struct TokenBudget {
    limit: usize,
    soft_limit: usize,
    chars_per_token: usize,
    used: usize,
}

impl TokenBudget {
    pub fn new(config: &BudgetConfig) -> Self {
        Self {
            limit: config.tokens,
            soft_limit: config.soft_limit(),
            chars_per_token: config.chars_per_token.max(1),
            used: 0,
        }
    }

    /// Tokens for a number of serialized characters, rounded up
    pub fn estimate_chars(&self, chars: usize) -> usize {
        chars.div_ceil(self.chars_per_token)
    }

    /// Estimate a value's serialized size and add it to the running total
    pub fn charge<T: Serialize>(&mut self, value: &T) -> usize {
        let chars = serde_json::to_string(value).map(|s| s.len()).unwrap_or(0);
        let tokens = self.estimate_chars(chars);
        self.used += tokens;
        tokens
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Past the soft threshold
    pub fn exhausted(&self) -> bool {
        self.used > self.soft_limit
    }
}

/// Facts that do not come from the file walk
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    pub project: String,
    pub mode: super::types::Mode,
    pub framework: String,
    pub framework_version: Option<String>,
    pub files_walked: usize,
}

/// Accumulates directory and file entries under a token budget
#[derive(Debug)]
pub struct IndexAssembler {
    budget: TokenBudget,
    directories: BTreeMap<String, DirectoryRecord>,
    files: BTreeMap<String, FileRecord>,
    symbols: BTreeMap<String, SymbolDescriptor>,
    truncated: bool,
}

impl IndexAssembler {
    pub fn new(budget: TokenBudget) -> Self {
        Self {
            budget,
            directories: BTreeMap::new(),
            files: BTreeMap::new(),
            symbols: BTreeMap::new(),
            truncated: false,
        }
    }

    pub fn add_directories(&mut self, directories: BTreeMap<String, DirectoryRecord>) {
        self.budget.charge(&directories);
        self.directories.extend(directories);
    }

    /// Add one file record and its exported symbols.
    ///
    /// Returns `false` without adding anything when the path is already
    /// present.
    pub fn add_file(
        &mut self,
        record: FileRecord,
        symbols: BTreeMap<String, SymbolDescriptor>,
    ) -> bool {
        if self.files.contains_key(&record.path) {
            return false;
        }
        let tokens = self.budget.charge(&record) + self.budget.charge(&symbols);
        debug!(path = %record.path, tokens, total = self.budget.used(), "Added file record");
        self.files.insert(record.path.clone(), record);
        self.symbols.extend(symbols);
        true
    }

    pub fn is_exhausted(&self) -> bool {
        self.budget.exhausted()
    }

    /// Record that files were left unanalyzed
    pub fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    pub fn tokens_used(&self) -> usize {
        self.budget.used()
    }

    /// Attach project facts and produce the final document
    pub fn finish(
        mut self,
        summary: ProjectSummary,
        facts: ProjectFacts,
        deep_detail: BTreeMap<String, serde_json::Value>,
    ) -> ProjectIndex {
        self.budget.charge(&facts);
        let metadata = IndexMetadata {
            generated_at: chrono::Utc::now(),
            generator: format!("codeindex {}", env!("CARGO_PKG_VERSION")),
            project: summary.project,
            mode: summary.mode,
            framework: summary.framework,
            framework_version: summary.framework_version,
            files_walked: summary.files_walked,
            files_indexed: self.files.len(),
            token_estimate: self.budget.used(),
            token_budget: self.budget.limit(),
            truncated: self.truncated,
        };

        ProjectIndex {
            metadata,
            directories: self.directories,
            files: self.files,
            symbols: self.symbols,
            facts,
            deep_detail,
        }
    }
}
