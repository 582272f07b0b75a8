//! Language detection and tree-sitter grammar loading

use std::path::Path;

/// Source kinds the indexer recognizes by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    JavaScriptReact,
    TypeScript,
    TypeScriptReact,
    // Assets walked in full mode; recorded but never parsed
    Json,
    Css,
    Scss,
    Unknown,
}

impl Language {
    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }

    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "js" => Language::JavaScript,
            "jsx" => Language::JavaScriptReact,
            "ts" => Language::TypeScript,
            "tsx" => Language::TypeScriptReact,
            "json" => Language::Json,
            "css" => Language::Css,
            "scss" => Language::Scss,
            _ => Language::Unknown,
        }
    }

    /// Get the language name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::JavaScriptReact => "javascriptreact",
            Language::TypeScript => "typescript",
            Language::TypeScriptReact => "typescriptreact",
            Language::Json => "json",
            Language::Css => "css",
            Language::Scss => "scss",
            Language::Unknown => "unknown",
        }
    }

    /// Check if this language is parsed into a syntax tree
    pub fn has_ast_support(&self) -> bool {
        matches!(
            self,
            Language::JavaScript
                | Language::JavaScriptReact
                | Language::TypeScript
                | Language::TypeScriptReact
        )
    }

    /// Whether the typed grammar is needed
    pub fn is_typed(&self) -> bool {
        matches!(self, Language::TypeScript | Language::TypeScriptReact)
    }

    pub fn is_stylesheet(&self) -> bool {
        matches!(self, Language::Css | Language::Scss)
    }

    /// Get the tree-sitter language for this language.
    ///
    /// JSX is always enabled: the JavaScript grammar parses it natively and
    /// typed sources use the TSX grammar.
    pub fn tree_sitter_language(&self) -> Option<tree_sitter::Language> {
        match self {
            Language::TypeScript | Language::TypeScriptReact => {
                Some(tree_sitter_typescript::LANGUAGE_TSX.into())
            }
            Language::JavaScript | Language::JavaScriptReact => {
                Some(tree_sitter_javascript::LANGUAGE.into())
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
