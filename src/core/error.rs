//! Error types for codeindex

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using codeindex's Error
pub type Result<T> = std::result::Result<T, Error>;

/// codeindex error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Project not found: {path}")]
    ProjectNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// A bundled grammar could not be loaded into the parser. This is the
    /// only condition that aborts a run.
    #[error("Failed to load {language} grammar: {message}")]
    Grammar { language: String, message: String },

    #[error("Syntax error in {path} at {line}:{column}")]
    Parse {
        path: String,
        line: usize,
        column: usize,
    },

    #[error("{path} is {chars} characters, above the {limit} character limit")]
    FileTooLarge {
        path: String,
        chars: usize,
        limit: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Whether this error must stop the run instead of skipping one file
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Grammar { .. })
    }
}
