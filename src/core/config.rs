//! Configuration management
//!
//! Every section is optional; a project without `codeindex.toml` runs on the
//! defaults below.

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file
pub const CONFIG_FILE: &str = "codeindex.toml";

/// Generator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub walk: WalkConfig,
    pub limits: LimitsConfig,
    pub budget: BudgetConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Top-level directories scanned for source files
    pub critical_dirs: Vec<String>,
    /// Directory names never descended into
    pub skip_dirs: Vec<String>,
    /// Honour .gitignore files while walking
    pub respect_gitignore: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Files above this many characters are skipped before parsing
    pub max_file_chars: usize,
    /// Maximum distinct imports kept per file
    pub max_imports: usize,
    /// Maximum exports kept per file
    pub max_exports: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Approximate ceiling on the structured output, in tokens
    pub tokens: usize,
    /// Fraction of `tokens` after which file analysis stops
    pub threshold: f64,
    /// Serialized characters per estimated token
    pub chars_per_token: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Structured index, relative to the project root
    pub json_file: PathBuf,
    /// Human-readable rendering, relative to the project root
    pub markdown_file: PathBuf,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            critical_dirs: [
                "src",
                "app",
                "pages",
                "components",
                "lib",
                "utils",
                "hooks",
                "styles",
                "services",
                "store",
                "types",
                "api",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            skip_dirs: ["node_modules", "dist", "build", "out", "coverage"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            respect_gitignore: false,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_chars: 100_000,
            max_imports: 10,
            max_exports: 10,
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            tokens: 50_000,
            threshold: 0.8,
            chars_per_token: 4,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_file: PathBuf::from("codebase-index.json"),
            markdown_file: PathBuf::from("codebase-index.md"),
        }
    }
}

impl Config {
    /// Load configuration for a project.
    ///
    /// An explicit path must exist; otherwise `codeindex.toml` in the project
    /// root is used when present, and defaults when it is not.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(Error::ConfigError {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                path.to_path_buf()
            }
            None => {
                let default_path = project_root.join(CONFIG_FILE);
                if !default_path.is_file() {
                    return Ok(Config::default());
                }
                default_path
            }
        };

        let content = std::fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.budget.chars_per_token == 0 {
            return Err(Error::ConfigError {
                message: "budget.chars_per_token must be at least 1".to_string(),
            });
        }
        if !(self.budget.threshold > 0.0 && self.budget.threshold <= 1.0) {
            return Err(Error::ConfigError {
                message: format!(
                    "budget.threshold must be in (0, 1], got {}",
                    self.budget.threshold
                ),
            });
        }
        Ok(())
    }
}

impl BudgetConfig {
    /// Token estimate after which no further files are analyzed
    pub fn soft_limit(&self) -> usize {
        (self.tokens as f64 * self.threshold) as usize
    }
}
