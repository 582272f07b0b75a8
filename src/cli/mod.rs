//! CLI definition and handler

pub mod generate;

use clap::{ArgAction, Parser};
use std::path::PathBuf;

const LONG_ABOUT: &str = r#"
Generate a token-budgeted index of a JavaScript/TypeScript codebase.

Walks the project's source directories, parses every script with
tree-sitter and writes two files to the project root:

    codebase-index.json   Structured index (files, symbols, facts, routes)
    codebase-index.md     The same index rendered for reading

MODES:
    codeindex                 Compact: scripts only, no routes
    codeindex --full          Full: assets, routes and deep detail

Analysis stops once the estimated output reaches 80% of the token
budget; project facts are always included.

CONFIGURATION:
    codeindex.toml in the project root, or --config <FILE>.
    Set CODEINDEX_LOG=debug to see skipped files.
"#;

/// Token-budgeted JS/TS codebase index generator
#[derive(Parser, Debug)]
#[command(name = "codeindex")]
#[command(author, version)]
#[command(about = "Token-budgeted JS/TS codebase index generator")]
#[command(long_about = LONG_ABOUT)]
#[command(after_help = "EXAMPLES:
    codeindex                              Index current directory
    codeindex ~/code/shop --full           Full index with routes
    codeindex --budget 20000               Smaller output
    codeindex --full --deep src/lib/db.ts  Elaborate one file's functions")]
pub struct Cli {
    /// Project path (default: current directory)
    pub path: Option<PathBuf>,

    /// Full mode: assets, verified router, routes and deep detail
    #[arg(long)]
    pub full: bool,

    /// Token budget for the structured output
    #[arg(short, long, value_name = "TOKENS")]
    pub budget: Option<usize>,

    /// Produce deep detail for this file (repeat for more files)
    #[arg(long, value_name = "FILE", action = ArgAction::Append, requires = "full")]
    pub deep: Vec<PathBuf>,

    /// Config file (default: codeindex.toml in the project root)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// No progress output
    #[arg(short, long)]
    pub quiet: bool,
}
