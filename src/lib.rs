//! codeindex - token-budgeted codebase index for JS/TS projects
//!
//! Produces a compact JSON + Markdown map of a project (files, exported
//! symbols, framework facts, routes) sized to fit an AI assistant's context.

pub mod cli;
pub mod core;
pub mod detect;
pub mod extract;
pub mod index;
pub mod output;
pub mod parse;

pub use core::config::Config;
pub use core::error::{Error, Result};
pub use core::project::Project;
pub use index::{GenerateOptions, Generator, Mode, ProjectIndex};
