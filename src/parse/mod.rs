//! File discovery and source parsing

mod languages;
mod parser;
mod walker;

pub use languages::Language;
pub use parser::SourceParser;
pub use walker::{FileWalker, ASSET_EXTENSIONS, SCRIPT_EXTENSIONS};
