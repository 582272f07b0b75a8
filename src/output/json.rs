//! JSON output

use crate::core::error::Result;
use crate::index::ProjectIndex;
use std::path::Path;

/// Pretty-printed JSON document
pub fn format(index: &ProjectIndex) -> Result<String> {
    Ok(serde_json::to_string_pretty(index)?)
}

/// Write the document in one go; returns the number of characters written
pub fn write(path: &Path, index: &ProjectIndex) -> Result<usize> {
    let mut content = format(index)?;
    content.push('\n');
    std::fs::write(path, &content)?;
    Ok(content.len())
}
