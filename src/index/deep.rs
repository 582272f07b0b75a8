//! Deep detail persistence
//!
//! Deep detail accumulates across runs: each run reads the previous JSON
//! output, keeps its `deepDetail` entries and lays the newly requested ones
//! on top.

use super::types::DeepDetail;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Deep detail entries from a previous index document.
///
/// A missing file, unreadable file, or unparseable document all count as
/// "no prior detail".
pub fn load_prior_deep_detail(path: &Path) -> BTreeMap<String, serde_json::Value> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("No prior index at {}: {}", path.display(), e);
            return BTreeMap::new();
        }
    };

    let document: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring unparseable prior index {}: {}", path.display(), e);
            return BTreeMap::new();
        }
    };

    match document.get("deepDetail") {
        Some(serde_json::Value::Object(map)) => {
            map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
        }
        _ => BTreeMap::new(),
    }
}

/// Lay `current` over `prior`; on key collision the current entry wins
pub fn merge_deep_detail(
    prior: BTreeMap<String, serde_json::Value>,
    current: BTreeMap<String, DeepDetail>,
) -> BTreeMap<String, serde_json::Value> {
    let mut merged = prior;
    for (key, detail) in current {
        match serde_json::to_value(&detail) {
            Ok(value) => {
                merged.insert(key, value);
            }
            Err(e) => warn!("Could not serialize deep detail for {}: {}", key, e),
        }
    }
    merged
}
