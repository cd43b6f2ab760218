//! Local single-file cache of the downloaded export.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Cache file written next to wherever the tool is run.
pub const CACHE_FILE: &str = "stampy_text_html.json";

pub fn load(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read cache file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("cache file {} is not valid JSON", path.display()))
}

pub fn store(path: &Path, doc: &Value) -> Result<()> {
    let raw = serde_json::to_string(doc).context("failed to serialize export document")?;
    std::fs::write(path, raw)
        .with_context(|| format!("failed to write cache file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn store_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CACHE_FILE);
        let doc = json!([{"title": "Q1", "status": "live"}]);

        store(&path, &doc).unwrap();
        assert_eq!(load(&path).unwrap(), doc);
    }

    #[test]
    fn missing_or_corrupt_cache_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CACHE_FILE);
        assert!(load(&path).is_err());

        std::fs::write(&path, "{not json").unwrap();
        assert!(load(&path).is_err());
    }
}
