//! Transform command handler
//!
//! Runs a single source on local files, for checking a transform against a
//! saved upstream document without fetching anything.

use anyhow::{Context, Result};
use dotaconstants::{find_source, Record};
use std::path::PathBuf;

use crate::fetch::read_json;

pub fn run(key: &str, files: &[PathBuf]) -> Result<Record> {
    let source = find_source(key).with_context(|| {
        format!("Unknown source '{}'. Run 'dotaconstants sources' to list them.", key)
    })?;

    let documents = files
        .iter()
        .map(|path| read_json(path))
        .collect::<Result<Vec<_>>>()?;

    source
        .run(documents)
        .with_context(|| format!("Transform {} failed", key))
}

/// Handle the transform command
pub fn handle(key: &str, files: &[PathBuf]) -> Result<()> {
    let record = run(key, files)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    tracing::info!(source = key, entries = record.len(), "transform done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_transform_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countries.json");
        fs::write(&path, r#"[{ "name": { "common": "Chile" }, "cca2": "CL" }]"#).unwrap();

        let record = run("countries", &[path]).unwrap();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "CL": { "name": { "common": "Chile" }, "cca2": "CL" } })
        );
    }

    #[test]
    fn test_wrong_file_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings.json");
        fs::write(&path, "{}").unwrap();

        let err = run("abilities", &[path]).unwrap_err();
        assert!(err.to_string().contains("Transform abilities failed"));
    }

    #[test]
    fn test_unknown_key() {
        assert!(run("nope", &[]).is_err());
    }
}
