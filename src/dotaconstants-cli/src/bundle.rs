//! Writing record files and the index module

use anyhow::{Context, Result};
use dotaconstants::Record;
use std::fs;
use std::path::{Path, PathBuf};

use crate::file_utils::file_names;

/// Write `<dir>/<key>.json` as pretty-printed JSON
pub fn write_record(dir: &Path, key: &str, record: &Record) -> Result<PathBuf> {
    let path = dir.join(format!("{key}.json"));
    let contents = serde_json::to_string_pretty(record)
        .with_context(|| format!("Failed to serialize {}", key))?;
    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Module stem of an output file: its name up to the first `.`
fn stem(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// CommonJS module requiring every file in the output directory
pub fn index_module(output_dir_name: &str, file_names: &[String]) -> String {
    let entries: Vec<String> = file_names
        .iter()
        .map(|name| {
            let stem = stem(name);
            format!("{stem}: require(__dirname + '/{output_dir_name}/{stem}.json')")
        })
        .collect();

    format!("module.exports = {{\n{}\n}};", entries.join(",\n"))
}

/// Generate the index module at `index` for everything in `output`
pub fn write_index(output: &Path, index: &Path) -> Result<usize> {
    let names = file_names(output)?;
    let dir_name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("Output directory {} has no final component", output.display()))?;

    fs::write(index, index_module(&dir_name, &names))
        .with_context(|| format!("Failed to write {}", index.display()))?;
    Ok(names.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_index_module() {
        let names = vec!["cluster.json".to_string(), "heroes.json".to_string()];
        assert_eq!(
            index_module("build", &names),
            "module.exports = {\n\
             cluster: require(__dirname + '/build/cluster.json'),\n\
             heroes: require(__dirname + '/build/heroes.json')\n\
             };"
        );
    }

    #[test]
    fn test_stem_stops_at_first_dot() {
        assert_eq!(stem("game_mode.v2.json"), "game_mode");
        assert_eq!(stem("README"), "README");
    }

    #[test]
    fn test_write_record_pretty() {
        let dir = tempfile::tempdir().unwrap();
        let record = Record::Clusters(BTreeMap::from([(111, 1)]));
        let path = write_record(dir.path(), "cluster", &record).unwrap();
        assert_eq!(path, dir.path().join("cluster.json"));
        assert_eq!(fs::read_to_string(path).unwrap(), "{\n  \"111\": 1\n}");
    }

    #[test]
    fn test_write_index() {
        let root = tempfile::tempdir().unwrap();
        let output = root.path().join("dist");
        fs::create_dir(&output).unwrap();
        fs::write(output.join("region.json"), "{}").unwrap();
        fs::write(output.join("abilities.json"), "{}").unwrap();
        let index = root.path().join("index.js");

        assert_eq!(write_index(&output, &index).unwrap(), 2);
        let code = fs::read_to_string(index).unwrap();
        assert!(code.starts_with(
            "module.exports = {\nabilities: require(__dirname + '/dist/abilities.json'),"
        ));
        assert!(code.ends_with("region: require(__dirname + '/dist/region.json')\n};"));
    }
}
