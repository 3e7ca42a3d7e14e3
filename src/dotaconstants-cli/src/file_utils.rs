//! File system helpers for the output directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Files directly inside `path` with one of `extensions`, sorted by name.
///
/// Extension should not include the dot (e.g., "json" not ".json").
pub fn files_with_extension(path: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|file_path| {
            file_path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| extensions.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

/// File names directly inside `path`, sorted
pub fn file_names(path: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(path).with_context(|| format!("Failed to list {}", path.display()))? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Copy every `*.json` file of `from` into `to`, overwriting same names.
///
/// A missing `from` directory copies nothing.
pub fn copy_json_files(from: &Path, to: &Path) -> Result<usize> {
    if !from.is_dir() {
        tracing::warn!(dir = %from.display(), "manual JSON directory not found, nothing copied");
        return Ok(0);
    }

    let files = files_with_extension(from, &["json"]);
    for file in &files {
        let Some(name) = file.file_name() else {
            continue;
        };
        fs::copy(file, to.join(name)).with_context(|| {
            format!("Failed to copy {} into {}", file.display(), to.display())
        })?;
    }
    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_with_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.JSON"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.json"), "{}").unwrap();

        let files = files_with_extension(dir.path(), &["json"]);
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.JSON", "b.json"]);
    }

    #[test]
    fn test_copy_overwrites() {
        let from = tempfile::tempdir().unwrap();
        let to = tempfile::tempdir().unwrap();
        fs::write(from.path().join("patch.json"), "[1]").unwrap();
        fs::write(to.path().join("patch.json"), "[0]").unwrap();

        assert_eq!(copy_json_files(from.path(), to.path()).unwrap(), 1);
        assert_eq!(fs::read_to_string(to.path().join("patch.json")).unwrap(), "[1]");
    }

    #[test]
    fn test_copy_missing_dir() {
        let to = tempfile::tempdir().unwrap();
        let missing = to.path().join("missing");
        assert_eq!(copy_json_files(&missing, to.path()).unwrap(), 0);
    }
}
