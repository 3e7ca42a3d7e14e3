//! Configuration management for the dotaconstants CLI

use anyhow::{Context, Result};
use dotaconstants::{Location, LOCATIONS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "build";
pub const DEFAULT_JSON_DIR: &str = "json";
pub const DEFAULT_INDEX: &str = "index.js";

/// Contents of `config.toml`
///
/// ```toml
/// output = "build"
///
/// [sources]
/// heroes = "http://localhost:5000/api/heroes"
/// ```
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub output: Option<PathBuf>,
    pub json_dir: Option<PathBuf>,
    pub index: Option<PathBuf>,
    /// Location name → URL used instead of the built-in default
    pub sources: BTreeMap<String, String>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("dotaconstants");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields the default config; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let path = Self::config_path()?;
                if !path.exists() {
                    return Ok(Config::default());
                }
                Self::load_from(&path)?
            }
        };
        config.warn_unknown_sources();
        Ok(config)
    }

    fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    fn warn_unknown_sources(&self) {
        for name in self.sources.keys() {
            if !LOCATIONS.iter().any(|location| location.name == name) {
                tracing::warn!(location = %name, "config overrides an unknown source location");
            }
        }
    }

    /// URL to fetch for a location
    pub fn url<'a>(&'a self, location: &Location) -> &'a str {
        self.sources
            .get(location.name)
            .map(String::as_str)
            .unwrap_or(location.url)
    }

    /// Resolve build paths: flag, then config, then default
    pub fn paths(
        &self,
        output: Option<PathBuf>,
        json_dir: Option<PathBuf>,
        index: Option<PathBuf>,
    ) -> BuildPaths {
        let pick = |flag: Option<PathBuf>, configured: &Option<PathBuf>, default: &str| {
            flag.or_else(|| configured.clone())
                .unwrap_or_else(|| PathBuf::from(default))
        };

        BuildPaths {
            output: pick(output, &self.output, DEFAULT_OUTPUT),
            json_dir: pick(json_dir, &self.json_dir, DEFAULT_JSON_DIR),
            index: pick(index, &self.index, DEFAULT_INDEX),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    pub output: PathBuf,
    pub json_dir: PathBuf,
    pub index: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotaconstants::sources::{HEROES, STRINGS};

    #[test]
    fn test_config_path() {
        let result = Config::config_path();
        assert!(result.is_ok());
        assert!(result.unwrap().ends_with("dotaconstants/config.toml"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "output = \"dist\"\n\n[sources]\nheroes = \"http://localhost/heroes\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.output, Some(PathBuf::from("dist")));
        assert_eq!(config.url(&HEROES), "http://localhost/heroes");
        assert_eq!(config.url(&STRINGS), STRINGS.url);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_path_precedence() {
        let config = Config {
            output: Some(PathBuf::from("dist")),
            json_dir: Some(PathBuf::from("manual")),
            ..Config::default()
        };
        let paths = config.paths(Some(PathBuf::from("out")), None, None);
        assert_eq!(paths.output, PathBuf::from("out"));
        assert_eq!(paths.json_dir, PathBuf::from("manual"));
        assert_eq!(paths.index, PathBuf::from(DEFAULT_INDEX));
    }
}
