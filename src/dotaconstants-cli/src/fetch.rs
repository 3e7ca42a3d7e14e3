//! Fetching source documents

use anyhow::{bail, Context, Result};
use dotaconstants::Location;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Anything that can hand out the decoded document of a source location
pub trait Fetch: Sync {
    /// `url` is the configured URL for `location`
    fn fetch(&self, location: &Location, url: &str) -> Result<Value>;
}

/// Blocking HTTP fetcher; anything but a 200 is an error
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(120))
            .build();
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, location: &Location, url: &str) -> Result<Value> {
        tracing::debug!(location = location.name, url, "fetching");

        match self.agent.get(url).call() {
            Ok(resp) => {
                if resp.status() != 200 {
                    bail!("{} returned {}", url, resp.status());
                }
                resp.into_json()
                    .with_context(|| format!("Failed to decode JSON from {}", url))
            }
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                bail!("{} returned {}: {}", url, code, body);
            }
            Err(e) => {
                bail!("Request to {} failed: {}", url, e);
            }
        }
    }
}

/// Read a local JSON file
pub fn read_json(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Serves documents from a directory, one `<location name>.json` per location.
///
/// Lets `build --from` run offline against saved copies of the upstream files.
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Fetch for DirectoryFetcher {
    fn fetch(&self, location: &Location, _url: &str) -> Result<Value> {
        read_json(&self.root.join(format!("{}.json", location.name)))
    }
}
