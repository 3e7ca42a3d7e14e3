//! Matchmaking regions and server clusters

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::compat::{ClusterOverride, CLUSTER_OVERRIDES};
use crate::values::as_integer;

const DISPLAY_NAME_PREFIX: &str = "#dota_region_";

/// `regions.json`: `{ "regions": { "USWest": { "region": "1", ... } } }`
#[derive(Debug, Deserialize)]
pub struct RegionsDocument {
    pub regions: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegionEntry {
    pub region: Option<Value>,
    pub display_name: Option<String>,
    pub clusters: Vec<Value>,
}

impl RegionEntry {
    pub fn id(&self) -> Option<i64> {
        self.region.as_ref().and_then(as_integer)
    }
}

impl RegionsDocument {
    /// Entries that project onto [`RegionEntry`], in document order
    pub fn entries(&self) -> Vec<(&str, RegionEntry)> {
        self.regions
            .iter()
            .filter_map(|(key, value)| match RegionEntry::deserialize(value) {
                Ok(entry) => Some((key.as_str(), entry)),
                Err(err) => {
                    tracing::debug!(key = %key, "skipping region entry: {}", err);
                    None
                }
            })
            .collect()
    }
}

/// `#dota_region_us_west` → `US WEST`
pub fn region_display_name(raw: &str) -> String {
    raw.strip_prefix(DISPLAY_NAME_PREFIX)
        .unwrap_or(raw)
        .split('_')
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Region id → display name, for regions with a positive id
pub fn regions(document: &RegionsDocument) -> BTreeMap<i64, String> {
    document
        .entries()
        .into_iter()
        .filter_map(|(_, entry)| {
            let id = entry.id().filter(|id| *id > 0)?;
            Some((id, region_display_name(entry.display_name.as_deref()?)))
        })
        .collect()
}

/// Cluster id → region id, with [`CLUSTER_OVERRIDES`] applied last
pub fn clusters(document: &RegionsDocument) -> BTreeMap<i64, i64> {
    let entries = document.entries();
    let mut clusters = BTreeMap::new();

    for (key, entry) in &entries {
        if entry.clusters.is_empty() {
            continue;
        }
        let Some(region) = entry.id() else {
            tracing::warn!(region = %key, "region has clusters but no numeric id");
            continue;
        };
        for cluster in &entry.clusters {
            match as_integer(cluster) {
                Some(cluster) => {
                    clusters.insert(cluster, region);
                }
                None => tracing::warn!(region = %key, "cluster id {} is not an integer", cluster),
            }
        }
    }

    for rule in CLUSTER_OVERRIDES {
        apply_override(&mut clusters, &entries, rule);
    }

    clusters
}

fn apply_override(
    clusters: &mut BTreeMap<i64, i64>,
    entries: &[(&str, RegionEntry)],
    rule: &ClusterOverride,
) {
    let region = entries
        .iter()
        .find(|(key, _)| *key == rule.region)
        .and_then(|(_, entry)| entry.id());
    match region {
        Some(region) => {
            clusters.insert(rule.cluster, region);
        }
        None => tracing::warn!(
            cluster = rule.cluster,
            region = rule.region,
            "override region not found, cluster left as is"
        ),
    }
}
