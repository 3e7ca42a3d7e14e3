//! Heroes, indexed by id and by internal name

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prefix of every internal hero name (`npc_dota_hero_antimage`)
pub const HERO_NAME_PREFIX: &str = "npc_dota_hero_";

const IMAGE_ROOT: &str = "/apps/dota2/images/heroes/";

/// Hero record from the heroes API with image paths attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: i64,
    /// Internal name, e.g. `npc_dota_hero_antimage`
    pub name: String,
    /// Every other upstream field, passed through untouched
    #[serde(flatten)]
    pub details: Map<String, Value>,
    pub img: String,
    pub icon: String,
}

/// Hero record as served upstream
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamHero {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl From<UpstreamHero> for Hero {
    fn from(hero: UpstreamHero) -> Self {
        let short = hero.name.replacen(HERO_NAME_PREFIX, "", 1);
        let mut details = hero.details;
        details.retain(|key, _| key != "img" && key != "icon");

        Self {
            img: format!("{IMAGE_ROOT}{short}_full.png?"),
            icon: format!("{IMAGE_ROOT}{short}_icon.png"),
            id: hero.id,
            name: hero.name,
            details,
        }
    }
}

/// Project the upstream hero list, skipping records without an id or name
pub fn project(upstream: Vec<Value>) -> Vec<Hero> {
    upstream
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<UpstreamHero>(value) {
            Ok(hero) => Some(Hero::from(hero)),
            Err(err) => {
                tracing::warn!("skipping hero record: {}", err);
                None
            }
        })
        .collect()
}

pub fn by_id(heroes: Vec<Hero>) -> BTreeMap<i64, Hero> {
    heroes.into_iter().map(|hero| (hero.id, hero)).collect()
}

pub fn by_name(heroes: Vec<Hero>) -> BTreeMap<String, Hero> {
    heroes
        .into_iter()
        .map(|hero| (hero.name.clone(), hero))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upstream() -> Vec<Value> {
        vec![
            json!({
                "id": 1,
                "name": "npc_dota_hero_antimage",
                "localized_name": "Anti-Mage",
                "primary_attr": "agi",
                "roles": ["Carry", "Escape"],
                "legs": 2
            }),
            json!({ "id": 2, "name": "npc_dota_hero_axe", "localized_name": "Axe" }),
            json!({ "localized_name": "Broken" }),
        ]
    }

    #[test]
    fn test_image_paths() {
        let heroes = project(upstream());
        assert_eq!(heroes.len(), 2);
        assert_eq!(heroes[0].img, "/apps/dota2/images/heroes/antimage_full.png?");
        assert_eq!(heroes[0].icon, "/apps/dota2/images/heroes/antimage_icon.png");
    }

    #[test]
    fn test_passthrough_fields() {
        let heroes = project(upstream());
        let value = serde_json::to_value(&heroes[0]).unwrap();
        assert_eq!(value["localized_name"], json!("Anti-Mage"));
        assert_eq!(value["roles"], json!(["Carry", "Escape"]));
        assert_eq!(value["name"], json!("npc_dota_hero_antimage"));
        assert_eq!(value["id"], json!(1));
    }

    #[test]
    fn test_two_indices_share_records() {
        let heroes = project(upstream());
        let ids = by_id(heroes.clone());
        let names = by_name(heroes);
        assert_eq!(ids[&2], names["npc_dota_hero_axe"]);
        assert_eq!(
            serde_json::to_value(&ids).unwrap()["1"]["localized_name"],
            json!("Anti-Mage")
        );
    }

    #[test]
    fn test_round_trip() {
        let ids = by_id(project(upstream()));
        let text = serde_json::to_string_pretty(&ids).unwrap();
        let back: BTreeMap<i64, Hero> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, ids);
    }
}
