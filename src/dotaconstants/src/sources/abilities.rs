//! Abilities, ability ids and ability keys

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::attributes::{format_attributes, Attribute};
use crate::documents::{Script, ScriptsDocument};
use crate::keyset::KeySet;
use crate::strings::StringTable;
use crate::template::render_description;
use crate::values::{as_integer, format_values, Formatted, DEFAULT_SEPARATOR};

/// Script entries that are not real abilities
pub const NOT_ABILITIES: &[&str] = &[
    "Version",
    "ability_base",
    "default_attack",
    "attribute_bonus",
    "ability_deward",
];

/// Talent keys; these only carry a display name
pub const TALENT_PREFIX: &str = "special_bonus";

const IMAGE_ROOT: &str = "/apps/dota2/images/abilities/";
const COST_SEPARATOR: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmg: Option<Formatted>,
    pub attrib: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mc: Option<Formatted>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cd: Option<Formatted>,
    pub img: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dname: Option<String>,
}

/// An `abilities.json` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AbilityEntry {
    Ability(Ability),
    Talent(Talent),
}

impl AbilityEntry {
    pub fn dname(&self) -> Option<&str> {
        match self {
            AbilityEntry::Ability(ability) => ability.dname.as_deref(),
            AbilityEntry::Talent(talent) => talent.dname.as_deref(),
        }
    }
}

pub fn ability_image(key: &str) -> String {
    format!("{IMAGE_ROOT}{key}_md.png")
}

/// Build the ability table from localization and ability scripts
pub fn build(strings: &StringTable, scripts: &ScriptsDocument) -> BTreeMap<String, AbilityEntry> {
    scripts
        .scripts()
        .into_iter()
        .filter(|(key, _)| !NOT_ABILITIES.iter().any(|excluded| excluded == key))
        .map(|(key, script)| (key.to_string(), project(key, &script, strings)))
        .collect()
}

fn project(key: &str, script: &Script, strings: &StringTable) -> AbilityEntry {
    let tooltip = strings.tooltip(key);
    let dname = tooltip.name().map(str::to_owned);

    if key.starts_with(TALENT_PREFIX) {
        return AbilityEntry::Talent(Talent { dname });
    }

    let per_level = |field: &Option<Value>, separator: &str| {
        Script::field(field).map(|value| format_values(value, false, separator))
    };

    AbilityEntry::Ability(Ability {
        dname,
        desc: render_description(key, tooltip.description(), script.ability_special.as_deref()),
        dmg: per_level(&script.ability_damage, DEFAULT_SEPARATOR),
        attrib: format_attributes(
            script.specials(),
            strings,
            &tooltip.attribute_prefix(),
        ),
        mc: per_level(&script.ability_mana_cost, COST_SEPARATOR),
        cd: per_level(&script.ability_cooldown, COST_SEPARATOR),
        img: ability_image(key),
    })
}

/// Ability id → ability key, for scripts that carry an `ID`
pub fn ids(scripts: &ScriptsDocument) -> BTreeMap<i64, String> {
    scripts
        .scripts()
        .into_iter()
        .filter_map(|(key, script)| {
            let id = Script::field(&script.id)?;
            match as_integer(id) {
                Some(id) => Some((id, key.to_string())),
                None => {
                    tracing::warn!(key, "ability id {} is not an integer", id);
                    None
                }
            }
        })
        .collect()
}

/// `jsfeed/abilitydata`: `{ "abilitydata": { key: {...} } }`
#[derive(Debug, Deserialize)]
pub struct AbilityFeed {
    pub abilitydata: Map<String, Value>,
}

/// Every ability key in the feed
pub fn keys(feed: &AbilityFeed) -> KeySet {
    feed.abilitydata.keys().cloned().collect()
}
