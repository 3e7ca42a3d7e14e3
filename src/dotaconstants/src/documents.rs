//! Shapes of the upstream documents shared by several sources
//!
//! Only the fields the transforms read are typed; everything else in the
//! upstream files is ignored. Per-entry projection is lenient: an entry that
//! does not fit is skipped rather than failing the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::strings::StringTable;
use crate::template::AttributeMap;
use crate::values::is_truthy;

/// `dota_english.json`: `{ "lang": { "Tokens": { ... } } }`
#[derive(Debug, Deserialize)]
pub struct LocalizationDocument {
    pub lang: Language,
}

#[derive(Debug, Deserialize)]
pub struct Language {
    #[serde(rename = "Tokens")]
    pub tokens: Map<String, Value>,
}

impl LocalizationDocument {
    pub fn into_strings(self) -> StringTable {
        StringTable::from_tokens(self.lang.tokens)
    }
}

/// `items.json` / `npc_abilities.json`: `{ "DOTAAbilities": { key: {...} } }`
#[derive(Debug, Deserialize)]
pub struct ScriptsDocument {
    #[serde(rename = "DOTAAbilities")]
    pub entries: Map<String, Value>,
}

impl ScriptsDocument {
    /// Every entry that projects onto [`Script`], in upstream order
    pub fn scripts(&self) -> Vec<(&str, Script)> {
        self.entries
            .iter()
            .filter_map(|(key, value)| {
                // `Version` and similar scalar entries are not scripts
                if !value.is_object() {
                    tracing::debug!(key = %key, "skipping non-object script entry");
                    return None;
                }
                match Script::deserialize(value) {
                    Ok(script) => Some((key.as_str(), script)),
                    Err(err) => {
                        tracing::warn!(key = %key, "skipping script entry: {}", err);
                        None
                    }
                }
            })
            .collect()
    }
}

/// One item or ability block from the script files
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Script {
    #[serde(rename = "ID")]
    pub id: Option<Value>,
    pub item_cost: Option<Value>,
    pub item_quality: Option<Value>,
    /// `None` when the block has no `AbilitySpecial` at all
    #[serde(deserialize_with = "lenient_specials")]
    pub ability_special: Option<Vec<AttributeMap>>,
    pub ability_mana_cost: Option<Value>,
    pub ability_cooldown: Option<Value>,
    pub ability_damage: Option<Value>,
    pub item_requirements: Option<Value>,
    pub item_result: Option<Value>,
}

impl Script {
    /// `ItemCost` of `"0"` or `0`
    pub fn is_free(&self) -> bool {
        match &self.item_cost {
            Some(Value::String(cost)) => cost == "0",
            Some(Value::Number(cost)) => cost.as_f64() == Some(0.0),
            _ => false,
        }
    }

    /// First `ItemRequirements` entry, when the block is a recipe
    pub fn requirements(&self) -> Option<&str> {
        let first = match self.item_requirements.as_ref()? {
            Value::Array(entries) => entries.first()?,
            Value::Object(entries) => entries.values().next()?,
            other => other,
        };
        first.as_str().filter(|text| !text.is_empty())
    }

    /// `ItemResult` key, when it is a non-empty string
    pub fn result(&self) -> Option<&str> {
        self.item_result
            .as_ref()
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    }

    /// `ItemQuality`, when it is a string
    pub fn quality(&self) -> Option<&str> {
        self.item_quality.as_ref().and_then(Value::as_str)
    }

    /// AbilitySpecial mappings; an absent list reads as empty
    pub fn specials(&self) -> &[AttributeMap] {
        self.ability_special.as_deref().unwrap_or_default()
    }

    /// A script field when it is present and non-empty
    pub fn field(value: &Option<Value>) -> Option<&Value> {
        value.as_ref().filter(|v| is_truthy(v))
    }
}

/// AbilitySpecial as an array (or numbered object) of mappings; other
/// entries are dropped
fn lenient_specials<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<AttributeMap>>, D::Error> {
    let entries: Vec<Value> = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Object(entries) => entries.into_iter().map(|(_, v)| v).collect(),
        _ => Vec::new(),
    };
    Ok(Some(
        entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
    ))
}
