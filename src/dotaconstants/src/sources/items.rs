//! Items, item ids and item groups

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::attributes::{format_attributes, Attribute};
use crate::documents::{Script, ScriptsDocument};
use crate::graph::{resolve_components, strip_item_prefix, Craftable, ItemGraph, Recipe};
use crate::keyset::KeySet;
use crate::strings::StringTable;
use crate::template::render_description;
use crate::values::parse_leading_int;

const RECIPE_MARKER: &str = "item_recipe";
const VERSION_KEY: &str = "Version";
const IMAGE_ROOT: &str = "/apps/dota2/images/items/";
const RECIPE_IMAGE: &str = "/apps/dota2/images/items/recipe_lg.png?3";

/// An item as shipped in `items.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Option<i64>,
    pub img: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qual: Option<String>,
    pub cost: Option<i64>,
    pub desc: String,
    pub notes: String,
    pub attrib: Vec<Attribute>,
    /// Mana cost, `false` when the item has none
    #[serde(with = "or_false")]
    pub mc: Option<i64>,
    /// Cooldown, `false` when the item has none
    #[serde(with = "or_false")]
    pub cd: Option<i64>,
    pub lore: String,
    pub components: Option<Vec<String>>,
    pub created: bool,
}

impl Craftable for Item {
    fn attach_recipe(&mut self, components: Vec<String>) {
        self.components = Some(components);
        self.created = true;
    }
}

/// Image path for a script item key
pub fn item_image(key: &str) -> String {
    if key.contains(RECIPE_MARKER) {
        RECIPE_IMAGE.to_string()
    } else {
        format!("{IMAGE_ROOT}{}_lg.png?3", strip_item_prefix(key))
    }
}

/// Build the item table from localization and item scripts.
///
/// Zero-cost recipe placeholders and the `Version` entry are left out. Recipes
/// still contribute components to their result item.
pub fn build(strings: &StringTable, scripts: &ScriptsDocument) -> BTreeMap<String, Item> {
    let scripts = scripts.scripts();

    let mut items: BTreeMap<String, Item> = scripts
        .iter()
        .filter(|(key, script)| {
            *key != VERSION_KEY && !(key.contains(RECIPE_MARKER) && script.is_free())
        })
        .map(|(key, script)| (strip_item_prefix(key).to_string(), project(key, script, strings)))
        .collect();

    let recipes = scripts.iter().filter_map(|(_, script)| {
        let requirements = script.requirements()?;
        Some(Recipe::parse(requirements, script.result()?))
    });
    let attached = resolve_components(&mut items, recipes);
    tracing::debug!(items = items.len(), recipes = attached, "built item table");

    items
}

fn project(key: &str, script: &Script, strings: &StringTable) -> Item {
    let tooltip = strings.tooltip(key);
    let nonzero = |field: &Option<Value>| {
        field
            .as_ref()
            .and_then(parse_leading_int)
            .filter(|value| *value != 0)
    };

    Item {
        id: script.id.as_ref().and_then(parse_leading_int),
        img: item_image(key),
        dname: tooltip.name().map(str::to_owned),
        qual: script.quality().map(str::to_owned),
        cost: script.item_cost.as_ref().and_then(parse_leading_int),
        desc: render_description(key, tooltip.description(), script.ability_special.as_deref())
            .unwrap_or_default(),
        notes: tooltip.notes().join("\n"),
        attrib: format_attributes(
            script.specials(),
            strings,
            &tooltip.attribute_prefix(),
        ),
        mc: nonzero(&script.ability_mana_cost),
        cd: nonzero(&script.ability_cooldown),
        lore: tooltip.lore().unwrap_or_default().replace("\\n", "\r\n"),
        components: None,
        created: false,
    }
}

/// `jsfeed/itemdata`: `{ "itemdata": { key: { "id": 1, "components": [...] } } }`
#[derive(Debug, Deserialize)]
pub struct ItemFeed {
    pub itemdata: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedItem {
    pub id: Option<i64>,
    pub components: Option<Vec<String>>,
}

impl ItemFeed {
    /// Feed entries that project onto [`FeedItem`], in feed order
    pub fn items(&self) -> Vec<(&str, FeedItem)> {
        self.itemdata
            .iter()
            .filter_map(|(key, value)| match FeedItem::deserialize(value) {
                Ok(item) => Some((key.as_str(), item)),
                Err(err) => {
                    tracing::debug!(key = %key, "skipping feed item: {}", err);
                    None
                }
            })
            .collect()
    }
}

/// Item id → item key
pub fn ids(feed: &ItemFeed) -> BTreeMap<i64, String> {
    feed.items()
        .into_iter()
        .filter_map(|(key, item)| Some((item.id?, key.to_string())))
        .collect()
}

/// One membership set per craftable feed item, in feed order.
///
/// Items whose component tree loops back on itself are left out.
pub fn groups(feed: &ItemFeed) -> Vec<KeySet> {
    let items = feed.items();
    let graph: ItemGraph = items
        .iter()
        .filter_map(|(key, item)| Some((key.to_string(), item.components.clone()?)))
        .collect();

    items
        .iter()
        .filter(|(_, item)| item.components.is_some())
        .filter_map(|(key, _)| match graph.group(key) {
            Ok(group) => Some(group),
            Err(err) => {
                tracing::warn!(item = %key, "skipping item group: {}", err);
                None
            }
        })
        .collect()
}

/// `Option<i64>` written as the number or `false`
mod or_false {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_i64(*value),
            None => serializer.serialize_bool(false),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i64>, D::Error> {
        #[allow(dead_code)]
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Flag(bool),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Number(value)) => Some(value),
            Some(Raw::Flag(_)) | None => None,
        })
    }
}
