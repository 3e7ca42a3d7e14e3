//! Source transform registry
//!
//! Every output file of the bundle is produced by one [`Source`]: a stable
//! output key, the upstream documents it needs, and a transform that projects
//! those documents into a serializable [`Record`].

pub mod abilities;
pub mod countries;
pub mod heroes;
pub mod items;
pub mod regions;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::documents::{LocalizationDocument, ScriptsDocument};
use crate::error::TransformError;
use crate::keyset::KeySet;

pub use abilities::{AbilityEntry, AbilityFeed};
pub use countries::Country;
pub use heroes::Hero;
pub use items::{Item, ItemFeed};
pub use regions::RegionsDocument;

/// A named upstream document with its default URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub name: &'static str,
    pub url: &'static str,
}

pub const STRINGS: Location = Location {
    name: "strings",
    url: "https://raw.githubusercontent.com/dotabuff/d2vpkr/master/dota/resource/dota_english.json",
};
pub const ITEM_SCRIPTS: Location = Location {
    name: "item_scripts",
    url: "https://raw.githubusercontent.com/dotabuff/d2vpkr/master/dota/scripts/npc/items.json",
};
pub const ABILITY_SCRIPTS: Location = Location {
    name: "ability_scripts",
    url: "https://raw.githubusercontent.com/dotabuff/d2vpkr/master/dota/scripts/npc/npc_abilities.json",
};
pub const REGIONS: Location = Location {
    name: "regions",
    url: "https://raw.githubusercontent.com/dotabuff/d2vpkr/master/dota/scripts/regions.json",
};
pub const ITEM_FEED: Location = Location {
    name: "item_feed",
    url: "http://www.dota2.com/jsfeed/itemdata?l=english",
};
pub const ABILITY_FEED: Location = Location {
    name: "ability_feed",
    url: "http://www.dota2.com/jsfeed/abilitydata?l=english",
};
pub const HEROES: Location = Location {
    name: "heroes",
    url: "https://api.opendota.com/api/heroes",
};
pub const COUNTRIES: Location = Location {
    name: "countries",
    url: "https://raw.githubusercontent.com/mledoze/countries/master/countries.json",
};

/// Every distinct location, for listing and config validation
pub const LOCATIONS: &[Location] = &[
    STRINGS,
    ITEM_SCRIPTS,
    ABILITY_SCRIPTS,
    REGIONS,
    ITEM_FEED,
    ABILITY_FEED,
    HEROES,
    COUNTRIES,
];

/// Output of one transform, serialized as the file body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Items(BTreeMap<String, Item>),
    ItemIds(BTreeMap<i64, String>),
    ItemGroups(Vec<KeySet>),
    Abilities(BTreeMap<String, AbilityEntry>),
    AbilityKeys(KeySet),
    AbilityIds(BTreeMap<i64, String>),
    Heroes(BTreeMap<i64, Hero>),
    HeroNames(BTreeMap<String, Hero>),
    Regions(BTreeMap<i64, String>),
    Clusters(BTreeMap<i64, i64>),
    Countries(BTreeMap<String, Country>),
}

impl Record {
    /// Number of top-level entries, for progress output
    pub fn len(&self) -> usize {
        match self {
            Record::Items(map) => map.len(),
            Record::ItemIds(map) | Record::AbilityIds(map) => map.len(),
            Record::ItemGroups(groups) => groups.len(),
            Record::Abilities(map) => map.len(),
            Record::AbilityKeys(keys) => keys.len(),
            Record::Heroes(map) => map.len(),
            Record::HeroNames(map) => map.len(),
            Record::Regions(map) => map.len(),
            Record::Clusters(map) => map.len(),
            Record::Countries(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type Transform = fn(Vec<Value>) -> Result<Record, TransformError>;

/// One registry entry
#[derive(Clone, Copy)]
pub struct Source {
    /// Output file stem, e.g. `items` for `items.json`
    pub key: &'static str,
    /// Documents handed to the transform, in this order
    pub locations: &'static [Location],
    transform: Transform,
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("key", &self.key)
            .field("locations", &self.locations)
            .finish_non_exhaustive()
    }
}

impl Source {
    /// Run the transform on already fetched documents
    pub fn run(&self, documents: Vec<Value>) -> Result<Record, TransformError> {
        if documents.len() != self.locations.len() {
            return Err(TransformError::DocumentCount {
                expected: self.locations.len(),
                found: documents.len(),
            });
        }
        tracing::debug!(source = self.key, "running transform");
        (self.transform)(documents)
    }
}

/// All sources, in output order
pub static SOURCES: &[Source] = &[
    Source {
        key: "items",
        locations: &[STRINGS, ITEM_SCRIPTS],
        transform: |documents| {
            let [strings, scripts] = split(documents)?;
            let strings: LocalizationDocument = decode(strings, 0)?;
            let scripts: ScriptsDocument = decode(scripts, 1)?;
            Ok(Record::Items(items::build(&strings.into_strings(), &scripts)))
        },
    },
    Source {
        key: "item_ids",
        locations: &[ITEM_FEED],
        transform: |documents| {
            let [feed] = split(documents)?;
            Ok(Record::ItemIds(items::ids(&decode(feed, 0)?)))
        },
    },
    Source {
        key: "item_groups",
        locations: &[ITEM_FEED],
        transform: |documents| {
            let [feed] = split(documents)?;
            Ok(Record::ItemGroups(items::groups(&decode(feed, 0)?)))
        },
    },
    Source {
        key: "abilities",
        locations: &[STRINGS, ABILITY_SCRIPTS],
        transform: |documents| {
            let [strings, scripts] = split(documents)?;
            let strings: LocalizationDocument = decode(strings, 0)?;
            let scripts: ScriptsDocument = decode(scripts, 1)?;
            Ok(Record::Abilities(abilities::build(
                &strings.into_strings(),
                &scripts,
            )))
        },
    },
    Source {
        key: "ability_keys",
        locations: &[ABILITY_FEED],
        transform: |documents| {
            let [feed] = split(documents)?;
            Ok(Record::AbilityKeys(abilities::keys(&decode(feed, 0)?)))
        },
    },
    Source {
        key: "ability_ids",
        locations: &[ABILITY_SCRIPTS],
        transform: |documents| {
            let [scripts] = split(documents)?;
            Ok(Record::AbilityIds(abilities::ids(&decode(scripts, 0)?)))
        },
    },
    Source {
        key: "heroes",
        locations: &[HEROES],
        transform: |documents| {
            let [document] = split(documents)?;
            let heroes = heroes::project(decode(document, 0)?);
            Ok(Record::Heroes(heroes::by_id(heroes)))
        },
    },
    Source {
        key: "hero_names",
        locations: &[HEROES],
        transform: |documents| {
            let [document] = split(documents)?;
            let heroes = heroes::project(decode(document, 0)?);
            Ok(Record::HeroNames(heroes::by_name(heroes)))
        },
    },
    Source {
        key: "region",
        locations: &[REGIONS],
        transform: |documents| {
            let [document] = split(documents)?;
            Ok(Record::Regions(regions::regions(&decode(document, 0)?)))
        },
    },
    Source {
        key: "cluster",
        locations: &[REGIONS],
        transform: |documents| {
            let [document] = split(documents)?;
            Ok(Record::Clusters(regions::clusters(&decode(document, 0)?)))
        },
    },
    Source {
        key: "countries",
        locations: &[COUNTRIES],
        transform: |documents| {
            let [document] = split(documents)?;
            Ok(Record::Countries(countries::countries(decode(document, 0)?)))
        },
    },
];

/// Look up a source by output key
pub fn find(key: &str) -> Option<&'static Source> {
    SOURCES.iter().find(|source| source.key == key)
}

fn split<const N: usize>(documents: Vec<Value>) -> Result<[Value; N], TransformError> {
    let found = documents.len();
    documents
        .try_into()
        .map_err(|_| TransformError::DocumentCount { expected: N, found })
}

fn decode<T: DeserializeOwned>(document: Value, index: usize) -> Result<T, TransformError> {
    serde_json::from_value(document).map_err(|source| TransformError::Document { index, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_keys_unique() {
        let keys: HashSet<_> = SOURCES.iter().map(|source| source.key).collect();
        assert_eq!(keys.len(), SOURCES.len());
        assert_eq!(SOURCES.len(), 11);
    }

    #[test]
    fn test_locations_listed() {
        for source in SOURCES {
            for location in source.locations {
                assert!(LOCATIONS.contains(location), "{} not listed", location.name);
            }
        }
        assert_eq!(
            STRINGS.url,
            "https://raw.githubusercontent.com/dotabuff/d2vpkr/master/dota/resource/dota_english.json"
        );
    }

    #[test]
    fn test_find() {
        assert_eq!(find("cluster").map(|s| s.locations), Some(&[REGIONS][..]));
        assert!(find("missing").is_none());
    }

    #[test]
    fn test_wrong_document_count() {
        let err = find("items").unwrap().run(vec![json!({})]).unwrap_err();
        assert!(matches!(
            err,
            TransformError::DocumentCount {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_bad_document_shape() {
        let err = find("items")
            .unwrap()
            .run(vec![json!({ "lang": {} }), json!({ "DOTAAbilities": {} })])
            .unwrap_err();
        assert!(matches!(err, TransformError::Document { index: 0, .. }));
    }

    #[test]
    fn test_items_end_to_end() {
        let strings = json!({
            "lang": {
                "Language": "English",
                "Tokens": {
                    "DOTA_Tooltip_ability_item_blink": "Blink Dagger",
                    "DOTA_Tooltip_ability_item_blink_Description": "Teleport up to %blink_range% units.",
                    "DOTA_Tooltip_ability_item_blink_blink_range": "RANGE:"
                }
            }
        });
        let scripts = json!({
            "DOTAAbilities": {
                "Version": "1",
                "item_blink": {
                    "ID": "1",
                    "ItemCost": "2250",
                    "AbilityCooldown": "15.0",
                    "AbilitySpecial": [{ "blink_range": "1200" }]
                },
                "item_recipe_zero": { "ID": "500", "ItemCost": "0", "ItemRecipe": "1" }
            }
        });

        let record = find("items").unwrap().run(vec![strings, scripts]).unwrap();
        let Record::Items(items) = &record else {
            panic!("expected items");
        };
        assert_eq!(items.len(), 1);
        assert!(!items.contains_key("recipe_zero"));
        assert_eq!(items["blink"].desc, "Teleport up to 1200 units.");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["blink"]["cd"], json!(15));
        assert_eq!(value["blink"]["mc"], json!(false));
    }

    #[test]
    fn test_heroes_and_clusters() {
        let heroes = json!([{ "id": 7, "name": "npc_dota_hero_earthshaker" }]);
        let record = find("hero_names").unwrap().run(vec![heroes]).unwrap();
        assert_eq!(record.len(), 1);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value["npc_dota_hero_earthshaker"]["icon"],
            json!("/apps/dota2/images/heroes/earthshaker_icon.png")
        );

        let regions = json!({ "regions": { "USEast": { "region": "2", "clusters": ["122"] } } });
        let record = find("cluster").unwrap().run(vec![regions]).unwrap();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "121": 2, "122": 2 })
        );
    }
}
