//! Localized string lookup
//!
//! Tooltip tokens follow a fixed naming scheme per entity:
//!
//! - `DOTA_Tooltip_ability_<key>` - display name
//! - `DOTA_Tooltip_ability_<key>_Description`
//! - `DOTA_Tooltip_ability_<key>_Note0`, `_Note1`, ...
//! - `DOTA_Tooltip_ability_<key>_Lore`
//! - `DOTA_Tooltip_ability_<key>_<attribute>` - attribute header

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::compat;

/// Prefix shared by every item and ability tooltip token
pub const TOOLTIP_PREFIX: &str = "DOTA_Tooltip_ability_";

/// Token name → display string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    tokens: HashMap<String, String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a raw `Tokens` object, applying the casing fix.
    ///
    /// Non-string values are ignored.
    pub fn from_tokens(tokens: Map<String, Value>) -> Self {
        let mut table: Self = tokens
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(text) => Some((key, text)),
                _ => None,
            })
            .collect();
        compat::duplicate_miscased_tooltips(&mut table);
        table
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.tokens.get(token).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains_key(token)
    }

    pub fn insert(&mut self, token: impl Into<String>, text: impl Into<String>) {
        self.tokens.insert(token.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Tooltip tokens for an item or ability key
    pub fn tooltip(&self, key: &str) -> Tooltip<'_> {
        Tooltip {
            strings: self,
            base: format!("{TOOLTIP_PREFIX}{key}"),
        }
    }
}

impl FromIterator<(String, String)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// View of the tooltip tokens belonging to one entity
#[derive(Debug, Clone)]
pub struct Tooltip<'a> {
    strings: &'a StringTable,
    base: String,
}

impl<'a> Tooltip<'a> {
    pub fn name(&self) -> Option<&'a str> {
        self.strings.get(&self.base)
    }

    pub fn description(&self) -> Option<&'a str> {
        self.strings.get(&format!("{}_Description", self.base))
    }

    pub fn lore(&self) -> Option<&'a str> {
        self.strings.get(&format!("{}_Lore", self.base))
    }

    /// `Note0`, `Note1`, ... up to the first missing or empty note
    pub fn notes(&self) -> Vec<&'a str> {
        (0..)
            .map(|i| self.strings.get(&format!("{}_Note{i}", self.base)))
            .take_while(|note| note.is_some_and(|text| !text.is_empty()))
            .flatten()
            .collect()
    }

    /// Prefix for attribute header tokens (`<base>_`)
    pub fn attribute_prefix(&self) -> String {
        format!("{}_", self.base)
    }
}
