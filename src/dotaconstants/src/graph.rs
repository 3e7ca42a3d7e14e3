//! Item crafting graph
//!
//! Recipes name one result item and a `;`-separated list of required items.
//! Resolving them gives every craftable item its direct components; expanding
//! a component tree gives everything that goes into building an item.

use std::collections::{BTreeMap, HashMap};

use crate::error::GraphError;
use crate::keyset::KeySet;

/// Prefix on script item keys (`item_blink`)
pub const ITEM_PREFIX: &str = "item_";

/// `item_blink` → `blink`; keys without the prefix are returned as is
pub fn strip_item_prefix(key: &str) -> &str {
    key.strip_prefix(ITEM_PREFIX).unwrap_or(key)
}

/// A crafting recipe with keys already stripped of [`ITEM_PREFIX`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub result: String,
    pub components: Vec<String>,
}

impl Recipe {
    /// Build from the raw `ItemRequirements` entry and `ItemResult` key
    pub fn parse(requirements: &str, result: &str) -> Self {
        Self {
            result: strip_item_prefix(result).to_string(),
            components: requirements
                .split(';')
                .map(|component| strip_item_prefix(component).to_string())
                .collect(),
        }
    }
}

/// An item that can record the recipe that creates it
pub trait Craftable {
    fn attach_recipe(&mut self, components: Vec<String>);
}

/// Attach each recipe's components to its result item.
///
/// Recipes whose result is not in `items` are skipped with a warning.
/// Returns the number of recipes attached.
pub fn resolve_components<T, I>(items: &mut BTreeMap<String, T>, recipes: I) -> usize
where
    T: Craftable,
    I: IntoIterator<Item = Recipe>,
{
    let mut attached = 0;
    for recipe in recipes {
        match items.get_mut(&recipe.result) {
            Some(item) => {
                item.attach_recipe(recipe.components);
                attached += 1;
            }
            None => {
                tracing::warn!(
                    result = %recipe.result,
                    "recipe result is not a known item, skipping"
                );
            }
        }
    }
    attached
}

/// Direct components per item key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemGraph {
    components: HashMap<String, Vec<String>>,
}

impl ItemGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, components: Vec<String>) {
        self.components.insert(key.into(), components);
    }

    pub fn components(&self, key: &str) -> Option<&[String]> {
        self.components.get(key).map(Vec::as_slice)
    }

    /// `key` followed by the depth-first, pre-order expansion of its
    /// components. Shared components appear once per path that reaches them.
    ///
    /// Fails with [`GraphError::Cycle`] when an item is reached again from
    /// inside its own component tree.
    pub fn expand<'a>(&'a self, key: &'a str) -> Result<Vec<String>, GraphError> {
        let mut expansion = vec![key.to_string()];
        // Current path from the root, with the next child index of each node
        let mut path: Vec<(&'a str, usize)> = vec![(key, 0)];

        while let Some(&(node, next)) = path.last() {
            let children = self.components(node).unwrap_or_default();
            let Some(child) = children.get(next) else {
                path.pop();
                continue;
            };
            if let Some(top) = path.last_mut() {
                top.1 += 1;
            }

            let child = child.as_str();
            if path.iter().any(|&(ancestor, _)| ancestor == child) {
                let mut cycle: Vec<String> = path.iter().map(|(n, _)| n.to_string()).collect();
                cycle.push(child.to_string());
                return Err(GraphError::Cycle { path: cycle });
            }

            expansion.push(child.to_string());
            path.push((child, 0));
        }

        Ok(expansion)
    }

    /// Deduplicated expansion of `key`
    pub fn group(&self, key: &str) -> Result<KeySet, GraphError> {
        Ok(self.expand(key)?.into_iter().collect())
    }
}

impl FromIterator<(String, Vec<String>)> for ItemGraph {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &[&str])]) -> ItemGraph {
        edges
            .iter()
            .map(|(k, c)| (k.to_string(), c.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[derive(Debug, Default)]
    struct Slot {
        components: Option<Vec<String>>,
        created: bool,
    }

    impl Craftable for Slot {
        fn attach_recipe(&mut self, components: Vec<String>) {
            self.components = Some(components);
            self.created = true;
        }
    }

    #[test]
    fn test_expand_tree() {
        let g = graph(&[("A", &["B", "C"]), ("B", &["D"])]);
        assert_eq!(g.expand("A").unwrap(), vec!["A", "B", "D", "C"]);

        let group = g.group("A").unwrap();
        assert_eq!(group.keys().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_leaf_expands_to_itself() {
        let g = graph(&[("A", &["B"])]);
        assert_eq!(g.expand("B").unwrap(), vec!["B"]);
        assert_eq!(g.expand("unknown").unwrap(), vec!["unknown"]);
    }

    #[test]
    fn test_diamond_keeps_duplicates() {
        let g = graph(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &["D"])]);
        assert_eq!(g.expand("A").unwrap(), vec!["A", "B", "D", "C", "D"]);
        assert_eq!(g.group("A").unwrap().len(), 4);
    }

    #[test]
    fn test_repeated_component() {
        let g = graph(&[("A", &["B", "B"])]);
        assert_eq!(g.expand("A").unwrap(), vec!["A", "B", "B"]);
    }

    #[test]
    fn test_cycle_detected() {
        let g = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &["A"])]);
        assert_eq!(
            g.expand("A"),
            Err(GraphError::Cycle {
                path: vec!["A".into(), "B".into(), "C".into(), "A".into()]
            })
        );
    }

    #[test]
    fn test_self_cycle_detected() {
        let g = graph(&[("A", &["A"])]);
        assert!(matches!(g.group("A"), Err(GraphError::Cycle { .. })));
    }

    #[test]
    fn test_recipe_parse_strips_prefix() {
        let recipe = Recipe::parse(
            "item_ogre_axe;item_mithril_hammer;recipe",
            "item_black_king_bar",
        );
        assert_eq!(recipe.result, "black_king_bar");
        assert_eq!(recipe.components, vec!["ogre_axe", "mithril_hammer", "recipe"]);
    }

    #[test]
    fn test_resolve_components() {
        let mut items: BTreeMap<String, Slot> = BTreeMap::new();
        items.insert("blink".into(), Slot::default());
        items.insert("arcane_blink".into(), Slot::default());

        let attached = resolve_components(
            &mut items,
            vec![
                Recipe::parse("item_blink;item_mystic_staff", "item_arcane_blink"),
                Recipe::parse("item_blink", "item_missing"),
            ],
        );

        assert_eq!(attached, 1);
        let arcane = &items["arcane_blink"];
        assert!(arcane.created);
        assert_eq!(
            arcane.components.as_deref(),
            Some(&["blink".to_string(), "mystic_staff".to_string()][..])
        );
        assert!(!items["blink"].created);
        assert!(!items.contains_key("missing"));
    }
}
