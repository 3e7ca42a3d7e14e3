//! Workarounds for known defects in upstream data
//!
//! Each rule is independent so it can be dropped once the upstream files are
//! fixed.

use crate::strings::{StringTable, TOOLTIP_PREFIX};

/// Miscased tooltip prefix found on some localization tokens
pub const MISCASED_TOOLTIP_PREFIX: &str = "DOTA_Tooltip_Ability_";

/// Copy every `DOTA_Tooltip_Ability_*` token to its `DOTA_Tooltip_ability_*`
/// spelling. The copy replaces any existing token of that name.
///
/// Returns the number of tokens copied.
pub fn duplicate_miscased_tooltips(strings: &mut StringTable) -> usize {
    let copies: Vec<(String, String)> = strings
        .iter()
        .filter(|(token, _)| token.contains(MISCASED_TOOLTIP_PREFIX))
        .map(|(token, text)| {
            (
                token.replacen(MISCASED_TOOLTIP_PREFIX, TOOLTIP_PREFIX, 1),
                text.to_string(),
            )
        })
        .collect();

    let count = copies.len();
    for (token, text) in copies {
        strings.insert(token, text);
    }
    count
}

/// Leading character wrongly prepended to some placeholder names
pub const PLACEHOLDER_TYPO_MARKER: char = 'd';

/// `%dbonus_damage%` is looked up again as `%bonus_damage%`
pub fn strip_placeholder_typo(name: &str) -> Option<&str> {
    name.strip_prefix(PLACEHOLDER_TYPO_MARKER)
}

/// A cluster whose region assignment is missing upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterOverride {
    pub cluster: i64,
    /// Key of the region entry in `regions.json`
    pub region: &'static str,
}

pub const CLUSTER_OVERRIDES: &[ClusterOverride] = &[ClusterOverride {
    cluster: 121,
    region: "USEast",
}];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miscased_tooltips_duplicated() {
        let mut strings = StringTable::new();
        strings.insert("DOTA_Tooltip_Ability_item_blink", "Blink Dagger");
        strings.insert("DOTA_Tooltip_ability_item_bottle", "Bottle");

        assert_eq!(duplicate_miscased_tooltips(&mut strings), 1);
        assert_eq!(
            strings.get("DOTA_Tooltip_ability_item_blink"),
            Some("Blink Dagger")
        );
        assert_eq!(
            strings.get("DOTA_Tooltip_Ability_item_blink"),
            Some("Blink Dagger")
        );
        assert_eq!(strings.len(), 3);
    }

    #[test]
    fn test_miscased_copy_overwrites() {
        let mut strings = StringTable::new();
        strings.insert("DOTA_Tooltip_Ability_x", "new");
        strings.insert("DOTA_Tooltip_ability_x", "old");
        duplicate_miscased_tooltips(&mut strings);
        assert_eq!(strings.get("DOTA_Tooltip_ability_x"), Some("new"));
    }

    #[test]
    fn test_placeholder_typo() {
        assert_eq!(strip_placeholder_typo("dbonus_damage"), Some("bonus_damage"));
        assert_eq!(strip_placeholder_typo("bonus_damage"), None);
    }

    #[test]
    fn test_cluster_overrides() {
        assert_eq!(CLUSTER_OVERRIDES.len(), 1);
        assert_eq!(CLUSTER_OVERRIDES[0].cluster, 121);
        assert_eq!(CLUSTER_OVERRIDES[0].region, "USEast");
    }
}
