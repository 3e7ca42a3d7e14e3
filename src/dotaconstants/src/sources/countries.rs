//! Countries keyed by ISO 3166-1 alpha-2 code

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: CountryName,
    pub cca2: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
}

/// Narrow upstream country records to name and code.
///
/// Records missing either are skipped; a later duplicate code wins.
pub fn countries(upstream: Vec<Value>) -> BTreeMap<String, Country> {
    upstream
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Country>(value) {
            Ok(country) => Some((country.cca2.clone(), country)),
            Err(err) => {
                tracing::warn!("skipping country record: {}", err);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_projection() {
        let countries = countries(vec![
            json!({
                "name": { "common": "Peru", "official": "Republic of Peru" },
                "cca2": "PE",
                "cca3": "PER",
                "capital": ["Lima"]
            }),
            json!({ "name": { "common": "Nowhere" } }),
        ]);
        assert_eq!(countries.len(), 1);
        assert_eq!(
            serde_json::to_value(&countries).unwrap(),
            json!({ "PE": { "name": { "common": "Peru" }, "cca2": "PE" } })
        );
    }

    #[test]
    fn test_round_trip() {
        let countries = countries(vec![json!({ "name": { "common": "Chile" }, "cca2": "CL" })]);
        let text = serde_json::to_string(&countries).unwrap();
        let back: BTreeMap<String, Country> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, countries);
    }
}
