//! Display list of AbilitySpecial attributes
//!
//! An attribute is shown only when one of its fields has a header token
//! `<prefix><field>` in the string table. Headers may start with `%` (values
//! are percentages) and then `+$` (the header names a shared footer token
//! `dota_ability_variable_<name>`, e.g. `"+$damage"` → `+40 Damage`).

use serde::{Deserialize, Serialize};

use crate::strings::StringTable;
use crate::template::AttributeMap;
use crate::values::{format_values, Formatted, DEFAULT_SEPARATOR};

/// Prefix of the shared footer tokens referenced by `+$` headers
pub const FOOTER_PREFIX: &str = "dota_ability_variable_";

/// One formatted attribute line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// AbilitySpecial field the line was built from
    pub key: String,
    pub header: String,
    pub value: Formatted,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

/// Parsed attribute header token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub percent: bool,
    pub footer_reference: bool,
    pub text: &'a str,
}

impl<'a> Header<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let (percent, rest) = match raw.strip_prefix('%') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (footer_reference, rest) = match rest.strip_prefix("+$") {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        // Header text ends at the first line break
        let text = rest
            .split(['\n', '\r', '\u{2028}', '\u{2029}'])
            .next()
            .unwrap_or_default();

        Self {
            percent,
            footer_reference,
            text,
        }
    }
}

/// Format every attribute that has a header in `strings`.
///
/// Within one mapping the first field, in upstream order, whose
/// `<prefix><field>` token exists decides the line; mappings with no such
/// field are dropped.
pub fn format_attributes(
    attributes: &[AttributeMap],
    strings: &StringTable,
    prefix: &str,
) -> Vec<Attribute> {
    attributes
        .iter()
        .filter_map(|attr| format_attribute(attr, strings, prefix))
        .collect()
}

fn format_attribute(attr: &AttributeMap, strings: &StringTable, prefix: &str) -> Option<Attribute> {
    let (key, raw_header) = attr
        .keys()
        .find_map(|key| strings.get(&format!("{prefix}{key}")).map(|h| (key, h)))?;
    let header = Header::parse(raw_header);
    let value = format_values(&attr[key.as_str()], header.percent, DEFAULT_SEPARATOR);

    Some(if header.footer_reference {
        Attribute {
            key: key.clone(),
            header: "+".to_string(),
            value,
            footer: strings
                .get(&format!("{FOOTER_PREFIX}{}", header.text))
                .map(str::to_owned),
        }
    } else {
        Attribute {
            key: key.clone(),
            header: header.text.to_string(),
            value,
            footer: None,
        }
    })
}
