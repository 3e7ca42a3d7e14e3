//! Display formatting for level-scaled numeric fields
//!
//! Scripts store per-level values either as a space-delimited string
//! (`"20 30 40"`) or as a JSON array. Constant sequences collapse to a single
//! value and decimal noise is trimmed (`"10.0"` → `"10"`).

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Separator used between per-level values unless a caller picks another
pub const DEFAULT_SEPARATOR: &str = " / ";

static USELESS_DECIMALS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.0+(\D|$)").expect("decimal pattern is valid"));

/// A formatted field: one value, or one value per level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Formatted {
    Single(String),
    PerLevel(Vec<String>),
}

impl Formatted {
    /// Join per-level values with `separator`
    pub fn join(&self, separator: &str) -> String {
        match self {
            Formatted::Single(value) => value.clone(),
            Formatted::PerLevel(values) => values.join(separator),
        }
    }

    pub fn is_per_level(&self) -> bool {
        matches!(self, Formatted::PerLevel(_))
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join(DEFAULT_SEPARATOR))
    }
}

/// Format a scalar or sequence field for display.
///
/// Equal values collapse to one, `percent` appends `%` to each value, and
/// trailing zero decimals are dropped. The separator only delimits values
/// while trimming; multi-value results come back unjoined.
pub fn format_values(value: &Value, percent: bool, separator: &str) -> Formatted {
    let separator = if separator.is_empty() {
        DEFAULT_SEPARATOR
    } else {
        separator
    };

    let mut values = tokens(value);
    if values.is_empty() {
        return Formatted::Single(String::new());
    }
    if values.iter().all(|v| *v == values[0]) {
        values.truncate(1);
    }
    if percent {
        for value in &mut values {
            value.push('%');
        }
    }

    let count = values.len();
    let joined = trim_decimals(&values.join(separator));
    if count > 1 {
        Formatted::PerLevel(joined.split(separator).map(str::to_owned).collect())
    } else {
        Formatted::Single(joined)
    }
}

/// `10.0` → `10`, `2.00%` → `2%`; `1.05` is left alone
pub fn trim_decimals(text: &str) -> String {
    USELESS_DECIMALS.replace_all(text, "$1").into_owned()
}

fn tokens(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().map(scalar_to_string).collect(),
        Value::String(text) => text.split_whitespace().map(str::to_owned).collect(),
        other => vec![scalar_to_string(other)],
    }
}

/// Render a JSON value the way it reads in a tooltip.
///
/// Whole floats print without a fraction and arrays join with commas.
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                int.to_string()
            } else if let Some(uint) = number.as_u64() {
                uint.to_string()
            } else {
                let float = number.as_f64().unwrap_or_default();
                if float.fract() == 0.0 && float.abs() < 1e15 {
                    format!("{}", float as i64)
                } else {
                    float.to_string()
                }
            }
        }
        Value::Array(items) => items
            .iter()
            .map(scalar_to_string)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Leading integer of a field: `"15 12 9"` → 15, `"0.5"` → 0, `"abc"` → None
pub fn parse_leading_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as i64)),
        Value::String(text) => leading_int(text),
        Value::Array(items) => items.first().and_then(parse_leading_int),
        _ => None,
    }
}

fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Strict integer reading of an id-like field: `7`, `"7"`, `" 7 "`
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Whether a script field counts as present (non-empty, non-zero)
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|f| f != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
