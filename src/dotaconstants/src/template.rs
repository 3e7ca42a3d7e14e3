//! `%placeholder%` substitution in tooltip descriptions
//!
//! Descriptions reference AbilitySpecial fields by name, e.g.
//! `"Storm's movement speed is %storm_move_speed%"`. Each placeholder takes
//! the value from the first attribute mapping that has a field of that name.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::compat;
use crate::values::scalar_to_string;

/// One AbilitySpecial entry: field name → scalar or per-level value
pub type AttributeMap = Map<String, Value>;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%([^%]*)%").expect("placeholder pattern is valid"));

/// Result of substituting one template
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution {
    pub text: String,
    /// Placeholder names that matched no attribute, in order of appearance
    pub unresolved: Vec<String>,
}

/// Substitute every placeholder in `template`.
///
/// `%%` becomes `%`. A name with no match is retried without the typo marker
/// (see [`compat::strip_placeholder_typo`]) and otherwise left as written.
/// Literal `\n` sequences become newlines afterwards.
pub fn substitute(template: &str, attributes: &[AttributeMap]) -> Substitution {
    let mut unresolved = Vec::new();

    let replaced = PLACEHOLDER.replace_all(template, |caps: &Captures| -> Cow<'static, str> {
        let name = &caps[1];
        if name.is_empty() {
            return Cow::Borrowed("%");
        }
        match find_attribute(name, attributes) {
            Some(value) => Cow::Owned(scalar_to_string(value)),
            None => {
                unresolved.push(name.to_string());
                Cow::Owned(caps[0].to_string())
            }
        }
    });

    Substitution {
        text: unescape_newlines(&replaced),
        unresolved,
    }
}

/// Literal `\n` sequences → newlines
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// First attribute value named `name`, falling back to the typo-stripped name
pub fn find_attribute<'a>(name: &str, attributes: &'a [AttributeMap]) -> Option<&'a Value> {
    let lookup = |name: &str| attributes.iter().find_map(|attr| attr.get(name));
    lookup(name).or_else(|| compat::strip_placeholder_typo(name).and_then(lookup))
}

/// Substitute a tooltip description, logging placeholders that stay unresolved.
///
/// An absent template stays absent. Without an attribute list the template
/// is not substituted at all, so `%%` and `%name%` stay as written.
pub fn render_description(
    entity: &str,
    template: Option<&str>,
    attributes: Option<&[AttributeMap]>,
) -> Option<String> {
    let template = template?;
    let Some(attributes) = attributes else {
        return Some(unescape_newlines(template));
    };
    let Substitution { text, unresolved } = substitute(template, attributes);
    for name in unresolved {
        tracing::warn!(entity, "can't find attribute %{}%", name);
    }
    Some(text)
}
