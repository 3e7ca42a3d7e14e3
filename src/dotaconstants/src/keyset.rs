//! Membership sets serialized as `{ "key": 1, ... }`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Presence-only set of keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeySet(BTreeMap<String, u8>);

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key was not already present
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.0.insert(key.into(), 1).is_none()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for KeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for KeySet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}
