//! Dictionary model: the parsed contents of one language file.
//!
//! A language file is a JSON object whose values are either strings (leaves)
//! or further objects of the same shape (branches). Anything else is rejected
//! while parsing, so the shape never has to be discovered at lookup time.

use serde::Deserialize;
use std::collections::HashMap;

/// A single value in a language dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    /// Translated text
    Text(String),

    /// Nested section, navigable by further keys
    Node(Dictionary),
}

/// Mapping from key to [`Entry`] for one language (or one nested section).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: HashMap<String, Entry>,
}

impl Dictionary {
    /// Parse a dictionary from JSON text.
    ///
    /// # Returns
    /// * `Ok(Dictionary)` if the top level is an object and every value is a
    ///   string or a nested object of the same shape
    /// * `Err` for invalid JSON, a non-object top level, or any number, bool,
    ///   null or array value anywhere in the tree
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up the entry stored directly under `key`.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Look up `key`, returning the stored key alongside its entry.
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &Entry)> {
        self.entries
            .get_key_value(key)
            .map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys at this level, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Every leaf in the tree paired with its key path, one key per level,
    /// sorted by path.
    ///
    /// Paths are key sequences rather than dotted strings, since keys may
    /// themselves contain `.`.
    pub fn leaves(&self) -> Vec<(Vec<&str>, &str)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut Vec::new(), &mut out);
        out.sort();
        out
    }

    fn collect_leaves<'a>(
        &'a self,
        prefix: &mut Vec<&'a str>,
        out: &mut Vec<(Vec<&'a str>, &'a str)>,
    ) {
        for (key, entry) in &self.entries {
            prefix.push(key);
            match entry {
                Entry::Text(text) => out.push((prefix.clone(), text.as_str())),
                Entry::Node(child) => child.collect_leaves(prefix, out),
            }
            prefix.pop();
        }
    }
}

impl FromIterator<(String, Entry)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (String, Entry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Join a parent node path and a key with `.`.
pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
