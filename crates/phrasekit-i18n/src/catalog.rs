//! Message catalogs
//!
//! A [`Catalog`] holds the phrases of one locale as a flat key → phrase
//! map. Nested documents are flattened with `.` so `{"nav": {"home": "Home"}}`
//! is looked up as `nav.home`.

use crate::error::{I18nError, I18nResult};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Separator used when flattening nested catalog documents
pub const KEY_SEPARATOR: char = '.';

/// A node of a catalog document before flattening
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CatalogNode {
    /// A phrase
    Phrase(String),
    /// A group of keys sharing a prefix
    Nested(BTreeMap<String, CatalogNode>),
}

/// Flattened phrases for a single locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, CatalogNode>")]
pub struct Catalog {
    phrases: BTreeMap<String, String>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document whose values are strings or nested objects
    pub fn from_json_str(source: &str) -> I18nResult<Self> {
        serde_json::from_str(source).map_err(|e| I18nError::InvalidCatalog {
            message: e.to_string(),
        })
    }

    /// Parse a TOML document whose values are strings or tables
    pub fn from_toml_str(source: &str) -> I18nResult<Self> {
        toml::from_str(source).map_err(|e| I18nError::InvalidCatalog {
            message: e.to_string(),
        })
    }

    /// Insert a phrase, replacing any previous phrase for `key`
    pub fn insert(&mut self, key: impl Into<String>, phrase: impl Into<String>) -> &mut Self {
        self.phrases.insert(key.into(), phrase.into());
        self
    }

    /// Merge a nested document, prefixing every key with `prefix.` when given
    pub fn extend_nested(&mut self, prefix: Option<&str>, nodes: BTreeMap<String, CatalogNode>) {
        for (key, node) in nodes {
            let key = match prefix {
                Some(prefix) => format!("{prefix}{KEY_SEPARATOR}{key}"),
                None => key,
            };
            match node {
                CatalogNode::Phrase(phrase) => {
                    self.phrases.insert(key, phrase);
                }
                CatalogNode::Nested(children) => self.extend_nested(Some(&key), children),
            }
        }
    }

    /// Phrase stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.phrases.get(key).map(String::as_str)
    }

    /// Whether `key` has a phrase
    pub fn contains_key(&self, key: &str) -> bool {
        self.phrases.contains_key(key)
    }

    /// Number of phrases
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Whether the catalog has no phrases
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Iterate over `(key, phrase)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.phrases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Lay this catalog over an empty-key entry.
    ///
    /// Engines are always built from the result so that looking up `""`
    /// resolves to `""`. A catalog that defines `""` itself keeps its own
    /// phrase.
    #[must_use]
    pub fn with_empty_key(mut self) -> Self {
        self.phrases.entry(String::new()).or_default();
        self
    }
}

impl From<BTreeMap<String, CatalogNode>> for Catalog {
    fn from(nodes: BTreeMap<String, CatalogNode>) -> Self {
        let mut catalog = Self::new();
        catalog.extend_nested(None, nodes);
        catalog
    }
}

impl<K, V> FromIterator<(K, V)> for Catalog
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            phrases: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for Catalog
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.phrases
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}
