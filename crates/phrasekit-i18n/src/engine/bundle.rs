//! Fluent-backed engine
//!
//! Catalog values are Fluent patterns (`Hello, { $name }!`). Keys become
//! message ids with `.` replaced by `-`; keys that still are not valid ids,
//! and empty phrases, are served verbatim. Keys already spelled as ids keep
//! them, so a dotted key whose id is taken (`a.b` next to `a-b`) gets a
//! numbered id instead.

use super::Engine;
use crate::catalog::Catalog;
use crate::error::{EngineError, EngineResult, I18nResult};
use crate::locale::language_identifier_or_root;
use crate::params::Params;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// Options for [`FluentEngine`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FluentOptions {
    /// Wrap placeables in Unicode isolation marks
    pub use_isolating: bool,
}

/// Fluent bundle for one locale
pub struct FluentEngine {
    locale: String,
    bundle: FluentBundle<FluentResource>,
    ids: HashMap<String, String>,
    verbatim: HashMap<String, String>,
}

impl fmt::Debug for FluentEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluentEngine")
            .field("locale", &self.locale)
            .field("bundle", &"FluentBundle<FluentResource>")
            .field("messages", &self.ids.len())
            .field("verbatim", &self.verbatim.len())
            .finish()
    }
}

/// Message id for `key`, if it can be expressed as one
fn message_id(key: &str) -> Option<String> {
    let id = key.replace('.', "-");
    let mut chars = id.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(id)
}

/// First of `id`, `id-1`, `id-2`, ... not in `taken`
fn unique_id(id: String, taken: &HashSet<String>) -> String {
    if !taken.contains(&id) {
        return id;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{id}-{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Append `id = phrase` to an FTL source, indenting continuation lines
fn push_entry(source: &mut String, id: &str, phrase: &str) {
    source.push_str(id);
    source.push_str(" =");
    for line in phrase.lines() {
        source.push_str("\n    ");
        source.push_str(line);
    }
    source.push('\n');
}

impl Engine for FluentEngine {
    type Options = FluentOptions;

    fn new(locale: &str, phrases: Catalog, options: &FluentOptions) -> I18nResult<Self> {
        let mut ids = HashMap::new();
        let mut verbatim = HashMap::new();
        let mut taken = HashSet::new();
        let mut dotted = Vec::new();
        let mut source = String::new();

        for (key, phrase) in phrases.iter() {
            match message_id(key) {
                Some(id) if !phrase.trim().is_empty() => {
                    if key.contains('.') {
                        dotted.push((key, phrase, id));
                    } else {
                        taken.insert(id.clone());
                        push_entry(&mut source, &id, phrase);
                        ids.insert(key.to_string(), id);
                    }
                }
                _ => {
                    verbatim.insert(key.to_string(), phrase.to_string());
                }
            }
        }

        for (key, phrase, id) in dotted {
            let id = unique_id(id, &taken);
            taken.insert(id.clone());
            push_entry(&mut source, &id, phrase);
            ids.insert(key.to_string(), id);
        }

        let resource = FluentResource::try_new(source).map_err(|(_, errors)| {
            EngineError::ResourceParse {
                locale: locale.to_string(),
                errors: errors.iter().map(|e| format!("{e:?}")).collect(),
            }
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![language_identifier_or_root(locale)]);
        bundle.set_use_isolating(options.use_isolating);
        bundle
            .add_resource(resource)
            .map_err(|errors| EngineError::ResourceParse {
                locale: locale.to_string(),
                errors: errors.iter().map(|e| format!("{e:?}")).collect(),
            })?;

        debug!(
            "Built Fluent bundle for locale {} with {} messages",
            locale,
            ids.len()
        );

        Ok(Self {
            locale: locale.to_string(),
            bundle,
            ids,
            verbatim,
        })
    }

    fn translate(&self, key: &str, params: &Params) -> EngineResult<String> {
        if let Some(phrase) = self.verbatim.get(key) {
            return Ok(phrase.clone());
        }

        let not_found = || EngineError::MessageNotFound {
            key: key.to_string(),
        };
        let id = self.ids.get(key).ok_or_else(not_found)?;
        let message = self.bundle.get_message(id).ok_or_else(not_found)?;
        let pattern = message.value().ok_or_else(not_found)?;

        let args = params.to_fluent_args();
        let mut errors = Vec::new();
        let formatted = self.bundle.format_pattern(pattern, Some(&args), &mut errors);

        if !errors.is_empty() {
            return Err(EngineError::MessageFormat {
                key: key.to_string(),
                errors: errors.iter().map(|e| format!("{e:?}")).collect(),
            });
        }

        Ok(formatted.into_owned())
    }

    fn has(&self, key: &str) -> bool {
        self.verbatim.contains_key(key) || self.ids.contains_key(key)
    }

    fn locale(&self) -> &str {
        &self.locale
    }
}
