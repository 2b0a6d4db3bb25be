//! `%{placeholder}` interpolation with `||||` plural forms

use super::Engine;
use crate::catalog::Catalog;
use crate::error::{EngineError, EngineResult, I18nError, I18nResult};
use crate::locale::primary_subtag;
use crate::params::Params;
use crate::pluralization::{plural_form_at, PluralType, PLURAL_DELIMITER};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Custom fallback for missing keys: `(key, params, locale) -> text`
pub type MissingKeyHandler = Arc<dyn Fn(&str, &Params, &str) -> String + Send + Sync>;

/// Custom plural rule: `(locale, count) -> form index`
pub type PluralRule = Arc<dyn Fn(&str, f64) -> usize + Send + Sync>;

/// What to return for a key with no phrase and no `_` default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKeyPolicy {
    /// Log a warning and return the key itself
    #[default]
    Warn,
    /// Use the key as the phrase, interpolating params into it
    Interpolate,
    /// Fail with [`EngineError::MessageNotFound`]
    Error,
}

/// Placeholder delimiters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Interpolation {
    pub prefix: String,
    pub suffix: String,
}

impl Default for Interpolation {
    fn default() -> Self {
        Self {
            prefix: "%{".to_string(),
            suffix: "}".to_string(),
        }
    }
}

impl Interpolation {
    fn validate(&self) -> I18nResult<()> {
        if self.prefix.is_empty() || self.suffix.is_empty() {
            return Err(I18nError::configuration(
                "interpolation prefix and suffix must not be empty",
            ));
        }
        if self.prefix.contains(PLURAL_DELIMITER) || self.suffix.contains(PLURAL_DELIMITER) {
            return Err(I18nError::configuration(format!(
                "\"{PLURAL_DELIMITER}\" is reserved for pluralization"
            )));
        }
        Ok(())
    }

    fn token_regex(&self) -> I18nResult<Regex> {
        self.validate()?;
        let pattern = format!(
            "{}(.*?){}",
            regex::escape(&self.prefix),
            regex::escape(&self.suffix)
        );
        Regex::new(&pattern).map_err(|e| I18nError::configuration(e.to_string()))
    }
}

/// Options shared by every [`PhraseEngine`] a translator builds
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct PhraseOptions {
    /// Placeholder delimiters
    pub interpolation: Interpolation,
    /// Missing key behaviour
    pub missing_key: MissingKeyPolicy,
    /// Takes precedence over `missing_key` when set
    #[serde(skip)]
    pub on_missing_key: Option<MissingKeyHandler>,
    /// Plural group per locale, consulted before the built-in table
    pub plural_groups: HashMap<String, PluralType>,
    /// Takes precedence over every plural group when set
    #[serde(skip)]
    pub plural_rule: Option<PluralRule>,
}

impl fmt::Debug for PhraseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhraseOptions")
            .field("interpolation", &self.interpolation)
            .field("missing_key", &self.missing_key)
            .field("on_missing_key", &self.on_missing_key.as_ref().map(|_| "Fn"))
            .field("plural_groups", &self.plural_groups)
            .field("plural_rule", &self.plural_rule.as_ref().map(|_| "Fn"))
            .finish()
    }
}

impl PhraseOptions {
    /// Check the options without building an engine
    pub fn validate(&self) -> I18nResult<()> {
        self.interpolation.validate()
    }

    /// Set the missing key policy
    #[must_use]
    pub fn missing_key(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_key = policy;
        self
    }

    /// Set custom placeholder delimiters
    #[must_use]
    pub fn interpolation(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.interpolation = Interpolation {
            prefix: prefix.into(),
            suffix: suffix.into(),
        };
        self
    }

    /// Install a custom missing key handler
    #[must_use]
    pub fn on_missing_key<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, &Params, &str) -> String + Send + Sync + 'static,
    {
        self.on_missing_key = Some(Arc::new(handler));
        self
    }

    /// Use `group`'s plural rules for `locale`
    #[must_use]
    pub fn plural_group(mut self, locale: impl Into<String>, group: PluralType) -> Self {
        self.plural_groups.insert(locale.into(), group);
        self
    }

    /// Install a custom plural rule for every locale
    #[must_use]
    pub fn plural_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&str, f64) -> usize + Send + Sync + 'static,
    {
        self.plural_rule = Some(Arc::new(rule));
        self
    }

    /// Plural group for `locale`: configured groups by exact locale, then by
    /// primary language, then the built-in table
    fn plural_type(&self, locale: &str) -> PluralType {
        self.plural_groups
            .get(locale)
            .or_else(|| self.plural_groups.get(primary_subtag(locale)))
            .copied()
            .unwrap_or_else(|| PluralType::for_locale(locale))
    }
}

/// Phrase engine for one locale
#[derive(Debug)]
pub struct PhraseEngine {
    locale: String,
    phrases: Catalog,
    options: PhraseOptions,
    plural: PluralType,
    token: Regex,
}

impl PhraseEngine {
    /// Apply plural selection and interpolation to `phrase`.
    ///
    /// Placeholders without a matching param are left as written.
    pub fn transform(&self, phrase: &str, params: &Params) -> String {
        let selected = match params.smart_count() {
            Some(count) if !phrase.is_empty() => plural_form_at(phrase, self.plural_index(count)),
            _ => phrase,
        };

        self.token
            .replace_all(selected, |caps: &Captures<'_>| {
                params
                    .interpolation_value(&caps[1])
                    .map_or_else(|| caps[0].to_string(), Cow::into_owned)
            })
            .into_owned()
    }

    fn plural_index(&self, count: f64) -> usize {
        match &self.options.plural_rule {
            Some(rule) => rule(&self.locale, count),
            None => self.plural.index(count),
        }
    }

    fn missing(&self, key: &str, params: &Params) -> EngineResult<String> {
        if let Some(handler) = &self.options.on_missing_key {
            return Ok(handler(key, params, &self.locale));
        }

        match self.options.missing_key {
            MissingKeyPolicy::Warn => {
                warn!(key, locale = %self.locale, "Missing translation for key");
                Ok(key.to_string())
            }
            MissingKeyPolicy::Interpolate => Ok(self.transform(key, params)),
            MissingKeyPolicy::Error => Err(EngineError::MessageNotFound {
                key: key.to_string(),
            }),
        }
    }
}

impl Engine for PhraseEngine {
    type Options = PhraseOptions;

    fn new(locale: &str, phrases: Catalog, options: &PhraseOptions) -> I18nResult<Self> {
        let token = options.interpolation.token_regex()?;
        Ok(Self {
            locale: locale.to_string(),
            phrases,
            plural: options.plural_type(locale),
            options: options.clone(),
            token,
        })
    }

    fn translate(&self, key: &str, params: &Params) -> EngineResult<String> {
        if let Some(phrase) = self.phrases.get(key) {
            return Ok(self.transform(phrase, params));
        }
        if let Some(phrase) = params.default_phrase() {
            return Ok(self.transform(phrase, params));
        }
        self.missing(key, params)
    }

    fn has(&self, key: &str) -> bool {
        self.phrases.contains_key(key)
    }

    fn locale(&self) -> &str {
        &self.locale
    }
}
