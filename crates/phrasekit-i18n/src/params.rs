//! Translation parameters
//!
//! [`Params`] carries the values substituted into a phrase, the count that
//! selects a plural form (`smart_count`) and an optional default phrase
//! (`_`) used when the key is missing.

use fluent::{FluentArgs, FluentValue};
use std::borrow::Cow;
use std::collections::HashMap;

/// Param that selects a plural form
pub const SMART_COUNT: &str = "smart_count";

/// Param holding the phrase to use when the key is missing
pub const DEFAULT_PHRASE: &str = "_";

/// Named values for one translation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: HashMap<String, FluentValue<'static>>,
}

impl Params {
    /// Create empty params
    pub fn new() -> Self {
        Self::default()
    }

    /// Params selecting the plural form for `count`, also available as
    /// `%{smart_count}` in the phrase
    pub fn with_count(count: impl Into<f64>) -> Self {
        let count: f64 = count.into();
        Self::new().add_param(SMART_COUNT, count)
    }

    /// Add a parameter
    pub fn add_param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FluentValue<'static>>,
    {
        self.set(key, value);
        self
    }

    /// Set the phrase used when the key has no translation
    pub fn with_default(self, phrase: impl Into<String>) -> Self {
        self.add_param(DEFAULT_PHRASE, phrase.into())
    }

    /// Set a parameter in place
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FluentValue<'static>>,
    {
        self.values.insert(key.into(), value.into());
    }

    /// Raw value of a parameter
    pub fn get(&self, key: &str) -> Option<&FluentValue<'static>> {
        self.values.get(key)
    }

    /// Whether no parameters are set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The plural-selecting count, if one was given.
    ///
    /// Numeric strings are parsed. Any other value still selects a form and
    /// counts as `NaN`; only an absent or `None` value skips plural selection.
    pub fn smart_count(&self) -> Option<f64> {
        match self.values.get(SMART_COUNT)? {
            FluentValue::None => None,
            FluentValue::Number(number) => Some(number.value),
            FluentValue::String(text) => Some(text.trim().parse().unwrap_or(f64::NAN)),
            _ => Some(f64::NAN),
        }
    }

    /// The default phrase, if one was given
    pub fn default_phrase(&self) -> Option<&str> {
        match self.values.get(DEFAULT_PHRASE)? {
            FluentValue::String(text) => Some(text.as_ref()),
            _ => None,
        }
    }

    /// Text substituted for `%{key}`.
    ///
    /// Only strings and numbers interpolate; anything else leaves the
    /// placeholder in place.
    pub fn interpolation_value(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.values.get(key)? {
            FluentValue::String(text) => Some(Cow::Borrowed(text.as_ref())),
            FluentValue::Number(number) => Some(number.as_string()),
            _ => None,
        }
    }

    /// Convert to FluentArgs for message formatting
    pub fn to_fluent_args(&self) -> FluentArgs<'_> {
        let mut args = FluentArgs::new();
        for (key, value) in &self.values {
            args.set(key.as_str(), value.clone());
        }
        args
    }
}

impl From<f64> for Params {
    fn from(count: f64) -> Self {
        Self::with_count(count)
    }
}

/// Build [`Params`] from `key => value` pairs
///
/// ```
/// use phrasekit_i18n::params;
///
/// let params = params! { "name" => "Ada", "smart_count" => 2 };
/// assert_eq!(params.smart_count(), Some(2.0));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::Params::new();
        $(
            params.set($key, $value);
        )+
        params
    }};
}
