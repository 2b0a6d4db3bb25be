//! Translator configuration
//!
//! ```toml
//! initial_locale = "fr"
//!
//! [phrases]
//! missing_key = "interpolate"
//!
//! [phrases.interpolation]
//! prefix = "{{"
//! suffix = "}}"
//!
//! [phrases.plural_groups]
//! pt = "french"
//! ```
//!
//! Every field is optional.

use crate::engine::PhraseOptions;
use crate::error::{I18nError, I18nResult};
use crate::locale::DEFAULT_LOCALE;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Settings for [`Translator::from_config`](crate::Translator::from_config)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Locale active right after construction
    pub initial_locale: String,
    /// Options for the phrase engine
    pub phrases: PhraseOptions,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            initial_locale: DEFAULT_LOCALE.to_string(),
            phrases: PhraseOptions::default(),
        }
    }
}

impl TranslatorConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> I18nResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> I18nResult<Self> {
        let path = path.as_ref();
        debug!("Loading translator configuration from {}", path.display());
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check that the configuration can build a translator
    pub fn validate(&self) -> I18nResult<()> {
        if self.initial_locale.trim().is_empty() {
            return Err(I18nError::configuration("initial_locale must not be empty"));
        }
        self.phrases.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MissingKeyPolicy;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = TranslatorConfig::from_toml_str("").unwrap();
        assert_eq!(config.initial_locale, "en");
        assert_eq!(config.phrases.missing_key, MissingKeyPolicy::Warn);
        assert_eq!(config.phrases.interpolation.prefix, "%{");
    }

    #[test]
    fn test_full_document() {
        let config = TranslatorConfig::from_toml_str(
            r#"
initial_locale = "fr"

[phrases]
missing_key = "error"

[phrases.interpolation]
prefix = "{{"
suffix = "}}"
"#,
        )
        .unwrap();

        assert_eq!(config.initial_locale, "fr");
        assert_eq!(config.phrases.missing_key, MissingKeyPolicy::Error);
        assert_eq!(config.phrases.interpolation.suffix, "}}");
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            TranslatorConfig::from_toml_str("initial_locale = 3"),
            Err(I18nError::ConfigParse(_))
        ));
        assert!(matches!(
            TranslatorConfig::from_toml_str("initial_locale = \"  \""),
            Err(I18nError::Configuration { .. })
        ));
        assert!(matches!(
            TranslatorConfig::from_toml_str("[phrases]\nmissing_key = \"shout\""),
            Err(I18nError::ConfigParse(_))
        ));
        assert!(matches!(
            TranslatorConfig::from_toml_str("[phrases.interpolation]\nprefix = \"||||\""),
            Err(I18nError::Configuration { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TranslatorConfig::load_from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(I18nError::Io(_))));
    }
}
