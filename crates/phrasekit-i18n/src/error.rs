//! Error types for translation operations

use thiserror::Error;

/// Error produced by a caller-supplied message lookup.
///
/// Kept boxed and untouched so the caller gets its own error back from a
/// failed locale switch.
pub type LookupError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by an interpolation engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// No phrase for the key and the missing-key policy forbids a fallback
    #[error("Missing translation for key: {key}")]
    MessageNotFound { key: String },

    /// The phrase exists but could not be formatted with the given params
    #[error("Failed to format message '{key}': {errors:?}")]
    MessageFormat { key: String, errors: Vec<String> },

    /// The catalog could not be compiled into the engine's representation
    #[error("Failed to parse resource for locale {locale}: {errors:?}")]
    ResourceParse { locale: String, errors: Vec<String> },
}

/// Errors that can occur while building or using a translator
#[derive(Error, Debug)]
pub enum I18nError {
    /// The translator was configured in a way it cannot honour
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The message lookup failed for a locale
    #[error("Failed to look up messages for locale {locale}: {source}")]
    Lookup {
        locale: String,
        #[source]
        source: LookupError,
    },

    /// The interpolation engine rejected a catalog or a translation
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A catalog document did not have the expected shape
    #[error("Invalid message catalog: {message}")]
    InvalidCatalog { message: String },

    /// A static lookup has no catalog for the requested locale
    #[error("No messages registered for locale: {locale}")]
    UnknownLocale { locale: String },

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl I18nError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wrap a lookup failure for `locale`
    pub fn lookup(locale: impl Into<String>, source: LookupError) -> Self {
        Self::Lookup {
            locale: locale.into(),
            source,
        }
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
