//! Locale-switching translator for phrasekit
//!
//! A [`Translator`] is built from a function that returns the messages of a
//! locale. It keeps one locale active at a time and delegates every
//! translation to an interpolation [`Engine`]:
//!
//! - [`PhraseEngine`] (default): `%{name}` placeholders, `||||`-separated
//!   plural forms chosen by `smart_count`
//! - [`FluentEngine`]: catalog values are Fluent patterns
//!
//! # Example
//!
//! ```rust
//! use phrasekit_i18n::{Catalog, Params, StaticCatalogs, Translator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalogs = StaticCatalogs::new()
//!     .with_locale("en", Catalog::from_json_str(r#"{"hello": "Hello, %{name}"}"#)?)
//!     .with_locale("fr", Catalog::from_json_str(r#"{"hello": "Bonjour, %{name}"}"#)?);
//!
//! let translator = Translator::new(catalogs)?;
//! let params = Params::new().add_param("name", "Ada");
//! assert_eq!(translator.translate("hello", &params)?, "Hello, Ada");
//!
//! translator.change_locale("fr").await?;
//! assert_eq!(translator.translate("hello", &params)?, "Bonjour, Ada");
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod locale;
pub mod lookup;
pub mod params;
pub mod pluralization;
pub mod provider;
pub mod translator;

pub use catalog::{Catalog, CatalogNode};
pub use config::TranslatorConfig;
pub use engine::{
    Engine, FluentEngine, FluentOptions, Interpolation, MissingKeyHandler, MissingKeyPolicy,
    PhraseEngine, PhraseOptions, PluralRule,
};
pub use error::{EngineError, EngineResult, I18nError, I18nResult, LookupError};
pub use locale::DEFAULT_LOCALE;
pub use lookup::{MessageLookup, Messages, StaticCatalogs};
pub use params::Params;
pub use pluralization::PluralType;
pub use provider::TranslationProvider;
pub use translator::Translator;

// Re-export commonly used Fluent types
pub use fluent::{FluentArgs, FluentValue};
