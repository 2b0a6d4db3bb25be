//! Locale utilities
//!
//! Locales are opaque strings to the translator. These helpers are for
//! engines that need to interpret them.

use tracing::debug;
use unic_langid::LanguageIdentifier;

/// Locale used when none is given
pub const DEFAULT_LOCALE: &str = "en";

/// The part of `locale` before the first `-`
pub fn primary_subtag(locale: &str) -> &str {
    locale.split_once('-').map_or(locale, |(language, _)| language)
}

/// Parse `locale` as a BCP 47 language identifier
pub fn language_identifier(locale: &str) -> Option<LanguageIdentifier> {
    locale.parse().ok()
}

/// Parse `locale`, falling back to the root identifier (`und`) when it is
/// not a valid language tag
pub fn language_identifier_or_root(locale: &str) -> LanguageIdentifier {
    language_identifier(locale).unwrap_or_else(|| {
        debug!("Locale {:?} is not a language tag, using root identifier", locale);
        LanguageIdentifier::default()
    })
}
