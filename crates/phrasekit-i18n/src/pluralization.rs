//! Plural form selection
//!
//! A phrase with plural forms separates them with `||||`. Each language
//! belongs to a [`PluralType`] that maps a count to the index of the form to
//! use, e.g. Russian picks among three forms while Chinese has only one.

use crate::locale::{primary_subtag, DEFAULT_LOCALE};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

/// Separator between the plural forms of a phrase
pub const PLURAL_DELIMITER: &str = "||||";

/// Groups of languages sharing plural rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralType {
    Arabic,
    BosnianSerbian,
    Chinese,
    Croatian,
    French,
    German,
    Russian,
    Lithuanian,
    Czech,
    Polish,
    Icelandic,
    Slovenian,
    Romanian,
    Ukrainian,
}

static LANGUAGE_TO_TYPE: Lazy<HashMap<&'static str, PluralType>> = Lazy::new(|| {
    PluralType::all()
        .iter()
        .flat_map(|plural_type| {
            plural_type
                .languages()
                .iter()
                .map(move |language| (*language, *plural_type))
        })
        .collect()
});

impl PluralType {
    /// Every plural group
    pub fn all() -> &'static [Self] {
        &[
            Self::Arabic,
            Self::BosnianSerbian,
            Self::Chinese,
            Self::Croatian,
            Self::French,
            Self::German,
            Self::Russian,
            Self::Lithuanian,
            Self::Czech,
            Self::Polish,
            Self::Icelandic,
            Self::Slovenian,
            Self::Romanian,
            Self::Ukrainian,
        ]
    }

    /// Locales assigned to this group
    pub fn languages(self) -> &'static [&'static str] {
        match self {
            Self::Arabic => &["ar"],
            Self::BosnianSerbian => &["bs-Latn-BA", "bs-Cyrl-BA", "srl-RS", "sr-RS"],
            Self::Chinese => &["id", "id-ID", "ja", "ko", "ko-KR", "lo", "ms", "th", "th-TH", "zh"],
            Self::Croatian => &["hr", "hr-HR"],
            Self::German => &[
                "fa", "da", "de", "en", "es", "fi", "el", "he", "hi-IN", "hu", "hu-HU", "it", "nl",
                "no", "pt", "sv", "tr",
            ],
            Self::French => &["fr", "tl", "pt-br"],
            Self::Russian => &["ru", "ru-RU"],
            Self::Lithuanian => &["lt"],
            Self::Czech => &["cs", "cs-CZ", "sk"],
            Self::Polish => &["pl"],
            Self::Icelandic => &["is", "mk"],
            Self::Slovenian => &["sl-SL"],
            Self::Romanian => &["ro"],
            Self::Ukrainian => &["uk", "ua"],
        }
    }

    /// Group for `locale`.
    ///
    /// Tries the exact locale, then the language before the first `-`, then
    /// falls back to the group of [`DEFAULT_LOCALE`].
    pub fn for_locale(locale: &str) -> Self {
        LANGUAGE_TO_TYPE
            .get(locale)
            .or_else(|| LANGUAGE_TO_TYPE.get(primary_subtag(locale)))
            .or_else(|| LANGUAGE_TO_TYPE.get(DEFAULT_LOCALE))
            .copied()
            .unwrap_or(Self::German)
    }

    /// Index of the plural form to use for `count`
    #[allow(
        clippy::float_cmp,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn index(self, count: f64) -> usize {
        let n = count;
        match self {
            Self::Arabic => {
                if n < 3.0 {
                    // Negative or fractional counts use the first form.
                    return if n >= 0.0 && n.fract() == 0.0 { n as usize } else { 0 };
                }
                let last_two = n % 100.0;
                if (3.0..=10.0).contains(&last_two) {
                    3
                } else if last_two >= 11.0 {
                    4
                } else {
                    5
                }
            }
            Self::BosnianSerbian | Self::Croatian | Self::Russian | Self::Ukrainian => {
                russian_groups(n)
            }
            Self::Chinese => 0,
            Self::French => usize::from(n >= 2.0),
            Self::German => usize::from(n != 1.0),
            Self::Lithuanian => {
                if n % 10.0 == 1.0 && n % 100.0 != 11.0 {
                    0
                } else if (2.0..=9.0).contains(&(n % 10.0))
                    && (n % 100.0 < 11.0 || n % 100.0 > 19.0)
                {
                    1
                } else {
                    2
                }
            }
            Self::Czech => {
                if n == 1.0 {
                    0
                } else if (2.0..=4.0).contains(&n) {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1.0 {
                    return 0;
                }
                let end = n % 10.0;
                if (2.0..=4.0).contains(&end) && (n % 100.0 < 10.0 || n % 100.0 >= 20.0) {
                    1
                } else {
                    2
                }
            }
            Self::Icelandic => usize::from(n % 10.0 != 1.0 || n % 100.0 == 11.0),
            Self::Slovenian => {
                let last_two = n % 100.0;
                if last_two == 1.0 {
                    0
                } else if last_two == 2.0 {
                    1
                } else if last_two == 3.0 || last_two == 4.0 {
                    2
                } else {
                    3
                }
            }
            Self::Romanian => {
                if n == 1.0 {
                    return 0;
                }
                let last_two = n % 100.0;
                if n == 0.0 || (2.0..=19.0).contains(&last_two) {
                    1
                } else {
                    2
                }
            }
        }
    }
}

#[allow(clippy::float_cmp)]
fn russian_groups(n: f64) -> usize {
    let last_two = n % 100.0;
    let end = last_two % 10.0;
    if last_two != 11.0 && end == 1.0 {
        0
    } else if (2.0..=4.0).contains(&end) && !(12.0..=14.0).contains(&last_two) {
        1
    } else {
        2
    }
}

/// Pick the form of `phrase` matching `count` in `locale`.
///
/// Falls back to the first form when the phrase has fewer forms than the
/// language needs. The chosen form is trimmed.
pub fn select_plural_form<'a>(phrase: &'a str, locale: &str, count: f64) -> &'a str {
    plural_form_at(phrase, PluralType::for_locale(locale).index(count))
}

/// The `index`-th form of `phrase`, trimmed, or the first form when there
/// is no such form
pub fn plural_form_at(phrase: &str, index: usize) -> &str {
    let mut forms = phrase.split(PLURAL_DELIMITER);
    let first = forms.clone().next().unwrap_or(phrase);
    forms
        .nth(index)
        .filter(|form| !form.is_empty())
        .unwrap_or(first)
        .trim()
}
