//! Message lookup
//!
//! A [`MessageLookup`] maps a locale to its [`Catalog`]. It can answer
//! immediately ([`Messages::Ready`]) or hand back a future
//! ([`Messages::Deferred`]). The translator needs the initial locale to be
//! ready; later switches accept either.

use crate::catalog::Catalog;
use crate::error::{I18nError, I18nResult, LookupError};
use futures::future::{self, BoxFuture, FutureExt};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;

/// Result of looking up one locale
pub enum Messages {
    /// The catalog is available now
    Ready(Catalog),
    /// The catalog will be available when the future resolves
    Deferred(BoxFuture<'static, Result<Catalog, LookupError>>),
    /// The lookup failed without suspending
    Failed(LookupError),
}

impl Messages {
    /// Wrap a future producing a catalog
    pub fn deferred<F, E>(future: F) -> Self
    where
        F: Future<Output = Result<Catalog, E>> + Send + 'static,
        E: Into<LookupError>,
    {
        Self::Deferred(future.map(|result| result.map_err(Into::into)).boxed())
    }

    /// A synchronous failure
    pub fn failed(error: impl Into<LookupError>) -> Self {
        Self::Failed(error.into())
    }

    /// Whether the catalog is not available yet
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// One future for every variant
    pub fn into_future(self) -> BoxFuture<'static, Result<Catalog, LookupError>> {
        match self {
            Self::Ready(catalog) => future::ready(Ok(catalog)).boxed(),
            Self::Deferred(pending) => pending,
            Self::Failed(error) => future::ready(Err(error)).boxed(),
        }
    }
}

impl fmt::Debug for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(catalog) => f.debug_tuple("Ready").field(catalog).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
            Self::Failed(error) => f.debug_tuple("Failed").field(error).finish(),
        }
    }
}

impl From<Catalog> for Messages {
    fn from(catalog: Catalog) -> Self {
        Self::Ready(catalog)
    }
}

impl<E: Into<LookupError>> From<Result<Catalog, E>> for Messages {
    fn from(result: Result<Catalog, E>) -> Self {
        match result {
            Ok(catalog) => Self::Ready(catalog),
            Err(error) => Self::failed(error),
        }
    }
}

/// Source of per-locale catalogs
///
/// Implemented for any `Fn(&str) -> Messages`, so a closure is usually
/// enough:
///
/// ```
/// use phrasekit_i18n::{Catalog, Messages};
///
/// let lookup = |locale: &str| -> Messages {
///     match locale {
///         "en" => Catalog::from_iter([("hello", "Hello")]).into(),
///         other => Messages::failed(format!("no messages for {other}")),
///     }
/// };
/// # let _ = lookup;
/// ```
pub trait MessageLookup: Send + Sync {
    /// Messages for `locale`
    fn messages(&self, locale: &str) -> Messages;
}

impl<F> MessageLookup for F
where
    F: Fn(&str) -> Messages + Send + Sync,
{
    fn messages(&self, locale: &str) -> Messages {
        self(locale)
    }
}

/// In-memory catalogs keyed by locale
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogs {
    catalogs: HashMap<String, Catalog>,
}

impl StaticCatalogs {
    /// Create an empty set of catalogs
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `catalog` for `locale`
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>, catalog: Catalog) -> Self {
        self.insert(locale, catalog);
        self
    }

    /// Register `catalog` for `locale`, replacing any previous one
    pub fn insert(&mut self, locale: impl Into<String>, catalog: Catalog) {
        self.catalogs.insert(locale.into(), catalog);
    }

    /// Parse a JSON document of the form `{ "<locale>": { <catalog> }, ... }`
    pub fn from_json_str(source: &str) -> I18nResult<Self> {
        let catalogs: HashMap<String, Catalog> =
            serde_json::from_str(source).map_err(|e| I18nError::InvalidCatalog {
                message: e.to_string(),
            })?;
        Ok(Self { catalogs })
    }

    /// Registered locales
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    /// Catalog for `locale`
    pub fn get(&self, locale: &str) -> Option<&Catalog> {
        self.catalogs.get(locale)
    }
}

impl MessageLookup for StaticCatalogs {
    fn messages(&self, locale: &str) -> Messages {
        match self.catalogs.get(locale) {
            Some(catalog) => Messages::Ready(catalog.clone()),
            None => Messages::failed(I18nError::UnknownLocale {
                locale: locale.to_string(),
            }),
        }
    }
}
