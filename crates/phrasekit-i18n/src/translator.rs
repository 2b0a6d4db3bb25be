//! Locale-switching translator

use crate::catalog::Catalog;
use crate::config::TranslatorConfig;
use crate::engine::{Engine, PhraseEngine, PhraseOptions};
use crate::error::{I18nError, I18nResult};
use crate::locale::DEFAULT_LOCALE;
use crate::lookup::{MessageLookup, Messages};
use crate::params::Params;
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// The locale currently in use together with the engine built for it
struct ActiveLocale<E> {
    locale: String,
    engine: E,
}

/// Translator bound to one locale at a time
///
/// The `(locale, engine)` pair lives behind an [`ArcSwap`]: reads never
/// block, and a locale switch publishes the new pair with a single store
/// once its engine is fully built. Switches are serialised, so overlapping
/// [`change_locale`](Self::change_locale) calls complete in the order they
/// were made.
pub struct Translator<E: Engine = PhraseEngine> {
    lookup: Arc<dyn MessageLookup>,
    options: E::Options,
    state: ArcSwap<ActiveLocale<E>>,
    switch_lock: Mutex<()>,
}

impl Translator<PhraseEngine> {
    /// Build a translator for `"en"` with default phrase options
    pub fn new<L>(lookup: L) -> I18nResult<Self>
    where
        L: MessageLookup + 'static,
    {
        Self::build(lookup, DEFAULT_LOCALE, PhraseOptions::default())
    }

    /// Build a translator for `locale` with default phrase options
    pub fn with_locale<L>(lookup: L, locale: impl Into<String>) -> I18nResult<Self>
    where
        L: MessageLookup + 'static,
    {
        Self::build(lookup, locale, PhraseOptions::default())
    }

    /// Build a translator from a loaded configuration
    pub fn from_config<L>(lookup: L, config: &TranslatorConfig) -> I18nResult<Self>
    where
        L: MessageLookup + 'static,
    {
        config.validate()?;
        Self::build(lookup, config.initial_locale.clone(), config.phrases.clone())
    }
}

impl<E: Engine> Translator<E> {
    /// Build a translator for `initial_locale`.
    ///
    /// The lookup must answer the initial locale synchronously: a deferred
    /// answer is a configuration error and nothing is built.
    pub fn build<L>(
        lookup: L,
        initial_locale: impl Into<String>,
        options: E::Options,
    ) -> I18nResult<Self>
    where
        L: MessageLookup + 'static,
    {
        let locale = initial_locale.into();
        debug!("Building translator for initial locale {}", locale);

        let catalog = match lookup.messages(&locale) {
            Messages::Ready(catalog) => catalog,
            Messages::Deferred(_) => {
                return Err(I18nError::configuration(format!(
                    "messages for the initial locale ({locale}) must be available synchronously"
                )));
            }
            Messages::Failed(source) => return Err(I18nError::lookup(locale, source)),
        };

        let active = Self::activate(locale, catalog, &options)?;

        Ok(Self {
            lookup: Arc::new(lookup),
            options,
            state: ArcSwap::from_pointee(active),
            switch_lock: Mutex::new(()),
        })
    }

    fn activate(
        locale: String,
        catalog: Catalog,
        options: &E::Options,
    ) -> I18nResult<ActiveLocale<E>> {
        let engine = E::new(&locale, catalog.with_empty_key(), options)?;
        Ok(ActiveLocale { locale, engine })
    }

    /// Translate `key` with the active locale's engine
    pub fn translate(&self, key: &str, params: &Params) -> I18nResult<String> {
        Ok(self.state.load().engine.translate(key, params)?)
    }

    /// Switch to `locale`.
    ///
    /// On failure the previous locale and phrases stay active and the error
    /// is returned; a lookup error is available as the error's `source`.
    /// Dropping the returned future before it completes leaves the current
    /// locale in place.
    ///
    /// Switches run one at a time and the lock is held while the lookup's
    /// future is awaited. A lookup that never settles therefore stalls every
    /// later `change_locale` call as well; wrap the call in a timeout such as
    /// [`tokio::time::timeout`] when the lookup cannot guarantee completion.
    /// Dropping the stalled call releases the lock. Translation is unaffected.
    pub async fn change_locale(&self, locale: &str) -> I18nResult<()> {
        let _switching = self.switch_lock.lock().await;
        debug!("Loading messages for locale {}", locale);

        let catalog = self
            .lookup
            .messages(locale)
            .into_future()
            .await
            .map_err(|source| I18nError::lookup(locale, source))?;

        let active = Self::activate(locale.to_string(), catalog, &self.options)?;
        self.state.store(Arc::new(active));

        info!("Switched translator locale to {}", locale);
        Ok(())
    }

    /// The active locale
    pub fn get_locale(&self) -> String {
        self.state.load().locale.clone()
    }

    /// Whether the active engine has a phrase for `key`
    pub fn has_message(&self, key: &str) -> bool {
        self.state.load().engine.has(key)
    }

    /// Engine-wide options passed to every engine this translator builds
    pub fn options(&self) -> &E::Options {
        &self.options
    }
}

impl<E: Engine> fmt::Debug for Translator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("locale", &self.state.load().locale)
            .finish_non_exhaustive()
    }
}
