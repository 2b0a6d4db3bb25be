//! Object-safe interface for i18n contexts
//!
//! Code that renders text usually holds an `Arc<dyn TranslationProvider>`
//! and does not care which engine sits behind it.

use crate::engine::Engine;
use crate::error::I18nResult;
use crate::params::Params;
use crate::translator::Translator;
use async_trait::async_trait;

/// Translate, switch locale and report the active locale
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `key` in the active locale
    fn translate(&self, key: &str, params: &Params) -> I18nResult<String>;

    /// Switch to `locale`, keeping the current one on failure
    async fn change_locale(&self, locale: &str) -> I18nResult<()>;

    /// The active locale
    fn get_locale(&self) -> String;
}

#[async_trait]
impl<E: Engine> TranslationProvider for Translator<E> {
    fn translate(&self, key: &str, params: &Params) -> I18nResult<String> {
        Translator::translate(self, key, params)
    }

    async fn change_locale(&self, locale: &str) -> I18nResult<()> {
        Translator::change_locale(self, locale).await
    }

    fn get_locale(&self) -> String {
        Translator::get_locale(self)
    }
}
