//! Interpolation engines
//!
//! The translator never resolves phrases itself. It builds an [`Engine`]
//! for the active locale and delegates every translation to it.

mod bundle;
mod phrase;

pub use self::bundle::{FluentEngine, FluentOptions};
pub use self::phrase::{
    Interpolation, MissingKeyHandler, MissingKeyPolicy, PhraseEngine, PhraseOptions, PluralRule,
};

use crate::catalog::Catalog;
use crate::error::{EngineResult, I18nResult};
use crate::params::Params;

/// A key-resolution, interpolation and pluralization engine bound to one
/// locale's phrases
pub trait Engine: Send + Sync + Sized + 'static {
    /// Engine-wide options, reused unchanged for every locale
    type Options: Clone + Default + Send + Sync + 'static;

    /// Build an engine for `locale` from its phrases
    fn new(locale: &str, phrases: Catalog, options: &Self::Options) -> I18nResult<Self>;

    /// Resolve `key` with `params`
    fn translate(&self, key: &str, params: &Params) -> EngineResult<String>;

    /// Whether `key` has a phrase
    fn has(&self, key: &str) -> bool;

    /// Locale the engine was built for
    fn locale(&self) -> &str;
}
