//! Integration tests for the translator
//!
//! These tests exercise construction, translation and locale switching
//! through the public API.

use phrasekit_common::test_utils::init_test_logging;
use phrasekit_i18n::{
    params, Catalog, EngineError, FluentEngine, FluentOptions, I18nError, LookupError,
    Messages, MissingKeyPolicy, Params, PhraseOptions, StaticCatalogs, Translator,
};
use proptest::prelude::*;
use std::error::Error as _;
use std::io;

fn english_and_french() -> StaticCatalogs {
    StaticCatalogs::from_json_str(
        r#"{
            "en": {
                "hello": "Hello",
                "only_en": "English only",
                "inbox": "%{smart_count} message |||| %{smart_count} messages",
                "nav": { "home": "Home" }
            },
            "fr": {
                "hello": "Bonjour",
                "inbox": "%{smart_count} message |||| %{smart_count} messages",
                "nav": { "home": "Accueil" }
            }
        }"#,
    )
    .expect("valid catalogs")
}

#[tokio::test]
async fn test_switching_between_two_locales() {
    init_test_logging();

    let translator = Translator::with_locale(english_and_french(), "en").unwrap();
    assert_eq!(translator.translate("hello", &Params::new()).unwrap(), "Hello");

    translator.change_locale("fr").await.unwrap();

    assert_eq!(translator.translate("hello", &Params::new()).unwrap(), "Bonjour");
    assert_eq!(translator.get_locale(), "fr");
}

#[test]
fn test_deferred_initial_messages_fail_construction() {
    let lookup = |locale: &str| -> Messages {
        let locale = locale.to_string();
        Messages::deferred(async move {
            Ok::<_, LookupError>(Catalog::from_iter([("locale", locale)]))
        })
    };

    let error = Translator::new(lookup).unwrap_err();
    match error {
        I18nError::Configuration { message } => {
            assert!(message.contains("synchronously"));
            assert!(message.contains("en"));
        }
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_lookup_keeps_current_locale() {
    let lookup = |locale: &str| -> Messages {
        match locale {
            "en" => Catalog::from_iter([("hello", "Hello")]).into(),
            _ => Messages::deferred(async {
                Err::<Catalog, _>(io::Error::new(io::ErrorKind::NotFound, "not found"))
            }),
        }
    };
    let translator = Translator::new(lookup).unwrap();

    let error = translator.change_locale("de").await.unwrap_err();

    assert!(matches!(&error, I18nError::Lookup { locale, .. } if locale == "de"));
    let source = error.source().expect("lookup error is kept as source");
    let io_error = source.downcast_ref::<io::Error>().expect("caller's own error type");
    assert_eq!(io_error.kind(), io::ErrorKind::NotFound);
    assert_eq!(io_error.to_string(), "not found");

    assert_eq!(translator.get_locale(), "en");
    assert_eq!(translator.translate("hello", &Params::new()).unwrap(), "Hello");
}

#[tokio::test]
async fn test_synchronously_failed_lookup_keeps_current_locale() {
    let translator = Translator::new(english_and_french()).unwrap();

    let error = translator.change_locale("es").await.unwrap_err();

    assert!(matches!(error, I18nError::Lookup { .. }));
    assert_eq!(translator.get_locale(), "en");
}

#[tokio::test]
async fn test_deferred_lookup_is_accepted_after_construction() {
    let lookup = |locale: &str| -> Messages {
        match locale {
            "en" => Catalog::from_iter([("hello", "Hello")]).into(),
            _ => Messages::deferred(async {
                tokio::task::yield_now().await;
                Ok::<_, LookupError>(Catalog::from_iter([("hello", "Hallo")]))
            }),
        }
    };
    let translator = Translator::new(lookup).unwrap();

    translator.change_locale("de").await.unwrap();

    assert_eq!(translator.get_locale(), "de");
    assert_eq!(translator.translate("hello", &Params::new()).unwrap(), "Hallo");
}

#[tokio::test]
async fn test_switch_does_not_mix_phrases() {
    let options = PhraseOptions::default().missing_key(MissingKeyPolicy::Error);
    let translator: Translator = Translator::build(english_and_french(), "en", options).unwrap();
    assert_eq!(
        translator.translate("only_en", &Params::new()).unwrap(),
        "English only"
    );

    translator.change_locale("fr").await.unwrap();

    let result = translator.translate("only_en", &Params::new());
    assert!(matches!(
        result,
        Err(I18nError::Engine(EngineError::MessageNotFound { .. }))
    ));
    assert_eq!(translator.translate("nav.home", &Params::new()).unwrap(), "Accueil");
}

#[tokio::test]
async fn test_plural_rules_follow_active_locale() {
    let translator = Translator::new(english_and_french()).unwrap();
    assert_eq!(
        translator.translate("inbox", &Params::with_count(0)).unwrap(),
        "0 messages"
    );

    translator.change_locale("fr").await.unwrap();

    assert_eq!(
        translator.translate("inbox", &Params::with_count(0)).unwrap(),
        "0 message"
    );
    assert_eq!(
        translator.translate("inbox", &Params::with_count(2)).unwrap(),
        "2 messages"
    );
}

#[test]
fn test_get_locale_is_stable() {
    let translator = Translator::with_locale(english_and_french(), "fr").unwrap();
    let first = translator.get_locale();
    for _ in 0..10 {
        assert_eq!(translator.get_locale(), first);
    }
}

#[test]
fn test_engine_errors_propagate_unchanged() {
    let catalogs = StaticCatalogs::new().with_locale(
        "en",
        Catalog::from_iter([("welcome", "Welcome, { $name }!")]),
    );
    let translator: Translator<FluentEngine> =
        Translator::build(catalogs, "en", FluentOptions::default()).unwrap();

    let result = translator.translate("welcome", &Params::new());
    assert!(matches!(
        result,
        Err(I18nError::Engine(EngineError::MessageFormat { .. }))
    ));
    assert_eq!(
        translator
            .translate("welcome", &params! { "name" => "Ada" })
            .unwrap(),
        "Welcome, Ada!"
    );
}

#[tokio::test]
async fn test_engine_construction_failure_keeps_current_locale() {
    let catalogs = StaticCatalogs::new()
        .with_locale("en", Catalog::from_iter([("hello", "Hello")]))
        .with_locale("broken", Catalog::from_iter([("hello", "{ $name")]));
    let translator: Translator<FluentEngine> =
        Translator::build(catalogs, "en", FluentOptions::default()).unwrap();

    let result = translator.change_locale("broken").await;

    assert!(matches!(
        result,
        Err(I18nError::Engine(EngineError::ResourceParse { .. }))
    ));
    assert_eq!(translator.get_locale(), "en");
    assert_eq!(translator.translate("hello", &Params::new()).unwrap(), "Hello");
}

#[tokio::test]
async fn test_switch_to_catalog_with_colliding_fluent_ids() {
    let catalogs = StaticCatalogs::from_json_str(
        r#"{
            "en": { "hello": "Hello" },
            "de": {
                "hello": "Hallo",
                "menu": { "open": "Öffnen { $name }" },
                "menu-open": "Menü offen"
            }
        }"#,
    )
    .unwrap();
    let translator: Translator<FluentEngine> =
        Translator::build(catalogs, "en", FluentOptions::default()).unwrap();

    translator.change_locale("de").await.unwrap();

    assert_eq!(translator.get_locale(), "de");
    assert_eq!(
        translator
            .translate("menu.open", &params! { "name" => "Datei" })
            .unwrap(),
        "Öffnen Datei"
    );
    assert_eq!(
        translator.translate("menu-open", &Params::new()).unwrap(),
        "Menü offen"
    );
}

#[test]
fn test_non_numeric_count_selects_plural_form() {
    let translator = Translator::new(english_and_french()).unwrap();
    let result = translator
        .translate("inbox", &params! { "smart_count" => "several" })
        .unwrap();
    assert_eq!(result, "several messages");
}

proptest! {
    #[test]
    fn test_empty_key_always_translates(locale in "[a-zA-Z]{0,8}(-[a-zA-Z0-9]{1,8}){0,2}") {
        let lookup = |_: &str| Messages::Ready(Catalog::new());

        let options = PhraseOptions::default().missing_key(MissingKeyPolicy::Error);
        let phrases: Translator = Translator::build(lookup, locale.clone(), options).unwrap();
        prop_assert_eq!(phrases.translate("", &Params::new()).unwrap(), "");
        prop_assert_eq!(phrases.translate("", &Params::with_count(3)).unwrap(), "");

        let fluent: Translator<FluentEngine> =
            Translator::build(lookup, locale, FluentOptions::default()).unwrap();
        prop_assert_eq!(fluent.translate("", &Params::new()).unwrap(), "");
    }

    #[test]
    fn test_plural_form_index_stays_in_catalog(count in 0u32..10_000) {
        let translator = Translator::with_locale(english_and_french(), "en").unwrap();
        let text = translator.translate("inbox", &Params::with_count(count)).unwrap();
        prop_assert!(text.starts_with(&count.to_string()));
        prop_assert!(!text.contains("||||"));
    }
}
