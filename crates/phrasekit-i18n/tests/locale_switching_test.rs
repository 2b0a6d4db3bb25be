//! Tests for overlapping locale switches and the provider interface

use phrasekit_common::test_utils::init_test_logging;
use phrasekit_i18n::{
    Catalog, LookupError, Messages, Params, TranslationProvider, Translator, TranslatorConfig,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Lookup whose "slow" locale resolves only when `gate` is notified
struct GatedLookup {
    gate: Arc<Notify>,
    started: Arc<Notify>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl GatedLookup {
    fn new() -> Self {
        Self {
            gate: Arc::new(Notify::new()),
            started: Arc::new(Notify::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn lookup(&self) -> impl Fn(&str) -> Messages + Send + Sync + 'static {
        let gate = Arc::clone(&self.gate);
        let started = Arc::clone(&self.started);
        let calls = Arc::clone(&self.calls);

        move |locale: &str| {
            calls.lock().unwrap().push(locale.to_string());
            let catalog = Catalog::from_iter([("name", locale.to_string())]);
            match locale {
                "slow" => {
                    let gate = Arc::clone(&gate);
                    started.notify_one();
                    Messages::deferred(async move {
                        gate.notified().await;
                        Ok::<_, LookupError>(catalog)
                    })
                }
                _ => Messages::Ready(catalog),
            }
        }
    }
}

#[tokio::test]
async fn test_overlapping_switches_complete_in_call_order() {
    init_test_logging();

    let gated = GatedLookup::new();
    let translator = Arc::new(Translator::new(gated.lookup()).unwrap());

    let slow = tokio::spawn({
        let translator = Arc::clone(&translator);
        async move { translator.change_locale("slow").await }
    });
    gated.started.notified().await;

    let fast = tokio::spawn({
        let translator = Arc::clone(&translator);
        async move { translator.change_locale("fast").await }
    });
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }

    // "fast" is queued behind the pending "slow" switch.
    assert_eq!(translator.get_locale(), "en");
    assert_eq!(*gated.calls.lock().unwrap(), vec!["en", "slow"]);

    gated.gate.notify_one();
    slow.await.unwrap().unwrap();
    fast.await.unwrap().unwrap();

    assert_eq!(translator.get_locale(), "fast");
    assert_eq!(translator.translate("name", &Params::new()).unwrap(), "fast");
    assert_eq!(*gated.calls.lock().unwrap(), vec!["en", "slow", "fast"]);
}

#[tokio::test]
async fn test_dropped_switch_leaves_locale_unchanged() {
    let gated = GatedLookup::new();
    let translator = Translator::new(gated.lookup()).unwrap();

    {
        let switch = translator.change_locale("slow");
        tokio::pin!(switch);
        tokio::select! {
            _ = &mut switch => panic!("the gated lookup never resolves here"),
            () = gated.started.notified() => {}
        }
    }

    assert_eq!(translator.get_locale(), "en");

    // The switch lock was released with the dropped future.
    translator.change_locale("fast").await.unwrap();
    assert_eq!(translator.get_locale(), "fast");
}

#[tokio::test]
async fn test_timed_out_switch_releases_the_queue() {
    let gated = GatedLookup::new();
    let translator = Translator::new(gated.lookup()).unwrap();

    let stalled =
        tokio::time::timeout(Duration::from_millis(20), translator.change_locale("slow")).await;
    assert!(stalled.is_err());
    assert_eq!(translator.get_locale(), "en");

    translator.change_locale("fast").await.unwrap();
    assert_eq!(translator.get_locale(), "fast");
}

#[tokio::test]
async fn test_reads_during_pending_switch_see_old_locale() {
    let gated = GatedLookup::new();
    let translator = Arc::new(Translator::new(gated.lookup()).unwrap());

    let pending = tokio::spawn({
        let translator = Arc::clone(&translator);
        async move { translator.change_locale("slow").await }
    });
    gated.started.notified().await;

    assert_eq!(translator.get_locale(), "en");
    assert_eq!(translator.translate("name", &Params::new()).unwrap(), "en");

    gated.gate.notify_one();
    pending.await.unwrap().unwrap();
    assert_eq!(translator.translate("name", &Params::new()).unwrap(), "slow");
}

#[tokio::test]
async fn test_provider_built_from_config_file() {
    let dir = phrasekit_common::test_utils::create_temp_dir();
    let path = phrasekit_common::test_utils::write_fixture(
        &dir,
        "translator.toml",
        r#"
initial_locale = "fr"

[phrases.interpolation]
prefix = "{{"
suffix = "}}"
"#,
    );
    let config = TranslatorConfig::load_from_file(path).unwrap();

    let lookup = |locale: &str| -> Messages {
        match locale {
            "fr" => Catalog::from_iter([("greet", "Salut {{name}}")]).into(),
            "en" => Catalog::from_iter([("greet", "Hi {{name}}")]).into(),
            other => Messages::failed(format!("unknown locale {other}")),
        }
    };
    let provider: Arc<dyn TranslationProvider> =
        Arc::new(Translator::from_config(lookup, &config).unwrap());
    let params = Params::new().add_param("name", "Ada");

    assert_eq!(provider.get_locale(), "fr");
    assert_eq!(provider.translate("greet", &params).unwrap(), "Salut Ada");

    provider.change_locale("en").await.unwrap();
    assert_eq!(provider.translate("greet", &params).unwrap(), "Hi Ada");

    assert!(provider.change_locale("xx").await.is_err());
    assert_eq!(provider.get_locale(), "en");
}
