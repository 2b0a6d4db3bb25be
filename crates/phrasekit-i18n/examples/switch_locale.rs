//! Switching a translator between locales whose catalogs load asynchronously
//!
//! Run with `RUST_LOG=debug` to see the translator's lifecycle events.

use phrasekit_common::{init_logging, LoggingConfig};
use phrasekit_i18n::{Catalog, MessageLookup, Messages, Params, StaticCatalogs, Translator};
use std::time::Duration;

const ENGLISH: &str = r#"{
    "greeting": "Hello, %{name}!",
    "inbox": "You have %{smart_count} new message |||| You have %{smart_count} new messages"
}"#;

const RUSSIAN: &str = r#"{
    "greeting": "Привет, %{name}!",
    "inbox": "У вас %{smart_count} новое сообщение |||| У вас %{smart_count} новых сообщения |||| У вас %{smart_count} новых сообщений"
}"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::development())?;

    let bundled = StaticCatalogs::new().with_locale("en", Catalog::from_json_str(ENGLISH)?);

    // English ships with the binary; everything else arrives later.
    let lookup = move |locale: &str| -> Messages {
        match locale {
            "ru" => Messages::deferred(async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Catalog::from_json_str(RUSSIAN)
            }),
            other => bundled.messages(other),
        }
    };

    let translator = Translator::new(lookup)?;
    print_messages(&translator)?;

    translator.change_locale("ru").await?;
    print_messages(&translator)?;

    if let Err(error) = translator.change_locale("ja").await {
        println!("Could not switch to ja: {error}");
    }
    println!("Still using {}", translator.get_locale());

    Ok(())
}

fn print_messages(translator: &Translator) -> anyhow::Result<()> {
    let locale = translator.get_locale();
    let name = Params::new().add_param("name", "Ada");
    println!("[{locale}] {}", translator.translate("greeting", &name)?);
    for count in [1, 3, 5] {
        let inbox = translator.translate("inbox", &Params::with_count(count))?;
        println!("[{locale}] {inbox}");
    }
    Ok(())
}
