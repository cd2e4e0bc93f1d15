//! `orbiter` -- world-state feed inspector.
//!
//! Fetches the live Warframe world-state feed, runs one named
//! extraction against it, and prints the result as pretty JSON.
//!
//! # Usage
//!
//! ```text
//! orbiter <feature>
//! ```
//!
//! where `<feature>` is one of `baro`, `varzia`, `sortie`, `archon`,
//! `fissures`, `voidstorms`, `daily-deals`, `nightwave`.
//!
//! # Environment variables
//!
//! | Variable         | Required | Default                  | Description                         |
//! |------------------|----------|--------------------------|-------------------------------------|
//! | `MANIFEST_PATH`  | yes      | --                       | Path to the manifest JSON dataset   |
//! | `WORLDSTATE_URL` | no       | live feed URL            | Feed endpoint override              |
//! | `LANGUAGE`       | no       | `setting.json` language  | Localization language code          |

use orbiter_core::settings::Settings;
use orbiter_manifest::StaticManifest;
use orbiter_worldstate::{HttpWorldStateSource, WorldStateClient, WorldStateError, WORLD_STATE_URL};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orbiter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let feature = std::env::args().nth(1).unwrap_or_else(|| {
        tracing::error!(
            "usage: orbiter <baro|varzia|sortie|archon|fissures|voidstorms|daily-deals|nightwave>"
        );
        std::process::exit(2);
    });

    let manifest_path = std::env::var("MANIFEST_PATH").unwrap_or_else(|_| {
        tracing::error!("MANIFEST_PATH environment variable is required");
        std::process::exit(1);
    });

    let manifest = StaticManifest::from_file(&manifest_path).unwrap_or_else(|err| {
        tracing::error!(path = %manifest_path, "Failed to load manifest: {err}");
        std::process::exit(1);
    });

    let url = std::env::var("WORLDSTATE_URL").unwrap_or_else(|_| WORLD_STATE_URL.to_string());
    let source = HttpWorldStateSource::with_url(url);

    let language = match std::env::var("LANGUAGE") {
        Ok(language) => language,
        Err(_) => match Settings::load() {
            Ok(settings) => settings.language,
            Err(err) => {
                tracing::error!("No LANGUAGE env var and no usable setting.json: {err}");
                std::process::exit(1);
            }
        },
    };

    tracing::info!(feature = %feature, language = %language, "Fetching world state");

    let mut client = WorldStateClient::new(source, manifest, language);
    let output = run_feature(&mut client, &feature).unwrap_or_else(|err| {
        tracing::error!("Extraction failed: {err}");
        std::process::exit(1);
    });

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{text}"),
        Err(err) => {
            tracing::error!("Failed to render output: {err}");
            std::process::exit(1);
        }
    }
}

/// Dispatch one extraction by name, serializing the result to JSON.
fn run_feature(
    client: &mut WorldStateClient<HttpWorldStateSource, StaticManifest>,
    feature: &str,
) -> Result<serde_json::Value, WorldStateError> {
    match feature {
        "baro" => Ok(serde_json::to_value(client.baro()?)?),
        "varzia" => Ok(serde_json::to_value(client.varzia()?)?),
        "sortie" => Ok(serde_json::to_value(client.sortie()?)?),
        "archon" => Ok(serde_json::to_value(client.archon()?)?),
        "fissures" => Ok(serde_json::to_value(client.fissures()?)?),
        "voidstorms" => Ok(serde_json::to_value(client.void_storms()?)?),
        "daily-deals" => client.daily_deals(),
        "nightwave" => Ok(client
            .nightwave()?
            .unwrap_or_else(|| serde_json::Value::String("no active season".to_string()))),
        other => {
            tracing::error!(feature = %other, "Unknown feature");
            std::process::exit(2);
        }
    }
}
