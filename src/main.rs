use explore_keys::config::ExploreConfig;
use explore_keys::error::{create_fallback_strategy, user_friendly_message};
use explore_keys::i18n::Catalog;
use explore_keys::{app::App, logging, Result};

fn load_config() -> ExploreConfig {
    match ExploreConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Config error: {}", e);
            eprintln!("{}", user_friendly_message(&e));
            eprintln!("Continuing with default settings.");
            ExploreConfig::default()
        }
    }
}

fn load_catalog(language: &str) -> Catalog {
    match Catalog::load(language) {
        Ok(catalog) => catalog,
        Err(e) => {
            if let Some(fallback) = create_fallback_strategy(&e) {
                tracing::warn!("{} {}", e, fallback);
            }
            Catalog::built_in(language)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    match logging::log_file_path().and_then(|path| logging::init_logging(&path)) {
        Ok(()) => {}
        Err(e) => eprintln!("Logging unavailable: {}", e),
    }

    let config = load_config();
    let catalog = load_catalog(&config.language);
    tracing::info!("Texts loaded for language {}", catalog.language());

    let mut app = App::new(config, catalog)?;
    app.init()?;

    let outcome = app.run();
    app.restore()?;

    if let Err(e) = outcome {
        tracing::error!("Application error: {}", e);
        eprintln!("Application error: {}", user_friendly_message(&e));
        std::process::exit(1);
    }

    tracing::info!("Exiting");
    Ok(())
}
