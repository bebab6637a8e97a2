#![cfg_attr(feature = "bundle", windows_subsystem = "windows")]
mod app;
mod bridge;
mod components;
mod engine;
mod state;

use crate::app::App;
use crate::bridge::use_session_event_log;
use crate::engine::WebviewEngine;
use crate::state::AppState;
use dioxus::desktop::{LogicalSize, WindowBuilder};
use dioxus::prelude::*;
use portfolio_core::{
    Catalog, CoreError, PlaybackController, PlayerConfig, PortfolioConfig, Session,
    TomlParseError, VideoController,
};
use std::fs::File;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const APP_NAME: &str = "Portfolio";
const STYLE: &str = include_str!("../assets/style.css");

fn main() {
    // Check config for logging.enabled before full config load
    let file_logging_enabled = check_file_logging_enabled();
    init_tracing(file_logging_enabled);

    let config = match PortfolioConfig::load_or_create() {
        Ok(config) => config,
        Err(CoreError::ConfigParseError(parse_error)) => {
            report_parse_error(&parse_error);
            PortfolioConfig::default()
        }
        Err(e) => {
            error!("Could not load config, using defaults: {e}");
            PortfolioConfig::default()
        }
    };

    let catalog = Arc::new(load_catalog(&config));
    info!(
        "Catalog ready: {} folder(s), {} video(s)",
        catalog.folders().len(),
        catalog.videos().len()
    );

    let window = WindowBuilder::new()
        .with_title(APP_NAME)
        .with_resizable(true)
        .with_inner_size(LogicalSize::new(
            f64::from(config.ui.window.width),
            f64::from(config.ui.window.height),
        ));

    let dioxus_config = dioxus::desktop::Config::default()
        .with_window(window)
        .with_disable_context_menu(true);

    // Catalog, UI and player config are injected before launch
    dioxus::LaunchBuilder::desktop()
        .with_cfg(dioxus_config)
        .with_context(catalog)
        .with_context(config.ui)
        .with_context(config.player)
        .launch(app);
}

/// Root component that builds the session and provides it as context
fn app() -> Element {
    let catalog: Arc<Catalog> = use_context();
    let player: PlayerConfig = use_context();

    let session = use_signal(move || {
        Session::new(
            catalog,
            PlaybackController::with_default_volume(WebviewEngine::audio(), player.default_volume),
            VideoController::new(WebviewEngine::video()),
        )
    });
    use_context_provider(|| AppState::new(session));
    use_session_event_log(session);

    rsx! {
        document::Title { "{APP_NAME}" },
        style { "{STYLE}" }
        App {}
    }
}

/// Use the configured catalog file, or the built-in portfolio
fn load_catalog(config: &PortfolioConfig) -> Catalog {
    let Some(path) = &config.catalog.path else {
        return Catalog::sample();
    };

    Catalog::load(path).unwrap_or_else(|e| {
        warn!(
            "Failed to load catalog from {}, using built-in portfolio: {e}",
            path.display()
        );
        Catalog::sample()
    })
}

fn report_parse_error(parse_error: &TomlParseError) {
    error!(
        "Config file {} has a syntax error, using defaults: {parse_error}",
        PortfolioConfig::config_path().display()
    );
}

/// Check if file logging is enabled by reading the config file.
/// This is done before full config loading to set up tracing first.
/// Returns `false` if config doesn't exist or can't be parsed.
fn check_file_logging_enabled() -> bool {
    #[derive(serde::Deserialize)]
    struct PartialConfig {
        #[serde(default)]
        logging: PartialLoggingConfig,
    }
    #[derive(serde::Deserialize, Default)]
    struct PartialLoggingConfig {
        #[serde(default)]
        enabled: bool,
    }

    let Ok(content) = std::fs::read_to_string(PortfolioConfig::config_path()) else {
        return false;
    };

    toml::from_str::<PartialConfig>(&content)
        .map(|c| c.logging.enabled)
        .unwrap_or(false)
}

/// Initialize tracing with console output and optional file logging
fn init_tracing(file_logging_enabled: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer();

    if file_logging_enabled {
        let log_path = portfolio_core::log_file_path();

        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        match File::create(&log_path) {
            Ok(file) => {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .with(file_layer)
                    .init();

                return;
            }
            Err(e) => {
                eprintln!("Failed to create log file at {}: {e}", log_path.display());
            }
        }
    }

    // Fallback: console only
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
