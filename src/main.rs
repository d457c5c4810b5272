//! Day-Type Classifier - Desktop Entry Point

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use daytype_classifier::api::desktop;
use daytype_classifier::constants::{APP_NAME, APP_VERSION, DEFAULT_LOG_FILTER};
use daytype_classifier::{AppConfig, AppState};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let config = AppConfig::from_env();

    // No model, no session: nothing below runs without a classifier
    let state = match AppState::initialize(&config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("FATAL: {}", e);
            eprintln!("FATAL ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let meta = state.engine().metadata();
    log::info!("Model: {} ({} backend)", meta.model_path, meta.backend);

    if let Err(e) = desktop::run(state) {
        log::error!("Failed to run the Tauri application: {}", e);
        std::process::exit(1);
    }
}
