//! VitalGuard Core - Main Entry Point

use vitalguard_core::constants;
use vitalguard_core::logic::{monitor, session, storage};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting {} v{}...",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    if let Err(e) = storage::init(None) {
        log::warn!("Storage init failed: {} - assessments will not be persisted", e);
    }

    session::init(None);
    match session::current() {
        Some(user) => log::info!("Restored session for {}", user.username),
        None => match session::login("", session::DEMO_ACCESS_KEY) {
            Ok(user) => log::info!("Logged in as {}", user.username),
            Err(e) => log::warn!("Demo login failed: {}", e),
        },
    }

    if constants::get_gemini_api_key().is_empty() {
        log::info!("GEMINI_API_KEY not set - enrichment will use the local fallback");
    }

    let config = monitor::MonitorConfig::default();
    if !config.enabled {
        log::info!("Monitor loop disabled, exiting");
        return;
    }

    let handle = monitor::start(config);
    handle.join();
}
