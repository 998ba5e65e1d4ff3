//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default enrichment backend, only edit this file.

use std::path::PathBuf;

/// Default Gemini API base URL
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default Gemini model for medical reasoning and explanation tasks
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-preview";

/// Default enrichment request timeout (seconds)
pub const DEFAULT_ENRICH_TIMEOUT: u64 = 10;

/// Default monitor tick interval (seconds)
pub const DEFAULT_MONITOR_INTERVAL: u64 = 6;

/// Directory name under the local data dir
pub const DATA_DIR_NAME: &str = "vitalguard";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "VitalGuard";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get Gemini API base URL from environment or use default
pub fn get_gemini_api_url() -> String {
    std::env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string())
}

/// Get Gemini API key from environment (empty = enrichment disabled)
pub fn get_gemini_api_key() -> String {
    std::env::var("GEMINI_API_KEY").unwrap_or_default()
}

/// Get Gemini model from environment or use default
pub fn get_gemini_model() -> String {
    std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string())
}

/// Get enrichment timeout from environment or use default
pub fn get_enrich_timeout() -> u64 {
    std::env::var("VITALGUARD_ENRICH_TIMEOUT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ENRICH_TIMEOUT)
}

/// Get monitor tick interval from environment or use default
pub fn get_monitor_interval() -> u64 {
    std::env::var("VITALGUARD_INTERVAL")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MONITOR_INTERVAL)
}

/// Get alert webhook URL from environment (None = webhook disabled)
pub fn get_alert_webhook_url() -> Option<String> {
    std::env::var("VITALGUARD_ALERT_WEBHOOK")
        .ok()
        .filter(|s| !s.is_empty())
}

/// Check if the monitor loop is enabled
pub fn is_monitor_enabled() -> bool {
    std::env::var("VITALGUARD_MONITOR_ENABLED")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}

/// Base directory for persisted artifacts (session, history, alerts)
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}
