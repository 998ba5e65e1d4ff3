//! Alert Notification Module
//!
//! Mục đích: surface High Risk records to the user.
//!
//! Features:
//! - Structured warning in the agent log
//! - Optional generic webhook POST (VITALGUARD_ALERT_WEBHOOK)
//! - Small in-memory history of dispatched notifications
//!
//! The pipeline guarantees the record note is non-empty, so the notification
//! body is never blank.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;

use crate::constants;
use crate::logic::risk::{PredictionRecord, RiskLevel};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Notification title for High Risk alerts
pub const ALERT_TITLE: &str = "VitalGuard Alert: High Risk Detected!";

const MAX_NOTIFY_HISTORY: usize = 100;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AlertNotification {
    pub title: String,
    pub body: String,
    pub risk: RiskLevel,
    pub bmi: f64,
    pub hostname: String,
    pub timestamp: DateTime<Utc>,
}

impl AlertNotification {
    pub fn from_record(record: &PredictionRecord) -> Self {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        Self {
            title: ALERT_TITLE.to_string(),
            body: record.note.clone(),
            risk: record.predicted_risk,
            bmi: record.bmi,
            hostname,
            timestamp: record.timestamp,
        }
    }
}

#[derive(Debug, Clone)]
pub enum NotifyError {
    NetworkError(String),
    SerializeError(String),
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError(e) => write!(f, "Network error: {}", e),
            Self::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for NotifyError {}

// ============================================================================
// STATE
// ============================================================================

static SENT: Lazy<RwLock<Vec<AlertNotification>>> = Lazy::new(|| RwLock::new(Vec::new()));

// ============================================================================
// DISPATCH
// ============================================================================

/// Dispatch a notification for an alerting record. Records without the
/// alert flag are ignored.
pub fn dispatch(record: &PredictionRecord) {
    if !record.alert {
        return;
    }

    let notification = AlertNotification::from_record(record);
    log::warn!("{} \"{}\"", notification.title, notification.body);

    if let Some(url) = constants::get_alert_webhook_url() {
        if let Err(e) = send_webhook(&url, &notification) {
            log::error!("Failed to send alert webhook: {}", e);
        }
    }

    let mut sent = SENT.write();
    sent.push(notification);
    if sent.len() > MAX_NOTIFY_HISTORY {
        let excess = sent.len() - MAX_NOTIFY_HISTORY;
        sent.drain(0..excess);
    }
}

fn send_webhook(url: &str, notification: &AlertNotification) -> Result<(), NotifyError> {
    let body = serde_json::to_string(notification)
        .map_err(|e| NotifyError::SerializeError(e.to_string()))?;

    ureq::post(url)
        .set("Content-Type", "application/json")
        .send_string(&body)
        .map_err(|e| NotifyError::NetworkError(e.to_string()))?;

    log::info!("Alert webhook sent to {}", url);
    Ok(())
}

/// Notifications dispatched in this session, oldest first
pub fn recent() -> Vec<AlertNotification> {
    SENT.read().clone()
}

// ============================================================================
// TESTS
// ============================================================================
