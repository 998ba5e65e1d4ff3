//! Capped Assessment Logs
//!
//! Most-recent-first JSON files for the history and alert logs, written on
//! every append. Thread-safe, persistent, and tolerant of a corrupted file
//! on load (starts empty rather than failing).

use std::fs;
use std::io;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::types::HistoryItem;
use crate::constants;
use crate::logic::risk::PredictionRecord;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Maximum retained history entries
pub const HISTORY_CAP: usize = 50;

/// Maximum retained alert entries
pub const ALERT_CAP: usize = 20;

const HISTORY_FILE: &str = "history.json";
const ALERTS_FILE: &str = "alerts.json";

// ============================================================================
// STORE
// ============================================================================

/// Capped history + alert logs rooted at one directory.
pub struct VitalStore {
    base_dir: PathBuf,
    history: Vec<HistoryItem>,
    alerts: Vec<PredictionRecord>,
}

impl VitalStore {
    /// Open (or create) a store in the given directory, loading whatever
    /// was persisted by a previous run.
    pub fn new(base_dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&base_dir)?;

        let history = load_list(&base_dir.join(HISTORY_FILE));
        let alerts = load_list(&base_dir.join(ALERTS_FILE));

        Ok(Self {
            base_dir,
            history,
            alerts,
        })
    }

    /// Append a history item (newest first, capped).
    pub fn append_history(&mut self, item: HistoryItem) -> io::Result<()> {
        self.history.insert(0, item);
        self.history.truncate(HISTORY_CAP);
        save_list(&self.base_dir.join(HISTORY_FILE), &self.history)
    }

    /// Append an alert record (newest first, capped). Callers only pass
    /// records whose alert flag is set.
    pub fn append_alert(&mut self, record: PredictionRecord) -> io::Result<()> {
        self.alerts.insert(0, record);
        self.alerts.truncate(ALERT_CAP);
        save_list(&self.base_dir.join(ALERTS_FILE), &self.alerts)
    }

    pub fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    pub fn alerts(&self) -> &[PredictionRecord] {
        &self.alerts
    }

    pub fn clear_history(&mut self) -> io::Result<()> {
        self.history.clear();
        save_list(&self.base_dir.join(HISTORY_FILE), &self.history)
    }

    pub fn clear_alerts(&mut self) -> io::Result<()> {
        self.alerts.clear();
        save_list(&self.base_dir.join(ALERTS_FILE), &self.alerts)
    }
}

fn load_list<T: DeserializeOwned>(path: &PathBuf) -> Vec<T> {
    if !path.exists() {
        return Vec::new();
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("Failed to parse {:?}: {} - starting empty", path, e);
                Vec::new()
            }
        },
        Err(e) => {
            log::warn!("Failed to read {:?}: {} - starting empty", path, e);
            Vec::new()
        }
    }
}

fn save_list<T: Serialize>(path: &PathBuf, list: &[T]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(list)?;
    fs::write(path, json)
}

// ============================================================================
// GLOBAL API
// ============================================================================

/// Global store instance
static STORE: Mutex<Option<VitalStore>> = Mutex::new(None);

/// Initialize the global store
pub fn init(base_dir: Option<PathBuf>) -> io::Result<()> {
    let dir = base_dir.unwrap_or_else(constants::data_dir);
    let store = VitalStore::new(dir)?;
    *STORE.lock() = Some(store);
    Ok(())
}

/// Append to the history log (global)
pub fn append_history(item: HistoryItem) {
    let mut guard = STORE.lock();
    if let Some(store) = guard.as_mut() {
        if let Err(e) = store.append_history(item) {
            log::error!("Failed to persist history item: {}", e);
        }
    } else {
        log::warn!("Storage not initialized, history item dropped");
    }
}

/// Append to the alert log (global)
pub fn append_alert(record: PredictionRecord) {
    let mut guard = STORE.lock();
    if let Some(store) = guard.as_mut() {
        if let Err(e) = store.append_alert(record) {
            log::error!("Failed to persist alert: {}", e);
        }
    } else {
        log::warn!("Storage not initialized, alert dropped");
    }
}

/// Snapshot of the history log, newest first
pub fn history() -> Vec<HistoryItem> {
    STORE
        .lock()
        .as_ref()
        .map(|s| s.history().to_vec())
        .unwrap_or_default()
}

/// Snapshot of the alert log, newest first
pub fn alerts() -> Vec<PredictionRecord> {
    STORE
        .lock()
        .as_ref()
        .map(|s| s.alerts().to_vec())
        .unwrap_or_default()
}

/// Clear the persisted history log
pub fn clear_history() {
    let mut guard = STORE.lock();
    if let Some(store) = guard.as_mut() {
        if let Err(e) = store.clear_history() {
            log::error!("Failed to clear history: {}", e);
        }
    }
}

/// Clear the persisted alert log
pub fn clear_alerts() {
    let mut guard = STORE.lock();
    if let Some(store) = guard.as_mut() {
        if let Err(e) = store.clear_alerts() {
            log::error!("Failed to clear alerts: {}", e);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
