//! Storage Module - Bounded Session Artifacts
//!
//! Persists the assessment history and alert log as capped, most-recent-first
//! JSON files under the local data dir.
//!
//! ## Structure
//! - `types.rs` - HistoryItem (record + the vitals that produced it)
//! - `store.rs` - Capped JSON logs (thread-safe, persistent)
//!
//! ## Usage
//! ```ignore
//! use crate::logic::storage;
//!
//! // Initialize at app start
//! storage::init(None)?;
//!
//! // Append from the monitor loop
//! storage::append_history(item);
//! storage::append_alert(record);
//! ```

pub mod store;
pub mod types;

pub use store::{
    alerts, append_alert, append_history, clear_alerts, clear_history, history, init, VitalStore,
    ALERT_CAP, HISTORY_CAP,
};
pub use types::HistoryItem;
