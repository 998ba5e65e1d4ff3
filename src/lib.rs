//! VitalGuard AI Core
//!
//! Health-monitoring core service: simulated vitals, rule-based risk
//! assessment, AI enrichment with a deterministic fallback, bounded
//! history/alert persistence, and high-risk notification dispatch.

pub mod constants;
pub mod logic;
