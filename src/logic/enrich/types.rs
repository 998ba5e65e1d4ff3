//! Enrichment Types
//!
//! Parsed-or-defaulted payload plus the error taxonomy for the round-trip.

use serde_json::Value;

use crate::logic::risk::{FeatureImportance, RiskProbabilities};

// ============================================================================
// PAYLOAD
// ============================================================================

/// What the enrichment backend managed to supply.
///
/// Each field is individually optional: the merge policy substitutes a fixed
/// default per missing field instead of failing the whole record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentPayload {
    pub probabilities: Option<RiskProbabilities>,
    pub note: Option<String>,
    pub explanation: Option<Vec<FeatureImportance>>,
}

impl EnrichmentPayload {
    /// Extract fields from a parsed JSON object, field by field.
    ///
    /// A field that is absent or fails to deserialize is dropped to `None`;
    /// the caller decides the default. Only a response that is not valid
    /// JSON at all counts as a full enrichment failure.
    pub fn from_value(value: &Value) -> Self {
        Self {
            probabilities: value
                .get("probabilities")
                .cloned()
                .and_then(|v| serde_json::from_value(v).ok()),
            note: value
                .get("note")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            explanation: value
                .get("explanation")
                .cloned()
                .and_then(|v| serde_json::from_value(v).ok()),
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Enrichment round-trip errors. All of them resolve to the deterministic
/// fallback record; none crosses the assess boundary.
#[derive(Debug, Clone)]
pub enum EnrichError {
    /// No API key configured
    MissingApiKey,
    NetworkError(String),
    Timeout,
    ServerError(u16),
    ParseError(String),
}

impl std::fmt::Display for EnrichError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "API key not configured"),
            Self::NetworkError(e) => write!(f, "Network error: {}", e),
            Self::Timeout => write!(f, "Request timed out"),
            Self::ServerError(code) => write!(f, "Server error: {}", code),
            Self::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for EnrichError {}

// ============================================================================
// TESTS
// ============================================================================
