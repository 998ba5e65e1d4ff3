//! Risk Types
//!
//! Core types cho risk assessment. KHÔNG chứa logic - chỉ data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// RISK CLASSIFICATION
// ============================================================================

/// Risk classification tiers, ordered by severity (Low < Medium < High).
///
/// Derived solely from the deterministic medical rules, never from the AI
/// enrichment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Vitals within normal range
    #[serde(rename = "Low Risk")]
    Low,
    /// Elevated vitals, needs monitoring
    #[serde(rename = "Medium Risk")]
    Medium,
    /// Critical vitals, raises an alert
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#10b981",    // Green
            RiskLevel::Medium => "#f59e0b", // Amber
            RiskLevel::High => "#f43f5e",   // Rose
        }
    }

    /// Alert fires exactly when the rule-based tier is High.
    pub fn is_alert(&self) -> bool {
        matches!(self, RiskLevel::High)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ALERT PROVENANCE
// ============================================================================

/// Provenance of the alert decision.
///
/// Reports what justified the alert, not who supplied the probabilities or
/// note: `MedicalRule` whenever the alert fired (or enrichment failed),
/// `MlModel` for a quiet record decorated by a successful enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskSource {
    #[serde(rename = "medical_rule")]
    MedicalRule,
    #[serde(rename = "ml_model")]
    MlModel,
}

impl RiskSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskSource::MedicalRule => "medical_rule",
            RiskSource::MlModel => "ml_model",
        }
    }
}

// ============================================================================
// PROBABILITY BREAKDOWN
// ============================================================================

/// Probability triple over the risk tiers. Should sum to ≈1.0; the values
/// are trusted as returned and never renormalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskProbabilities {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl RiskProbabilities {
    pub fn sum(&self) -> f64 {
        self.low + self.medium + self.high
    }
}

// ============================================================================
// FEATURE IMPORTANCE
// ============================================================================

/// One explanation entry: feature name + importance weight in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

impl FeatureImportance {
    pub fn new(feature: &str, importance: f64) -> Self {
        Self {
            feature: feature.to_string(),
            importance,
        }
    }
}

// ============================================================================
// PREDICTION RECORD (Main struct)
// ============================================================================

/// Unified output of one assessment invocation.
///
/// Created exactly once per assessment and immutable thereafter; the caller
/// appends it to the bounded history/alert logs, never mutates it in place.
/// `predicted_risk`, `bmi` and `alert` come from the deterministic rules and
/// are never overwritten by enrichment output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub predicted_risk: RiskLevel,
    /// Derived BMI, one-decimal rounding
    pub bmi: f64,
    pub probabilities: RiskProbabilities,
    /// Short natural-language note; guaranteed non-empty
    pub note: String,
    /// True iff predicted_risk is High Risk by rule
    pub alert: bool,
    pub source: RiskSource,
    /// Ordered as returned by enrichment or by the fallback table
    pub explanation: Vec<FeatureImportance>,
    /// When the assessment was computed (UTC, serialized ISO-8601)
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// TESTS
// ============================================================================
