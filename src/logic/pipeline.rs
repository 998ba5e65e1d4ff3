//! Risk Assessment Pipeline
//!
//! The assess() contract: derive BMI, evaluate the medical rules, request AI
//! enrichment, merge or fall back, stamp the record.
//!
//! assess() never fails visibly - every invocation yields a usable
//! PredictionRecord.

use chrono::Utc;

use super::enrich::{EnrichmentBackend, EnrichmentPayload};
use super::risk::classifier::{classify_with_thresholds, compute_bmi};
use super::risk::rules::RiskThresholds;
use super::risk::types::{
    FeatureImportance, PredictionRecord, RiskLevel, RiskProbabilities, RiskSource,
};
use super::vitals::VitalsSnapshot;

// ============================================================================
// MERGE DEFAULTS
// ============================================================================

/// Per-field default when a successful enrichment omits probabilities
pub const DEFAULT_PROBABILITIES: RiskProbabilities = RiskProbabilities {
    low: 0.8,
    medium: 0.1,
    high: 0.1,
};

/// Per-field default when a successful enrichment omits the note
pub const DEFAULT_NOTE: &str = "Standard monitoring active.";

/// Fixed probabilities when the enrichment call fails entirely
pub const FALLBACK_PROBABILITIES: RiskProbabilities = RiskProbabilities {
    low: 0.7,
    medium: 0.2,
    high: 0.1,
};

/// Fixed note when the enrichment call fails entirely
pub const FALLBACK_NOTE: &str = "Monitoring vital signs. BMI is slightly elevated.";

/// Fixed explanation table when the enrichment call fails entirely
pub fn fallback_explanation() -> Vec<FeatureImportance> {
    vec![
        FeatureImportance::new("heart_rate", 0.8),
        FeatureImportance::new("bmi", 0.5),
    ]
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Stateless per call; the backend is injected at construction so tests run
/// against a mock. Safe to call concurrently.
pub struct RiskPipeline<E> {
    backend: E,
    thresholds: RiskThresholds,
}

impl<E: EnrichmentBackend> RiskPipeline<E> {
    pub fn new(backend: E) -> Self {
        Self {
            backend,
            thresholds: RiskThresholds::default(),
        }
    }

    pub fn with_thresholds(backend: E, thresholds: RiskThresholds) -> Self {
        Self {
            backend,
            thresholds,
        }
    }

    /// Assess one snapshot. Suspends only during the enrichment round-trip.
    ///
    /// The rule verdict (predicted_risk, alert, bmi) is computed locally
    /// before the remote call and is never overwritten by enrichment output,
    /// even if the enrichment JSON carries conflicting fields.
    pub async fn assess(&self, snapshot: &VitalsSnapshot) -> PredictionRecord {
        let bmi = compute_bmi(snapshot.weight_kg, snapshot.height_m);
        let risk = classify_with_thresholds(snapshot, bmi, &self.thresholds);

        match self.backend.enrich(snapshot, bmi).await {
            Ok(payload) => enriched_record(risk, bmi, payload),
            Err(e) => {
                log::warn!("AI enrichment failed, falling back to basic mock: {}", e);
                fallback_record(risk, bmi)
            }
        }
    }
}

// ============================================================================
// MERGE POLICY
// ============================================================================

/// Success path: fields used verbatim where present, per-field defaults
/// otherwise. An empty or whitespace-only note counts as missing so the
/// alert notification is never blank.
fn enriched_record(risk: RiskLevel, bmi: f64, payload: EnrichmentPayload) -> PredictionRecord {
    let alert = risk.is_alert();

    PredictionRecord {
        predicted_risk: risk,
        bmi,
        probabilities: payload.probabilities.unwrap_or(DEFAULT_PROBABILITIES),
        note: payload
            .note
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NOTE.to_string()),
        alert,
        // Reports what justified the alert, not who supplied the numbers
        source: if alert {
            RiskSource::MedicalRule
        } else {
            RiskSource::MlModel
        },
        explanation: payload.explanation.unwrap_or_default(),
        timestamp: Utc::now(),
    }
}

/// Failure path: fully deterministic fallback, rule verdict intact.
fn fallback_record(risk: RiskLevel, bmi: f64) -> PredictionRecord {
    PredictionRecord {
        predicted_risk: risk,
        bmi,
        probabilities: FALLBACK_PROBABILITIES,
        note: FALLBACK_NOTE.to_string(),
        alert: risk.is_alert(),
        source: RiskSource::MedicalRule,
        explanation: fallback_explanation(),
        timestamp: Utc::now(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::enrich::EnrichError;

    /// Backend returning a canned payload
    struct MockBackend {
        payload: EnrichmentPayload,
    }

    impl EnrichmentBackend for MockBackend {
        async fn enrich(
            &self,
            _snapshot: &VitalsSnapshot,
            _bmi: f64,
        ) -> Result<EnrichmentPayload, EnrichError> {
            Ok(self.payload.clone())
        }
    }

    /// Backend that always fails, like a dead network
    struct FailingBackend;

    impl EnrichmentBackend for FailingBackend {
        async fn enrich(
            &self,
            _snapshot: &VitalsSnapshot,
            _bmi: f64,
        ) -> Result<EnrichmentPayload, EnrichError> {
            Err(EnrichError::NetworkError("connection refused".to_string()))
        }
    }

    fn full_payload() -> EnrichmentPayload {
        EnrichmentPayload {
            probabilities: Some(RiskProbabilities {
                low: 0.1,
                medium: 0.2,
                high: 0.7,
            }),
            note: Some("Tachycardia observed.".to_string()),
            explanation: Some(vec![
                FeatureImportance::new("heart_rate", 0.9),
                FeatureImportance::new("temperature", 0.3),
                FeatureImportance::new("bmi", 0.2),
            ]),
        }
    }

    fn snapshot(heart_rate: u32, temperature: f64) -> VitalsSnapshot {
        VitalsSnapshot {
            heart_rate,
            body_temperature: temperature,
            ..VitalsSnapshot::default()
        }
    }

    #[tokio::test]
    async fn test_rule_verdict_survives_enrichment() {
        let pipeline = RiskPipeline::new(MockBackend {
            payload: full_payload(),
        });

        let record = pipeline.assess(&snapshot(130, 36.6)).await;
        assert_eq!(record.predicted_risk, RiskLevel::High);
        assert!(record.alert);
        // Explanatory payload came through verbatim
        assert_eq!(record.note, "Tachycardia observed.");
        assert_eq!(record.probabilities.high, 0.7);
        assert_eq!(record.explanation.len(), 3);
    }

    #[tokio::test]
    async fn test_rule_verdict_survives_failure() {
        let pipeline = RiskPipeline::new(FailingBackend);

        let record = pipeline.assess(&snapshot(130, 36.6)).await;
        assert_eq!(record.predicted_risk, RiskLevel::High);
        assert!(record.alert);

        let record = pipeline.assess(&snapshot(95, 36.6)).await;
        assert_eq!(record.predicted_risk, RiskLevel::Medium);
        assert!(!record.alert);
    }

    #[tokio::test]
    async fn test_failure_yields_exact_fallback() {
        let pipeline = RiskPipeline::new(FailingBackend);
        let record = pipeline.assess(&snapshot(72, 36.6)).await;

        assert_eq!(record.probabilities, FALLBACK_PROBABILITIES);
        assert_eq!(record.note, FALLBACK_NOTE);
        assert_eq!(record.explanation, fallback_explanation());
        assert_eq!(record.source, RiskSource::MedicalRule);
        assert_eq!(record.predicted_risk, RiskLevel::Low);
        assert!(!record.alert);
        assert_eq!(record.bmi, 24.7);
    }

    #[tokio::test]
    async fn test_missing_note_gets_default_keeps_rest() {
        let mut payload = full_payload();
        payload.note = None;
        let pipeline = RiskPipeline::new(MockBackend { payload });

        let record = pipeline.assess(&snapshot(72, 36.6)).await;
        assert_eq!(record.note, DEFAULT_NOTE);
        assert_eq!(record.probabilities.high, 0.7);
        assert_eq!(record.explanation.len(), 3);
    }

    #[tokio::test]
    async fn test_blank_note_treated_as_missing() {
        let mut payload = full_payload();
        payload.note = Some("   ".to_string());
        let pipeline = RiskPipeline::new(MockBackend { payload });

        let record = pipeline.assess(&snapshot(72, 36.6)).await;
        assert_eq!(record.note, DEFAULT_NOTE);
        assert!(!record.note.is_empty());
    }

    #[tokio::test]
    async fn test_empty_payload_gets_all_defaults() {
        let pipeline = RiskPipeline::new(MockBackend {
            payload: EnrichmentPayload::default(),
        });

        let record = pipeline.assess(&snapshot(72, 36.6)).await;
        assert_eq!(record.probabilities, DEFAULT_PROBABILITIES);
        assert_eq!(record.note, DEFAULT_NOTE);
        assert!(record.explanation.is_empty());
    }

    #[tokio::test]
    async fn test_source_reflects_alert_provenance() {
        // alert == true => medical_rule even when enrichment succeeded
        let pipeline = RiskPipeline::new(MockBackend {
            payload: full_payload(),
        });
        let record = pipeline.assess(&snapshot(130, 36.6)).await;
        assert_eq!(record.source, RiskSource::MedicalRule);

        // alert == false + success => ml_model
        let record = pipeline.assess(&snapshot(72, 36.6)).await;
        assert_eq!(record.source, RiskSource::MlModel);

        // alert == false + failure => medical_rule
        let pipeline = RiskPipeline::new(FailingBackend);
        let record = pipeline.assess(&snapshot(72, 36.6)).await;
        assert_eq!(record.source, RiskSource::MedicalRule);
    }

    #[tokio::test]
    async fn test_probabilities_not_renormalized() {
        let pipeline = RiskPipeline::new(MockBackend {
            payload: EnrichmentPayload {
                probabilities: Some(RiskProbabilities {
                    low: 0.2,
                    medium: 0.2,
                    high: 0.2,
                }),
                ..EnrichmentPayload::default()
            },
        });

        let record = pipeline.assess(&snapshot(72, 36.6)).await;
        assert!((record.probabilities.sum() - 0.6).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_identical_inputs_identical_outputs_except_timestamp() {
        let pipeline = RiskPipeline::new(MockBackend {
            payload: full_payload(),
        });
        let s = snapshot(95, 37.0);

        let a = pipeline.assess(&s).await;
        let b = pipeline.assess(&s).await;

        assert_eq!(a.predicted_risk, b.predicted_risk);
        assert_eq!(a.bmi, b.bmi);
        assert_eq!(a.probabilities, b.probabilities);
        assert_eq!(a.note, b.note);
        assert_eq!(a.alert, b.alert);
        assert_eq!(a.source, b.source);
        assert_eq!(a.explanation, b.explanation);
    }

    #[tokio::test]
    async fn test_compound_rule_through_pipeline() {
        // Default snapshot is 80kg / 1.8m => bmi 24.7, so raise the weight
        let pipeline = RiskPipeline::new(FailingBackend);
        let s = VitalsSnapshot {
            heart_rate: 105,
            weight_kg: 100.0,
            ..VitalsSnapshot::default()
        };

        let record = pipeline.assess(&s).await;
        assert_eq!(record.bmi, 30.9);
        assert_eq!(record.predicted_risk, RiskLevel::High);
        assert!(record.alert);
    }
}
