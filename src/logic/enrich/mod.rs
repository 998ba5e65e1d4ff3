//! Enrichment Module - AI Decoration of the Rule Verdict
//!
//! This module handles:
//! - The backend seam the pipeline is tested through
//! - The Gemini generateContent client (schema-constrained JSON)
//! - Parsed-or-defaulted payload extraction
//!
//! Enrichment is best-effort: it augments the explanatory payload only and
//! never influences the rule-based verdict.

pub mod client;
pub mod types;

pub use client::{GeminiClient, GeminiConfig};
pub use types::{EnrichError, EnrichmentPayload};

use crate::logic::vitals::VitalsSnapshot;

/// Backend seam for the enrichment round-trip.
///
/// The production implementation is [`GeminiClient`]; tests inject a mock.
#[allow(async_fn_in_trait)]
pub trait EnrichmentBackend {
    async fn enrich(
        &self,
        snapshot: &VitalsSnapshot,
        bmi: f64,
    ) -> Result<EnrichmentPayload, EnrichError>;
}
