//! Gemini API Client
//!
//! HTTP client for the generateContent enrichment call. The request carries
//! the snapshot and derived BMI plus a response schema so the reply is
//! machine-parseable without free-form text extraction.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::types::{EnrichError, EnrichmentPayload};
use super::EnrichmentBackend;
use crate::constants;
use crate::logic::vitals::VitalsSnapshot;

/// Gemini backend configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: constants::get_gemini_api_url(),
            api_key: constants::get_gemini_api_key(),
            model: constants::get_gemini_model(),
            timeout_seconds: constants::get_enrich_timeout(),
        }
    }
}

/// Gemini API client
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: reqwest::Client,
}

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create new Gemini client
    pub fn new(config: GeminiConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    /// Check if a key is configured
    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    async fn generate(&self, prompt: String) -> Result<EnrichmentPayload, EnrichError> {
        if !self.is_configured() {
            return Err(EnrichError::MissingApiKey);
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url, self.config.model
        );

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        };

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EnrichError::Timeout
                } else {
                    EnrichError::NetworkError(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(EnrichError::ServerError(response.status().as_u16()));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| EnrichError::ParseError(e.to_string()))?;

        let text = extract_text(&body)
            .ok_or_else(|| EnrichError::ParseError("empty candidate response".to_string()))?;

        parse_payload(text)
    }
}

impl EnrichmentBackend for GeminiClient {
    async fn enrich(
        &self,
        snapshot: &VitalsSnapshot,
        bmi: f64,
    ) -> Result<EnrichmentPayload, EnrichError> {
        self.generate(build_prompt(snapshot, bmi)).await
    }
}

// ============================================================================
// PROMPT & SCHEMA
// ============================================================================

fn build_prompt(snapshot: &VitalsSnapshot, bmi: f64) -> String {
    let data = serde_json::to_string(snapshot).unwrap_or_else(|_| "{}".to_string());
    format!(
        "Patient Data: {}. BMI: {}. \
         Analyze this medical data and return a JSON object with: \
         - probabilistic breakdown (low, medium, high probabilities summing to 1.0) \
         - a short medical note \
         - feature importance (explanation) for heart_rate, bmi, and temperature.",
        data, bmi
    )
}

/// Response schema enforced on the backend: all three top-level keys are
/// required, the runtime still tolerates any of them being absent.
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "probabilities": {
                "type": "OBJECT",
                "properties": {
                    "low": { "type": "NUMBER" },
                    "medium": { "type": "NUMBER" },
                    "high": { "type": "NUMBER" }
                },
                "required": ["low", "medium", "high"]
            },
            "note": { "type": "STRING" },
            "explanation": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "feature": { "type": "STRING" },
                        "importance": { "type": "NUMBER" }
                    },
                    "required": ["feature", "importance"]
                }
            }
        },
        "required": ["probabilities", "note", "explanation"]
    })
}

// ============================================================================
// RESPONSE PARSING
// ============================================================================

fn extract_text(response: &GenerateContentResponse) -> Option<&str> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.first())
        .and_then(|p| p.text.as_deref())
}

fn parse_payload(text: &str) -> Result<EnrichmentPayload, EnrichError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| EnrichError::ParseError(e.to_string()))?;

    if !value.is_object() {
        return Err(EnrichError::ParseError(
            "response is not a JSON object".to_string(),
        ));
    }

    Ok(EnrichmentPayload::from_value(&value))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_from_candidate() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "{\"note\":\"ok\"}" } ] } }
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(extract_text(&response), Some("{\"note\":\"ok\"}"));
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text(&response).is_none());
    }

    #[test]
    fn test_parse_payload_rejects_non_json() {
        assert!(matches!(
            parse_payload("not json at all"),
            Err(EnrichError::ParseError(_))
        ));
        assert!(matches!(
            parse_payload("[1, 2, 3]"),
            Err(EnrichError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_payload_partial_object() {
        let payload = parse_payload(r#"{ "note": "Stable." }"#).unwrap();
        assert_eq!(payload.note.unwrap(), "Stable.");
        assert!(payload.probabilities.is_none());
    }

    #[test]
    fn test_schema_requires_all_keys() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["probabilities", "note", "explanation"]);
    }

    #[test]
    fn test_unconfigured_client_reports_missing_key() {
        let client = GeminiClient::new(GeminiConfig {
            api_url: "http://localhost:9".to_string(),
            api_key: String::new(),
            model: "test".to_string(),
            timeout_seconds: 1,
        });
        assert!(!client.is_configured());
    }
}
