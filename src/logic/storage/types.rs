//! Storage Types

use serde::{Deserialize, Serialize};

use crate::logic::risk::PredictionRecord;
use crate::logic::vitals::VitalsSnapshot;

/// A PredictionRecord plus the vitals that produced it, denormalized so the
/// history chart renders without re-joining against the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    #[serde(flatten)]
    pub record: PredictionRecord,
    pub heart_rate: u32,
    pub body_temperature: f64,
}

impl HistoryItem {
    pub fn new(snapshot: &VitalsSnapshot, record: PredictionRecord) -> Self {
        Self {
            record,
            heart_rate: snapshot.heart_rate,
            body_temperature: snapshot.body_temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::risk::{RiskLevel, RiskProbabilities, RiskSource};
    use chrono::Utc;

    #[test]
    fn test_history_item_flattens_record() {
        let record = PredictionRecord {
            predicted_risk: RiskLevel::Low,
            bmi: 24.7,
            probabilities: RiskProbabilities {
                low: 0.8,
                medium: 0.1,
                high: 0.1,
            },
            note: "Standard monitoring active.".to_string(),
            alert: false,
            source: RiskSource::MlModel,
            explanation: vec![],
            timestamp: Utc::now(),
        };
        let item = HistoryItem::new(&VitalsSnapshot::default(), record);

        let json = serde_json::to_value(&item).unwrap();
        // Record fields sit at the top level next to the vitals
        assert_eq!(json["predicted_risk"], "Low Risk");
        assert_eq!(json["heart_rate"], 72);

        let back: HistoryItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }
}
