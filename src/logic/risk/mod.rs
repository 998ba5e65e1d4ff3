//! Risk Module - Classification Types, Rules & Classifier
//!
//! - `types.rs` - RiskLevel, PredictionRecord and friends (no logic)
//! - `rules.rs` - Medical rule thresholds (constants + config struct)
//! - `classifier.rs` - BMI derivation + deterministic rule evaluation

pub mod types;
pub mod rules;
pub mod classifier;

pub use types::{FeatureImportance, PredictionRecord, RiskLevel, RiskProbabilities, RiskSource};
pub use rules::RiskThresholds;
pub use classifier::{classify, classify_with_thresholds, compute_bmi};
