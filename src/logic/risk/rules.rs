//! Medical Rule Thresholds
//!
//! Định nghĩa các threshold cho phân loại risk.
//! KHÔNG chứa logic classify - chỉ constants và config.

use serde::{Deserialize, Serialize};

// ============================================================================
// THRESHOLDS (Constants - không đổi lúc runtime)
// ============================================================================

/// Above this heart rate = High Risk on its own
pub const HIGH_RISK_HEART_RATE: u32 = 120;

/// Above this temperature (°C) = High Risk on its own
pub const HIGH_RISK_TEMPERATURE: f64 = 39.0;

/// Heart rate component of the compound High Risk rule
pub const COMPOUND_HEART_RATE: u32 = 100;

/// BMI component of the compound High Risk rule
pub const COMPOUND_BMI: f64 = 30.0;

/// Above this heart rate = at least Medium Risk
pub const MEDIUM_RISK_HEART_RATE: u32 = 90;

/// Above this temperature (°C) = at least Medium Risk
pub const MEDIUM_RISK_TEMPERATURE: f64 = 37.5;

/// Above this BMI = at least Medium Risk
pub const MEDIUM_RISK_BMI: f64 = 25.0;

// ============================================================================
// INPUT FLOORS
// ============================================================================

/// Weight floor applied before BMI derivation
pub const MIN_WEIGHT_KG: f64 = 1.0;

/// Height floor applied before BMI derivation (keeps the division finite)
pub const MIN_HEIGHT_M: f64 = 0.5;

// ============================================================================
// CONFIGURABLE THRESHOLDS (for runtime adjustment)
// ============================================================================

/// Thresholds for classification (configurable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Above this heart rate = High Risk
    pub high_heart_rate: u32,
    /// Above this temperature = High Risk
    pub high_temperature: f64,
    /// Heart rate part of the compound High Risk rule
    pub compound_heart_rate: u32,
    /// BMI part of the compound High Risk rule
    pub compound_bmi: f64,
    /// Above this heart rate = Medium Risk
    pub medium_heart_rate: u32,
    /// Above this temperature = Medium Risk
    pub medium_temperature: f64,
    /// Above this BMI = Medium Risk
    pub medium_bmi: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_heart_rate: HIGH_RISK_HEART_RATE,
            high_temperature: HIGH_RISK_TEMPERATURE,
            compound_heart_rate: COMPOUND_HEART_RATE,
            compound_bmi: COMPOUND_BMI,
            medium_heart_rate: MEDIUM_RISK_HEART_RATE,
            medium_temperature: MEDIUM_RISK_TEMPERATURE,
            medium_bmi: MEDIUM_RISK_BMI,
        }
    }
}
