//! Risk Classifier
//!
//! CHỈ chứa logic classify - không có types, không có policy.
//! Input: VitalsSnapshot + derived BMI
//! Output: RiskLevel
//!
//! Runs before and independently of any remote call; the enrichment step
//! must never alter the verdict produced here.

use super::rules::{RiskThresholds, MIN_HEIGHT_M, MIN_WEIGHT_KG};
use super::types::RiskLevel;
use crate::logic::vitals::VitalsSnapshot;

// ============================================================================
// BMI
// ============================================================================

/// Derive BMI from weight and height, rounded to one decimal place.
///
/// Degenerate inputs (zero, negative or non-finite weight/height) are clamped
/// to floor values before the division, so the result is always finite.
pub fn compute_bmi(weight_kg: f64, height_m: f64) -> f64 {
    let weight = weight_kg.max(MIN_WEIGHT_KG);
    let height = height_m.max(MIN_HEIGHT_M);
    let raw = weight / (height * height);
    (raw * 10.0).round() / 10.0
}

// ============================================================================
// RULE EVALUATION
// ============================================================================

/// Classify with default thresholds. First match wins.
pub fn classify(snapshot: &VitalsSnapshot, bmi: f64) -> RiskLevel {
    classify_with_thresholds(snapshot, bmi, &RiskThresholds::default())
}

/// Classify with custom thresholds.
///
/// Precedence:
/// 1. High: heart_rate > 120, OR temperature > 39.0, OR
///    (heart_rate > 100 AND bmi > 30)
/// 2. Medium: heart_rate > 90, OR temperature > 37.5, OR bmi > 25
/// 3. Low otherwise
pub fn classify_with_thresholds(
    snapshot: &VitalsSnapshot,
    bmi: f64,
    thresholds: &RiskThresholds,
) -> RiskLevel {
    let hr = snapshot.heart_rate;
    let temp = snapshot.body_temperature;

    if hr > thresholds.high_heart_rate
        || temp > thresholds.high_temperature
        || (hr > thresholds.compound_heart_rate && bmi > thresholds.compound_bmi)
    {
        RiskLevel::High
    } else if hr > thresholds.medium_heart_rate
        || temp > thresholds.medium_temperature
        || bmi > thresholds.medium_bmi
    {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::vitals::VitalsSnapshot;

    fn snapshot(heart_rate: u32, temperature: f64) -> VitalsSnapshot {
        VitalsSnapshot {
            heart_rate,
            body_temperature: temperature,
            ..VitalsSnapshot::default()
        }
    }

    #[test]
    fn test_bmi_one_decimal_rounding() {
        // 80 / 1.8^2 = 24.691... -> 24.7
        assert_eq!(compute_bmi(80.0, 1.8), 24.7);
    }

    #[test]
    fn test_bmi_degenerate_height_is_finite() {
        assert!(compute_bmi(80.0, 0.0).is_finite());
        assert!(compute_bmi(80.0, -1.2).is_finite());
        assert!(compute_bmi(-5.0, 1.8).is_finite());
        assert!(compute_bmi(f64::NAN, f64::NAN).is_finite());
    }

    #[test]
    fn test_high_risk_heart_rate() {
        let s = snapshot(121, 36.6);
        assert_eq!(classify(&s, 22.0), RiskLevel::High);
    }

    #[test]
    fn test_high_risk_temperature() {
        let s = snapshot(72, 39.1);
        assert_eq!(classify(&s, 22.0), RiskLevel::High);
    }

    #[test]
    fn test_high_risk_compound_rule() {
        // hr in (100, 120] plus bmi > 30
        let s = snapshot(105, 36.6);
        assert_eq!(classify(&s, 30.5), RiskLevel::High);
    }

    #[test]
    fn test_compound_rule_needs_both_parts() {
        // Elevated hr alone with normal bmi is only Medium
        let s = snapshot(105, 36.6);
        assert_eq!(classify(&s, 24.0), RiskLevel::Medium);
        // Obese bmi with calm hr is only Medium
        let s = snapshot(80, 36.6);
        assert_eq!(classify(&s, 31.0), RiskLevel::Medium);
    }

    #[test]
    fn test_medium_risk_branches() {
        assert_eq!(classify(&snapshot(91, 36.6), 22.0), RiskLevel::Medium);
        assert_eq!(classify(&snapshot(72, 37.6), 22.0), RiskLevel::Medium);
        assert_eq!(classify(&snapshot(72, 36.6), 25.1), RiskLevel::Medium);
    }

    #[test]
    fn test_low_risk() {
        assert_eq!(classify(&snapshot(72, 36.6), 24.7), RiskLevel::Low);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Boundary values do not trip the rules
        assert_eq!(classify(&snapshot(120, 36.6), 22.0), RiskLevel::Medium);
        assert_eq!(classify(&snapshot(72, 39.0), 22.0), RiskLevel::Medium);
        assert_eq!(classify(&snapshot(90, 36.6), 22.0), RiskLevel::Low);
        assert_eq!(classify(&snapshot(72, 37.5), 22.0), RiskLevel::Low);
        assert_eq!(classify(&snapshot(72, 36.6), 25.0), RiskLevel::Low);
        assert_eq!(classify(&snapshot(105, 36.6), 30.0), RiskLevel::Medium);
    }
}
