//! Vitals Types
//!
//! Core types cho vitals monitoring. KHÔNG chứa logic - chỉ data structures.

use serde::{Deserialize, Serialize};

/// Patient gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// One point-in-time set of vital-sign readings submitted for assessment.
///
/// Immutable per assessment call; produced by the simulation driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    /// Heart rate in beats per minute
    pub heart_rate: u32,
    /// Body temperature in °C (one-decimal precision)
    pub body_temperature: f64,
    pub age: u32,
    pub weight_kg: f64,
    pub height_m: f64,
    pub gender: Gender,
    pub patient_id: u64,
}

impl Default for VitalsSnapshot {
    /// The demo patient baseline the simulator starts from.
    fn default() -> Self {
        Self {
            heart_rate: 72,
            body_temperature: 36.6,
            age: 35,
            weight_kg: 80.0,
            height_m: 1.8,
            gender: Gender::Male,
            patient_id: 12345,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
