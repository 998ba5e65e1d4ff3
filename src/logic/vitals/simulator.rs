//! Vitals Simulator
//!
//! Random-walk perturbation of heart rate and temperature between ticks.
//! Owns no schedule - the monitor loop decides when to tick.

use rand::Rng;

use super::types::VitalsSnapshot;

/// Simulated heart rate bounds (BPM)
pub const MIN_HEART_RATE: u32 = 60;
pub const MAX_HEART_RATE: u32 = 180;

/// Simulated temperature bounds (°C)
pub const MIN_TEMPERATURE: f64 = 35.0;
pub const MAX_TEMPERATURE: f64 = 41.0;

/// Perturbs a snapshot in place on each tick.
pub struct VitalsSimulator {
    current: VitalsSnapshot,
}

impl VitalsSimulator {
    pub fn new(initial: VitalsSnapshot) -> Self {
        Self { current: initial }
    }

    /// Current snapshot without advancing the simulation
    pub fn current(&self) -> &VitalsSnapshot {
        &self.current
    }

    /// Advance one step and return the new snapshot.
    ///
    /// Heart rate moves by an integer delta in [-3, +3] clamped to
    /// [60, 180]; temperature by a delta in [-0.15, +0.15) clamped to
    /// [35.0, 41.0] and kept at one-decimal precision.
    pub fn tick(&mut self) -> VitalsSnapshot {
        let mut rng = rand::thread_rng();

        let hr_delta: i64 = rng.gen_range(-3..=3);
        let heart_rate = (self.current.heart_rate as i64 + hr_delta)
            .clamp(MIN_HEART_RATE as i64, MAX_HEART_RATE as i64) as u32;

        let temp_delta: f64 = rng.gen_range(-0.15..0.15);
        let temperature = self.current.body_temperature + temp_delta;
        let temperature = temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE);
        let temperature = (temperature * 10.0).round() / 10.0;

        self.current.heart_rate = heart_rate;
        self.current.body_temperature = temperature;
        self.current.clone()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_stays_in_bounds() {
        let mut sim = VitalsSimulator::new(VitalsSnapshot::default());

        for _ in 0..500 {
            let snapshot = sim.tick();
            assert!(snapshot.heart_rate >= MIN_HEART_RATE);
            assert!(snapshot.heart_rate <= MAX_HEART_RATE);
            assert!(snapshot.body_temperature >= MIN_TEMPERATURE);
            assert!(snapshot.body_temperature <= MAX_TEMPERATURE);
        }
    }

    #[test]
    fn test_temperature_one_decimal() {
        let mut sim = VitalsSimulator::new(VitalsSnapshot::default());

        for _ in 0..100 {
            let snapshot = sim.tick();
            let scaled = snapshot.body_temperature * 10.0;
            assert!((scaled - scaled.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tick_preserves_identity_fields() {
        let initial = VitalsSnapshot::default();
        let mut sim = VitalsSimulator::new(initial.clone());

        let snapshot = sim.tick();
        assert_eq!(snapshot.patient_id, initial.patient_id);
        assert_eq!(snapshot.age, initial.age);
        assert_eq!(snapshot.gender, initial.gender);
        assert_eq!(snapshot.weight_kg, initial.weight_kg);
        assert_eq!(snapshot.height_m, initial.height_m);
    }

    #[test]
    fn test_clamp_from_extreme_start() {
        let mut sim = VitalsSimulator::new(VitalsSnapshot {
            heart_rate: MAX_HEART_RATE,
            body_temperature: MAX_TEMPERATURE,
            ..VitalsSnapshot::default()
        });

        for _ in 0..50 {
            let snapshot = sim.tick();
            assert!(snapshot.heart_rate <= MAX_HEART_RATE);
            assert!(snapshot.body_temperature <= MAX_TEMPERATURE);
        }
    }
}
