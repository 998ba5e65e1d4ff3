//! Vitals Module - Snapshot Type & Simulation Driver
//!
//! - `types.rs` - VitalsSnapshot (immutable per assessment)
//! - `simulator.rs` - Random-walk perturbation driver

pub mod types;
pub mod simulator;

pub use types::{Gender, VitalsSnapshot};
pub use simulator::VitalsSimulator;
