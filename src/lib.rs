//! Simulation engine for a Casimir-array gravity modulator.
//!
//! The physics lives in the member crates (pressure law, phase steering, scaling
//! table); this crate owns the stateful thrust engine, lift estimation, and the
//! assembly of those pieces from configuration. Front-ends consume the result
//! records and never reach into engine state.

pub mod comparison;
pub mod engine;
pub mod lift;
pub mod scenario;

pub use modulator_array as array;
pub use modulator_casimir as casimir;
pub use modulator_config as config;
pub use modulator_export as export;
pub use modulator_phase as phase;
pub use modulator_core as primitives;
pub use modulator_scaling as scaling;

pub use engine::{ActivationReport, ActivationState, EngineError, EngineStatus, ThrustEngine};
pub use lift::{LiftResult, LiftSettings, LiftSimulator};

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
