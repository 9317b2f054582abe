//! Free-kinematic lift estimation on top of a [`ThrustEngine`].

use serde::Serialize;
use tracing::info;

use modulator_core::constants::physical;
use modulator_core::units::mw_to_w;
use modulator_scaling::ScalingLevel;

use crate::engine::{EngineError, ThrustEngine};

/// Straight up.
pub const VERTICAL: [f64; 3] = [0.0, 0.0, 1.0];

/// Constants the lift model uses to size power and weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftSettings {
    /// Thrust-per-power ratio used to derive required power (N/MW).
    pub reference_thrust_per_mw: f64,
    pub gravity_m_s2: f64,
}

impl Default for LiftSettings {
    fn default() -> Self {
        Self {
            reference_thrust_per_mw: 77_000.0,
            gravity_m_s2: physical().lift_gravity_m_s2,
        }
    }
}

impl LiftSettings {
    pub fn new(reference_thrust_per_mw: f64, gravity_m_s2: f64) -> Result<Self, EngineError> {
        for (label, value) in [
            ("reference thrust per MW", reference_thrust_per_mw),
            ("gravity", gravity_m_s2),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(EngineError::InvalidCalibration(format!(
                    "{label} must be positive (got {value})"
                )));
            }
        }
        Ok(Self {
            reference_thrust_per_mw,
            gravity_m_s2,
        })
    }

    /// Size power from a scaling level's thrust-per-power ratio.
    pub fn from_level(level: &ScalingLevel) -> Result<Self, EngineError> {
        Self::new(level.thrust_per_mw(), physical().lift_gravity_m_s2)
    }

    /// Size power from the engine's own linear thrust-per-power constant.
    pub fn matched_to(engine: &ThrustEngine) -> Result<Self, EngineError> {
        Self::new(engine.thrust_per_mw(), physical().lift_gravity_m_s2)
    }
}

/// Outcome of one lift estimate. Insufficient thrust is reported through `success`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiftResult {
    pub mass_kg: f64,
    pub height_m: f64,
    pub required_force_n: f64,
    pub achieved_thrust_n: f64,
    pub required_power_mw: f64,
    pub net_acceleration_m_s2: f64,
    pub lift_time_s: f64,
    pub energy_j: f64,
    pub success: bool,
}

/// Estimates lift time and energy for payloads using an owned engine.
///
/// After a lift the engine stays in the active state the lift produced;
/// deactivating it is up to the caller.
#[derive(Debug, Clone)]
pub struct LiftSimulator {
    engine: ThrustEngine,
    settings: LiftSettings,
}

impl LiftSimulator {
    pub fn new(engine: ThrustEngine, settings: LiftSettings) -> Self {
        Self { engine, settings }
    }

    pub fn settings(&self) -> &LiftSettings {
        &self.settings
    }

    pub fn engine(&self) -> &ThrustEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ThrustEngine {
        &mut self.engine
    }

    pub fn into_engine(self) -> ThrustEngine {
        self.engine
    }

    /// Lift `mass_kg` through `height_m` from rest under constant net acceleration.
    ///
    /// A zero height needs no time or energy but still fails when thrust cannot
    /// hold the payload; the engine is activated at the sized power either way.
    pub fn lift(&mut self, mass_kg: f64, height_m: f64) -> Result<LiftResult, EngineError> {
        if !(mass_kg > 0.0 && mass_kg.is_finite()) {
            return Err(EngineError::InvalidInput(format!(
                "mass must be positive and finite (got {mass_kg} kg)"
            )));
        }
        if !(height_m >= 0.0 && height_m.is_finite()) {
            return Err(EngineError::InvalidInput(format!(
                "height must be non-negative and finite (got {height_m} m)"
            )));
        }

        let required_force_n = mass_kg * self.settings.gravity_m_s2;
        let required_power_mw = required_force_n / self.settings.reference_thrust_per_mw;
        let report = self.engine.activate(&VERTICAL, required_power_mw)?;
        let achieved_thrust_n = report.thrust_n;
        let net_acceleration_m_s2 = (achieved_thrust_n - required_force_n) / mass_kg;

        let (lift_time_s, energy_j, success) = if net_acceleration_m_s2 <= 0.0 {
            (0.0, 0.0, false)
        } else if height_m == 0.0 {
            (0.0, 0.0, true)
        } else {
            let time = (2.0 * height_m / net_acceleration_m_s2).sqrt();
            (time, mw_to_w(required_power_mw) * time, true)
        };

        info!(
            mass_kg,
            height_m,
            achieved_thrust_n,
            required_power_mw,
            success,
            "lift estimated"
        );

        Ok(LiftResult {
            mass_kg,
            height_m,
            required_force_n,
            achieved_thrust_n,
            required_power_mw,
            net_acceleration_m_s2,
            lift_time_s,
            energy_j,
            success,
        })
    }
}
