//! Thrust engine: combines the pressure chain and phase steering into a thrust vector.
//!
//! Thrust is linear in input power: at the rated power the engine delivers
//! `total_force × on_axis_efficiency` along the requested direction, so the
//! thrust-per-megawatt ratio is a property of the engine, not of the call.

pub mod state;

pub use state::{Activation, ActivationReport, ActivationState, EngineStatus};

use thiserror::Error;
use tracing::{debug, info};

use modulator_array::{ArrayGeometry, MaterialEnhancement};
use modulator_casimir::PressureEngine;
use modulator_core::vector::{self, Vector3};
use modulator_phase::{PhaseController, PhaseError, PhaseLimits};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid engine calibration: {0}")]
    InvalidCalibration(String),
    #[error(transparent)]
    Phase(#[from] PhaseError),
}

/// Fixed efficiency constants and resource ceilings of an engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineCalibration {
    /// Fraction of force realised along the requested direction.
    pub on_axis_efficiency: f64,
    /// Fraction of force suppressed perpendicular to the direction.
    pub off_axis_cancellation: f64,
    /// Input power at which the full on-axis force is delivered (MW).
    pub rated_power_mw: f64,
    pub phase_limits: PhaseLimits,
}

impl Default for EngineCalibration {
    fn default() -> Self {
        Self {
            on_axis_efficiency: 0.99999,
            off_axis_cancellation: 0.99999,
            rated_power_mw: 0.5,
            phase_limits: PhaseLimits::default(),
        }
    }
}

impl EngineCalibration {
    fn validate(&self) -> Result<(), EngineError> {
        for (label, value) in [
            ("on-axis efficiency", self.on_axis_efficiency),
            ("off-axis cancellation", self.off_axis_cancellation),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(EngineError::InvalidCalibration(format!(
                    "{label} must lie in (0, 1] (got {value})"
                )));
            }
        }
        if !(self.rated_power_mw > 0.0 && self.rated_power_mw.is_finite()) {
            return Err(EngineError::InvalidCalibration(format!(
                "rated power must be positive (got {} MW)",
                self.rated_power_mw
            )));
        }
        let limits = self.phase_limits;
        if limits.dense_cells > limits.stream_cells {
            return Err(EngineError::InvalidCalibration(format!(
                "dense cell ceiling {} exceeds stream cell ceiling {}",
                limits.dense_cells, limits.stream_cells
            )));
        }
        Ok(())
    }
}

/// Gravity modulator engine owning its activation state.
///
/// State changes go through `&mut self`, so an engine has exactly one logical owner;
/// [`ThrustEngine::compute_activation`] offers the same computation without mutation.
#[derive(Debug, Clone)]
pub struct ThrustEngine {
    pressure: PressureEngine,
    phase: PhaseController,
    calibration: EngineCalibration,
    state: ActivationState,
}

impl ThrustEngine {
    pub fn new(
        geometry: ArrayGeometry,
        enhancement: MaterialEnhancement,
        calibration: EngineCalibration,
    ) -> Result<Self, EngineError> {
        calibration.validate()?;
        let phase = PhaseController::new(&geometry, calibration.phase_limits);
        Ok(Self {
            pressure: PressureEngine::new(geometry, enhancement),
            phase,
            calibration,
            state: ActivationState::Inactive,
        })
    }

    /// Reference device: 100³ plates at 100 nm, reference metamaterial stack.
    pub fn reference() -> Self {
        let geometry = ArrayGeometry::reference();
        let calibration = EngineCalibration::default();
        Self {
            phase: PhaseController::new(&geometry, calibration.phase_limits),
            pressure: PressureEngine::new(geometry, MaterialEnhancement::reference()),
            calibration,
            state: ActivationState::Inactive,
        }
    }

    pub fn pressure(&self) -> &PressureEngine {
        &self.pressure
    }

    pub fn phase_controller(&self) -> &PhaseController {
        &self.phase
    }

    pub fn calibration(&self) -> &EngineCalibration {
        &self.calibration
    }

    pub fn state(&self) -> &ActivationState {
        &self.state
    }

    /// Linear thrust-per-megawatt constant of this engine (N/MW).
    pub fn thrust_per_mw(&self) -> f64 {
        self.pressure.total_force() * self.calibration.on_axis_efficiency
            / self.calibration.rated_power_mw
    }

    /// Compute the state an activation would produce, without touching the engine.
    pub fn compute_activation(
        &self,
        direction: &Vector3,
        power_mw: f64,
    ) -> Result<ActivationState, EngineError> {
        self.activation(direction, power_mw).map(ActivationState::Active)
    }

    fn activation(&self, direction: &Vector3, power_mw: f64) -> Result<Activation, EngineError> {
        if !(power_mw > 0.0 && power_mw.is_finite()) {
            return Err(EngineError::InvalidInput(format!(
                "power must be positive and finite (got {power_mw} MW)"
            )));
        }
        let unit = vector::normalize(direction).ok_or_else(|| {
            EngineError::InvalidInput(format!(
                "direction must be a finite, non-zero vector (got {direction:?})"
            ))
        })?;

        let phase = self.phase.summarize(&unit)?;
        let delivered_force =
            self.pressure.total_force() * (power_mw / self.calibration.rated_power_mw);
        let thrust_vector =
            vector::scale(&unit, delivered_force * self.calibration.on_axis_efficiency);
        let off_axis_residual_n = delivered_force * (1.0 - self.calibration.off_axis_cancellation);

        Ok(Activation {
            direction: unit,
            power_mw,
            thrust_vector,
            off_axis_residual_n,
            phase,
        })
    }

    /// Activate (or re-target) the engine. On error the previous state is kept.
    pub fn activate(
        &mut self,
        direction: &Vector3,
        power_mw: f64,
    ) -> Result<ActivationReport, EngineError> {
        let activation = self.activation(direction, power_mw)?;
        let report = activation.report();
        debug!(
            direction = ?report.direction,
            power_mw,
            thrust_n = report.thrust_n,
            coherence = report.phase_coherence,
            "modulator activated"
        );
        self.state = ActivationState::Active(activation);
        Ok(report)
    }

    /// Return to the inactive state. Returns `false` if the engine was already inactive.
    pub fn deactivate(&mut self) -> bool {
        if !self.state.is_active() {
            return false;
        }
        self.state = self.state.deactivated();
        info!("modulator deactivated");
        true
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            active: self.state.is_active(),
            thrust_n: self.state.thrust_magnitude(),
            thrust_vector: self.state.thrust_vector(),
            power_mw: self.state.power_mw(),
            thrust_per_mw: self.state.thrust_per_mw(),
            enhancement: self.pressure.enhancement().total(),
            plates: self.pressure.geometry().plate_count(),
        }
    }
}
