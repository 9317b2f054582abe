//! Immutable activation state values and the snapshots derived from them.

use serde::Serialize;

use modulator_core::vector::{self, Vector3};
use modulator_phase::PhaseSummary;

/// Parameters of one successful activation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activation {
    /// Unit steering direction actually used.
    pub direction: Vector3,
    pub power_mw: f64,
    pub thrust_vector: Vector3,
    /// Force left uncancelled perpendicular to `direction`.
    pub off_axis_residual_n: f64,
    pub phase: PhaseSummary,
}

/// Two-state activation machine. New values are produced rather than mutated in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ActivationState {
    #[default]
    Inactive,
    Active(Activation),
}

impl ActivationState {
    pub fn is_active(&self) -> bool {
        matches!(self, ActivationState::Active(_))
    }

    pub fn activation(&self) -> Option<&Activation> {
        match self {
            ActivationState::Active(activation) => Some(activation),
            ActivationState::Inactive => None,
        }
    }

    /// Zero vector when inactive.
    pub fn thrust_vector(&self) -> Vector3 {
        self.activation()
            .map(|a| a.thrust_vector)
            .unwrap_or([0.0; 3])
    }

    pub fn thrust_magnitude(&self) -> f64 {
        vector::norm(&self.thrust_vector())
    }

    pub fn power_mw(&self) -> f64 {
        self.activation().map(|a| a.power_mw).unwrap_or(0.0)
    }

    /// Thrust per megawatt; zero when inactive.
    pub fn thrust_per_mw(&self) -> f64 {
        match self.activation() {
            Some(a) if a.power_mw > 0.0 => self.thrust_magnitude() / a.power_mw,
            _ => 0.0,
        }
    }

    /// The state after a deactivation: thrust and power cleared.
    pub fn deactivated(&self) -> ActivationState {
        ActivationState::Inactive
    }

    /// Result record for an active state, `None` when inactive.
    pub fn report(&self) -> Option<ActivationReport> {
        self.activation().map(Activation::report)
    }
}

impl Activation {
    pub fn report(&self) -> ActivationReport {
        let thrust_n = vector::norm(&self.thrust_vector);
        ActivationReport {
            thrust_n,
            thrust_per_mw: thrust_n / self.power_mw,
            phase_coherence: self.phase.std_dev,
            phase_order: self.phase.order_parameter,
            steering_alignment: self.phase.alignment,
            direction: self.direction,
            power_mw: self.power_mw,
            off_axis_residual_n: self.off_axis_residual_n,
        }
    }
}

/// Result of [`ThrustEngine::activate`](super::ThrustEngine::activate).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivationReport {
    pub thrust_n: f64,
    pub thrust_per_mw: f64,
    /// Standard deviation of the phase field.
    pub phase_coherence: f64,
    pub phase_order: f64,
    pub steering_alignment: Option<f64>,
    pub direction: Vector3,
    pub power_mw: f64,
    pub off_axis_residual_n: f64,
}

/// Point-in-time engine snapshot, valid in either state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStatus {
    pub active: bool,
    pub thrust_n: f64,
    pub thrust_vector: Vector3,
    pub power_mw: f64,
    pub thrust_per_mw: f64,
    pub enhancement: f64,
    pub plates: u64,
}
