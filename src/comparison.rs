//! Comparisons against conventional propulsion and launch economics.
//!
//! Everything here is a pure function of engine or lift outputs; no engine state is read.

use serde::Serialize;
use thiserror::Error;

use modulator_core::units::j_to_kwh;

use crate::lift::LiftResult;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComparisonError {
    #[error("{label} must be positive and finite (got {value})")]
    InvalidFigure { label: &'static str, value: f64 },
    #[error("rocket lift efficiency must lie in (0, 1] (got {0})")]
    InvalidEfficiency(f64),
}

/// Reference figures for conventional systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePropulsion {
    pub rocket_thrust_per_mw: f64,
    pub ion_thrust_per_mw: f64,
    /// Fraction of rocket energy that ends up as potential energy of the payload.
    pub rocket_lift_efficiency: f64,
    pub electricity_usd_per_kwh: f64,
    pub rocket_launch_usd_per_kg: f64,
    pub orbit_altitude_m: f64,
}

impl Default for ReferencePropulsion {
    fn default() -> Self {
        Self {
            rocket_thrust_per_mw: 500.0,
            ion_thrust_per_mw: 100.0,
            rocket_lift_efficiency: 0.01,
            electricity_usd_per_kwh: 0.12,
            rocket_launch_usd_per_kg: 10_000.0,
            orbit_altitude_m: 200_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropulsionComparison {
    pub thrust_n: f64,
    pub power_mw: f64,
    pub thrust_per_mw: f64,
    pub rocket_thrust_n: f64,
    pub ion_thrust_n: f64,
    pub rocket_improvement: f64,
    pub ion_improvement: f64,
}

/// Constant-acceleration climb from rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AscentEstimate {
    pub payload_kg: f64,
    pub altitude_m: f64,
    pub acceleration_m_s2: f64,
    pub time_s: f64,
    /// Net acceleration in multiples of `gravity_m_s2`.
    pub g_load: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AscentCost {
    pub time_s: f64,
    pub energy_kwh: f64,
    pub electricity_usd: f64,
    pub rocket_usd: f64,
    pub savings_factor: f64,
}

/// Time to climb `altitude_m` with constant thrust.
///
/// `None` if thrust cannot overcome weight or any input is out of range.
pub fn ascent(
    thrust_n: f64,
    payload_kg: f64,
    altitude_m: f64,
    gravity_m_s2: f64,
) -> Option<AscentEstimate> {
    if !(thrust_n.is_finite() && altitude_m >= 0.0 && altitude_m.is_finite())
        || !is_positive(payload_kg)
        || !is_positive(gravity_m_s2)
    {
        return None;
    }
    let acceleration = thrust_n / payload_kg - gravity_m_s2;
    if acceleration <= 0.0 {
        return None;
    }
    Some(AscentEstimate {
        payload_kg,
        altitude_m,
        acceleration_m_s2: acceleration,
        time_s: (2.0 * altitude_m / acceleration).sqrt(),
        g_load: acceleration / gravity_m_s2,
    })
}

fn is_positive(value: f64) -> bool {
    value > 0.0 && value.is_finite()
}

impl ReferencePropulsion {
    pub fn new(
        rocket_thrust_per_mw: f64,
        ion_thrust_per_mw: f64,
        rocket_lift_efficiency: f64,
        electricity_usd_per_kwh: f64,
        rocket_launch_usd_per_kg: f64,
        orbit_altitude_m: f64,
    ) -> Result<Self, ComparisonError> {
        for (label, value) in [
            ("rocket thrust per MW", rocket_thrust_per_mw),
            ("ion thrust per MW", ion_thrust_per_mw),
            ("electricity price", electricity_usd_per_kwh),
            ("launch price", rocket_launch_usd_per_kg),
            ("orbit altitude", orbit_altitude_m),
        ] {
            if !is_positive(value) {
                return Err(ComparisonError::InvalidFigure { label, value });
            }
        }
        if !(rocket_lift_efficiency > 0.0 && rocket_lift_efficiency <= 1.0) {
            return Err(ComparisonError::InvalidEfficiency(rocket_lift_efficiency));
        }
        Ok(Self {
            rocket_thrust_per_mw,
            ion_thrust_per_mw,
            rocket_lift_efficiency,
            electricity_usd_per_kwh,
            rocket_launch_usd_per_kg,
            orbit_altitude_m,
        })
    }

    /// Thrust delivered by rocket and ion drive at the same input power.
    ///
    /// `None` unless thrust is finite and non-negative and power is positive.
    pub fn compare(&self, thrust_n: f64, power_mw: f64) -> Option<PropulsionComparison> {
        if !(thrust_n >= 0.0 && thrust_n.is_finite()) || !is_positive(power_mw) {
            return None;
        }
        let rocket_thrust_n = self.rocket_thrust_per_mw * power_mw;
        let ion_thrust_n = self.ion_thrust_per_mw * power_mw;
        Some(PropulsionComparison {
            thrust_n,
            power_mw,
            thrust_per_mw: thrust_n / power_mw,
            rocket_thrust_n,
            ion_thrust_n,
            rocket_improvement: thrust_n / rocket_thrust_n,
            ion_improvement: thrust_n / ion_thrust_n,
        })
    }

    /// Time to orbit altitude for a payload.
    pub fn time_to_orbit(
        &self,
        thrust_n: f64,
        payload_kg: f64,
        gravity_m_s2: f64,
    ) -> Option<AscentEstimate> {
        ascent(thrust_n, payload_kg, self.orbit_altitude_m, gravity_m_s2)
    }

    /// Electricity cost of climbing to orbit altitude against the rocket launch price.
    pub fn ascent_cost(
        &self,
        thrust_n: f64,
        power_mw: f64,
        payload_kg: f64,
        gravity_m_s2: f64,
    ) -> Option<AscentCost> {
        if !is_positive(power_mw) {
            return None;
        }
        let climb = self.time_to_orbit(thrust_n, payload_kg, gravity_m_s2)?;
        let energy_kwh = power_mw * 1_000.0 * climb.time_s / 3_600.0;
        let electricity_usd = energy_kwh * self.electricity_usd_per_kwh;
        let rocket_usd = payload_kg * self.rocket_launch_usd_per_kg;
        Some(AscentCost {
            time_s: climb.time_s,
            energy_kwh,
            electricity_usd,
            rocket_usd,
            savings_factor: rocket_usd / electricity_usd,
        })
    }

    /// Energy a rocket spends lifting `mass_kg` through `height_m`.
    pub fn rocket_lift_energy_j(&self, mass_kg: f64, height_m: f64, gravity_m_s2: f64) -> f64 {
        mass_kg * gravity_m_s2 * height_m / self.rocket_lift_efficiency
    }

    /// Rocket energy divided by modulator energy for a successful lift.
    pub fn lift_advantage(&self, result: &LiftResult, gravity_m_s2: f64) -> Option<f64> {
        if !result.success || result.energy_j <= 0.0 {
            return None;
        }
        let rocket_j = self.rocket_lift_energy_j(result.mass_kg, result.height_m, gravity_m_s2);
        Some(rocket_j / result.energy_j)
    }

    /// Electricity cost of a lift at the reference tariff.
    pub fn lift_cost_usd(&self, result: &LiftResult) -> f64 {
        j_to_kwh(result.energy_j) * self.electricity_usd_per_kwh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_ratios_follow_reference_figures() {
        let refs = ReferencePropulsion::default();
        let c = refs.compare(38_500.0, 0.5).unwrap();
        assert_eq!(c.rocket_thrust_n, 250.0);
        assert_eq!(c.ion_thrust_n, 50.0);
        assert!((c.rocket_improvement - 154.0).abs() < 1e-9);
        assert!((c.ion_improvement - 770.0).abs() < 1e-9);
        assert!((c.thrust_per_mw - 77_000.0).abs() < 1e-9);
    }

    #[test]
    fn comparison_needs_positive_power_and_finite_thrust() {
        let refs = ReferencePropulsion::default();
        assert!(refs.compare(100.0, 0.0).is_none());
        assert!(refs.compare(100.0, -1.0).is_none());
        assert!(refs.compare(f64::NAN, 1.0).is_none());
        assert!(refs.compare(f64::INFINITY, 1.0).is_none());
        assert_eq!(refs.compare(0.0, 1.0).unwrap().rocket_improvement, 0.0);
    }

    #[test]
    fn non_finite_ascent_inputs_yield_none() {
        assert!(ascent(f64::NAN, 10.0, 100.0, 9.81).is_none());
        assert!(ascent(f64::INFINITY, 10.0, 100.0, 9.81).is_none());
        assert!(ascent(1_000.0, 10.0, 100.0, f64::NAN).is_none());
        assert!(ascent(1_000.0, 10.0, 100.0, 0.0).is_none());
        assert!(ascent(1_000.0, 10.0, f64::INFINITY, 9.81).is_none());
        assert!(ascent(1_000.0, f64::NAN, 100.0, 9.81).is_none());

        let refs = ReferencePropulsion::default();
        assert!(refs.ascent_cost(2.0 * 9_810.0, 0.0, 1_000.0, 9.81).is_none());
    }

    #[test]
    fn reference_figures_are_validated() {
        let defaults = ReferencePropulsion::default();
        assert_eq!(
            ReferencePropulsion::new(500.0, 100.0, 0.01, 0.12, 10_000.0, 200_000.0),
            Ok(defaults)
        );
        assert_eq!(
            ReferencePropulsion::new(500.0, 0.0, 0.01, 0.12, 10_000.0, 200_000.0),
            Err(ComparisonError::InvalidFigure {
                label: "ion thrust per MW",
                value: 0.0
            })
        );
        assert_eq!(
            ReferencePropulsion::new(500.0, 100.0, 0.0, 0.12, 10_000.0, 200_000.0),
            Err(ComparisonError::InvalidEfficiency(0.0))
        );
        assert!(
            ReferencePropulsion::new(f64::NAN, 100.0, 0.01, 0.12, 10_000.0, 200_000.0).is_err()
        );
    }

    #[test]
    fn ascent_requires_thrust_above_weight() {
        assert!(ascent(9_000.0, 1_000.0, 100.0, 9.81).is_none());
        let climb = ascent(2.0 * 9_810.0, 1_000.0, 200_000.0, 9.81).unwrap();
        assert!((climb.acceleration_m_s2 - 9.81).abs() < 1e-9);
        assert!((climb.g_load - 1.0).abs() < 1e-12);
        assert!((climb.time_s - (2.0 * 200_000.0 / 9.81_f64).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn ascent_cost_uses_tariff_and_launch_price() {
        let refs = ReferencePropulsion::default();
        let cost = refs.ascent_cost(2.0 * 9_810.0, 1.0, 1_000.0, 9.81).unwrap();
        let expected_kwh = 1_000.0 * cost.time_s / 3_600.0;
        assert!((cost.energy_kwh - expected_kwh).abs() < 1e-9);
        assert!((cost.electricity_usd - expected_kwh * 0.12).abs() < 1e-9);
        assert_eq!(cost.rocket_usd, 10_000_000.0);
        assert!(refs.ascent_cost(1.0, 1.0, 1_000.0, 9.81).is_none());
    }

    #[test]
    fn rocket_energy_assumes_one_percent_efficiency() {
        let refs = ReferencePropulsion::default();
        let e = refs.rocket_lift_energy_j(1_000.0, 100.0, 9.81);
        assert!((e - 1_000.0 * 9.81 * 100.0 * 100.0).abs() < 1e-6);
    }
}
