//! Casimir pressure law with metamaterial enhancement.

use std::f64::consts::PI;

use serde::Serialize;

use modulator_array::{ArrayGeometry, MaterialEnhancement};
use modulator_core::constants::physical;

/// Ideal parallel-plate Casimir pressure `P = -π²ħc / (240 d⁴)` in pascals.
///
/// Negative values are attractive. Callers must pass a positive spacing; the
/// geometry types guarantee this for every spacing they hand out.
pub fn casimir_pressure(spacing_m: f64) -> f64 {
    let constants = physical();
    let d2 = spacing_m * spacing_m;
    -(PI * PI * constants.hbar * constants.speed_of_light_m_s) / (240.0 * d2 * d2)
}

/// Snapshot of the pressure chain for reporting.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PressureBreakdown {
    pub base_pressure_pa: f64,
    pub enhancement: f64,
    pub effective_pressure_pa: f64,
    pub plate_area_m2: f64,
    pub total_area_m2: f64,
    pub total_force_n: f64,
}

/// Evaluates enhanced pressure and total array force for a fixed geometry and material stack.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureEngine {
    geometry: ArrayGeometry,
    enhancement: MaterialEnhancement,
}

impl PressureEngine {
    pub fn new(geometry: ArrayGeometry, enhancement: MaterialEnhancement) -> Self {
        Self {
            geometry,
            enhancement,
        }
    }

    pub fn geometry(&self) -> &ArrayGeometry {
        &self.geometry
    }

    pub fn enhancement(&self) -> &MaterialEnhancement {
        &self.enhancement
    }

    /// Base Casimir pressure at an arbitrary spacing.
    pub fn base_pressure(&self, spacing_m: f64) -> f64 {
        casimir_pressure(spacing_m)
    }

    /// `base_pressure(spacing) × γ`; keeps the attractive sign.
    pub fn effective_pressure(&self) -> f64 {
        self.base_pressure(self.geometry.plate_spacing_m()) * self.enhancement.total()
    }

    /// Summed plate area under the geometry's area model.
    pub fn total_area_m2(&self) -> f64 {
        self.geometry.plate_area_m2() * self.geometry.plate_count() as f64
    }

    /// Magnitude of the enhanced force over every plate, in newtons.
    pub fn total_force(&self) -> f64 {
        self.effective_pressure().abs() * self.total_area_m2()
    }

    pub fn breakdown(&self) -> PressureBreakdown {
        let base = self.base_pressure(self.geometry.plate_spacing_m());
        let effective = self.effective_pressure();
        let total_area = self.total_area_m2();
        PressureBreakdown {
            base_pressure_pa: base,
            enhancement: self.enhancement.total(),
            effective_pressure_pa: effective,
            plate_area_m2: self.geometry.plate_area_m2(),
            total_area_m2: total_area,
            total_force_n: effective.abs() * total_area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_at_100nm_matches_closed_form() {
        let p = casimir_pressure(100e-9);
        let expected = -(PI * PI * 1.054_571_8e-34 * 299_792_458.0) / (240.0 * 1e-28);
        assert!(p < 0.0);
        assert!((p - expected).abs() / expected.abs() < 1e-12);
        assert!((p + 13.0).abs() < 0.1, "p = {p}");
    }

    #[test]
    fn extreme_spacings_stay_finite() {
        let tight = casimir_pressure(1e-9);
        assert!(tight.is_finite());
        assert!(tight < -1e3);

        let wide = casimir_pressure(10_000e-9);
        assert!(wide.is_finite());
        assert!(wide.abs() < 1e-2);
    }

    #[test]
    fn breakdown_is_consistent() {
        let engine = PressureEngine::new(ArrayGeometry::reference(), MaterialEnhancement::reference());
        let b = engine.breakdown();
        assert_eq!(b.total_force_n, engine.total_force());
        assert!((b.total_area_m2 - 1e-4).abs() < 1e-15);
        assert!(b.effective_pressure_pa < 0.0);
    }
}
