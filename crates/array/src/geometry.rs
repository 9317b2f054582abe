use serde::Serialize;

use modulator_core::units::{deg_to_rad, nm_to_m};

use crate::ArrayError;

/// Modeling parameter for the effective area contributed by a single plate.
///
/// The spacing-scaled form reproduces the reference calibration
/// `(spacing × 100)²`; it is an approximation, not a derived law.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PlateArea {
    /// Area = (plate spacing × multiplier)².
    SpacingScaled { multiplier: f64 },
    /// Area fixed in square metres regardless of spacing.
    Fixed { area_m2: f64 },
}

impl PlateArea {
    pub const REFERENCE_MULTIPLIER: f64 = 100.0;

    /// Per-plate area in square metres for the given spacing.
    pub fn area_m2(&self, spacing_m: f64) -> f64 {
        match *self {
            PlateArea::SpacingScaled { multiplier } => {
                let side = spacing_m * multiplier;
                side * side
            }
            PlateArea::Fixed { area_m2 } => area_m2,
        }
    }

    fn validate(&self) -> Result<(), ArrayError> {
        let (label, value) = match *self {
            PlateArea::SpacingScaled { multiplier } => ("plate area multiplier", multiplier),
            PlateArea::Fixed { area_m2 } => ("fixed plate area", area_m2),
        };
        if value > 0.0 && value.is_finite() {
            Ok(())
        } else {
            Err(ArrayError::InvalidGeometry(format!(
                "{label} must be positive (got {value})"
            )))
        }
    }
}

impl Default for PlateArea {
    fn default() -> Self {
        PlateArea::SpacingScaled {
            multiplier: Self::REFERENCE_MULTIPLIER,
        }
    }
}

/// Unvalidated description of a plate array, in the units engineers quote.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayGeometrySpec {
    pub dimensions: [u32; 3],
    pub plate_spacing_nm: f64,
    pub plate_thickness_nm: f64,
    pub reflectivity: f64,
    pub phase_resolution_deg: f64,
    pub plate_area: PlateArea,
}

impl Default for ArrayGeometrySpec {
    fn default() -> Self {
        Self {
            dimensions: [100, 100, 100],
            plate_spacing_nm: 100.0,
            plate_thickness_nm: 10.0,
            reflectivity: 0.99997,
            phase_resolution_deg: 0.1,
            plate_area: PlateArea::default(),
        }
    }
}

/// Validated 3D phased plate array. Lengths are stored in metres, angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayGeometry {
    dimensions: [u32; 3],
    plate_count: u64,
    plate_spacing_m: f64,
    plate_thickness_m: f64,
    reflectivity: f64,
    phase_resolution_rad: f64,
    plate_area: PlateArea,
}

impl ArrayGeometry {
    /// Validate geometry parameters and convert them to SI units.
    pub fn new(spec: ArrayGeometrySpec) -> Result<Self, ArrayError> {
        if spec.dimensions.iter().any(|&n| n == 0) {
            return Err(ArrayError::InvalidGeometry(format!(
                "every dimension must be at least 1 (got {:?})",
                spec.dimensions
            )));
        }
        let plate_count = spec
            .dimensions
            .iter()
            .try_fold(1u64, |acc, &n| acc.checked_mul(u64::from(n)))
            .ok_or_else(|| ArrayError::InvalidGeometry("plate count overflows u64".into()))?;

        positive("plate spacing", spec.plate_spacing_nm)?;
        positive("plate thickness", spec.plate_thickness_nm)?;
        if !(spec.reflectivity > 0.0 && spec.reflectivity <= 1.0) {
            return Err(ArrayError::InvalidGeometry(format!(
                "reflectivity must lie in (0, 1] (got {})",
                spec.reflectivity
            )));
        }
        positive("phase resolution", spec.phase_resolution_deg)?;
        if spec.phase_resolution_deg > 360.0 {
            return Err(ArrayError::InvalidGeometry(format!(
                "phase resolution cannot exceed a full turn (got {}°)",
                spec.phase_resolution_deg
            )));
        }
        spec.plate_area.validate()?;

        Ok(Self::from_validated(spec, plate_count))
    }

    /// Reference 100×100×100 array at 100 nm spacing.
    pub fn reference() -> Self {
        Self::from_validated(ArrayGeometrySpec::default(), 1_000_000)
    }

    /// Reference array with different grid dimensions.
    pub fn cube(side: u32) -> Result<Self, ArrayError> {
        Self::new(ArrayGeometrySpec {
            dimensions: [side, side, side],
            ..ArrayGeometrySpec::default()
        })
    }

    fn from_validated(spec: ArrayGeometrySpec, plate_count: u64) -> Self {
        Self {
            dimensions: spec.dimensions,
            plate_count,
            plate_spacing_m: nm_to_m(spec.plate_spacing_nm),
            plate_thickness_m: nm_to_m(spec.plate_thickness_nm),
            reflectivity: spec.reflectivity,
            phase_resolution_rad: deg_to_rad(spec.phase_resolution_deg),
            plate_area: spec.plate_area,
        }
    }

    pub fn dimensions(&self) -> [u32; 3] {
        self.dimensions
    }

    /// Total plate count `nx·ny·nz`.
    pub fn plate_count(&self) -> u64 {
        self.plate_count
    }

    pub fn plate_spacing_m(&self) -> f64 {
        self.plate_spacing_m
    }

    pub fn plate_thickness_m(&self) -> f64 {
        self.plate_thickness_m
    }

    pub fn reflectivity(&self) -> f64 {
        self.reflectivity
    }

    pub fn phase_resolution_rad(&self) -> f64 {
        self.phase_resolution_rad
    }

    pub fn plate_area_model(&self) -> PlateArea {
        self.plate_area
    }

    /// Effective area of one plate under the configured area model.
    pub fn plate_area_m2(&self) -> f64 {
        self.plate_area.area_m2(self.plate_spacing_m)
    }

    /// Copy of this geometry using a different plate-area model.
    pub fn with_plate_area(&self, plate_area: PlateArea) -> Result<Self, ArrayError> {
        plate_area.validate()?;
        Ok(Self {
            plate_area,
            ..self.clone()
        })
    }
}

fn positive(label: &str, value: f64) -> Result<(), ArrayError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ArrayError::InvalidGeometry(format!(
            "{label} must be positive (got {value})"
        )))
    }
}
