//! Modular scaling table: named size classes from unit cells to megascale arrays,
//! plus continuous cubic extrapolation anchored on one reference level.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the level used as the extrapolation anchor unless configured otherwise.
pub const DEFAULT_REFERENCE_LEVEL: &str = "Tile";

/// A named reference point in the scaling table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingLevel {
    pub name: String,
    /// Characteristic edge length (cm).
    pub size_cm: f64,
    pub unit_cells: u64,
    pub thrust_n: f64,
    pub power_mw: f64,
}

impl ScalingLevel {
    pub fn new(name: &str, size_cm: f64, unit_cells: u64, thrust_n: f64, power_mw: f64) -> Self {
        Self {
            name: name.to_string(),
            size_cm,
            unit_cells,
            thrust_n,
            power_mw,
        }
    }

    pub fn thrust_per_mw(&self) -> f64 {
        self.thrust_n / self.power_mw
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScalingError {
    #[error("scaling table is empty")]
    EmptyTable,
    #[error("level '{0}' has non-positive size, thrust, or power")]
    InvalidLevel(String),
    #[error("level '{later}' does not strictly exceed '{earlier}' in size, thrust, and power")]
    NonMonotonic { earlier: String, later: String },
    #[error("reference level '{0}' not found in scaling table")]
    UnknownReference(String),
    #[error("value must be positive and finite (got {0})")]
    InvalidValue(f64),
}

/// Ordered table of size classes with a designated extrapolation reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingModel {
    levels: Vec<ScalingLevel>,
    reference: usize,
}

impl ScalingModel {
    /// Validate ordering and resolve the reference level by (case-insensitive) name.
    pub fn new(levels: Vec<ScalingLevel>, reference_name: &str) -> Result<Self, ScalingError> {
        if levels.is_empty() {
            return Err(ScalingError::EmptyTable);
        }
        for level in &levels {
            let valid = [level.size_cm, level.thrust_n, level.power_mw]
                .iter()
                .all(|v| *v > 0.0 && v.is_finite());
            if !valid {
                return Err(ScalingError::InvalidLevel(level.name.clone()));
            }
        }
        for pair in levels.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if !(b.size_cm > a.size_cm && b.thrust_n > a.thrust_n && b.power_mw > a.power_mw) {
                return Err(ScalingError::NonMonotonic {
                    earlier: a.name.clone(),
                    later: b.name.clone(),
                });
            }
        }
        let reference = levels
            .iter()
            .position(|l| l.name.eq_ignore_ascii_case(reference_name))
            .ok_or_else(|| ScalingError::UnknownReference(reference_name.to_string()))?;
        Ok(Self { levels, reference })
    }

    /// Canonical five-level hierarchy anchored on the 1 cm Tile.
    pub fn canonical() -> Self {
        Self {
            levels: canonical_levels(),
            reference: 1,
        }
    }

    pub fn levels(&self) -> &[ScalingLevel] {
        &self.levels
    }

    pub fn reference(&self) -> &ScalingLevel {
        &self.levels[self.reference]
    }

    pub fn level(&self, name: &str) -> Option<&ScalingLevel> {
        self.levels.iter().find(|l| l.name.eq_ignore_ascii_case(name))
    }

    /// Volumetric extrapolation `T_ref · (size / size_ref)³`.
    pub fn thrust_at_scale(&self, size_cm: f64) -> f64 {
        let reference = self.reference();
        let ratio = size_cm / reference.size_cm;
        reference.thrust_n * ratio * ratio * ratio
    }

    /// Edge length whose extrapolated thrust equals `thrust_n`.
    pub fn size_for_thrust(&self, thrust_n: f64) -> Result<f64, ScalingError> {
        if !(thrust_n > 0.0 && thrust_n.is_finite()) {
            return Err(ScalingError::InvalidValue(thrust_n));
        }
        let reference = self.reference();
        Ok(reference.size_cm * (thrust_n / reference.thrust_n).cbrt())
    }

    /// Levels whose thrust lies within a factor of ten of `thrust_n`.
    pub fn levels_near(&self, thrust_n: f64) -> Vec<&ScalingLevel> {
        self.levels
            .iter()
            .filter(|level| {
                let ratio = thrust_n / level.thrust_n;
                (0.1..=10.0).contains(&ratio)
            })
            .collect()
    }
}

impl Default for ScalingModel {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Unit Cell → Tile → Panel → Array → Megascale.
pub fn canonical_levels() -> Vec<ScalingLevel> {
    vec![
        ScalingLevel::new("Unit Cell", 0.1, 1, 0.385, 0.0005),
        ScalingLevel::new("Tile", 1.0, 1_000, 385.0, 0.5),
        ScalingLevel::new("Panel", 10.0, 1_000_000, 38_500.0, 50.0),
        ScalingLevel::new("Array", 100.0, 1_000_000_000, 3_850_000.0, 5_000.0),
        ScalingLevel::new("Megascale", 1_000.0, 1_000_000_000_000, 38_500_000.0, 50_000.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_table_passes_validation() {
        let validated = ScalingModel::new(canonical_levels(), DEFAULT_REFERENCE_LEVEL).unwrap();
        assert_eq!(validated, ScalingModel::canonical());
        assert_eq!(validated.reference().name, "Tile");
    }

    #[test]
    fn non_monotonic_table_is_rejected() {
        let mut levels = canonical_levels();
        levels[2].thrust_n = 100.0;
        assert_eq!(
            ScalingModel::new(levels, "Tile"),
            Err(ScalingError::NonMonotonic {
                earlier: "Tile".into(),
                later: "Panel".into()
            })
        );
    }

    #[test]
    fn unknown_reference_is_rejected() {
        assert!(matches!(
            ScalingModel::new(canonical_levels(), "Starship"),
            Err(ScalingError::UnknownReference(_))
        ));
        assert_eq!(
            ScalingModel::new(Vec::new(), "Tile"),
            Err(ScalingError::EmptyTable)
        );
    }

    #[test]
    fn size_for_thrust_inverts_extrapolation() {
        let model = ScalingModel::canonical();
        let size = model.size_for_thrust(9_810.0).unwrap();
        assert!((model.thrust_at_scale(size) - 9_810.0).abs() < 1e-6);
        assert!(model.size_for_thrust(0.0).is_err());
    }

    #[test]
    fn levels_near_selects_neighbouring_classes() {
        let model = ScalingModel::canonical();
        let names: Vec<&str> = model
            .levels_near(1_000.0)
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["Tile"]);
    }
}
