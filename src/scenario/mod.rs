//! Assemble engines, lift simulators, and scaling tables from configuration files.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use modulator_array::{
    ArrayError, ArrayGeometry, ArrayGeometrySpec, MaterialEnhancement, PlateArea,
};
use modulator_config::{
    ArrayConfig, ComparisonConfig, ConfigError, EngineConfig, MaterialConfig, ModulatorConfig,
    PlateAreaConfig, ScalingConfig,
};
use modulator_phase::PhaseLimits;
use modulator_scaling::{ScalingError, ScalingLevel, ScalingModel, canonical_levels};

use crate::comparison::{ComparisonError, ReferencePropulsion};
use crate::engine::{EngineCalibration, EngineError, ThrustEngine};
use crate::lift::{LiftSettings, LiftSimulator};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Array(#[from] ArrayError),
    #[error(transparent)]
    Scaling(#[from] ScalingError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Comparison(#[from] ComparisonError),
}

/// Everything a driver needs to run lifts and scaled comparisons.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub simulator: LiftSimulator,
    pub scaling: ScalingModel,
    pub comparison: ReferencePropulsion,
}

impl Scenario {
    /// Assemble a scenario. A relative `scaling.levels_path` is read relative to
    /// the working directory; [`load_scenario`] resolves it against the file instead.
    pub fn from_config(config: &ModulatorConfig) -> Result<Self, ScenarioError> {
        let engine = build_engine(config)?;
        let settings = LiftSettings::new(
            config.lift.reference_thrust_per_mw,
            config.lift.gravity_m_s2,
        )?;
        let scaling = scaling_model(&config.scaling)?;
        debug!(
            plates = engine.pressure().geometry().plate_count(),
            thrust_per_mw = engine.thrust_per_mw(),
            levels = scaling.levels().len(),
            "scenario assembled"
        );
        Ok(Self {
            simulator: LiftSimulator::new(engine, settings),
            scaling,
            comparison: reference_propulsion(&config.comparison)?,
        })
    }

    pub fn engine(&self) -> &ThrustEngine {
        self.simulator.engine()
    }

    pub fn gravity_m_s2(&self) -> f64 {
        self.simulator.settings().gravity_m_s2
    }
}

/// Load a TOML/YAML scenario file and assemble it.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, ScenarioError> {
    let path = path.as_ref();
    let mut config = modulator_config::load_config(path)?;
    if let Some(levels_path) = config.scaling.levels_path.as_mut() {
        if levels_path.is_relative() {
            if let Some(parent) = path.parent() {
                *levels_path = parent.join(&*levels_path);
            }
        }
    }
    Scenario::from_config(&config)
}

/// Build a thrust engine from the material, array, and engine sections.
pub fn build_engine(config: &ModulatorConfig) -> Result<ThrustEngine, ScenarioError> {
    let enhancement = material_enhancement(&config.material)?;
    let geometry = array_geometry(&config.array)?;
    let calibration = EngineCalibration::from(&config.engine);
    Ok(ThrustEngine::new(geometry, enhancement, calibration)?)
}

fn material_enhancement(value: &MaterialConfig) -> Result<MaterialEnhancement, ArrayError> {
    MaterialEnhancement::new(
        value.bragg_enhancement,
        value.plasmonic_enhancement,
        value.hyperbolic_enhancement,
    )
}

fn plate_area(value: &PlateAreaConfig) -> PlateArea {
    match *value {
        PlateAreaConfig::SpacingScaled { multiplier } => PlateArea::SpacingScaled { multiplier },
        PlateAreaConfig::Fixed { area_m2 } => PlateArea::Fixed { area_m2 },
    }
}

fn array_geometry(value: &ArrayConfig) -> Result<ArrayGeometry, ArrayError> {
    ArrayGeometry::new(ArrayGeometrySpec {
        dimensions: value.dimensions,
        plate_spacing_nm: value.plate_spacing_nm,
        plate_thickness_nm: value.plate_thickness_nm,
        reflectivity: value.reflectivity,
        phase_resolution_deg: value.phase_resolution_deg,
        plate_area: plate_area(&value.plate_area),
    })
}

impl From<&EngineConfig> for EngineCalibration {
    fn from(value: &EngineConfig) -> Self {
        EngineCalibration {
            on_axis_efficiency: value.on_axis_efficiency,
            off_axis_cancellation: value.off_axis_cancellation,
            rated_power_mw: value.rated_power_mw,
            phase_limits: PhaseLimits {
                dense_cells: value.dense_cell_ceiling,
                stream_cells: value.stream_cell_ceiling,
            },
        }
    }
}

/// A level file wins over inline levels; with neither, the canonical table is used.
fn scaling_model(value: &ScalingConfig) -> Result<ScalingModel, ScenarioError> {
    let configured = match &value.levels_path {
        Some(path) => modulator_config::load_scaling_levels(path)?,
        None => value.levels.clone(),
    };
    let levels = if configured.is_empty() {
        canonical_levels()
    } else {
        configured
            .iter()
            .map(|level| {
                ScalingLevel::new(
                    &level.name,
                    level.size_cm,
                    level.unit_cells,
                    level.thrust_n,
                    level.power_mw,
                )
            })
            .collect()
    };
    Ok(ScalingModel::new(levels, &value.reference_level)?)
}

fn reference_propulsion(
    value: &ComparisonConfig,
) -> Result<ReferencePropulsion, ComparisonError> {
    ReferencePropulsion::new(
        value.rocket_thrust_per_mw,
        value.ion_thrust_per_mw,
        value.rocket_lift_efficiency,
        value.electricity_usd_per_kwh,
        value.rocket_launch_usd_per_kg,
        value.orbit_altitude_km * 1_000.0,
    )
}
