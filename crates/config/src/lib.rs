//! Configuration models and loaders for gravity modulator scenarios.
//!
//! Every section has defaults equal to the reference device, so an empty file is a
//! valid configuration. Values are not range-checked here; the domain constructors do that.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Complete scenario configuration.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ModulatorConfig {
    pub material: MaterialConfig,
    pub array: ArrayConfig,
    pub engine: EngineConfig,
    pub lift: LiftConfig,
    pub comparison: ComparisonConfig,
    pub scaling: ScalingConfig,
}

/// Hyperbolic metamaterial stack.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MaterialConfig {
    pub bragg_enhancement: f64,
    pub plasmonic_enhancement: f64,
    pub hyperbolic_enhancement: f64,
    pub bragg_layers: u32,
    pub bragg_materials: [String; 2],
    pub graphene_present: bool,
    pub graphene_mobility_cm2_v_s: f64,
    pub hyperbolic_periods: u32,
    pub hyperbolic_materials: [String; 2],
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            bragg_enhancement: 850.0,
            plasmonic_enhancement: 380.0,
            hyperbolic_enhancement: 3.7,
            bragg_layers: 23,
            bragg_materials: ["Ag".into(), "SiO2".into()],
            graphene_present: true,
            graphene_mobility_cm2_v_s: 200_000.0,
            hyperbolic_periods: 50,
            hyperbolic_materials: ["InGaAs".into(), "AlInAs".into()],
        }
    }
}

/// Phased plate array.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ArrayConfig {
    pub dimensions: [u32; 3],
    pub plate_spacing_nm: f64,
    pub plate_thickness_nm: f64,
    pub plate_material: String,
    pub reflectivity: f64,
    pub phase_resolution_deg: f64,
    pub plate_area: PlateAreaConfig,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            dimensions: [100, 100, 100],
            plate_spacing_nm: 100.0,
            plate_thickness_nm: 10.0,
            plate_material: "Au/Si".into(),
            reflectivity: 0.99997,
            phase_resolution_deg: 0.1,
            plate_area: PlateAreaConfig::default(),
        }
    }
}

/// Plate-area modeling parameter.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "model")]
pub enum PlateAreaConfig {
    #[serde(rename = "spacing_scaled")]
    SpacingScaled {
        #[serde(default = "default_area_multiplier")]
        multiplier: f64,
    },
    #[serde(rename = "fixed")]
    Fixed { area_m2: f64 },
}

impl Default for PlateAreaConfig {
    fn default() -> Self {
        PlateAreaConfig::SpacingScaled {
            multiplier: default_area_multiplier(),
        }
    }
}

fn default_area_multiplier() -> f64 {
    100.0
}

/// Thrust engine calibration and resource ceilings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub on_axis_efficiency: f64,
    pub off_axis_cancellation: f64,
    pub rated_power_mw: f64,
    pub dense_cell_ceiling: u64,
    pub stream_cell_ceiling: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            on_axis_efficiency: 0.99999,
            off_axis_cancellation: 0.99999,
            rated_power_mw: 0.5,
            dense_cell_ceiling: 10_000_000,
            stream_cell_ceiling: 1_000_000_000,
        }
    }
}

/// Lift simulation constants.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LiftConfig {
    pub reference_thrust_per_mw: f64,
    pub gravity_m_s2: f64,
}

impl Default for LiftConfig {
    fn default() -> Self {
        Self {
            reference_thrust_per_mw: 77_000.0,
            gravity_m_s2: 9.81,
        }
    }
}

/// Reference figures for conventional propulsion comparisons.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ComparisonConfig {
    pub rocket_thrust_per_mw: f64,
    pub ion_thrust_per_mw: f64,
    pub rocket_lift_efficiency: f64,
    pub electricity_usd_per_kwh: f64,
    pub rocket_launch_usd_per_kg: f64,
    pub orbit_altitude_km: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            rocket_thrust_per_mw: 500.0,
            ion_thrust_per_mw: 100.0,
            rocket_lift_efficiency: 0.01,
            electricity_usd_per_kwh: 0.12,
            rocket_launch_usd_per_kg: 10_000.0,
            orbit_altitude_km: 200.0,
        }
    }
}

/// Optional replacement scaling table and its reference level.
///
/// `levels_path` (a level file or a directory of level files, see
/// [`load_scaling_levels`]) takes precedence over inline `levels`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScalingConfig {
    pub reference_level: String,
    pub levels: Vec<ScalingLevelConfig>,
    pub levels_path: Option<PathBuf>,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            reference_level: "Tile".into(),
            levels: Vec::new(),
            levels_path: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScalingLevelConfig {
    pub name: String,
    pub size_cm: f64,
    pub unit_cells: u64,
    pub thrust_n: f64,
    pub power_mw: f64,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load a scenario from TOML (`.toml`) or YAML (any other extension).
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ModulatorConfig, ConfigError> {
    load_record(path.as_ref())
}

/// Load scaling levels from a YAML/TOML list file, or every `.toml` file in a directory.
pub fn load_scaling_levels<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<ScalingLevelConfig>, ConfigError> {
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        #[derive(Deserialize)]
        struct LevelTable {
            levels: Vec<ScalingLevelConfig>,
        }
        let contents = std::fs::read_to_string(path)?;
        let table: LevelTable = toml::from_str(&contents)?;
        Ok(table.levels)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn load_record<T>(path: &Path) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_yields_reference_defaults() {
        let parsed: ModulatorConfig = toml::from_str("").unwrap();
        assert_eq!(parsed, ModulatorConfig::default());
        assert_eq!(parsed.array.dimensions, [100, 100, 100]);
        assert_eq!(parsed.lift.reference_thrust_per_mw, 77_000.0);
    }

    #[test]
    fn toml_overrides_selected_fields() {
        let src = r#"
            [array]
            dimensions = [20, 20, 20]
            plate_area = { model = "fixed", area_m2 = 1e-6 }

            [engine]
            rated_power_mw = 1.0
        "#;
        let parsed: ModulatorConfig = toml::from_str(src).unwrap();
        assert_eq!(parsed.array.dimensions, [20, 20, 20]);
        assert_eq!(parsed.array.plate_spacing_nm, 100.0);
        assert_eq!(parsed.array.plate_area, PlateAreaConfig::Fixed { area_m2: 1e-6 });
        assert_eq!(parsed.engine.rated_power_mw, 1.0);
        assert_eq!(parsed.engine.on_axis_efficiency, 0.99999);
    }

    #[test]
    fn yaml_file_loads_through_extension_dispatch() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "material:\n  bragg_enhancement: 900.0\narray:\n  plate_area:\n    model: spacing_scaled\n"
        )
        .unwrap();
        let parsed = load_config(file.path()).unwrap();
        assert_eq!(parsed.material.bragg_enhancement, 900.0);
        assert_eq!(parsed.material.plasmonic_enhancement, 380.0);
        assert_eq!(
            parsed.array.plate_area,
            PlateAreaConfig::SpacingScaled { multiplier: 100.0 }
        );
    }

    #[test]
    fn scaling_levels_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a_small.toml"),
            "name = \"Small\"\nsize_cm = 1.0\nunit_cells = 1\nthrust_n = 1.0\npower_mw = 0.1\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("b_large.toml"),
            "name = \"Large\"\nsize_cm = 2.0\nunit_cells = 8\nthrust_n = 8.0\npower_mw = 0.8\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let levels = load_scaling_levels(dir.path()).unwrap();
        let names: Vec<&str> = levels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Small", "Large"]);
    }
}
