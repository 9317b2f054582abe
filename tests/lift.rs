use gravity_modulator::array::{ArrayGeometry, ArrayGeometrySpec, MaterialEnhancement, PlateArea};
use gravity_modulator::comparison::ReferencePropulsion;
use gravity_modulator::engine::{EngineCalibration, EngineError, ThrustEngine};
use gravity_modulator::lift::{LiftSettings, LiftSimulator};
use gravity_modulator::scaling::ScalingModel;

/// 20³ plates with an enlarged effective plate area: roughly 2.5×10⁵ N/MW.
fn strong_engine() -> ThrustEngine {
    let geometry = ArrayGeometry::new(ArrayGeometrySpec {
        dimensions: [20, 20, 20],
        plate_area: PlateArea::Fixed { area_m2: 1e-6 },
        ..ArrayGeometrySpec::default()
    })
    .unwrap();
    ThrustEngine::new(
        geometry,
        MaterialEnhancement::reference(),
        EngineCalibration::default(),
    )
    .unwrap()
}

/// 20³ plates with the reference area model: far below the 77 kN/MW sizing ratio.
fn weak_engine() -> ThrustEngine {
    ThrustEngine::new(
        ArrayGeometry::cube(20).unwrap(),
        MaterialEnhancement::reference(),
        EngineCalibration::default(),
    )
    .unwrap()
}

#[test]
fn required_power_uses_reference_ratio() {
    let mut sim = LiftSimulator::new(weak_engine(), LiftSettings::default());
    let result = sim.lift(1_000.0, 100.0).unwrap();
    assert!((result.required_force_n - 9_810.0).abs() < 1e-9);
    let expected = 9_810.0 / 77_000.0;
    assert!((result.required_power_mw - expected).abs() / expected < 1e-12);
    assert!((result.required_power_mw - 0.1273).abs() < 1e-3);
}

#[test]
fn insufficient_thrust_is_a_failed_result_not_an_error() {
    let mut sim = LiftSimulator::new(weak_engine(), LiftSettings::default());
    let result = sim.lift(1_000.0, 100.0).unwrap();
    assert!(result.achieved_thrust_n < result.required_force_n);
    assert!(result.net_acceleration_m_s2 < 0.0);
    assert!(!result.success);
    assert_eq!(result.lift_time_s, 0.0);
    assert_eq!(result.energy_j, 0.0);
}

#[test]
fn sufficient_thrust_follows_free_kinematics() {
    let mut sim = LiftSimulator::new(strong_engine(), LiftSettings::default());
    let result = sim.lift(1_000.0, 100.0).unwrap();

    assert!(result.success);
    assert!(result.achieved_thrust_n >= 9_810.0);
    let expected_accel = (result.achieved_thrust_n - result.required_force_n) / 1_000.0;
    assert_eq!(result.net_acceleration_m_s2, expected_accel);

    let expected_time = (2.0 * 100.0 / result.net_acceleration_m_s2).sqrt();
    assert!((result.lift_time_s - expected_time).abs() < 1e-12);
    let expected_energy = result.required_power_mw * 1e6 * result.lift_time_s;
    assert!((result.energy_j - expected_energy).abs() / expected_energy < 1e-12);
}

#[test]
fn engine_is_left_active_at_sized_power() {
    let mut sim = LiftSimulator::new(strong_engine(), LiftSettings::default());
    let result = sim.lift(250.0, 10.0).unwrap();

    let status = sim.engine().status();
    assert!(status.active);
    assert_eq!(status.power_mw, result.required_power_mw);
    assert!((status.thrust_n - result.achieved_thrust_n).abs() < 1e-9);

    let mut engine = sim.into_engine();
    assert!(engine.deactivate());
}

#[test]
fn invalid_payloads_are_rejected_before_activation() {
    let mut sim = LiftSimulator::new(strong_engine(), LiftSettings::default());
    for (mass, height) in [(0.0, 10.0), (-5.0, 10.0), (10.0, -1.0), (f64::NAN, 1.0)] {
        assert!(matches!(
            sim.lift(mass, height),
            Err(EngineError::InvalidInput(_))
        ));
    }
    assert!(!sim.engine().status().active);
}

#[test]
fn zero_height_succeeds_trivially() {
    let mut sim = LiftSimulator::new(strong_engine(), LiftSettings::default());
    let result = sim.lift(100.0, 0.0).unwrap();
    assert!(result.success);
    assert!(result.net_acceleration_m_s2 > 0.0);
    assert_eq!(result.lift_time_s, 0.0);
    assert_eq!(result.energy_j, 0.0);
    assert!(sim.engine().status().active);
}

#[test]
fn zero_height_still_fails_without_enough_thrust() {
    let mut sim = LiftSimulator::new(weak_engine(), LiftSettings::default());
    let result = sim.lift(1_000.0, 0.0).unwrap();
    assert!(result.achieved_thrust_n < result.required_force_n);
    assert!(!result.success);
    assert_eq!(result.lift_time_s, 0.0);
    assert_eq!(result.energy_j, 0.0);
}

#[test]
fn power_scales_with_mass_and_energy_with_root_height() {
    let mut sim = LiftSimulator::new(strong_engine(), LiftSettings::default());
    let light = sim.lift(100.0, 10.0).unwrap();
    let heavy = sim.lift(1_000.0, 10.0).unwrap();
    assert!((heavy.required_power_mw / light.required_power_mw - 10.0).abs() < 1e-9);

    let high = sim.lift(100.0, 100.0).unwrap();
    let energy_ratio = high.energy_j / light.energy_j;
    assert!((energy_ratio - 10.0_f64.sqrt()).abs() < 1e-9, "ratio = {energy_ratio}");
}

#[test]
fn modulator_beats_rocket_energy_on_successful_lift() {
    let mut sim = LiftSimulator::new(strong_engine(), LiftSettings::default());
    let result = sim.lift(1_000.0, 100.0).unwrap();
    let refs = ReferencePropulsion::default();
    let advantage = refs.lift_advantage(&result, 9.81).unwrap();
    assert!(advantage > 100.0, "advantage = {advantage}");
    assert!(refs.lift_cost_usd(&result) > 0.0);
}

#[test]
fn settings_can_follow_tile_level_or_engine() {
    let scaling = ScalingModel::canonical();
    let tile = LiftSettings::from_level(scaling.reference()).unwrap();
    assert!((tile.reference_thrust_per_mw - 770.0).abs() < 1e-9);

    let engine = strong_engine();
    let matched = LiftSettings::matched_to(&engine).unwrap();
    assert_eq!(matched.reference_thrust_per_mw, engine.thrust_per_mw());

    assert!(LiftSettings::new(0.0, 9.81).is_err());
}
