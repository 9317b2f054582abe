use gravity_modulator::scaling::{ScalingModel, canonical_levels};

#[test]
fn canonical_levels_are_defined() {
    let model = ScalingModel::canonical();
    let levels = model.levels();
    assert_eq!(levels.len(), 5);

    let expected = [
        ("Unit Cell", 0.385),
        ("Tile", 385.0),
        ("Panel", 38_500.0),
        ("Array", 3_850_000.0),
        ("Megascale", 38_500_000.0),
    ];
    for (level, (name, thrust)) in levels.iter().zip(expected) {
        assert_eq!(level.name, name);
        assert_eq!(level.thrust_n, thrust);
    }
    assert_eq!(model.level("panel").unwrap().unit_cells, 1_000_000);
}

#[test]
fn thrust_and_power_strictly_increase() {
    for pair in canonical_levels().windows(2) {
        assert!(pair[1].thrust_n > pair[0].thrust_n);
        assert!(pair[1].power_mw > pair[0].power_mw);
        assert!(pair[1].size_cm > pair[0].size_cm);
    }
}

#[test]
fn level_ratios_match_hierarchy() {
    let model = ScalingModel::canonical();
    let thrust = |name: &str| model.level(name).unwrap().thrust_n;
    assert!((thrust("Tile") / thrust("Unit Cell") - 1_000.0).abs() < 10.0);
    assert!((thrust("Panel") / thrust("Tile") - 100.0).abs() < 1.0);
    assert!((thrust("Array") / thrust("Panel") - 100.0).abs() < 1.0);
}

#[test]
fn thrust_at_scale_is_cubic_in_size() {
    let model = ScalingModel::canonical();
    let tile = model.reference().thrust_n;
    assert_eq!(model.thrust_at_scale(1.0), tile);
    assert_eq!(model.thrust_at_scale(2.0), 8.0 * tile);
    assert_eq!(model.thrust_at_scale(5.0), 125.0 * tile);
    assert_eq!(model.thrust_at_scale(10.0), 1_000.0 * tile);
}

#[test]
fn thrust_at_scale_is_monotonic() {
    let model = ScalingModel::canonical();
    let mut previous = 0.0;
    for step in 1..200 {
        let thrust = model.thrust_at_scale(step as f64 * 0.05);
        assert!(thrust > previous);
        previous = thrust;
    }
}

#[test]
fn alternative_reference_level_rescales_extrapolation() {
    let model = ScalingModel::new(canonical_levels(), "Panel").unwrap();
    assert_eq!(model.thrust_at_scale(10.0), 38_500.0);
    assert!((model.thrust_at_scale(20.0) - 8.0 * 38_500.0).abs() < 1e-6);
}
