use approx::assert_relative_eq;
use phugoid::components::{ModeKind, ModeResponse, StateIndex, Subsystem, TrimTarget};

use crate::common::{
    assert_mode_in_band, assert_stable, cessna, cruise_target, directionally_unstable_cessna,
    full_analysis, standard_atmosphere, statically_unstable_cessna, twin_otter,
};

#[test]
fn test_cessna_longitudinal_modes() {
    let atmosphere = standard_atmosphere();
    let (_, _, modes) = full_analysis(&cessna(), &atmosphere, cruise_target());

    assert_eq!(modes.longitudinal.len(), 2);
    let phugoid = assert_mode_in_band(&modes, ModeKind::Phugoid, (0.2, 0.27), (0.03, 0.08));
    let short_period =
        assert_mode_in_band(&modes, ModeKind::ShortPeriod, (4.3, 5.1), (0.45, 0.65));

    // Fastest first.
    assert_eq!(modes.longitudinal[0].kind, ModeKind::ShortPeriod);
    assert!(short_period.natural_frequency > 10.0 * phugoid.natural_frequency);
    assert_relative_eq!(phugoid.period().unwrap(), 27.0, epsilon = 2.0);
}

#[test]
fn test_cessna_lateral_modes() {
    let atmosphere = standard_atmosphere();
    let (_, _, modes) = full_analysis(&cessna(), &atmosphere, cruise_target());

    assert_eq!(modes.lateral.len(), 3);
    assert_mode_in_band(&modes, ModeKind::DutchRoll, (2.4, 2.9), (0.15, 0.3));

    let roll = modes.find(ModeKind::Roll).expect("roll mode");
    assert_eq!(roll.multiplicity, 1);
    assert_relative_eq!(roll.real(), -9.684, epsilon = 0.5);

    let spiral = modes.find(ModeKind::Spiral).expect("spiral mode");
    assert_eq!(spiral.multiplicity, 1);
    assert!(spiral.real().abs() < 0.05);
    assert_relative_eq!(spiral.real(), -0.0062, epsilon = 0.005);

    assert_stable(&modes);
}

#[test]
fn test_mode_shapes_are_normalised() {
    let atmosphere = standard_atmosphere();
    let (_, model, modes) = full_analysis(&cessna(), &atmosphere, cruise_target());

    for mode in modes.iter() {
        let largest = mode.shape.iter().map(|c| c.norm()).fold(0.0, f64::max);
        assert_relative_eq!(largest, 1.0, epsilon = 1e-9);
    }

    // The phugoid is a speed and pitch-attitude exchange.
    let phugoid = modes.find(ModeKind::Phugoid).unwrap();
    let longitudinal = model.longitudinal();
    let u = longitudinal.position(StateIndex::U).unwrap();
    let q = longitudinal.position(StateIndex::Q).unwrap();
    assert!(phugoid.shape[u].norm() > phugoid.shape[q].norm());
}

#[test]
fn test_negative_pitch_stiffness_diverges() {
    let atmosphere = standard_atmosphere();
    let (_, _, modes) = full_analysis(&statically_unstable_cessna(), &atmosphere, cruise_target());

    assert!(!modes.is_stable());
    let divergent = modes
        .longitudinal
        .iter()
        .find(|mode| !mode.stable)
        .expect("an unstable longitudinal root");
    assert!(!divergent.is_oscillatory());
    assert_relative_eq!(divergent.real(), 0.358, epsilon = 0.05);
    assert!(matches!(divergent.response(), ModeResponse::Divergence { .. }));
}

#[test]
fn test_negative_weathercock_stability_is_unstable() {
    let atmosphere = standard_atmosphere();
    let (_, _, modes) = full_analysis(
        &directionally_unstable_cessna(),
        &atmosphere,
        cruise_target(),
    );

    assert!(modes.longitudinal.iter().all(|mode| mode.stable));
    assert!(modes.unstable_modes().all(|mode| mode.subsystem == Subsystem::Lateral));
    assert!(modes.unstable_modes().count() > 0);
}

#[test]
fn test_twin_otter_modes() {
    let atmosphere = standard_atmosphere();
    let (_, _, modes) = full_analysis(&twin_otter(), &atmosphere, TrimTarget::new(70.0, 2000.0));

    assert_mode_in_band(&modes, ModeKind::ShortPeriod, (2.7, 3.4), (0.45, 0.6));
    assert_mode_in_band(&modes, ModeKind::Phugoid, (0.14, 0.19), (0.04, 0.1));
    assert_mode_in_band(&modes, ModeKind::DutchRoll, (1.8, 2.3), (0.12, 0.22));
    assert_relative_eq!(modes.find(ModeKind::Roll).unwrap().real(), -4.34, epsilon = 0.3);
    assert_stable(&modes);

    for list in [&modes.longitudinal, &modes.lateral] {
        assert!(list
            .windows(2)
            .all(|pair| pair[0].natural_frequency >= pair[1].natural_frequency));
    }
}
