use phugoid::components::{ModeKind, TrimTarget};
use phugoid::systems::{root_locus_sweep, Linearizer, ModeAnalyzer, TrimSolver};

use crate::common::{cessna, full_analysis, standard_atmosphere, CRUISE_ALTITUDE};

#[test]
fn test_cessna_envelope_is_stable_apart_from_spiral() {
    let aircraft = cessna();
    let atmosphere = standard_atmosphere();
    let airspeeds: Vec<f64> = (0..=6).map(|k| 40.0 + 5.0 * k as f64).collect();

    let points = root_locus_sweep(
        &aircraft,
        &atmosphere,
        CRUISE_ALTITUDE,
        &airspeeds,
        &TrimSolver::default(),
        &Linearizer::default(),
        &ModeAnalyzer::default(),
    );

    assert_eq!(points.len(), airspeeds.len());
    for (point, airspeed) in points.iter().zip(&airspeeds) {
        assert_eq!(point.airspeed, *airspeed);
        let analysis = point.result.as_ref().expect("every point trims");
        for mode in analysis.modes.iter().filter(|m| m.kind != ModeKind::Spiral) {
            assert!(mode.stable, "{} unstable at {airspeed} m/s", mode.kind);
        }
    }

    // The phugoid slows down as airspeed grows.
    let frequencies: Vec<f64> = points
        .iter()
        .filter_map(|p| p.result.as_ref().ok())
        .map(|a| a.modes.find(ModeKind::Phugoid).unwrap().natural_frequency)
        .collect();
    assert!(frequencies.first() > frequencies.last());
}

#[test]
fn test_spiral_diverges_at_low_speed() {
    let aircraft = cessna();
    let atmosphere = standard_atmosphere();

    let (_, _, slow) = full_analysis(&aircraft, &atmosphere, TrimTarget::new(40.0, CRUISE_ALTITUDE));
    let spiral = slow.find(ModeKind::Spiral).expect("spiral mode at 40 m/s");
    assert!(spiral.real() > 0.0 && spiral.real() < 0.05, "spiral root {}", spiral.real());
    assert!(!spiral.stable);
    assert_eq!(slow.unstable_modes().count(), 1);

    let (_, _, fast) = full_analysis(&aircraft, &atmosphere, TrimTarget::new(60.0, CRUISE_ALTITUDE));
    assert!(fast.find(ModeKind::Spiral).unwrap().stable);
}
