use approx::assert_relative_eq;
use phugoid::components::{ControlIndex, LinearizerConfig, StateIndex, Subsystem};
use phugoid::systems::linearize::condition_number;
use phugoid::systems::Linearizer;

use crate::common::{cessna, cruise_target, full_analysis, standard_atmosphere, trim_at};

#[test]
fn test_model_dimensions_and_operating_point() {
    let atmosphere = standard_atmosphere();
    let (trim, model, _) = full_analysis(&cessna(), &atmosphere, cruise_target());

    assert_eq!(model.a().shape(), (12, 12));
    assert_eq!(model.b().shape(), (12, 4));
    assert_eq!(model.state(), trim.state());
    assert_eq!(model.controls(), trim.controls());
    assert!(model.a().iter().all(|v| v.is_finite()));
}

#[test]
fn test_horizontal_position_has_no_influence() {
    let atmosphere = standard_atmosphere();
    let (_, model, _) = full_analysis(&cessna(), &atmosphere, cruise_target());

    for column in [StateIndex::X, StateIndex::Y] {
        for row in StateIndex::ALL {
            assert_eq!(model.a_element(row, column), 0.0, "d{row}/d{column}");
        }
    }
}

#[test]
fn test_principal_damping_terms_present() {
    let atmosphere = standard_atmosphere();
    let (_, model, _) = full_analysis(&cessna(), &atmosphere, cruise_target());

    // Drag, lift and pitch damping all oppose their own motion.
    assert!(model.a_element(StateIndex::U, StateIndex::U) < 0.0);
    assert!(model.a_element(StateIndex::W, StateIndex::W) < 0.0);
    assert!(model.a_element(StateIndex::Q, StateIndex::Q) < 0.0);
    assert!(model.a_element(StateIndex::P, StateIndex::P) < 0.0);
    assert_relative_eq!(
        model.a_element(StateIndex::Theta, StateIndex::Q),
        1.0,
        epsilon = 1e-6
    );
}

#[test]
fn test_control_effectiveness() {
    let atmosphere = standard_atmosphere();
    let (_, model, _) = full_analysis(&cessna(), &atmosphere, cruise_target());
    let longitudinal = model.longitudinal();

    // Elevator column: u, w, q, theta.
    assert_relative_eq!(longitudinal.b[(0, 0)], 0.305, epsilon = 0.05);
    assert_relative_eq!(longitudinal.b[(1, 0)], -7.12, epsilon = 0.2);
    assert_relative_eq!(longitudinal.b[(2, 0)], -23.3, epsilon = 0.5);
    assert_eq!(longitudinal.b[(3, 0)], 0.0);

    // Throttle only pushes along the body x axis.
    assert_relative_eq!(longitudinal.b[(0, 1)], 1.55, epsilon = 0.05);
    assert_relative_eq!(longitudinal.b[(2, 1)], 0.0, epsilon = 1e-6);

    assert!(model.b_element(StateIndex::P, ControlIndex::Aileron).abs() > 1.0);
    assert!(model.b_element(StateIndex::R, ControlIndex::Rudder).abs() > 0.1);
}

#[test]
fn test_symmetric_trim_decouples() {
    let atmosphere = standard_atmosphere();
    let (_, model, _) = full_analysis(&cessna(), &atmosphere, cruise_target());

    assert!(model.coupling_norm() < 1e-6, "coupling {}", model.coupling_norm());
    for kind in Subsystem::ALL {
        let condition = condition_number(&model.subsystem(kind).a);
        assert!(condition > 1.0 && condition < 1e6, "{kind} condition {condition:e}");
    }
}

#[test]
fn test_condition_limit_is_enforced() {
    let aircraft = cessna();
    let atmosphere = standard_atmosphere();
    let trim = trim_at(&aircraft, &atmosphere, cruise_target());
    let strict = Linearizer::new(LinearizerConfig {
        max_condition_number: 10.0,
        ..Default::default()
    });

    let err = strict.linearize(&aircraft, &atmosphere, &trim).unwrap_err();
    assert_eq!(err.kind(), "linearization");
}

#[test]
fn test_step_size_insensitive() {
    let aircraft = cessna();
    let atmosphere = standard_atmosphere();
    let trim = trim_at(&aircraft, &atmosphere, cruise_target());

    let coarse = Linearizer::new(LinearizerConfig {
        relative_step: 1e-4,
        ..Default::default()
    })
    .linearize(&aircraft, &atmosphere, &trim)
    .unwrap();
    let fine = Linearizer::default()
        .linearize(&aircraft, &atmosphere, &trim)
        .unwrap();

    let difference = (coarse.longitudinal().a - fine.longitudinal().a).norm();
    assert!(difference < 1e-3 * fine.longitudinal().a.norm());
}
