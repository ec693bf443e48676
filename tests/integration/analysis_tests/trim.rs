use approx::assert_relative_eq;
use phugoid::components::TrimTarget;
use phugoid::systems::{EquationsOfMotion, TrimSolver};
use phugoid::resources::PhysicsConfig;
use phugoid::utils::{deg_to_rad, rad_to_deg, GRAVITY};

use crate::common::{
    assert_trimmed, cessna, cruise_target, standard_atmosphere, trim_at, twin_otter,
    CRUISE_ALTITUDE,
};

#[test]
fn test_cessna_level_cruise() {
    let atmosphere = standard_atmosphere();
    let trim = trim_at(&cessna(), &atmosphere, cruise_target());

    assert_trimmed(&trim, 1e-6);
    assert_relative_eq!(rad_to_deg(trim.alpha()), 2.45, epsilon = 0.1);
    assert_relative_eq!(rad_to_deg(trim.controls().elevator()), -2.62, epsilon = 0.15);
    assert_relative_eq!(trim.controls().throttle(), 0.527, epsilon = 0.02);

    // Level flight: pitch attitude equals angle of attack.
    assert_relative_eq!(trim.theta(), trim.alpha(), epsilon = 1e-9);
    assert_eq!(trim.state().phi(), 0.0);
    assert_eq!(trim.controls().aileron(), 0.0);
    assert_relative_eq!(trim.state().altitude(), CRUISE_ALTITUDE);
}

#[test]
fn test_twin_otter_level_cruise() {
    let atmosphere = standard_atmosphere();
    let trim = trim_at(&twin_otter(), &atmosphere, TrimTarget::new(70.0, 2000.0));

    assert_trimmed(&trim, 1e-6);
    assert_relative_eq!(rad_to_deg(trim.alpha()), 2.54, epsilon = 0.15);
    assert_relative_eq!(rad_to_deg(trim.controls().elevator()), 0.18, epsilon = 0.2);
    assert_relative_eq!(trim.controls().throttle(), 0.314, epsilon = 0.02);
}

#[test]
fn test_trim_is_an_equilibrium_of_the_equations_of_motion() {
    let aircraft = cessna();
    let atmosphere = standard_atmosphere();
    let physics = PhysicsConfig::default();
    let trim = trim_at(&aircraft, &atmosphere, cruise_target());

    let derivative = EquationsOfMotion::new(&aircraft, &atmosphere, &physics)
        .evaluate(trim.state(), trim.controls())
        .unwrap();
    for index in [0, 1, 2, 3, 4, 5] {
        assert!(derivative[index].abs() < 1e-6, "x_dot[{index}] = {}", derivative[index]);
    }
    // Straight and level: attitude and altitude hold.
    assert!(derivative[6].abs() < 1e-6);
    assert!(derivative[7].abs() < 1e-6);
    assert!(derivative[11].abs() < 1e-6);
}

#[test]
fn test_coordinated_turn_bank_angle() {
    let atmosphere = standard_atmosphere();
    let turn_rate = deg_to_rad(3.0);
    let target = cruise_target().with_turn_rate(turn_rate);
    let trim = trim_at(&cessna(), &atmosphere, target);

    assert_trimmed(&trim, 1e-6);
    let expected = (target.airspeed * turn_rate / GRAVITY).atan();
    assert_relative_eq!(trim.state().phi(), expected, epsilon = 0.01);
    assert_relative_eq!(rad_to_deg(trim.state().phi()), 15.36, epsilon = 0.3);
    assert!(trim.state().r() > 0.0);
}

#[test]
fn test_steady_sideslip_converges() {
    let atmosphere = standard_atmosphere();
    let beta = deg_to_rad(3.0);
    let trim = trim_at(&cessna(), &atmosphere, cruise_target().with_sideslip(beta));

    assert_trimmed(&trim, 1e-6);
    assert_relative_eq!(trim.lateral().beta, beta);
    // Holding sideslip takes opposite rudder and some bank.
    assert!(trim.controls().rudder() != 0.0);
    assert!(trim.state().phi().abs() > 0.0);
}

#[test]
fn test_below_stall_speed_is_infeasible() {
    let atmosphere = standard_atmosphere();
    let err = TrimSolver::default()
        .find_trim(&cessna(), &atmosphere, &TrimTarget::new(25.0, CRUISE_ALTITUDE))
        .unwrap_err();
    assert_eq!(err.kind(), "infeasible_trim");
}

#[test]
fn test_climb_beyond_available_thrust_is_infeasible() {
    let atmosphere = standard_atmosphere();
    let target = cruise_target().with_flight_path_angle(deg_to_rad(12.0));
    let err = TrimSolver::default()
        .find_trim(&cessna(), &atmosphere, &target)
        .unwrap_err();
    assert_eq!(err.kind(), "infeasible_trim");
}

#[test]
fn test_gentle_climb_needs_more_throttle() {
    let atmosphere = standard_atmosphere();
    let level = trim_at(&cessna(), &atmosphere, cruise_target());
    let climb = trim_at(
        &cessna(),
        &atmosphere,
        cruise_target().with_flight_path_angle(deg_to_rad(2.0)),
    );
    assert_trimmed(&climb, 1e-6);
    assert!(climb.controls().throttle() > level.controls().throttle());
    assert_relative_eq!(
        climb.theta() - climb.alpha(),
        deg_to_rad(2.0),
        epsilon = 1e-6
    );
}

#[test]
fn test_converges_across_the_envelope() {
    let atmosphere = standard_atmosphere();
    let aircraft = cessna();
    let mut previous_alpha = f64::INFINITY;
    for airspeed in [40.0, 45.0, 50.0, 55.0, 60.0, 65.0, 70.0] {
        let trim = trim_at(&aircraft, &atmosphere, TrimTarget::new(airspeed, CRUISE_ALTITUDE));
        assert_trimmed(&trim, 1e-6);
        assert!(trim.iterations() < 50);
        // Faster flight needs less lift coefficient.
        assert!(trim.alpha() < previous_alpha, "alpha not decreasing at {airspeed} m/s");
        previous_alpha = trim.alpha();
    }
}

#[test]
fn test_invalid_target_rejected() {
    let atmosphere = standard_atmosphere();
    let err = TrimSolver::default()
        .find_trim(&cessna(), &atmosphere, &TrimTarget::new(-5.0, 0.0))
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_parameter");
}
