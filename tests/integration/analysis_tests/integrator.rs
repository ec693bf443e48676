use approx::assert_relative_eq;
use phugoid::components::{
    AircraftControls, AircraftState, ControlIndex, ControlPulse, FnSchedule, IntegratorConfig,
    StateIndex,
};
use phugoid::systems::Integrator;
use phugoid::utils::deg_to_rad;

use crate::common::{
    assert_finite_state, cessna, cruise_target, standard_atmosphere, trim_at, CRUISE_ALTITUDE,
};

#[test]
fn test_elevator_pulse_pull_up() {
    let aircraft = cessna();
    let atmosphere = standard_atmosphere();
    let trim = trim_at(&aircraft, &atmosphere, cruise_target());
    let pulse = ControlPulse::new(
        *trim.controls(),
        ControlIndex::Elevator,
        deg_to_rad(-2.0),
        5.0,
        7.0,
    )
    .unwrap();

    let integrator = Integrator::new(IntegratorConfig::default().with_output_interval(0.1));
    let samples = integrator
        .integrate(&aircraft, &atmosphere, *trim.state(), pulse, 30.0)
        .unwrap()
        .collect_samples()
        .unwrap();

    assert_eq!(samples.len(), 301);
    samples.iter().for_each(|s| assert_finite_state(&s.state));

    // Undisturbed until the pulse starts.
    let before = samples.iter().find(|s| s.time >= 4.9).unwrap();
    assert_relative_eq!(before.state.q(), 0.0, epsilon = 1e-4);
    assert_relative_eq!(before.state.altitude(), CRUISE_ALTITUDE, epsilon = 0.05);

    let during = samples.iter().filter(|s| s.time > 5.0 && s.time < 7.0);
    let peak_q = during.map(|s| s.state.q()).fold(f64::NEG_INFINITY, f64::max);
    assert!(peak_q > 0.02, "peak pitch rate {peak_q}");

    // Only the slow phugoid is left once the short period has died out.
    let last = samples.last().unwrap();
    assert_eq!(last.controls, *trim.controls());
    assert!(last.state.q().abs() < peak_q);
    let peak_altitude = samples
        .iter()
        .map(|s| s.state.altitude())
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(peak_altitude > CRUISE_ALTITUDE + 5.0);
}

#[test]
fn test_state_feedback_schedule() {
    let aircraft = cessna();
    let atmosphere = standard_atmosphere();
    let trim = trim_at(&aircraft, &atmosphere, cruise_target());
    let base = *trim.controls();
    let theta_trim = trim.theta();

    // Pitch attitude hold on the elevator.
    let schedule = FnSchedule::new(move |_, state: &AircraftState| {
        base.with(
            ControlIndex::Elevator,
            base.elevator() + 0.5 * (state.theta() - theta_trim) + 0.1 * state.q(),
        )
    });
    let disturbed = trim.state().with(StateIndex::Q, 0.05);

    let trajectory = Integrator::default()
        .integrate(&aircraft, &atmosphere, disturbed, schedule, 20.0)
        .unwrap();
    let last = trajectory.iter().last().unwrap().unwrap();

    assert_relative_eq!(last.time, 20.0);
    assert!((last.state.theta() - theta_trim).abs() < deg_to_rad(1.0));
}

#[test]
fn test_non_finite_initial_state_rejected() {
    let aircraft = cessna();
    let atmosphere = standard_atmosphere();
    let state = AircraftState::default().with(StateIndex::U, f64::NAN);

    let err = Integrator::default()
        .integrate(&aircraft, &atmosphere, state, AircraftControls::default(), 1.0)
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_parameter");
}
