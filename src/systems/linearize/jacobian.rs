use crate::components::aircraft::{
    AircraftControls, AircraftState, ControlIndex, ControlVector, StateIndex, StateVector,
};
use crate::components::linear::{InputMatrix, LinearizerConfig, SystemMatrix};
use crate::systems::aerodynamics::AerodynamicModel;
use crate::systems::physics::EquationsOfMotion;
use crate::utils::{FlightDynamicsError, Result};

/// Natural size of each state variable for step scaling.
pub fn state_scale(config: &LinearizerConfig, index: StateIndex, airspeed: f64) -> f64 {
    match index {
        StateIndex::U | StateIndex::V | StateIndex::W => airspeed.max(config.min_velocity_scale),
        StateIndex::P | StateIndex::Q | StateIndex::R => config.rate_scale,
        StateIndex::Phi | StateIndex::Theta | StateIndex::Psi => config.angle_scale,
        StateIndex::X | StateIndex::Y | StateIndex::Z => config.position_scale,
    }
}

/// Central-difference step for every state and control.
pub fn perturbation_steps(
    config: &LinearizerConfig,
    state: &AircraftState,
    controls: &AircraftControls,
) -> (StateVector, ControlVector) {
    let airspeed = state.airspeed();
    let state_steps = StateVector::from_fn(|i, _| {
        let index = StateIndex::ALL[i];
        config.relative_step * state.get(index).abs().max(state_scale(config, index, airspeed))
    });
    let control_steps = ControlVector::from_fn(|i, _| {
        config.relative_step * controls.as_vector()[i].abs().max(config.control_scale)
    });
    (state_steps, control_steps)
}

fn evaluate<A: AerodynamicModel>(
    eom: &EquationsOfMotion<'_, A>,
    state: &AircraftState,
    controls: &AircraftControls,
    perturbed: &str,
) -> Result<StateVector> {
    eom.derivative(state, controls).map_err(|err| {
        FlightDynamicsError::Linearization(format!("perturbing {perturbed}: {err}"))
    })
}

/// Points either side of `value` used to difference `index`. An altitude step
/// that would leave the atmosphere's envelope falls back to a one-sided
/// difference so the clamp does not flatten the slope.
fn state_stencil<A: AerodynamicModel>(
    eom: &EquationsOfMotion<'_, A>,
    index: StateIndex,
    value: f64,
    h: f64,
) -> (f64, f64) {
    if index != StateIndex::Z {
        return (value + h, value - h);
    }
    let (floor, ceiling) = eom.atmosphere().envelope();
    // z points down, so z + h is the lower altitude.
    let altitude = -value;
    let below_floor = altitude - h < floor;
    let above_ceiling = altitude + h > ceiling;
    match (below_floor, above_ceiling) {
        (true, false) => (value, value - h),
        (false, true) => (value + h, value),
        _ => (value + h, value - h),
    }
}

/// `∂f/∂x` and `∂f/∂u` by central differences about `(state, controls)`,
/// one-sided in altitude at the edges of the atmosphere.
pub fn central_difference_jacobians<A: AerodynamicModel>(
    eom: &EquationsOfMotion<'_, A>,
    state: &AircraftState,
    controls: &AircraftControls,
    config: &LinearizerConfig,
) -> Result<(SystemMatrix, InputMatrix)> {
    let (state_steps, control_steps) = perturbation_steps(config, state, controls);
    let mut a = SystemMatrix::zeros();
    let mut b = InputMatrix::zeros();

    for index in StateIndex::ALL {
        let j = index.index();
        let h = state_steps[j];
        let value = state.get(index);
        let (upper, lower) = state_stencil(eom, index, value, h);
        let plus = evaluate(eom, &state.with(index, upper), controls, index.name())?;
        let minus = evaluate(eom, &state.with(index, lower), controls, index.name())?;
        a.set_column(j, &((plus - minus) / (upper - lower)));
    }

    for index in ControlIndex::ALL {
        let j = index.index();
        let h = control_steps[j];
        let value = controls.get(index);
        let plus = evaluate(eom, state, &controls.with(index, value + h), index.name())?;
        let minus = evaluate(eom, state, &controls.with(index, value - h), index.name())?;
        b.set_column(j, &((plus - minus) / (2.0 * h)));
    }

    if a.iter().chain(b.iter()).all(|v| v.is_finite()) {
        Ok((a, b))
    } else {
        Err(FlightDynamicsError::Linearization(
            "non-finite entry in the Jacobian".to_string(),
        ))
    }
}
