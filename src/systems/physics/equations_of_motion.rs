use nalgebra::Vector3;

use crate::components::aircraft::{
    AirData, AircraftAeroCoefficients, AircraftConfig, AircraftControls, AircraftState,
    StateVector,
};
use crate::resources::{Atmosphere, AtmosphereProperties, PhysicsConfig};
use crate::systems::aerodynamics::{
    calculate_aerodynamic_forces_moments, calculate_air_data, AerodynamicModel,
};
use crate::systems::propulsion::calculate_propulsion;
use crate::utils::{body_to_ned, euler_rates, FlightDynamicsError, Result};

/// Net body-frame loads acting on the aircraft, gravity included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyLoads {
    pub air_data: AirData,
    /// Total force about the CG (N).
    pub force: Vector3<f64>,
    /// Total moment about the CG (N·m).
    pub moment: Vector3<f64>,
}

/// Sums aerodynamic, propulsive and gravitational loads in body axes.
pub fn calculate_body_loads<A: AerodynamicModel>(
    aircraft: &AircraftConfig<A>,
    atmosphere: &AtmosphereProperties,
    physics: &PhysicsConfig,
    state: &AircraftState,
    controls: &AircraftControls,
) -> BodyLoads {
    let air_data = calculate_air_data(state, atmosphere, physics.min_airspeed);
    let angular_velocity = state.angular_velocity();

    let (aero_force, aero_moment) = calculate_aerodynamic_forces_moments(
        &aircraft.geometry,
        &aircraft.aero_coef,
        &air_data,
        &angular_velocity,
        controls,
        physics.min_airspeed,
    );
    let (thrust_force, thrust_moment) =
        calculate_propulsion(&aircraft.propulsion, controls.throttle(), atmosphere.density);

    let dcm = body_to_ned(state.phi(), state.theta(), state.psi());
    let gravity_body = dcm.transpose() * physics.gravity * aircraft.mass.mass;

    BodyLoads {
        air_data,
        force: aero_force + thrust_force + gravity_body,
        moment: aero_moment + thrust_moment,
    }
}

/// Time derivative of the full 12-element state.
///
/// Rigid-body Newton-Euler equations in body axes with the full inertia
/// tensor, Euler-angle kinematics and NED position rates. The Euler kinematics
/// are singular at θ = ±90°; there the result is non-finite.
pub fn calculate_state_derivative<A: AerodynamicModel>(
    aircraft: &AircraftConfig<A>,
    atmosphere: &AtmosphereProperties,
    physics: &PhysicsConfig,
    state: &AircraftState,
    controls: &AircraftControls,
) -> StateVector {
    let loads = calculate_body_loads(aircraft, atmosphere, physics, state, controls);
    let mass = &aircraft.mass;

    let velocity = state.velocity();
    let omega = state.angular_velocity();

    let acceleration = loads.force / mass.mass - omega.cross(&velocity);
    let gyro_term = omega.cross(&(mass.inertia() * omega));
    let angular_acceleration = mass.inertia_inv() * (loads.moment - gyro_term);

    let attitude_rates = euler_rates(state.phi(), state.theta(), &omega);
    let position_rates = body_to_ned(state.phi(), state.theta(), state.psi()) * velocity;

    AircraftState::from_parts(acceleration, angular_acceleration, attitude_rates, position_rates)
        .into_vector()
}

/// The nonlinear dynamics of one aircraft in one atmosphere.
///
/// Borrowing both inputs keeps every evaluation a pure function of the state
/// and controls; the only shared mutable thing underneath is the atmosphere
/// memo.
pub struct EquationsOfMotion<'a, A = AircraftAeroCoefficients> {
    aircraft: &'a AircraftConfig<A>,
    atmosphere: &'a Atmosphere,
    physics: PhysicsConfig,
}

impl<A> Clone for EquationsOfMotion<'_, A> {
    fn clone(&self) -> Self {
        Self {
            aircraft: self.aircraft,
            atmosphere: self.atmosphere,
            physics: self.physics.clone(),
        }
    }
}

impl<'a, A: AerodynamicModel> EquationsOfMotion<'a, A> {
    pub fn new(
        aircraft: &'a AircraftConfig<A>,
        atmosphere: &'a Atmosphere,
        physics: &PhysicsConfig,
    ) -> Self {
        Self {
            aircraft,
            atmosphere,
            physics: physics.clone(),
        }
    }

    pub fn aircraft(&self) -> &'a AircraftConfig<A> {
        self.aircraft
    }

    pub fn atmosphere(&self) -> &'a Atmosphere {
        self.atmosphere
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Air properties at the altitude of `state`.
    pub fn air_properties(&self, state: &AircraftState) -> Result<AtmosphereProperties> {
        self.atmosphere.properties(state.altitude())
    }

    pub fn loads(&self, state: &AircraftState, controls: &AircraftControls) -> Result<BodyLoads> {
        Ok(calculate_body_loads(
            self.aircraft,
            &self.air_properties(state)?,
            &self.physics,
            state,
            controls,
        ))
    }

    /// Raw state derivative. Fails only when the altitude is not finite;
    /// other degenerate inputs may still produce NaN entries.
    pub fn evaluate(
        &self,
        state: &AircraftState,
        controls: &AircraftControls,
    ) -> Result<StateVector> {
        Ok(calculate_state_derivative(
            self.aircraft,
            &self.air_properties(state)?,
            &self.physics,
            state,
            controls,
        ))
    }

    /// State derivative, rejecting non-finite inputs or results.
    pub fn derivative(
        &self,
        state: &AircraftState,
        controls: &AircraftControls,
    ) -> Result<StateVector> {
        if !state.is_finite() || !controls.is_finite() {
            return Err(FlightDynamicsError::invalid(
                "state and controls must be finite",
            ));
        }
        let derivative = self.evaluate(state, controls)?;
        if derivative.iter().all(|v| v.is_finite()) {
            Ok(derivative)
        } else {
            Err(FlightDynamicsError::invalid(format!(
                "non-finite state derivative at theta = {:.4} rad, airspeed = {:.3} m/s",
                state.theta(),
                state.airspeed()
            )))
        }
    }
}
