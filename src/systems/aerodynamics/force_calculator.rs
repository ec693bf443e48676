use nalgebra::Vector3;

use super::model::{AeroCoefficients, AeroInput, AerodynamicModel};
use crate::components::aircraft::{
    AirData, AircraftAeroCoefficients, AircraftControls, AircraftGeometry,
};
use crate::utils::{ensure_finite, ensure_non_negative, Result};

impl AerodynamicModel for AircraftAeroCoefficients {
    fn coefficients(&self, input: &AeroInput) -> AeroCoefficients {
        let AeroInput {
            alpha,
            beta,
            p_hat,
            q_hat,
            r_hat,
            controls,
            ..
        } = *input;
        let elevator = controls.elevator();
        let aileron = controls.aileron();
        let rudder = controls.rudder();

        let c_d = self.drag.c_d_0
            + (self.drag.c_d_alpha * alpha)
            + (self.drag.c_d_alpha2 * alpha.powi(2))
            + (self.drag.c_d_beta2 * beta.powi(2))
            + (self.drag.c_d_deltae2 * elevator.powi(2));

        let c_y = self.side_force.c_y_beta * beta
            + (self.side_force.c_y_p * p_hat)
            + (self.side_force.c_y_r * r_hat)
            + (self.side_force.c_y_deltaa * aileron)
            + (self.side_force.c_y_deltar * rudder);

        let c_l = self.lift.c_l_0
            + (self.lift.c_l_alpha * alpha)
            + (self.lift.c_l_q * q_hat)
            + (self.lift.c_l_deltae * elevator)
            + (self.lift.c_l_alpha2 * alpha.powi(2))
            + (self.lift.c_l_alpha3 * alpha.powi(3));

        let c_roll = self.roll.c_l_beta * beta
            + (self.roll.c_l_p * p_hat)
            + (self.roll.c_l_r * r_hat)
            + (self.roll.c_l_deltaa * aileron)
            + (self.roll.c_l_deltar * rudder);

        let c_m = self.pitch.c_m_0
            + (self.pitch.c_m_alpha * alpha)
            + (self.pitch.c_m_q * q_hat)
            + (self.pitch.c_m_deltae * elevator);

        let c_n = self.yaw.c_n_beta * beta
            + (self.yaw.c_n_p * p_hat)
            + (self.yaw.c_n_r * r_hat)
            + (self.yaw.c_n_deltaa * aileron)
            + (self.yaw.c_n_deltar * rudder);

        AeroCoefficients {
            c_d,
            c_y,
            c_l,
            c_roll,
            c_m,
            c_n,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in self.named_values() {
            ensure_finite(name, value)?;
        }
        ensure_non_negative("c_d_0", self.drag.c_d_0)
    }
}

/// Builds the model input from air data, body rates and controls.
///
/// Rates are normalised with the airspeed floored at `min_airspeed`.
pub fn aero_input(
    geometry: &AircraftGeometry,
    air_data: &AirData,
    angular_velocity_body: &Vector3<f64>,
    controls: &AircraftControls,
    min_airspeed: f64,
) -> AeroInput {
    let v_denom = 2.0 * air_data.true_airspeed.max(min_airspeed);
    AeroInput {
        alpha: air_data.alpha,
        beta: air_data.beta,
        p_hat: angular_velocity_body.x * geometry.wing_span / v_denom,
        q_hat: angular_velocity_body.y * geometry.mac / v_denom,
        r_hat: angular_velocity_body.z * geometry.wing_span / v_denom,
        controls: *controls,
        dynamic_pressure: air_data.dynamic_pressure,
        mach: air_data.mach,
    }
}

/// Aerodynamic forces and moments in the body frame.
///
/// Lift and drag act in the wind frame and are rotated into body axes through
/// α. Side force is taken directly along body y.
///
/// # Returns
/// A tuple containing: `(body_forces, body_moments)`
pub fn calculate_aerodynamic_forces_moments<A: AerodynamicModel + ?Sized>(
    geometry: &AircraftGeometry,
    model: &A,
    air_data: &AirData,
    angular_velocity_body: &Vector3<f64>,
    controls: &AircraftControls,
    min_airspeed: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let input = aero_input(
        geometry,
        air_data,
        angular_velocity_body,
        controls,
        min_airspeed,
    );
    let coefficients = model.coefficients(&input);

    let q_s = air_data.dynamic_pressure * geometry.wing_area;
    let (sin_alpha, cos_alpha) = air_data.alpha.sin_cos();

    let forces_body = Vector3::new(
        q_s * (-coefficients.c_d * cos_alpha + coefficients.c_l * sin_alpha),
        q_s * coefficients.c_y,
        q_s * (-coefficients.c_d * sin_alpha - coefficients.c_l * cos_alpha),
    );

    let moments_body = Vector3::new(
        q_s * geometry.wing_span * coefficients.c_roll,
        q_s * geometry.mac * coefficients.c_m,
        q_s * geometry.wing_span * coefficients.c_n,
    );

    (forces_body, moments_body)
}
