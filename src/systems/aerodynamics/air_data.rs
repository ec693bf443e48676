use nalgebra::Vector3;

use crate::components::aircraft::{AirData, AircraftState};
use crate::resources::AtmosphereProperties;

/// Airspeed, flow angles, dynamic pressure and Mach number in still air.
///
/// α and β use the true airspeed floored at `min_airspeed` so a state at rest
/// yields zero angles rather than NaN. The floor is inactive at any airspeed
/// the trim solver or integrator operates at.
pub fn calculate_air_data(
    state: &AircraftState,
    atmosphere: &AtmosphereProperties,
    min_airspeed: f64,
) -> AirData {
    let velocity: Vector3<f64> = state.velocity();
    let true_airspeed = velocity.norm();
    let effective_airspeed = true_airspeed.max(min_airspeed);

    let alpha = velocity.z.atan2(velocity.x);
    let beta = (velocity.y / effective_airspeed).clamp(-1.0, 1.0).asin();
    let dynamic_pressure = 0.5 * atmosphere.density * true_airspeed * true_airspeed;

    AirData {
        true_airspeed,
        alpha,
        beta,
        dynamic_pressure,
        density: atmosphere.density,
        mach: true_airspeed / atmosphere.speed_of_sound,
    }
}
