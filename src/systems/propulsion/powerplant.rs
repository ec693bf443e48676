use nalgebra::Vector3;

use crate::components::aircraft::{PowerplantConfig, PropulsionConfig};
use crate::utils::ISA_SEA_LEVEL_DENSITY;

/// Thrust magnitude (N) of one engine.
///
/// The throttle interpolates between idle and full thrust and the result
/// lapses with density as `(ρ/ρ₀)^n`. The throttle is not clamped here so the
/// thrust stays smooth while the trim solver explores settings outside
/// `[0, 1]`; the solver checks the final setting against its bounds.
pub fn calculate_engine_thrust(config: &PowerplantConfig, throttle: f64, density: f64) -> f64 {
    let density_ratio = (density / ISA_SEA_LEVEL_DENSITY).max(0.0);
    let lapse = density_ratio.powf(config.density_exponent);
    (config.min_thrust + throttle * (config.max_thrust - config.min_thrust)) * lapse
}

/// Force and moment (N, N·m) of one engine about the centre of gravity.
pub fn calculate_engine_outputs(
    config: &PowerplantConfig,
    throttle: f64,
    density: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let thrust = calculate_engine_thrust(config, throttle, density);
    let force = config.orientation.normalize() * thrust;
    let moment = config.position.cross(&force);
    (force, moment)
}

/// Combined force and moment of every engine, all driven by one throttle.
pub fn calculate_propulsion(
    propulsion: &PropulsionConfig,
    throttle: f64,
    density: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    propulsion.engines.iter().fold(
        (Vector3::zeros(), Vector3::zeros()),
        |(forces, moments), engine| {
            let (force, moment) = calculate_engine_outputs(engine, throttle, density);
            (forces + force, moments + moment)
        },
    )
}
