mod powerplant;

pub use powerplant::{calculate_engine_outputs, calculate_engine_thrust, calculate_propulsion};
