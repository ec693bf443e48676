mod air_data;
mod force_calculator;
mod model;

pub use air_data::calculate_air_data;
pub use force_calculator::{aero_input, calculate_aerodynamic_forces_moments};
pub use model::{AeroCoefficients, AeroInput, AerodynamicModel};
