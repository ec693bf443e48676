mod jacobian;
mod linearizer;

pub use jacobian::{central_difference_jacobians, perturbation_steps, state_scale};
pub use linearizer::{condition_number, Linearizer};
