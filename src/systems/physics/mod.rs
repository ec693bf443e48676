mod equations_of_motion;
mod integrator;

pub use equations_of_motion::{
    calculate_body_loads, calculate_state_derivative, BodyLoads, EquationsOfMotion,
};
pub use integrator::{Integrator, Trajectory, TrajectoryIter};
