mod problem;
mod solver;

pub use problem::{rate_of_climb_theta, TrimMode, TrimProblem};
pub use solver::TrimSolver;
