pub mod aerodynamics;
pub mod linearize;
pub mod modes;
pub mod physics;
pub mod propulsion;
pub mod sweep;
pub mod trim;

pub use aerodynamics::{AeroCoefficients, AeroInput, AerodynamicModel};
pub use linearize::Linearizer;
pub use modes::ModeAnalyzer;
pub use physics::{EquationsOfMotion, Integrator, Trajectory};
pub use sweep::{root_locus_sweep, SweepAnalysis, SweepPoint};
pub use trim::TrimSolver;
