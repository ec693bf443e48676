//! Aircraft flight dynamics analysis.
//!
//! Given an aircraft description and a flight condition, `phugoid` finds the
//! trim state, linearizes the six degree of freedom equations of motion about
//! it, splits the linear model into its natural modes and integrates the
//! nonlinear equations forward in time.
//!
//! ```no_run
//! use phugoid::prelude::*;
//!
//! # fn main() -> phugoid::utils::Result<()> {
//! let aircraft = AircraftConfig::cessna_172();
//! let atmosphere = Atmosphere::standard();
//!
//! let trim = TrimSolver::default().find_trim(
//!     &aircraft,
//!     &atmosphere,
//!     &TrimTarget::new(51.44, 1524.0),
//! )?;
//! let model = Linearizer::default().linearize(&aircraft, &atmosphere, &trim)?;
//! let modes = ModeAnalyzer::default().analyze(&model)?;
//!
//! for mode in modes.iter() {
//!     println!("{}: wn = {:.3}, zeta = {:.3}", mode.kind, mode.natural_frequency, mode.damping_ratio);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod components;
pub mod resources;
pub mod systems;
pub mod utils;

pub mod prelude {
    pub use crate::api::{
        AircraftOverrides, AnalysisRequest, AnalysisResponse, ErrorResponse,
        FlightDynamicsService, ModeData, TrimRequest, TrimResponse,
    };
    pub use crate::components::{
        AircraftConfig, AircraftControls, AircraftState, ControlIndex, ControlPulse,
        ControlSchedule, Eigenmode, FnSchedule, IntegratorConfig, LinearSubsystem,
        LinearizerConfig, ModalAnalysis, ModeClassifierConfig, ModeKind, ModeResponse,
        StateIndex, StateSpaceModel, Subsystem, TrajectorySample, TrimCondition,
        TrimSolverConfig, TrimState, TrimTarget,
    };
    pub use crate::resources::{Atmosphere, AtmosphereConfig, AtmosphereType, PhysicsConfig};
    pub use crate::systems::{
        root_locus_sweep, AerodynamicModel, EquationsOfMotion, Integrator, Linearizer,
        ModeAnalyzer, SweepPoint, TrimSolver,
    };
    pub use crate::utils::{deg_to_rad, rad_to_deg, FlightDynamicsError};
}
