pub mod aircraft;
pub mod linear;
pub mod modes;
pub mod trajectory;
pub mod trim;

pub use aircraft::{
    AirData, AircraftConfig, AircraftControls, AircraftState, ControlIndex, StateIndex,
};
pub use linear::{LinearSubsystem, LinearizerConfig, StateSpaceModel, Subsystem};
pub use modes::{Eigenmode, ModalAnalysis, ModeClassifierConfig, ModeKind, ModeResponse};
pub use trajectory::{
    ControlPulse, ControlSchedule, FnSchedule, IntegratorConfig, TrajectorySample,
};
pub use trim::{TrimCondition, TrimSolverConfig, TrimState, TrimTarget};
