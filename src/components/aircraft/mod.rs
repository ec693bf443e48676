mod air_data;
pub mod config;
mod state;

pub use air_data::AirData;
pub use config::{
    AircraftAeroCoefficients, AircraftConfig, AircraftGeometry, AircraftSource, AircraftType,
    ConfigError, DragCoefficients, LiftCoefficients, MassModel, MassProperties, PitchCoefficients,
    PowerplantConfig, PropulsionConfig, RawAircraftConfig, RollCoefficients,
    SideForceCoefficients, YawCoefficients,
};
pub use state::{
    AircraftControls, AircraftState, ControlIndex, ControlVector, StateIndex, StateVector,
    CONTROL_DIM, STATE_DIM,
};
