mod service;
mod structures;

pub use service::FlightDynamicsService;
pub use structures::{
    resolve_aircraft, AircraftOverrides, AnalysisRequest, AnalysisResponse, ErrorResponse,
    HealthResponse, ModeData, TrimRequest, TrimResponse,
};
