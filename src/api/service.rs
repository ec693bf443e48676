use tracing::info;

use super::structures::{
    resolve_aircraft, AnalysisRequest, AnalysisResponse, ErrorResponse, HealthResponse, ModeData,
    TrimRequest, TrimResponse,
};
use crate::components::modes::Eigenmode;
use crate::components::trim::TrimTarget;
use crate::resources::Atmosphere;
use crate::systems::{Linearizer, ModeAnalyzer, TrimSolver};
use crate::utils::{rad_to_deg, Result};

/// Request handlers over one shared atmosphere and solver set.
///
/// Stateless apart from the atmosphere memo, so one service can serve
/// requests from many threads.
#[derive(Debug, Default)]
pub struct FlightDynamicsService {
    pub atmosphere: Atmosphere,
    pub solver: TrimSolver,
    pub linearizer: Linearizer,
    pub analyzer: ModeAnalyzer,
}

impl FlightDynamicsService {
    pub fn new(
        atmosphere: Atmosphere,
        solver: TrimSolver,
        linearizer: Linearizer,
        analyzer: ModeAnalyzer,
    ) -> Self {
        Self {
            atmosphere,
            solver,
            linearizer,
            analyzer,
        }
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "ok".to_string(),
        }
    }

    pub fn trim(&self, request: &TrimRequest) -> Result<TrimResponse, ErrorResponse> {
        self.try_trim(request).map_err(ErrorResponse::from)
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, ErrorResponse> {
        self.try_analyze(request).map_err(ErrorResponse::from)
    }

    fn try_trim(&self, request: &TrimRequest) -> Result<TrimResponse> {
        let aircraft = resolve_aircraft(request.aircraft.as_ref())?;
        let target = TrimTarget::new(request.velocity, request.altitude)
            .with_flight_path_angle(request.flight_path_angle);
        let trim = self.solver.find_trim(&aircraft, &self.atmosphere, &target)?;

        let longitudinal = trim.longitudinal();
        Ok(TrimResponse {
            alpha_deg: rad_to_deg(longitudinal.alpha),
            elevator_deg: rad_to_deg(longitudinal.elevator),
            throttle: longitudinal.throttle,
            theta_deg: rad_to_deg(longitudinal.theta),
            u: trim.state().u(),
            w: trim.state().w(),
        })
    }

    fn try_analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        let aircraft = resolve_aircraft(request.aircraft.as_ref())?;
        let target = TrimTarget::new(request.velocity, request.altitude);
        let trim = self.solver.find_trim(&aircraft, &self.atmosphere, &target)?;
        let model = self.linearizer.linearize(&aircraft, &self.atmosphere, &trim)?;
        let modes = self.analyzer.analyze(&model)?;

        info!(
            velocity = request.velocity,
            altitude = request.altitude,
            stable = modes.is_stable(),
            "analysis complete"
        );
        Ok(AnalysisResponse {
            longitudinal: expand(&modes.longitudinal),
            lateral: expand(&modes.lateral),
        })
    }
}

fn expand(modes: &[Eigenmode]) -> Vec<ModeData> {
    modes.iter().flat_map(ModeData::from_mode).collect()
}
