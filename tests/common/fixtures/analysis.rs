use phugoid::components::{AircraftConfig, ModalAnalysis, StateSpaceModel, TrimState, TrimTarget};
use phugoid::resources::Atmosphere;
use phugoid::systems::{AerodynamicModel, Linearizer, ModeAnalyzer, TrimSolver};

use super::aircraft::{CRUISE_ALTITUDE, CRUISE_AIRSPEED};

pub fn cruise_target() -> TrimTarget {
    TrimTarget::new(CRUISE_AIRSPEED, CRUISE_ALTITUDE)
}

#[track_caller]
pub fn trim_at<A: AerodynamicModel>(
    aircraft: &AircraftConfig<A>,
    atmosphere: &Atmosphere,
    target: TrimTarget,
) -> TrimState {
    match TrimSolver::default().find_trim(aircraft, atmosphere, &target) {
        Ok(trim) => trim,
        Err(err) => panic!("trim failed for {target:?}: {err}"),
    }
}

/// Trim, linear model and modes at one condition.
#[track_caller]
pub fn full_analysis<A: AerodynamicModel>(
    aircraft: &AircraftConfig<A>,
    atmosphere: &Atmosphere,
    target: TrimTarget,
) -> (TrimState, StateSpaceModel, ModalAnalysis) {
    let trim = trim_at(aircraft, atmosphere, target);
    let model = Linearizer::default()
        .linearize(aircraft, atmosphere, &trim)
        .expect("linearization succeeds");
    let modes = ModeAnalyzer::default()
        .analyze(&model)
        .expect("mode analysis succeeds");
    (trim, model, modes)
}
