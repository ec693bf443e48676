use rayon::prelude::*;
use tracing::{debug, warn};

use crate::components::aircraft::AircraftConfig;
use crate::components::modes::ModalAnalysis;
use crate::components::trim::{TrimState, TrimTarget};
use crate::resources::Atmosphere;
use crate::systems::aerodynamics::AerodynamicModel;
use crate::systems::linearize::Linearizer;
use crate::systems::modes::ModeAnalyzer;
use crate::systems::trim::TrimSolver;
use crate::utils::Result;

/// Trim and modes at one point of a sweep.
#[derive(Debug, Clone)]
pub struct SweepAnalysis {
    pub trim: TrimState,
    pub modes: ModalAnalysis,
}

#[derive(Debug)]
pub struct SweepPoint {
    pub airspeed: f64,
    pub result: Result<SweepAnalysis>,
}

impl SweepPoint {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Trim, linearize and analyze at each airspeed in parallel.
///
/// Points are independent: a failure at one airspeed is recorded in its
/// [`SweepPoint`] and does not stop the others. Output order matches
/// `airspeeds`.
pub fn root_locus_sweep<A: AerodynamicModel>(
    aircraft: &AircraftConfig<A>,
    atmosphere: &Atmosphere,
    altitude: f64,
    airspeeds: &[f64],
    solver: &TrimSolver,
    linearizer: &Linearizer,
    analyzer: &ModeAnalyzer,
) -> Vec<SweepPoint> {
    airspeeds
        .par_iter()
        .map(|&airspeed| {
            let result = analyze_point(
                aircraft, atmosphere, altitude, airspeed, solver, linearizer, analyzer,
            );
            match &result {
                Ok(point) => debug!(
                    airspeed,
                    alpha = point.trim.alpha(),
                    stable = point.modes.is_stable(),
                    "sweep point"
                ),
                Err(err) => warn!(airspeed, error = %err, "sweep point failed"),
            }
            SweepPoint { airspeed, result }
        })
        .collect()
}

fn analyze_point<A: AerodynamicModel>(
    aircraft: &AircraftConfig<A>,
    atmosphere: &Atmosphere,
    altitude: f64,
    airspeed: f64,
    solver: &TrimSolver,
    linearizer: &Linearizer,
    analyzer: &ModeAnalyzer,
) -> Result<SweepAnalysis> {
    let trim = solver.find_trim(aircraft, atmosphere, &TrimTarget::new(airspeed, altitude))?;
    let model = linearizer.linearize(aircraft, atmosphere, &trim)?;
    let modes = analyzer.analyze(&model)?;
    Ok(SweepAnalysis { trim, modes })
}
