use phugoid::components::AircraftConfig;
use phugoid::resources::Atmosphere;
use std::path::PathBuf;

/// Reference cruise: 100 kt at 5000 ft.
pub const CRUISE_AIRSPEED: f64 = 51.44;
pub const CRUISE_ALTITUDE: f64 = 1524.0;

pub fn cessna() -> AircraftConfig {
    AircraftConfig::cessna_172()
}

pub fn twin_otter() -> AircraftConfig {
    AircraftConfig::twin_otter()
}

/// Cessna with the pitch stiffness sign flipped.
pub fn statically_unstable_cessna() -> AircraftConfig {
    let mut aircraft = cessna();
    aircraft.aero_coef.pitch.c_m_alpha = 0.3;
    aircraft
}

/// Cessna without weathercock stability.
pub fn directionally_unstable_cessna() -> AircraftConfig {
    let mut aircraft = cessna();
    aircraft.aero_coef.yaw.c_n_beta = -0.05;
    aircraft
}

pub fn standard_atmosphere() -> Atmosphere {
    Atmosphere::standard()
}

pub fn asset_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join(relative)
}
