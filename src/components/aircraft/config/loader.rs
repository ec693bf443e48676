use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::aircraft::config::{
    aero_coef::{
        AircraftAeroCoefficients, DragCoefficients, LiftCoefficients, PitchCoefficients,
        RollCoefficients, SideForceCoefficients, YawCoefficients,
    },
    PowerplantConfig, PropulsionConfig,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Invalid aircraft configuration: {0}")]
    ValidationError(String),
}

fn one() -> f64 {
    1.0
}

fn one_engine() -> usize {
    1
}

/// Flat aircraft description as written in YAML files.
///
/// Mass, inertia, geometry and thrust are required; any aerodynamic
/// coefficient left out is zero.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAircraftConfig {
    /// Aircraft identification
    pub name: String,

    /// Mass properties
    pub mass: f64,
    pub ixx: f64,
    pub iyy: f64,
    pub izz: f64,
    #[serde(default)]
    pub ixz: f64,

    /// Geometry
    pub wing_area: f64,
    pub wing_span: f64,
    pub mac: f64,

    /// Propulsion, split evenly across `engine_count` engines on the centreline
    pub max_thrust: f64,
    #[serde(default)]
    pub min_thrust: f64,
    #[serde(default = "one")]
    pub thrust_density_exponent: f64,
    #[serde(default = "one_engine")]
    pub engine_count: usize,
    #[serde(default)]
    pub thrust_offset_z: f64,

    /// Drag coefficients
    #[serde(default)]
    pub c_D_0: f64,
    #[serde(default)]
    pub c_D_alpha: f64,
    #[serde(default)]
    pub c_D_alpha2: f64,
    #[serde(default)]
    pub c_D_beta2: f64,
    #[serde(default)]
    pub c_D_deltae2: f64,

    /// Side-force coefficients
    #[serde(default)]
    pub c_Y_beta: f64,
    #[serde(default)]
    pub c_Y_p: f64,
    #[serde(default)]
    pub c_Y_r: f64,
    #[serde(default)]
    pub c_Y_deltaa: f64,
    #[serde(default)]
    pub c_Y_deltar: f64,

    /// Lift coefficients
    #[serde(default)]
    pub c_L_0: f64,
    #[serde(default)]
    pub c_L_alpha: f64,
    #[serde(default)]
    pub c_L_q: f64,
    #[serde(default)]
    pub c_L_deltae: f64,
    #[serde(default)]
    pub c_L_alpha2: f64,
    #[serde(default)]
    pub c_L_alpha3: f64,

    /// Roll coefficients
    #[serde(default)]
    pub c_l_beta: f64,
    #[serde(default)]
    pub c_l_p: f64,
    #[serde(default)]
    pub c_l_r: f64,
    #[serde(default)]
    pub c_l_deltaa: f64,
    #[serde(default)]
    pub c_l_deltar: f64,

    /// Pitch coefficients
    #[serde(default)]
    pub c_m_0: f64,
    #[serde(default)]
    pub c_m_alpha: f64,
    #[serde(default)]
    pub c_m_q: f64,
    #[serde(default)]
    pub c_m_deltae: f64,

    /// Yaw coefficients
    #[serde(default)]
    pub c_n_beta: f64,
    #[serde(default)]
    pub c_n_p: f64,
    #[serde(default)]
    pub c_n_r: f64,
    #[serde(default)]
    pub c_n_deltaa: f64,
    #[serde(default)]
    pub c_n_deltar: f64,
}

impl RawAircraftConfig {
    pub fn propulsion(&self) -> PropulsionConfig {
        let count = self.engine_count.max(1);
        let share = count as f64;
        let engines = (0..count)
            .map(|i| PowerplantConfig {
                name: format!("{} engine {}", self.name, i + 1),
                max_thrust: self.max_thrust / share,
                min_thrust: self.min_thrust / share,
                position: Vector3::new(0.0, 0.0, self.thrust_offset_z),
                orientation: Vector3::new(1.0, 0.0, 0.0),
                density_exponent: self.thrust_density_exponent,
            })
            .collect();
        PropulsionConfig { engines }
    }
}

impl AircraftAeroCoefficients {
    pub fn from_raw(raw: &RawAircraftConfig) -> Self {
        AircraftAeroCoefficients {
            drag: DragCoefficients {
                c_d_0: raw.c_D_0,
                c_d_alpha: raw.c_D_alpha,
                c_d_alpha2: raw.c_D_alpha2,
                c_d_beta2: raw.c_D_beta2,
                c_d_deltae2: raw.c_D_deltae2,
            },
            lift: LiftCoefficients {
                c_l_0: raw.c_L_0,
                c_l_alpha: raw.c_L_alpha,
                c_l_q: raw.c_L_q,
                c_l_deltae: raw.c_L_deltae,
                c_l_alpha2: raw.c_L_alpha2,
                c_l_alpha3: raw.c_L_alpha3,
            },
            side_force: SideForceCoefficients {
                c_y_beta: raw.c_Y_beta,
                c_y_p: raw.c_Y_p,
                c_y_r: raw.c_Y_r,
                c_y_deltaa: raw.c_Y_deltaa,
                c_y_deltar: raw.c_Y_deltar,
            },
            roll: RollCoefficients {
                c_l_beta: raw.c_l_beta,
                c_l_p: raw.c_l_p,
                c_l_r: raw.c_l_r,
                c_l_deltaa: raw.c_l_deltaa,
                c_l_deltar: raw.c_l_deltar,
            },
            pitch: PitchCoefficients {
                c_m_0: raw.c_m_0,
                c_m_alpha: raw.c_m_alpha,
                c_m_q: raw.c_m_q,
                c_m_deltae: raw.c_m_deltae,
            },
            yaw: YawCoefficients {
                c_n_beta: raw.c_n_beta,
                c_n_p: raw.c_n_p,
                c_n_r: raw.c_n_r,
                c_n_deltaa: raw.c_n_deltaa,
                c_n_deltar: raw.c_n_deltar,
            },
        }
    }
}
