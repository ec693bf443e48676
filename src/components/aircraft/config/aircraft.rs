use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::components::aircraft::config::{
    AircraftAeroCoefficients, AircraftGeometry, ConfigError, MassModel, PropulsionConfig,
    RawAircraftConfig,
};
use crate::systems::AerodynamicModel;
use crate::utils::Result;

/// The full aircraft configuration: mass, geometry, aerodynamic model and
/// propulsion.
///
/// The aerodynamic model is any [`AerodynamicModel`]; the stability-derivative
/// table is the default. Dynamics code only ever talks to the trait, so two
/// aircraft differ by their parameters, never by a code path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftConfig<A = AircraftAeroCoefficients> {
    /// Name of the aircraft, defaults to type name.
    pub name: String,
    /// Type of aircraft represented as an enum e.g. Cessna172, TwinOtter, etc.
    pub ac_type: AircraftType,
    /// Mass model of the aircraft, including weight and inertia properties.
    pub mass: MassModel,
    /// Reference areas and lengths used to dimensionalise the coefficients.
    pub geometry: AircraftGeometry,
    /// Aerodynamic model for calculating force and moment coefficients.
    pub aero_coef: A,
    /// Engines and their placement.
    pub propulsion: PropulsionConfig,
}

impl Default for AircraftConfig {
    /// The `Cessna172` configuration is chosen as the default for convenience.
    fn default() -> Self {
        Self::cessna_172()
    }
}

impl AircraftConfig {
    /// Creates a new aircraft configuration from a given source.
    ///
    /// # Arguments
    /// * `source` - An `AircraftSource` enum specifying if the configuration is hardcoded
    ///              (`Programmed`) or loaded from a file (`File`).
    pub fn new(source: AircraftSource) -> Result<Self, ConfigError> {
        match source {
            AircraftSource::Programmed(aircraft_type) => Ok(Self::from_programmed(aircraft_type)),
            AircraftSource::File(path) => Self::from_file(path),
        }
    }

    fn from_programmed(aircraft_type: AircraftType) -> Self {
        match aircraft_type {
            AircraftType::Cessna172 => Self {
                name: "Cessna172".to_string(),
                ac_type: AircraftType::Cessna172,
                mass: MassModel::cessna_172(),
                geometry: AircraftGeometry::cessna_172(),
                aero_coef: AircraftAeroCoefficients::cessna_172(),
                propulsion: PropulsionConfig::cessna_172(),
            },
            AircraftType::TwinOtter => Self {
                name: "TwinOtter".to_string(),
                ac_type: AircraftType::TwinOtter,
                mass: MassModel::twin_otter(),
                geometry: AircraftGeometry::twin_otter(),
                aero_coef: AircraftAeroCoefficients::twin_otter(),
                propulsion: PropulsionConfig::twin_otter(),
            },
            AircraftType::Custom(name) => Self {
                name: name.clone(),
                ac_type: AircraftType::Custom(name),
                ..Self::from_programmed(AircraftType::Cessna172)
            },
        }
    }

    /// Reads an aircraft from a YAML file in the flat [`RawAircraftConfig`] layout.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file_contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&file_contents)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let raw_config: RawAircraftConfig = serde_yaml::from_str(yaml)?;
        Self::from_raw_config(raw_config)
    }

    /// Converts a raw configuration into a structured, validated aircraft configuration.
    pub fn from_raw_config(raw: RawAircraftConfig) -> Result<Self, ConfigError> {
        let mass = MassModel::new(raw.mass, raw.ixx, raw.iyy, raw.izz, raw.ixz)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        let config = Self {
            name: raw.name.clone(),
            ac_type: AircraftType::Custom(raw.name.clone()),
            mass,
            geometry: AircraftGeometry::new(raw.wing_area, raw.wing_span, raw.mac),
            aero_coef: AircraftAeroCoefficients::from_raw(&raw),
            propulsion: raw.propulsion(),
        };
        config
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        Ok(config)
    }

    pub fn cessna_172() -> Self {
        Self::from_programmed(AircraftType::Cessna172)
    }

    pub fn twin_otter() -> Self {
        Self::from_programmed(AircraftType::TwinOtter)
    }
}

impl<A: AerodynamicModel> AircraftConfig<A> {
    /// Checks every physical parameter: positive mass and reference lengths,
    /// a positive-definite inertia tensor, sane engines and whatever the
    /// aerodynamic model itself requires.
    pub fn validate(&self) -> Result<()> {
        self.mass.validate()?;
        self.geometry.validate()?;
        self.propulsion.validate()?;
        self.aero_coef.validate()
    }

    /// Swaps the aerodynamic model, keeping mass, geometry and engines.
    pub fn with_aero<B: AerodynamicModel>(self, aero_coef: B) -> AircraftConfig<B> {
        AircraftConfig {
            name: self.name,
            ac_type: self.ac_type,
            mass: self.mass,
            geometry: self.geometry,
            aero_coef,
            propulsion: self.propulsion,
        }
    }

    /// Aircraft weight (N) under the given gravitational acceleration.
    pub fn weight(&self, gravity: f64) -> f64 {
        self.mass.mass * gravity
    }
}

/// Source for aircraft configuration.
/// Can either be a hardcoded configuration (`Programmed`) or loaded from a file.
#[derive(Debug, Clone)]
pub enum AircraftSource {
    Programmed(AircraftType),
    File(PathBuf),
}

/// Enumeration of available aircraft types.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub enum AircraftType {
    Cessna172,
    TwinOtter,
    Custom(String),
}
