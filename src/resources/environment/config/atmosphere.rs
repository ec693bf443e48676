use serde::{Deserialize, Serialize};

use crate::utils::{
    ensure_positive, Result, DEFAULT_ATMOSPHERE_CACHE_CAPACITY, ISA_SEA_LEVEL_PRESSURE,
    ISA_SEA_LEVEL_TEMP,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereConfig {
    pub model_type: AtmosphereType,
    /// Pressure at the reference altitude (Pa).
    pub sea_level_pressure: f64,
    /// Temperature at the reference altitude (K). Offsets from 288.15 K give
    /// hot or cold day atmospheres with the standard lapse rates.
    pub sea_level_temperature: f64,
    /// Maximum number of memoised altitudes. Zero disables memoisation.
    pub cache_capacity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtmosphereType {
    /// Sea-level properties at every altitude.
    Constant,
    /// Layered International Standard Atmosphere.
    Standard,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            model_type: AtmosphereType::Standard,
            sea_level_pressure: ISA_SEA_LEVEL_PRESSURE,
            sea_level_temperature: ISA_SEA_LEVEL_TEMP,
            cache_capacity: DEFAULT_ATMOSPHERE_CACHE_CAPACITY,
        }
    }
}

impl AtmosphereConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("sea_level_pressure", self.sea_level_pressure)?;
        ensure_positive("sea_level_temperature", self.sea_level_temperature)
    }
}
