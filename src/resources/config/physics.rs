use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::{ensure_finite, ensure_positive, Result, GRAVITY, MIN_AIRSPEED};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravitational acceleration in the NED frame (m/s²).
    pub gravity: Vector3<f64>,
    /// Airspeed floor used when forming α, β and normalised rates (m/s).
    pub min_airspeed: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vector3::new(0.0, 0.0, GRAVITY),
            min_airspeed: MIN_AIRSPEED,
        }
    }
}

impl PhysicsConfig {
    pub fn gravity_magnitude(&self) -> f64 {
        self.gravity.norm()
    }

    pub fn validate(&self) -> Result<()> {
        for g in self.gravity.iter() {
            ensure_finite("gravity", *g)?;
        }
        ensure_positive("min_airspeed", self.min_airspeed)
    }
}
