use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::{ensure_non_negative, ensure_positive, FlightDynamicsError, Result};

/// Configuration for an aircraft engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerplantConfig {
    /// Name of the powerplant
    pub name: String,
    /// Maximum thrust at sea level (N)
    pub max_thrust: f64,
    /// Minimum thrust (typically idle) at sea level (N)
    pub min_thrust: f64,
    /// Engine position relative to aircraft CG in body axes (m)
    pub position: Vector3<f64>,
    /// Thrust line direction in body axes
    pub orientation: Vector3<f64>,
    /// Thrust lapse with altitude: thrust scales with (ρ/ρ₀)^n
    pub density_exponent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropulsionConfig {
    /// Configurations for each engine. All engines share the throttle.
    pub engines: Vec<PowerplantConfig>,
}

impl Default for PowerplantConfig {
    fn default() -> Self {
        Self {
            name: "Generic Engine".to_string(),
            max_thrust: 20000.0,
            min_thrust: 0.0,
            position: Vector3::new(0.0, 0.0, 0.0),
            orientation: Vector3::new(1.0, 0.0, 0.0), // Forward-pointing
            density_exponent: 1.0,
        }
    }
}

impl PowerplantConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("max_thrust", self.max_thrust)?;
        ensure_non_negative("min_thrust", self.min_thrust)?;
        ensure_non_negative("density_exponent", self.density_exponent)?;
        if self.min_thrust > self.max_thrust {
            return Err(FlightDynamicsError::invalid(format!(
                "engine '{}' min_thrust exceeds max_thrust",
                self.name
            )));
        }
        let norm = self.orientation.norm();
        if !norm.is_finite() || norm < 1e-9 || !self.position.iter().all(|v| v.is_finite()) {
            return Err(FlightDynamicsError::invalid(format!(
                "engine '{}' needs a finite position and a non-zero thrust direction",
                self.name
            )));
        }
        Ok(())
    }
}

impl PropulsionConfig {
    /// Creates a new single-engine configuration
    pub fn single_engine(engine: PowerplantConfig) -> Self {
        Self {
            engines: vec![engine],
        }
    }

    /// Creates a twin-engine configuration with symmetric placement
    pub fn twin_engine(
        engine: PowerplantConfig,
        y_offset: f64,
        x_offset: f64,
        z_offset: f64,
    ) -> Self {
        let left_engine = PowerplantConfig {
            position: Vector3::new(x_offset, -y_offset, z_offset),
            name: "Left Engine".to_string(),
            ..engine.clone()
        };
        let right_engine = PowerplantConfig {
            position: Vector3::new(x_offset, y_offset, z_offset),
            name: "Right Engine".to_string(),
            ..engine
        };
        Self {
            engines: vec![left_engine, right_engine],
        }
    }

    /// Combined sea-level maximum thrust of all engines (N).
    pub fn total_max_thrust(&self) -> f64 {
        self.engines.iter().map(|e| e.max_thrust).sum()
    }

    pub fn validate(&self) -> Result<()> {
        if self.engines.is_empty() {
            return Err(FlightDynamicsError::invalid(
                "propulsion needs at least one engine",
            ));
        }
        self.engines.iter().try_for_each(PowerplantConfig::validate)
    }

    pub fn cessna_172() -> Self {
        let engine = PowerplantConfig {
            name: "Lycoming O-320".to_string(),
            max_thrust: 2000.0,
            min_thrust: 0.0,
            density_exponent: 1.0,
            ..Default::default()
        };
        Self::single_engine(engine)
    }

    pub fn twin_otter() -> Self {
        let base_engine = PowerplantConfig {
            name: "PT6A-27".to_string(),
            max_thrust: 9000.0,
            min_thrust: 0.0,
            density_exponent: 0.7,
            ..Default::default()
        };
        Self::twin_engine(base_engine, 5.0, -0.5, 0.3)
    }
}
