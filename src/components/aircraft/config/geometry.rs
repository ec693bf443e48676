use serde::{Deserialize, Serialize};

use crate::utils::{ensure_positive, Result};

/// Configuration for the geometry of an aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftGeometry {
    /// The total wing area of the aircraft (m²).
    pub wing_area: f64,
    /// The wingspan of the aircraft (m).
    pub wing_span: f64,
    /// The mean aerodynamic chord of the aircraft (m).
    pub mac: f64,
}

impl AircraftGeometry {
    /// Creates a new `AircraftGeometry` instance with the specified parameters.
    ///
    /// # Arguments
    /// * `wing_area` - The total wing area of the aircraft (m²).
    /// * `wing_span` - The wing span of the aircraft (m).
    /// * `mac` - The mean aerodynamic chord (m).
    pub fn new(wing_area: f64, wing_span: f64, mac: f64) -> Self {
        AircraftGeometry {
            wing_area,
            wing_span,
            mac,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.wing_span * self.wing_span / self.wing_area
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("wing_area", self.wing_area)?;
        ensure_positive("wing_span", self.wing_span)?;
        ensure_positive("mac", self.mac)
    }

    pub fn cessna_172() -> Self {
        Self::new(16.2, 11.0, 1.47)
    }

    pub fn twin_otter() -> Self {
        Self::new(39.0, 19.8, 1.98)
    }
}
