use serde::{Deserialize, Serialize};

/// Air-relative flight condition derived from the state and the atmosphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirData {
    /// True airspeed of the aircraft (m/s).
    pub true_airspeed: f64,
    /// Angle of attack (α) in radians.
    pub alpha: f64,
    /// Sideslip angle (β) in radians.
    pub beta: f64,
    /// Dynamic pressure acting on the aircraft (Pa).
    pub dynamic_pressure: f64,
    /// Air density (kg/m³).
    pub density: f64,
    /// Mach number.
    pub mach: f64,
}

impl Default for AirData {
    /// Zero airspeed at sea-level density.
    fn default() -> Self {
        Self {
            true_airspeed: 0.0,
            alpha: 0.0,
            beta: 0.0,
            dynamic_pressure: 0.0,
            density: 1.225,
            mach: 0.0,
        }
    }
}
