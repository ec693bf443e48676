use serde::{Deserialize, Serialize};

use crate::components::aircraft::AircraftConfig;
use crate::components::modes::Eigenmode;
use crate::utils::{ensure_finite, ensure_non_negative, ensure_positive, FlightDynamicsError, Result};

/// Parameter overrides applied on top of the Cessna 172 preset.
///
/// Field names follow the usual aerodynamic notation on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AircraftOverrides {
    pub mass: Option<f64>,
    #[serde(rename = "S")]
    pub wing_area: Option<f64>,
    #[serde(rename = "b")]
    pub wing_span: Option<f64>,
    #[serde(rename = "c")]
    pub chord: Option<f64>,
    #[serde(rename = "CL_alpha")]
    pub c_l_alpha: Option<f64>,
    #[serde(rename = "Cm_alpha")]
    pub c_m_alpha: Option<f64>,
    #[serde(rename = "Cm_q")]
    pub c_m_q: Option<f64>,
    #[serde(rename = "Cm_de")]
    pub c_m_deltae: Option<f64>,
    #[serde(rename = "CL0")]
    pub c_l_0: Option<f64>,
    #[serde(rename = "CD0")]
    pub c_d_0: Option<f64>,
    #[serde(rename = "Cm0")]
    pub c_m_0: Option<f64>,
}

impl AircraftOverrides {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("mass", self.mass),
            ("S", self.wing_area),
            ("b", self.wing_span),
            ("c", self.chord),
        ];
        for (name, value) in positive {
            if let Some(value) = value {
                ensure_positive(name, value)?;
            }
        }
        if let Some(c_d_0) = self.c_d_0 {
            ensure_non_negative("CD0", c_d_0)?;
        }
        let derivatives = [
            ("CL_alpha", self.c_l_alpha),
            ("Cm_alpha", self.c_m_alpha),
            ("Cm_q", self.c_m_q),
            ("Cm_de", self.c_m_deltae),
            ("CL0", self.c_l_0),
            ("Cm0", self.c_m_0),
        ];
        for (name, value) in derivatives {
            if let Some(value) = value {
                ensure_finite(name, value)?;
            }
        }
        Ok(())
    }

    /// The Cessna 172 with these overrides applied.
    pub fn apply(&self) -> Result<AircraftConfig> {
        self.validate()?;
        let mut aircraft = AircraftConfig::cessna_172();

        if let Some(mass) = self.mass {
            aircraft.mass = aircraft.mass.with_mass(mass)?;
        }
        let geometry = &mut aircraft.geometry;
        geometry.wing_area = self.wing_area.unwrap_or(geometry.wing_area);
        geometry.wing_span = self.wing_span.unwrap_or(geometry.wing_span);
        geometry.mac = self.chord.unwrap_or(geometry.mac);

        let aero = &mut aircraft.aero_coef;
        aero.lift.c_l_alpha = self.c_l_alpha.unwrap_or(aero.lift.c_l_alpha);
        aero.lift.c_l_0 = self.c_l_0.unwrap_or(aero.lift.c_l_0);
        aero.drag.c_d_0 = self.c_d_0.unwrap_or(aero.drag.c_d_0);
        aero.pitch.c_m_alpha = self.c_m_alpha.unwrap_or(aero.pitch.c_m_alpha);
        aero.pitch.c_m_q = self.c_m_q.unwrap_or(aero.pitch.c_m_q);
        aero.pitch.c_m_deltae = self.c_m_deltae.unwrap_or(aero.pitch.c_m_deltae);
        aero.pitch.c_m_0 = self.c_m_0.unwrap_or(aero.pitch.c_m_0);

        aircraft.validate()?;
        Ok(aircraft)
    }
}

/// Resolves optional overrides to an aircraft.
pub fn resolve_aircraft(overrides: Option<&AircraftOverrides>) -> Result<AircraftConfig> {
    match overrides {
        Some(overrides) => overrides.apply(),
        None => Ok(AircraftConfig::cessna_172()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrimRequest {
    /// True airspeed (m/s).
    pub velocity: f64,
    /// Altitude (m).
    pub altitude: f64,
    /// Flight-path angle (rad), positive climbing.
    #[serde(default)]
    pub flight_path_angle: f64,
    #[serde(default)]
    pub aircraft: Option<AircraftOverrides>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimResponse {
    pub alpha_deg: f64,
    pub elevator_deg: f64,
    pub throttle: f64,
    pub theta_deg: f64,
    /// Body-axis velocities (m/s).
    pub u: f64,
    pub w: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisRequest {
    pub velocity: f64,
    pub altitude: f64,
    #[serde(default)]
    pub aircraft: Option<AircraftOverrides>,
}

/// One eigenvalue with its frequency and damping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeData {
    pub real: f64,
    pub imag: f64,
    pub wn: f64,
    pub zeta: f64,
}

impl ModeData {
    /// Every eigenvalue of a mode: both members of a conjugate pair.
    pub fn from_mode(mode: &Eigenmode) -> Vec<ModeData> {
        let data = ModeData {
            real: mode.real(),
            imag: mode.imag(),
            wn: mode.natural_frequency,
            zeta: mode.damping_ratio,
        };
        if mode.is_oscillatory() {
            vec![
                data,
                ModeData {
                    imag: -data.imag,
                    ..data
                },
            ]
        } else {
            vec![data]
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub longitudinal: Vec<ModeData>,
    pub lateral: Vec<ModeData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Failure body: the error's message and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl From<FlightDynamicsError> for ErrorResponse {
    fn from(error: FlightDynamicsError) -> Self {
        Self {
            detail: error.to_string(),
        }
    }
}
