use serde::{Deserialize, Serialize};

/// Stability and control derivative model.
///
/// Every coefficient is a base value plus contributions from angle of attack,
/// sideslip, normalised body rates and control deflections. All terms are
/// polynomial, so the resulting forces are smooth in every input.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftAeroCoefficients {
    pub drag: DragCoefficients,
    pub lift: LiftCoefficients,
    pub side_force: SideForceCoefficients,
    pub roll: RollCoefficients,
    pub pitch: PitchCoefficients,
    pub yaw: YawCoefficients,
}

/// Drag coefficients
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragCoefficients {
    /// Base drag coefficient (zero angle of attack).
    pub c_d_0: f64,
    /// Linear drag coefficient with respect to angle of attack (α).
    pub c_d_alpha: f64,
    /// Quadratic drag coefficient with respect to angle of attack squared (α²).
    pub c_d_alpha2: f64,
    /// Drag due to sideslip squared (β²).
    pub c_d_beta2: f64,
    /// Trim drag due to elevator deflection squared.
    pub c_d_deltae2: f64,
}

/// Lift coefficients
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiftCoefficients {
    /// Base lift coefficient (zero angle of attack).
    pub c_l_0: f64,
    /// Linear lift coefficient with respect to angle of attack (α).
    pub c_l_alpha: f64,
    /// Lift coefficient due to pitch rate (q).
    pub c_l_q: f64,
    /// Lift coefficient due to elevator deflection.
    pub c_l_deltae: f64,
    /// Quadratic lift coefficient with respect to α².
    pub c_l_alpha2: f64,
    /// Cubic lift coefficient with respect to α³.
    pub c_l_alpha3: f64,
}

/// Side force coefficients
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideForceCoefficients {
    /// Side-force coefficient due to sideslip angle (β).
    pub c_y_beta: f64,
    /// Side-force coefficient due to roll rate (p).
    pub c_y_p: f64,
    /// Side-force coefficient due to yaw rate (r).
    pub c_y_r: f64,
    /// Side-force coefficient due to aileron deflection.
    pub c_y_deltaa: f64,
    /// Side-force coefficient due to rudder deflection.
    pub c_y_deltar: f64,
}

/// Roll coefficients
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollCoefficients {
    /// Roll moment coefficient due to sideslip angle (β).
    pub c_l_beta: f64,
    /// Roll moment coefficient due to roll rate (p).
    pub c_l_p: f64,
    /// Roll moment coefficient due to yaw rate (r).
    pub c_l_r: f64,
    /// Roll moment coefficient due to aileron deflection.
    pub c_l_deltaa: f64,
    /// Roll moment coefficient due to rudder deflection.
    pub c_l_deltar: f64,
}

/// Pitch coefficients
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchCoefficients {
    /// Base pitch moment coefficient (zero angle of attack).
    pub c_m_0: f64,
    /// Linear pitch moment coefficient with respect to angle of attack (α).
    pub c_m_alpha: f64,
    /// Pitch moment coefficient due to pitch rate (q).
    pub c_m_q: f64,
    /// Pitch moment coefficient due to elevator deflection.
    pub c_m_deltae: f64,
}

/// Yaw coefficients
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YawCoefficients {
    /// Yaw moment coefficient due to sideslip angle (β).
    pub c_n_beta: f64,
    /// Yaw moment coefficient due to roll rate (p).
    pub c_n_p: f64,
    /// Yaw moment coefficient due to yaw rate (r).
    pub c_n_r: f64,
    /// Yaw moment coefficient due to aileron deflection.
    pub c_n_deltaa: f64,
    /// Yaw moment coefficient due to rudder deflection.
    pub c_n_deltar: f64,
}

impl AircraftAeroCoefficients {
    pub fn new(
        drag: DragCoefficients,
        lift: LiftCoefficients,
        side_force: SideForceCoefficients,
        roll: RollCoefficients,
        pitch: PitchCoefficients,
        yaw: YawCoefficients,
    ) -> Self {
        Self {
            drag,
            lift,
            side_force,
            roll,
            pitch,
            yaw,
        }
    }

    /// Light single-engine trainer.
    ///
    /// Longitudinal derivatives follow the classic Cessna 172 data set; the
    /// drag polar is the induced-drag expansion of `C_D0 + k C_L²`.
    pub fn cessna_172() -> Self {
        Self {
            drag: DragCoefficients {
                c_d_0: 0.0318,
                c_d_alpha: 0.146,
                c_d_alpha2: 1.11,
                c_d_beta2: 0.0,
                c_d_deltae2: 0.0,
            },
            lift: LiftCoefficients {
                c_l_0: 0.3,
                c_l_alpha: 4.58,
                c_l_q: 3.8,
                c_l_deltae: 0.35,
                c_l_alpha2: 0.0,
                c_l_alpha3: 0.0,
            },
            side_force: SideForceCoefficients {
                c_y_beta: -0.31,
                c_y_p: -0.037,
                c_y_r: 0.21,
                c_y_deltaa: 0.0,
                c_y_deltar: 0.187,
            },
            roll: RollCoefficients {
                c_l_beta: -0.089,
                c_l_p: -0.47,
                c_l_r: 0.096,
                c_l_deltaa: 0.178,
                c_l_deltar: 0.0147,
            },
            pitch: PitchCoefficients {
                c_m_0: -0.02,
                c_m_alpha: -0.9,
                c_m_q: -12.4,
                c_m_deltae: -1.28,
            },
            yaw: YawCoefficients {
                c_n_beta: 0.065,
                c_n_p: -0.03,
                c_n_r: -0.099,
                c_n_deltaa: -0.053,
                c_n_deltar: -0.0657,
            },
        }
    }

    /// Twin turboprop utility transport.
    pub fn twin_otter() -> Self {
        Self {
            drag: DragCoefficients {
                c_d_0: 0.045,
                c_d_alpha: 0.1,
                c_d_alpha2: 0.9,
                c_d_beta2: 0.0,
                c_d_deltae2: 0.0,
            },
            lift: LiftCoefficients {
                c_l_0: 0.25,
                c_l_alpha: 5.5,
                c_l_q: 7.0,
                c_l_deltae: 0.4,
                c_l_alpha2: 0.0,
                c_l_alpha3: 0.0,
            },
            side_force: SideForceCoefficients {
                c_y_beta: -0.6,
                c_y_p: -0.2,
                c_y_r: 0.4,
                c_y_deltaa: 0.0,
                c_y_deltar: 0.15,
            },
            roll: RollCoefficients {
                c_l_beta: -0.13,
                c_l_p: -0.45,
                c_l_r: 0.1,
                c_l_deltaa: 0.15,
                c_l_deltar: 0.005,
            },
            pitch: PitchCoefficients {
                c_m_0: 0.05,
                c_m_alpha: -1.2,
                c_m_q: -20.0,
                c_m_deltae: -1.5,
            },
            yaw: YawCoefficients {
                c_n_beta: 0.1,
                c_n_p: -0.03,
                c_n_r: -0.12,
                c_n_deltaa: -0.01,
                c_n_deltar: -0.1,
            },
        }
    }

    /// Every coefficient paired with its name.
    pub fn named_values(&self) -> [(&'static str, f64); 30] {
        [
            ("c_d_0", self.drag.c_d_0),
            ("c_d_alpha", self.drag.c_d_alpha),
            ("c_d_alpha2", self.drag.c_d_alpha2),
            ("c_d_beta2", self.drag.c_d_beta2),
            ("c_d_deltae2", self.drag.c_d_deltae2),
            ("c_l_0", self.lift.c_l_0),
            ("c_l_alpha", self.lift.c_l_alpha),
            ("c_l_q", self.lift.c_l_q),
            ("c_l_deltae", self.lift.c_l_deltae),
            ("c_l_alpha2", self.lift.c_l_alpha2),
            ("c_l_alpha3", self.lift.c_l_alpha3),
            ("c_y_beta", self.side_force.c_y_beta),
            ("c_y_p", self.side_force.c_y_p),
            ("c_y_r", self.side_force.c_y_r),
            ("c_y_deltaa", self.side_force.c_y_deltaa),
            ("c_y_deltar", self.side_force.c_y_deltar),
            ("c_l_beta", self.roll.c_l_beta),
            ("c_l_p", self.roll.c_l_p),
            ("c_l_r", self.roll.c_l_r),
            ("c_l_deltaa", self.roll.c_l_deltaa),
            ("c_l_deltar", self.roll.c_l_deltar),
            ("c_m_0", self.pitch.c_m_0),
            ("c_m_alpha", self.pitch.c_m_alpha),
            ("c_m_q", self.pitch.c_m_q),
            ("c_m_deltae", self.pitch.c_m_deltae),
            ("c_n_beta", self.yaw.c_n_beta),
            ("c_n_p", self.yaw.c_n_p),
            ("c_n_r", self.yaw.c_n_r),
            ("c_n_deltaa", self.yaw.c_n_deltaa),
            ("c_n_deltar", self.yaw.c_n_deltar),
        ]
    }
}
