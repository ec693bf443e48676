use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use crate::components::aircraft::{AircraftControls, AircraftState, StateIndex, StateVector};
use crate::utils::{ensure_finite, ensure_positive, FlightDynamicsError, Result};

/// Represents different types of trim conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrimCondition {
    /// Straight and Level flight at specific airspeed
    StraightAndLevel { airspeed: f64 },
    /// Steady Climb and descent
    SteadyClimb { airspeed: f64, gamma: f64 },
    /// Steady turn at a constant turn rate (rad/s)
    CoordinatedTurn { airspeed: f64, turn_rate: f64 },
    /// Straight flight holding a sideslip angle (rad)
    SteadySideslip { airspeed: f64, beta: f64 },
}

/// Requested flight condition for trim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimTarget {
    /// True airspeed (m/s).
    pub airspeed: f64,
    /// Altitude (m).
    pub altitude: f64,
    /// Flight-path angle γ (rad), positive climbing.
    #[serde(default)]
    pub flight_path_angle: f64,
    /// Heading rate ψ̇ (rad/s), positive turning right.
    #[serde(default)]
    pub turn_rate: f64,
    /// Sideslip angle β (rad).
    #[serde(default)]
    pub sideslip: f64,
}

impl TrimTarget {
    /// Straight and level flight.
    pub fn new(airspeed: f64, altitude: f64) -> Self {
        Self {
            airspeed,
            altitude,
            flight_path_angle: 0.0,
            turn_rate: 0.0,
            sideslip: 0.0,
        }
    }

    pub fn with_flight_path_angle(mut self, gamma: f64) -> Self {
        self.flight_path_angle = gamma;
        self
    }

    pub fn with_turn_rate(mut self, turn_rate: f64) -> Self {
        self.turn_rate = turn_rate;
        self
    }

    pub fn with_sideslip(mut self, sideslip: f64) -> Self {
        self.sideslip = sideslip;
        self
    }

    /// True when the lateral trim variables are identically zero.
    pub fn is_symmetric(&self) -> bool {
        self.turn_rate == 0.0 && self.sideslip == 0.0
    }

    pub fn condition(&self) -> TrimCondition {
        let airspeed = self.airspeed;
        if self.turn_rate != 0.0 {
            TrimCondition::CoordinatedTurn {
                airspeed,
                turn_rate: self.turn_rate,
            }
        } else if self.sideslip != 0.0 {
            TrimCondition::SteadySideslip {
                airspeed,
                beta: self.sideslip,
            }
        } else if self.flight_path_angle != 0.0 {
            TrimCondition::SteadyClimb {
                airspeed,
                gamma: self.flight_path_angle,
            }
        } else {
            TrimCondition::StraightAndLevel { airspeed }
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("airspeed", self.airspeed)?;
        ensure_finite("altitude", self.altitude)?;
        ensure_finite("turn_rate", self.turn_rate)?;
        for (name, angle) in [
            ("flight_path_angle", self.flight_path_angle),
            ("sideslip", self.sideslip),
        ] {
            if !(angle.abs() < FRAC_PI_2) {
                return Err(FlightDynamicsError::invalid(format!(
                    "{name} must lie strictly between -90 and 90 degrees (got {angle} rad)"
                )));
            }
        }
        Ok(())
    }
}

/// Longitudinal trim state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LongitudinalTrimState {
    pub alpha: f64,
    pub theta: f64,
    pub elevator: f64,
    pub throttle: f64,
}

/// Lateral trim state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LateralTrimState {
    pub beta: f64,
    pub phi: f64,
    pub aileron: f64,
    pub rudder: f64,
}

/// Remaining body accelerations at the trim point (m/s², rad/s²).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LongitudinalResiduals {
    /// u̇
    pub horizontal_force: f64,
    /// ẇ
    pub vertical_force: f64,
    /// q̇
    pub pitch_moment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LateralResiduals {
    /// v̇
    pub side_force: f64,
    /// ṗ
    pub roll_moment: f64,
    /// ṙ
    pub yaw_moment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrimResiduals {
    pub longitudinal: LongitudinalResiduals,
    pub lateral: LateralResiduals,
}

impl TrimResiduals {
    /// Picks the six force and moment equations out of a state derivative.
    pub fn from_derivative(derivative: &StateVector) -> Self {
        let at = |index: StateIndex| derivative[index.index()];
        Self {
            longitudinal: LongitudinalResiduals {
                horizontal_force: at(StateIndex::U),
                vertical_force: at(StateIndex::W),
                pitch_moment: at(StateIndex::Q),
            },
            lateral: LateralResiduals {
                side_force: at(StateIndex::V),
                roll_moment: at(StateIndex::P),
                yaw_moment: at(StateIndex::R),
            },
        }
    }

    pub fn as_array(&self) -> [f64; 6] {
        [
            self.longitudinal.horizontal_force,
            self.lateral.side_force,
            self.longitudinal.vertical_force,
            self.lateral.roll_moment,
            self.longitudinal.pitch_moment,
            self.lateral.yaw_moment,
        ]
    }

    /// Infinity norm over all six equations.
    pub fn max_abs(&self) -> f64 {
        self.as_array().iter().fold(0.0, |acc, r| acc.max(r.abs()))
    }
}

/// An equilibrium found by the trim solver.
///
/// Only the solver builds these, so holding one means the residual was below
/// tolerance and every trim variable was inside its bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrimState {
    state: AircraftState,
    controls: AircraftControls,
    longitudinal: LongitudinalTrimState,
    lateral: LateralTrimState,
    residuals: TrimResiduals,
    iterations: usize,
    target: TrimTarget,
}

impl TrimState {
    pub(crate) fn new(
        state: AircraftState,
        controls: AircraftControls,
        alpha: f64,
        residuals: TrimResiduals,
        iterations: usize,
        target: TrimTarget,
    ) -> Self {
        Self {
            longitudinal: LongitudinalTrimState {
                alpha,
                theta: state.theta(),
                elevator: controls.elevator(),
                throttle: controls.throttle(),
            },
            lateral: LateralTrimState {
                beta: target.sideslip,
                phi: state.phi(),
                aileron: controls.aileron(),
                rudder: controls.rudder(),
            },
            state,
            controls,
            residuals,
            iterations,
            target,
        }
    }

    pub fn state(&self) -> &AircraftState {
        &self.state
    }

    pub fn controls(&self) -> &AircraftControls {
        &self.controls
    }

    pub fn longitudinal(&self) -> &LongitudinalTrimState {
        &self.longitudinal
    }

    pub fn lateral(&self) -> &LateralTrimState {
        &self.lateral
    }

    pub fn residuals(&self) -> &TrimResiduals {
        &self.residuals
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn target(&self) -> &TrimTarget {
        &self.target
    }

    pub fn alpha(&self) -> f64 {
        self.longitudinal.alpha
    }

    pub fn theta(&self) -> f64 {
        self.longitudinal.theta
    }

    pub fn condition(&self) -> TrimCondition {
        self.target.condition()
    }
}
