use nalgebra::{SVector, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const STATE_DIM: usize = 12;
pub const CONTROL_DIM: usize = 4;

pub type StateVector = SVector<f64, STATE_DIM>;
pub type ControlVector = SVector<f64, CONTROL_DIM>;

/// Position of each quantity inside the 12-element state vector.
///
/// The ordering is shared by the equations of motion, the trim solver, the
/// linearizer and the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateIndex {
    /// Body-axis forward velocity (m/s).
    U,
    /// Body-axis lateral velocity (m/s).
    V,
    /// Body-axis vertical velocity (m/s).
    W,
    /// Roll rate (rad/s).
    P,
    /// Pitch rate (rad/s).
    Q,
    /// Yaw rate (rad/s).
    R,
    /// Bank angle φ (rad).
    Phi,
    /// Pitch attitude θ (rad).
    Theta,
    /// Heading ψ (rad).
    Psi,
    /// North position (m).
    X,
    /// East position (m).
    Y,
    /// Down position (m). Altitude is `-z`.
    Z,
}

impl StateIndex {
    pub const ALL: [StateIndex; STATE_DIM] = [
        StateIndex::U,
        StateIndex::V,
        StateIndex::W,
        StateIndex::P,
        StateIndex::Q,
        StateIndex::R,
        StateIndex::Phi,
        StateIndex::Theta,
        StateIndex::Psi,
        StateIndex::X,
        StateIndex::Y,
        StateIndex::Z,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            StateIndex::U => "u",
            StateIndex::V => "v",
            StateIndex::W => "w",
            StateIndex::P => "p",
            StateIndex::Q => "q",
            StateIndex::R => "r",
            StateIndex::Phi => "phi",
            StateIndex::Theta => "theta",
            StateIndex::Psi => "psi",
            StateIndex::X => "x",
            StateIndex::Y => "y",
            StateIndex::Z => "z",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            StateIndex::U | StateIndex::V | StateIndex::W => "m/s",
            StateIndex::P | StateIndex::Q | StateIndex::R => "rad/s",
            StateIndex::Phi | StateIndex::Theta | StateIndex::Psi => "rad",
            StateIndex::X | StateIndex::Y | StateIndex::Z => "m",
        }
    }
}

impl fmt::Display for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of each control inside the 4-element control vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlIndex {
    Elevator,
    Aileron,
    Rudder,
    Throttle,
}

impl ControlIndex {
    pub const ALL: [ControlIndex; CONTROL_DIM] = [
        ControlIndex::Elevator,
        ControlIndex::Aileron,
        ControlIndex::Rudder,
        ControlIndex::Throttle,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ControlIndex::Elevator => "elevator",
            ControlIndex::Aileron => "aileron",
            ControlIndex::Rudder => "rudder",
            ControlIndex::Throttle => "throttle",
        }
    }
}

impl fmt::Display for ControlIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rigid-body state of the aircraft: body velocities, body rates, Euler
/// attitude and NED position, stored as a single vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftState(StateVector);

impl Default for AircraftState {
    fn default() -> Self {
        Self(StateVector::zeros())
    }
}

impl AircraftState {
    pub fn from_vector(vector: StateVector) -> Self {
        Self(vector)
    }

    /// Builds a state from its four physical groups.
    pub fn from_parts(
        velocity: Vector3<f64>,
        angular_velocity: Vector3<f64>,
        attitude: Vector3<f64>,
        position: Vector3<f64>,
    ) -> Self {
        let mut vector = StateVector::zeros();
        vector.fixed_rows_mut::<3>(0).copy_from(&velocity);
        vector.fixed_rows_mut::<3>(3).copy_from(&angular_velocity);
        vector.fixed_rows_mut::<3>(6).copy_from(&attitude);
        vector.fixed_rows_mut::<3>(9).copy_from(&position);
        Self(vector)
    }

    pub fn as_vector(&self) -> &StateVector {
        &self.0
    }

    pub fn into_vector(self) -> StateVector {
        self.0
    }

    #[inline]
    pub fn get(&self, index: StateIndex) -> f64 {
        self.0[index.index()]
    }

    #[inline]
    pub fn set(&mut self, index: StateIndex, value: f64) {
        self.0[index.index()] = value;
    }

    pub fn with(mut self, index: StateIndex, value: f64) -> Self {
        self.set(index, value);
        self
    }

    /// Body-frame velocity (u, v, w).
    pub fn velocity(&self) -> Vector3<f64> {
        self.0.fixed_rows::<3>(0).into_owned()
    }

    /// Body rates (p, q, r).
    pub fn angular_velocity(&self) -> Vector3<f64> {
        self.0.fixed_rows::<3>(3).into_owned()
    }

    /// Euler angles (φ, θ, ψ).
    pub fn attitude(&self) -> Vector3<f64> {
        self.0.fixed_rows::<3>(6).into_owned()
    }

    /// NED position (x, y, z).
    pub fn position(&self) -> Vector3<f64> {
        self.0.fixed_rows::<3>(9).into_owned()
    }

    pub fn u(&self) -> f64 {
        self.get(StateIndex::U)
    }

    pub fn v(&self) -> f64 {
        self.get(StateIndex::V)
    }

    pub fn w(&self) -> f64 {
        self.get(StateIndex::W)
    }

    pub fn p(&self) -> f64 {
        self.get(StateIndex::P)
    }

    pub fn q(&self) -> f64 {
        self.get(StateIndex::Q)
    }

    pub fn r(&self) -> f64 {
        self.get(StateIndex::R)
    }

    pub fn phi(&self) -> f64 {
        self.get(StateIndex::Phi)
    }

    pub fn theta(&self) -> f64 {
        self.get(StateIndex::Theta)
    }

    pub fn psi(&self) -> f64 {
        self.get(StateIndex::Psi)
    }

    /// Altitude above the reference plane (m), positive up.
    pub fn altitude(&self) -> f64 {
        -self.get(StateIndex::Z)
    }

    /// Magnitude of the body velocity (m/s).
    pub fn airspeed(&self) -> f64 {
        self.velocity().norm()
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

/// Control positions: elevator, aileron and rudder in radians, throttle as a
/// fraction of full power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftControls(ControlVector);

impl Default for AircraftControls {
    fn default() -> Self {
        Self(ControlVector::zeros())
    }
}

impl AircraftControls {
    pub fn new(elevator: f64, aileron: f64, rudder: f64, throttle: f64) -> Self {
        Self(ControlVector::new(elevator, aileron, rudder, throttle))
    }

    pub fn from_vector(vector: ControlVector) -> Self {
        Self(vector)
    }

    pub fn as_vector(&self) -> &ControlVector {
        &self.0
    }

    pub fn into_vector(self) -> ControlVector {
        self.0
    }

    #[inline]
    pub fn get(&self, index: ControlIndex) -> f64 {
        self.0[index.index()]
    }

    #[inline]
    pub fn set(&mut self, index: ControlIndex, value: f64) {
        self.0[index.index()] = value;
    }

    pub fn with(mut self, index: ControlIndex, value: f64) -> Self {
        self.set(index, value);
        self
    }

    pub fn elevator(&self) -> f64 {
        self.get(ControlIndex::Elevator)
    }

    pub fn aileron(&self) -> f64 {
        self.get(ControlIndex::Aileron)
    }

    pub fn rudder(&self) -> f64 {
        self.get(ControlIndex::Rudder)
    }

    pub fn throttle(&self) -> f64 {
        self.get(ControlIndex::Throttle)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}
