use nalgebra::{Matrix4, Matrix4x2, SMatrix};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::aircraft::{
    AircraftControls, AircraftState, ControlIndex, StateIndex, CONTROL_DIM, STATE_DIM,
};

pub type SystemMatrix = SMatrix<f64, STATE_DIM, STATE_DIM>;
pub type InputMatrix = SMatrix<f64, STATE_DIM, CONTROL_DIM>;

/// Configuration for the finite-difference linearizer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearizerConfig {
    /// Perturbation as a fraction of each variable's scale
    pub relative_step: f64,
    /// Lower bound on the velocity scale (m/s); the scale is otherwise the airspeed
    pub min_velocity_scale: f64,
    /// Scale of body rates (rad/s)
    pub rate_scale: f64,
    /// Scale of Euler angles (rad)
    pub angle_scale: f64,
    /// Scale of positions (m)
    pub position_scale: f64,
    /// Scale of control deflections (rad) and throttle
    pub control_scale: f64,
    /// Subsystems with a larger 2-norm condition number are rejected
    pub max_condition_number: f64,
    /// Entries at or below this magnitude count as zero sensitivity
    pub zero_threshold: f64,
    /// Trim β or φ beyond this (rad) triggers a decoupling warning
    pub decoupling_tolerance: f64,
}

impl Default for LinearizerConfig {
    fn default() -> Self {
        Self {
            relative_step: 1e-5,
            min_velocity_scale: 1.0,
            rate_scale: 1.0,
            angle_scale: 1.0,
            position_scale: 1.0,
            control_scale: 1.0,
            max_condition_number: 1e10,
            zero_threshold: 1e-12,
            decoupling_tolerance: 1e-6,
        }
    }
}

/// The two decoupled planes of motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subsystem {
    Longitudinal,
    Lateral,
}

impl Subsystem {
    pub const ALL: [Subsystem; 2] = [Subsystem::Longitudinal, Subsystem::Lateral];

    pub fn states(self) -> [StateIndex; 4] {
        match self {
            Subsystem::Longitudinal => [StateIndex::U, StateIndex::W, StateIndex::Q, StateIndex::Theta],
            Subsystem::Lateral => [StateIndex::V, StateIndex::P, StateIndex::R, StateIndex::Phi],
        }
    }

    pub fn inputs(self) -> [ControlIndex; 2] {
        match self {
            Subsystem::Longitudinal => [ControlIndex::Elevator, ControlIndex::Throttle],
            Subsystem::Lateral => [ControlIndex::Aileron, ControlIndex::Rudder],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Subsystem::Longitudinal => "longitudinal",
            Subsystem::Lateral => "lateral",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 4-state slice of the full model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearSubsystem {
    pub kind: Subsystem,
    pub a: Matrix4<f64>,
    pub b: Matrix4x2<f64>,
    /// Physical meaning of each row and column of `a`.
    pub states: [StateIndex; 4],
    /// Physical meaning of each column of `b`.
    pub inputs: [ControlIndex; 2],
}

impl LinearSubsystem {
    /// Row/column of `index` within this subsystem.
    pub fn position(&self, index: StateIndex) -> Option<usize> {
        self.states.iter().position(|s| *s == index)
    }
}

/// Linear model `ẋ = A x + B u` about an operating point.
///
/// Rows and columns of `A` follow [`StateIndex`]; columns of `B` follow
/// [`ControlIndex`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSpaceModel {
    a: SystemMatrix,
    b: InputMatrix,
    state: AircraftState,
    controls: AircraftControls,
}

impl StateSpaceModel {
    pub fn new(
        a: SystemMatrix,
        b: InputMatrix,
        state: AircraftState,
        controls: AircraftControls,
    ) -> Self {
        Self {
            a,
            b,
            state,
            controls,
        }
    }

    pub fn a(&self) -> &SystemMatrix {
        &self.a
    }

    pub fn b(&self) -> &InputMatrix {
        &self.b
    }

    /// Operating point the model was built around.
    pub fn state(&self) -> &AircraftState {
        &self.state
    }

    pub fn controls(&self) -> &AircraftControls {
        &self.controls
    }

    /// ∂ẋ_row / ∂x_column.
    pub fn a_element(&self, row: StateIndex, column: StateIndex) -> f64 {
        self.a[(row.index(), column.index())]
    }

    /// ∂ẋ_row / ∂u_column.
    pub fn b_element(&self, row: StateIndex, column: ControlIndex) -> f64 {
        self.b[(row.index(), column.index())]
    }

    pub fn subsystem(&self, kind: Subsystem) -> LinearSubsystem {
        let states = kind.states();
        let inputs = kind.inputs();
        let a = Matrix4::from_fn(|i, j| self.a_element(states[i], states[j]));
        let b = Matrix4x2::from_fn(|i, j| self.b_element(states[i], inputs[j]));
        LinearSubsystem {
            kind,
            a,
            b,
            states,
            inputs,
        }
    }

    pub fn longitudinal(&self) -> LinearSubsystem {
        self.subsystem(Subsystem::Longitudinal)
    }

    pub fn lateral(&self) -> LinearSubsystem {
        self.subsystem(Subsystem::Lateral)
    }

    /// Frobenius norm of the cross-plane blocks of `A`.
    ///
    /// Near zero at a wings-level, zero-sideslip trim.
    pub fn coupling_norm(&self) -> f64 {
        let longitudinal = Subsystem::Longitudinal.states();
        let lateral = Subsystem::Lateral.states();
        let mut sum = 0.0;
        for row in longitudinal {
            for column in lateral {
                sum += self.a_element(row, column).powi(2) + self.a_element(column, row).powi(2);
            }
        }
        sum.sqrt()
    }
}
