use argmin::core::{CostFunction, Error as ArgminError, Gradient};
use nalgebra::{DMatrix, DVector};

use crate::components::aircraft::{AircraftControls, AircraftState, StateIndex, StateVector};
use crate::components::trim::TrimTarget;
use crate::systems::aerodynamics::AerodynamicModel;
use crate::systems::physics::EquationsOfMotion;

/// Which trim variables are free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimMode {
    /// `[α, δe, δt]` against `[u̇, ẇ, q̇]`.
    Symmetric,
    /// `[α, φ, δe, δa, δr, δt]` against `[u̇, v̇, ẇ, ṗ, q̇, ṙ]`, β held at the target.
    General,
}

impl TrimMode {
    pub fn for_target(target: &TrimTarget) -> Self {
        if target.is_symmetric() {
            TrimMode::Symmetric
        } else {
            TrimMode::General
        }
    }

    pub fn dimension(self) -> usize {
        self.residual_indices().len()
    }

    pub fn residual_indices(self) -> &'static [StateIndex] {
        match self {
            TrimMode::Symmetric => &[StateIndex::U, StateIndex::W, StateIndex::Q],
            TrimMode::General => &[
                StateIndex::U,
                StateIndex::V,
                StateIndex::W,
                StateIndex::P,
                StateIndex::Q,
                StateIndex::R,
            ],
        }
    }

    pub fn initial_guess(self) -> Vec<f64> {
        match self {
            TrimMode::Symmetric => vec![0.05, -0.05, 0.5],
            TrimMode::General => vec![0.05, 0.0, -0.05, 0.0, 0.0, 0.5],
        }
    }
}

/// Pitch attitude that gives flight-path angle `gamma` for the given flow
/// angles and bank.
///
/// Reduces to `θ = α + γ` with the wings level and no sideslip.
pub fn rate_of_climb_theta(alpha: f64, beta: f64, phi: f64, gamma: f64) -> f64 {
    let a = alpha.cos() * beta.cos();
    let b = phi.sin() * beta.sin() + phi.cos() * alpha.sin() * beta.cos();
    let sin_gamma = gamma.sin();
    let numerator = a * b + sin_gamma * (a * a - sin_gamma * sin_gamma + b * b).max(0.0).sqrt();
    let denominator = a * a - sin_gamma * sin_gamma;
    numerator.atan2(denominator)
}

/// Trim residual as a function of the free trim variables.
///
/// The merit function handed to argmin is `½‖r‖²` and its gradient is `Jᵀr`
/// with `J` the central-difference Jacobian of `r`.
pub struct TrimProblem<'a, A> {
    eom: &'a EquationsOfMotion<'a, A>,
    target: TrimTarget,
    mode: TrimMode,
    jacobian_step: f64,
}

impl<A> Clone for TrimProblem<'_, A> {
    fn clone(&self) -> Self {
        Self {
            eom: self.eom,
            target: self.target,
            mode: self.mode,
            jacobian_step: self.jacobian_step,
        }
    }
}

impl<'a, A: AerodynamicModel> TrimProblem<'a, A> {
    pub fn new(eom: &'a EquationsOfMotion<'a, A>, target: TrimTarget, jacobian_step: f64) -> Self {
        Self {
            eom,
            target,
            mode: TrimMode::for_target(&target),
            jacobian_step,
        }
    }

    pub fn mode(&self) -> TrimMode {
        self.mode
    }

    pub fn target(&self) -> &TrimTarget {
        &self.target
    }

    pub fn initial_guess(&self) -> Vec<f64> {
        self.mode.initial_guess()
    }

    /// Full state and controls for a decision vector, plus the α it encodes.
    pub fn operating_point(&self, param: &[f64]) -> (AircraftState, AircraftControls, f64) {
        let (alpha, phi, controls) = match self.mode {
            TrimMode::Symmetric => (
                param[0],
                0.0,
                AircraftControls::new(param[1], 0.0, 0.0, param[2]),
            ),
            TrimMode::General => (
                param[0],
                param[1],
                AircraftControls::new(param[2], param[3], param[4], param[5]),
            ),
        };

        let target = &self.target;
        let beta = target.sideslip;
        let airspeed = target.airspeed;
        let theta = rate_of_climb_theta(alpha, beta, phi, target.flight_path_angle);
        let turn_rate = target.turn_rate;

        let state = AircraftState::default()
            .with(StateIndex::U, airspeed * alpha.cos() * beta.cos())
            .with(StateIndex::V, airspeed * beta.sin())
            .with(StateIndex::W, airspeed * alpha.sin() * beta.cos())
            .with(StateIndex::P, -turn_rate * theta.sin())
            .with(StateIndex::Q, turn_rate * theta.cos() * phi.sin())
            .with(StateIndex::R, turn_rate * theta.cos() * phi.cos())
            .with(StateIndex::Phi, phi)
            .with(StateIndex::Theta, theta)
            .with(StateIndex::Z, -target.altitude);

        (state, controls, alpha)
    }

    /// State derivative at a decision vector, without any finiteness check.
    /// Points the equations cannot be evaluated at come back as NaN.
    pub fn derivative(&self, param: &[f64]) -> StateVector {
        let (state, controls, _) = self.operating_point(param);
        self.eom
            .evaluate(&state, &controls)
            .unwrap_or_else(|_| StateVector::repeat(f64::NAN))
    }

    /// The accelerations that must vanish at equilibrium.
    pub fn residual(&self, param: &[f64]) -> Vec<f64> {
        let derivative = self.derivative(param);
        self.mode
            .residual_indices()
            .iter()
            .map(|index| derivative[index.index()])
            .collect()
    }

    /// Central-difference Jacobian of the residual, `None` if any entry is
    /// non-finite.
    pub fn jacobian(&self, param: &[f64]) -> Option<DMatrix<f64>> {
        let n = param.len();
        let m = self.mode.dimension();
        let mut jacobian = DMatrix::zeros(m, n);

        for j in 0..n {
            let h = self.jacobian_step * param[j].abs().max(1.0);
            let mut plus = param.to_vec();
            let mut minus = param.to_vec();
            plus[j] += h;
            minus[j] -= h;

            let column = (DVector::from_vec(self.residual(&plus))
                - DVector::from_vec(self.residual(&minus)))
                / (2.0 * h);
            jacobian.set_column(j, &column);
        }

        jacobian.iter().all(|v| v.is_finite()).then_some(jacobian)
    }
}

/// Merit value `½‖r‖²`; non-finite residuals map to +∞ so the line search
/// backs away from them.
pub fn merit(residual: &[f64]) -> f64 {
    let value = 0.5 * residual.iter().map(|r| r * r).sum::<f64>();
    if value.is_finite() {
        value
    } else {
        f64::INFINITY
    }
}

impl<A: AerodynamicModel> CostFunction for TrimProblem<'_, A> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, ArgminError> {
        if param.len() != self.mode.dimension() {
            return Err(ArgminError::msg(format!(
                "trim parameter vector must have length {}",
                self.mode.dimension()
            )));
        }
        Ok(merit(&self.residual(param)))
    }
}

impl<A: AerodynamicModel> Gradient for TrimProblem<'_, A> {
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, ArgminError> {
        let jacobian = self
            .jacobian(param)
            .ok_or_else(|| ArgminError::msg("non-finite trim Jacobian"))?;
        let residual = DVector::from_vec(self.residual(param));
        Ok((jacobian.transpose() * residual).iter().copied().collect())
    }
}
