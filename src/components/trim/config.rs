use serde::{Deserialize, Serialize};

use crate::utils::{
    deg_to_rad, ensure_positive, FlightDynamicsError, Result, MAX_AILERON_DEFLECTION,
    MAX_BANK_ANGLE, MAX_ELEVATOR_DEFLECTION, MAX_PITCH_ATTITUDE, MAX_RUDDER_DEFLECTION,
    MAX_SIDESLIP, MIN_ANGLE_OF_ATTACK, STALL_ANGLE_OF_ATTACK,
};

/// Configuration for the trim solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimSolverConfig {
    /// Maximum number of Newton iterations
    pub max_iterations: usize,
    /// Convergence tolerance on the infinity norm of the residual (SI units)
    pub tolerance: f64,
    /// Relative step of the central-difference residual Jacobian
    pub jacobian_step: f64,
    /// Maximum backtracking steps per Newton iteration
    pub line_search_iterations: u64,
    /// Sufficient-decrease constant of the Armijo condition
    pub armijo_constant: f64,
    /// Step contraction factor between backtracking steps
    pub backtrack_factor: f64,
    /// Bounds for longitudinal control surfaces and states
    pub longitudinal_bounds: LongitudinalBounds,
    /// Bounds for lateral control surfaces and states
    pub lateral_bounds: LateralBounds,
}

/// Physical limits a converged longitudinal trim must respect (rad, throttle fraction).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalBounds {
    pub elevator_range: (f64, f64),
    pub throttle_range: (f64, f64),
    /// Upper end is the stall angle.
    pub alpha_range: (f64, f64),
    pub theta_range: (f64, f64),
}

impl Default for LongitudinalBounds {
    fn default() -> Self {
        Self {
            elevator_range: symmetric(MAX_ELEVATOR_DEFLECTION),
            throttle_range: (0.0, 1.0),
            alpha_range: (
                deg_to_rad(MIN_ANGLE_OF_ATTACK),
                deg_to_rad(STALL_ANGLE_OF_ATTACK),
            ),
            theta_range: symmetric(MAX_PITCH_ATTITUDE),
        }
    }
}

/// Physical limits a converged lateral trim must respect (rad).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateralBounds {
    pub aileron_range: (f64, f64),
    pub rudder_range: (f64, f64),
    pub beta_range: (f64, f64),
    pub phi_range: (f64, f64),
}

impl Default for LateralBounds {
    fn default() -> Self {
        Self {
            aileron_range: symmetric(MAX_AILERON_DEFLECTION),
            rudder_range: symmetric(MAX_RUDDER_DEFLECTION),
            beta_range: symmetric(MAX_SIDESLIP),
            phi_range: symmetric(MAX_BANK_ANGLE),
        }
    }
}

fn symmetric(limit_deg: f64) -> (f64, f64) {
    (-deg_to_rad(limit_deg), deg_to_rad(limit_deg))
}

impl Default for TrimSolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance: 1e-6,
            jacobian_step: 1e-6,
            line_search_iterations: 30,
            armijo_constant: 1e-4,
            backtrack_factor: 0.5,
            longitudinal_bounds: LongitudinalBounds::default(),
            lateral_bounds: LateralBounds::default(),
        }
    }
}

impl TrimSolverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(FlightDynamicsError::invalid(
                "max_iterations must be greater than 0",
            ));
        }
        ensure_positive("tolerance", self.tolerance)?;
        ensure_positive("jacobian_step", self.jacobian_step)?;
        if !(self.armijo_constant > 0.0 && self.armijo_constant < 1.0) {
            return Err(FlightDynamicsError::invalid(format!(
                "armijo_constant must lie in (0, 1) (got {})",
                self.armijo_constant
            )));
        }
        if !(self.backtrack_factor > 0.0 && self.backtrack_factor < 1.0) {
            return Err(FlightDynamicsError::invalid(format!(
                "backtrack_factor must lie in (0, 1) (got {})",
                self.backtrack_factor
            )));
        }

        let ranges = [
            ("elevator_range", self.longitudinal_bounds.elevator_range),
            ("throttle_range", self.longitudinal_bounds.throttle_range),
            ("alpha_range", self.longitudinal_bounds.alpha_range),
            ("theta_range", self.longitudinal_bounds.theta_range),
            ("aileron_range", self.lateral_bounds.aileron_range),
            ("rudder_range", self.lateral_bounds.rudder_range),
            ("beta_range", self.lateral_bounds.beta_range),
            ("phi_range", self.lateral_bounds.phi_range),
        ];
        for (name, (low, high)) in ranges {
            if !(low <= high) {
                return Err(FlightDynamicsError::invalid(format!(
                    "{name} lower bound {low} exceeds upper bound {high}"
                )));
            }
        }
        Ok(())
    }
}
