use argmin::core::{Executor, State};
use argmin::solver::linesearch::{condition::ArmijoCondition, BacktrackingLineSearch, LineSearch};
use nalgebra::DVector;
use tracing::{debug, info};

use super::problem::{merit, TrimProblem};
use crate::components::aircraft::{AircraftConfig, AircraftControls, AircraftState};
use crate::components::trim::{TrimResiduals, TrimSolverConfig, TrimState, TrimTarget};
use crate::resources::{Atmosphere, PhysicsConfig};
use crate::systems::aerodynamics::AerodynamicModel;
use crate::systems::physics::EquationsOfMotion;
use crate::utils::{rad_to_deg, FlightDynamicsError, Result};

type TrimLineSearch = BacktrackingLineSearch<Vec<f64>, Vec<f64>, ArmijoCondition<f64>, f64>;

/// Newton trim solver with a backtracking line search.
#[derive(Debug, Clone, Default)]
pub struct TrimSolver {
    config: TrimSolverConfig,
    physics: PhysicsConfig,
}

impl TrimSolver {
    pub fn new(config: TrimSolverConfig) -> Self {
        Self {
            config,
            physics: PhysicsConfig::default(),
        }
    }

    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    pub fn config(&self) -> &TrimSolverConfig {
        &self.config
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Finds the equilibrium for `target`.
    ///
    /// Fails with `InvalidParameter` for a non-physical aircraft or target,
    /// `Convergence` when the residual cannot be driven below tolerance within
    /// the iteration budget, and `InfeasibleTrim` when the equilibrium needs
    /// a control, α or attitude beyond the configured limits.
    pub fn find_trim<A: AerodynamicModel>(
        &self,
        aircraft: &AircraftConfig<A>,
        atmosphere: &Atmosphere,
        target: &TrimTarget,
    ) -> Result<TrimState> {
        self.config.validate()?;
        self.physics.validate()?;
        aircraft.validate()?;
        target.validate()?;

        let eom = EquationsOfMotion::new(aircraft, atmosphere, &self.physics);
        self.solve(&eom, target)
    }

    /// Runs the Newton iteration against already-validated dynamics.
    pub fn solve<A: AerodynamicModel>(
        &self,
        eom: &EquationsOfMotion<'_, A>,
        target: &TrimTarget,
    ) -> Result<TrimState> {
        let problem = TrimProblem::new(eom, *target, self.config.jacobian_step);
        let mut param = problem.initial_guess();
        let mut residual = problem.residual(&param);
        let mut norm = infinity_norm(&residual);

        debug!(
            condition = ?target.condition(),
            mode = ?problem.mode(),
            "starting trim"
        );

        for iteration in 0..=self.config.max_iterations {
            if !norm.is_finite() {
                return Err(convergence(iteration, norm, "non-finite residual"));
            }
            debug!(iteration, residual = norm, param = ?param, "trim iteration");

            if norm < self.config.tolerance {
                return self.finish(eom, &problem, &param, iteration);
            }
            if iteration == self.config.max_iterations {
                break;
            }

            let jacobian = problem
                .jacobian(&param)
                .ok_or_else(|| convergence(iteration, norm, "non-finite trim Jacobian"))?;
            let rhs = -DVector::from_column_slice(&residual);
            let step = jacobian
                .lu()
                .solve(&rhs)
                .ok_or_else(|| convergence(iteration, norm, "singular trim Jacobian"))?;

            param = self.line_search(&problem, param, step.iter().copied().collect(), iteration)?;
            residual = problem.residual(&param);
            norm = infinity_norm(&residual);
        }

        Err(convergence(
            self.config.max_iterations,
            norm,
            "iteration budget exhausted",
        ))
    }

    /// Armijo backtracking along the Newton direction.
    fn line_search<A: AerodynamicModel>(
        &self,
        problem: &TrimProblem<'_, A>,
        param: Vec<f64>,
        direction: Vec<f64>,
        iteration: usize,
    ) -> Result<Vec<f64>> {
        let current = merit(&problem.residual(&param));
        let residual_norm = (2.0 * current).sqrt();
        let argmin_failure =
            |e: argmin::core::Error| convergence(iteration, residual_norm, e.to_string());

        let condition = ArmijoCondition::new(self.config.armijo_constant).map_err(argmin_failure)?;
        let mut linesearch: TrimLineSearch = BacktrackingLineSearch::new(condition)
            .rho(self.config.backtrack_factor)
            .map_err(argmin_failure)?;
        linesearch.search_direction(direction);
        linesearch
            .initial_step_length(1.0)
            .map_err(argmin_failure)?;

        let max_iters = self.config.line_search_iterations;
        let result = Executor::new(problem.clone(), linesearch)
            .configure(|state| state.param(param).max_iters(max_iters))
            .run()
            .map_err(argmin_failure)?;

        let best_cost = result.state.get_best_cost();
        match result.state.get_best_param() {
            Some(best) if best_cost < current => Ok(best.clone()),
            _ => Err(convergence(
                iteration,
                residual_norm,
                "line search could not reduce the residual",
            )),
        }
    }

    fn finish<A: AerodynamicModel>(
        &self,
        eom: &EquationsOfMotion<'_, A>,
        problem: &TrimProblem<'_, A>,
        param: &[f64],
        iterations: usize,
    ) -> Result<TrimState> {
        let (state, controls, alpha) = problem.operating_point(param);
        let derivative = eom.derivative(&state, &controls)?;
        let residuals = TrimResiduals::from_derivative(&derivative);

        self.check_bounds(&state, &controls, alpha)?;

        info!(
            aircraft = %eom.aircraft().name,
            alpha_deg = rad_to_deg(alpha),
            elevator_deg = rad_to_deg(controls.elevator()),
            throttle = controls.throttle(),
            phi_deg = rad_to_deg(state.phi()),
            iterations,
            "trim converged"
        );

        Ok(TrimState::new(
            state,
            controls,
            alpha,
            residuals,
            iterations,
            *problem.target(),
        ))
    }

    fn check_bounds(
        &self,
        state: &AircraftState,
        controls: &AircraftControls,
        alpha: f64,
    ) -> Result<()> {
        let longitudinal = &self.config.longitudinal_bounds;
        let lateral = &self.config.lateral_bounds;

        let angles = [
            ("angle of attack", alpha, longitudinal.alpha_range),
            ("pitch attitude", state.theta(), longitudinal.theta_range),
            ("elevator", controls.elevator(), longitudinal.elevator_range),
            ("aileron", controls.aileron(), lateral.aileron_range),
            ("rudder", controls.rudder(), lateral.rudder_range),
            ("bank angle", state.phi(), lateral.phi_range),
            ("sideslip", state.v().atan2(state.u().hypot(state.w())), lateral.beta_range),
        ];
        for (name, value, (low, high)) in angles {
            if value < low || value > high {
                return Err(FlightDynamicsError::InfeasibleTrim(format!(
                    "{name} {:.2} deg outside [{:.2}, {:.2}] deg",
                    rad_to_deg(value),
                    rad_to_deg(low),
                    rad_to_deg(high)
                )));
            }
        }

        let (low, high) = longitudinal.throttle_range;
        let throttle = controls.throttle();
        if throttle < low || throttle > high {
            return Err(FlightDynamicsError::InfeasibleTrim(format!(
                "throttle {throttle:.3} outside [{low:.2}, {high:.2}]"
            )));
        }
        Ok(())
    }
}

fn infinity_norm(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, v| {
        if v.is_finite() {
            acc.max(v.abs())
        } else {
            f64::INFINITY
        }
    })
}

fn convergence(iterations: usize, residual: f64, reason: impl Into<String>) -> FlightDynamicsError {
    FlightDynamicsError::Convergence {
        iterations,
        residual,
        reason: reason.into(),
    }
}
