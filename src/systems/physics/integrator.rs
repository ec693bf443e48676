use std::fmt;

use tracing::{debug, trace};

use super::equations_of_motion::EquationsOfMotion;
use crate::components::aircraft::{
    AircraftAeroCoefficients, AircraftConfig, AircraftControls, AircraftState, StateVector,
    STATE_DIM,
};
use crate::components::trajectory::{ControlSchedule, IntegratorConfig, TrajectorySample};
use crate::resources::{Atmosphere, PhysicsConfig};
use crate::systems::aerodynamics::AerodynamicModel;
use crate::utils::{ensure_finite, FlightDynamicsError, Result};

// Dormand-Prince 5(4) tableau.
const C: [f64; 7] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];
const A2: [f64; 1] = [1.0 / 5.0];
const A3: [f64; 2] = [3.0 / 40.0, 9.0 / 40.0];
const A4: [f64; 3] = [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0];
const A5: [f64; 4] = [
    19372.0 / 6561.0,
    -25360.0 / 2187.0,
    64448.0 / 6561.0,
    -212.0 / 729.0,
];
const A6: [f64; 5] = [
    9017.0 / 3168.0,
    -355.0 / 33.0,
    46732.0 / 5247.0,
    49.0 / 176.0,
    -5103.0 / 18656.0,
];
// Fifth-order weights; also the last row of the tableau (FSAL).
const B: [f64; 6] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
];
// Fifth- minus fourth-order weights.
const E: [f64; 7] = [
    71.0 / 57600.0,
    0.0,
    -71.0 / 16695.0,
    71.0 / 1920.0,
    -17253.0 / 339200.0,
    22.0 / 525.0,
    -1.0 / 40.0,
];

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

/// Adaptive Dormand-Prince integrator for the nonlinear equations of motion.
#[derive(Debug, Clone, Default)]
pub struct Integrator {
    config: IntegratorConfig,
    physics: PhysicsConfig,
}

impl Integrator {
    pub fn new(config: IntegratorConfig) -> Self {
        Self {
            config,
            physics: PhysicsConfig::default(),
        }
    }

    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    /// Prepares a lazy simulation of `duration` seconds from `initial_state`.
    ///
    /// Nothing is integrated until the returned trajectory is iterated.
    pub fn integrate<'a, A: AerodynamicModel, S: ControlSchedule>(
        &self,
        aircraft: &'a AircraftConfig<A>,
        atmosphere: &'a Atmosphere,
        initial_state: AircraftState,
        schedule: S,
        duration: f64,
    ) -> Result<Trajectory<'a, A, S>> {
        self.config.validate()?;
        self.physics.validate()?;
        aircraft.validate()?;
        ensure_finite("duration", duration)?;
        if duration < 0.0 {
            return Err(FlightDynamicsError::invalid(format!(
                "duration must not be negative (got {duration})"
            )));
        }
        if !initial_state.is_finite() {
            return Err(FlightDynamicsError::invalid("initial state must be finite"));
        }

        let mut breakpoints: Vec<f64> = schedule
            .discontinuities()
            .into_iter()
            .filter(|t| t.is_finite() && *t > 0.0 && *t < duration)
            .collect();
        breakpoints.sort_by(f64::total_cmp);
        breakpoints.dedup();

        Ok(Trajectory {
            eom: EquationsOfMotion::new(aircraft, atmosphere, &self.physics),
            schedule,
            initial_state,
            duration,
            config: self.config,
            breakpoints,
        })
    }
}

/// A simulation that has not been run yet.
///
/// Every call to [`Trajectory::iter`] integrates again from the initial
/// state, so a trajectory can be replayed any number of times.
pub struct Trajectory<'a, A = AircraftAeroCoefficients, S = AircraftControls> {
    eom: EquationsOfMotion<'a, A>,
    schedule: S,
    initial_state: AircraftState,
    duration: f64,
    config: IntegratorConfig,
    breakpoints: Vec<f64>,
}

impl<A, S> fmt::Debug for Trajectory<'_, A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trajectory")
            .field("initial_state", &self.initial_state)
            .field("duration", &self.duration)
            .field("config", &self.config)
            .field("breakpoints", &self.breakpoints)
            .finish_non_exhaustive()
    }
}

impl<'a, A: AerodynamicModel, S: ControlSchedule> Trajectory<'a, A, S> {
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn initial_state(&self) -> &AircraftState {
        &self.initial_state
    }

    pub fn schedule(&self) -> &S {
        &self.schedule
    }

    pub fn iter(&self) -> TrajectoryIter<'_, 'a, A, S> {
        TrajectoryIter {
            trajectory: self,
            time: 0.0,
            state: *self.initial_state.as_vector(),
            step: self.config.initial_step.min(self.config.max_step),
            fsal: None,
            attempts: 0,
            next_output: 1,
            next_break: 0,
            started: false,
            finished: false,
        }
    }

    /// Runs the whole simulation, stopping at the first error.
    pub fn collect_samples(&self) -> Result<Vec<TrajectorySample>> {
        self.iter().collect()
    }

    fn controls_at(&self, time: f64, state: &StateVector) -> AircraftControls {
        self.schedule
            .controls(time, &AircraftState::from_vector(*state))
    }
}

impl<'t, 'a, A: AerodynamicModel, S: ControlSchedule> IntoIterator for &'t Trajectory<'a, A, S> {
    type Item = Result<TrajectorySample>;
    type IntoIter = TrajectoryIter<'t, 'a, A, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazily advancing view over a [`Trajectory`].
pub struct TrajectoryIter<'t, 'a, A, S> {
    trajectory: &'t Trajectory<'a, A, S>,
    time: f64,
    state: StateVector,
    step: f64,
    /// Derivative at the current point carried over from the last stage.
    fsal: Option<StateVector>,
    attempts: usize,
    next_output: usize,
    next_break: usize,
    started: bool,
    finished: bool,
}

struct StepOutcome {
    state: StateVector,
    last_stage: StateVector,
    error_norm: f64,
}

impl<A: AerodynamicModel, S: ControlSchedule> TrajectoryIter<'_, '_, A, S> {
    fn sample(&self) -> TrajectorySample {
        TrajectorySample {
            time: self.time,
            state: AircraftState::from_vector(self.state),
            controls: self.trajectory.controls_at(self.time, &self.state),
        }
    }

    fn tolerance(time: f64) -> f64 {
        1e-12 * time.abs().max(1.0)
    }

    fn output_time(&self) -> Option<f64> {
        self.trajectory
            .config
            .output_interval
            .map(|interval| self.next_output as f64 * interval)
    }

    /// Next time a step must land on exactly, and whether it is a schedule
    /// discontinuity.
    fn next_stop(&self) -> (f64, bool) {
        let duration = self.trajectory.duration;
        let mut stop = (duration, false);
        if let Some(output) = self.output_time() {
            if output < stop.0 {
                stop = (output, false);
            }
        }
        if let Some(&breakpoint) = self.trajectory.breakpoints.get(self.next_break) {
            if breakpoint <= stop.0 {
                stop = (breakpoint, true);
            }
        }
        stop
    }

    fn integration_error(&self, step: f64, reason: impl Into<String>) -> FlightDynamicsError {
        FlightDynamicsError::Integration {
            time: self.time,
            step,
            reason: reason.into(),
        }
    }

    fn rhs(&self, time: f64, control_time: f64, state: &StateVector, step: f64) -> Result<StateVector> {
        let controls = self.trajectory.controls_at(control_time, state);
        let derivative = self
            .trajectory
            .eom
            .evaluate(&AircraftState::from_vector(*state), &controls)
            .map_err(|err| FlightDynamicsError::Integration {
                time,
                step,
                reason: err.to_string(),
            })?;
        if derivative.iter().all(|v| v.is_finite()) && controls.is_finite() {
            Ok(derivative)
        } else {
            Err(FlightDynamicsError::Integration {
                time,
                step,
                reason: "non-finite state derivative".to_string(),
            })
        }
    }

    /// One Dormand-Prince step of size `h`. Stages at the end of a step
    /// that finishes on a discontinuity see the controls from just before it.
    fn attempt(&self, h: f64, k1: StateVector, ends_on_break: bool) -> Result<StepOutcome> {
        let t = self.time;
        let y = self.state;
        let end = t + h;
        let control_time = |c: f64| {
            let time = t + c * h;
            if ends_on_break && time >= end {
                end - end.abs().max(1.0) * f64::EPSILON
            } else {
                time
            }
        };
        let stage = |c: f64, y: &StateVector| self.rhs(t + c * h, control_time(c), y, h);

        let k2 = stage(C[1], &(y + h * A2[0] * k1))?;
        let k3 = stage(C[2], &(y + h * (A3[0] * k1 + A3[1] * k2)))?;
        let k4 = stage(C[3], &(y + h * (A4[0] * k1 + A4[1] * k2 + A4[2] * k3)))?;
        let k5 = stage(
            C[4],
            &(y + h * (A5[0] * k1 + A5[1] * k2 + A5[2] * k3 + A5[3] * k4)),
        )?;
        let k6 = stage(
            C[5],
            &(y + h * (A6[0] * k1 + A6[1] * k2 + A6[2] * k3 + A6[3] * k4 + A6[4] * k5)),
        )?;
        let y_new = y + h * (B[0] * k1 + B[2] * k3 + B[3] * k4 + B[4] * k5 + B[5] * k6);
        let k7 = stage(C[6], &y_new)?;

        let error = h
            * (E[0] * k1 + E[2] * k3 + E[3] * k4 + E[4] * k5 + E[5] * k6 + E[6] * k7);
        let rtol = self.trajectory.config.rtol;
        let atol = self.trajectory.config.atol;
        let sum: f64 = (0..STATE_DIM)
            .map(|i| {
                let scale = atol + rtol * y[i].abs().max(y_new[i].abs());
                (error[i] / scale).powi(2)
            })
            .sum();

        Ok(StepOutcome {
            state: y_new,
            last_stage: k7,
            error_norm: (sum / STATE_DIM as f64).sqrt(),
        })
    }

    /// Takes accepted steps until the next sample is due.
    fn advance(&mut self) -> Result<TrajectorySample> {
        let config = self.trajectory.config;
        loop {
            let (stop, is_break) = self.next_stop();
            let remaining = stop - self.time;
            let truncated = self.step >= remaining;
            let h = if truncated { remaining } else { self.step };

            if self.attempts >= config.max_steps {
                return Err(self.integration_error(h, "maximum number of steps exhausted"));
            }
            self.attempts += 1;

            let k1 = match self.fsal {
                Some(k1) => k1,
                None => self.rhs(self.time, self.time, &self.state, h)?,
            };
            let outcome = self.attempt(h, k1, truncated && is_break)?;
            let norm = outcome.error_norm;

            if norm.is_nan() || norm > 1.0 {
                let factor = if norm.is_finite() {
                    (SAFETY * norm.powf(-0.2)).clamp(MIN_FACTOR, 1.0)
                } else {
                    MIN_FACTOR
                };
                self.step = h * factor;
                self.fsal = Some(k1);
                trace!(time = self.time, step = h, error = norm, "step rejected");
                if self.step < config.min_step {
                    return Err(self.integration_error(
                        self.step,
                        format!("step size fell below the minimum of {:e} s", config.min_step),
                    ));
                }
                continue;
            }

            let factor = if norm == 0.0 {
                MAX_FACTOR
            } else {
                (SAFETY * norm.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
            };
            if !truncated {
                self.step = (h * factor).min(config.max_step);
            }
            self.time = if truncated { stop } else { self.time + h };
            self.state = outcome.state;
            self.fsal = Some(outcome.last_stage);

            let tolerance = Self::tolerance(self.time);
            while let Some(&breakpoint) = self.trajectory.breakpoints.get(self.next_break) {
                if breakpoint > self.time + tolerance {
                    break;
                }
                self.next_break += 1;
                // Controls jump here, so the carried-over stage is stale.
                self.fsal = None;
            }

            let mut due = config.output_interval.is_none();
            while let Some(output) = self.output_time() {
                if output > self.time + tolerance {
                    break;
                }
                self.next_output += 1;
                due = true;
            }

            if self.trajectory.duration - self.time <= tolerance {
                self.time = self.trajectory.duration;
                self.finished = true;
                debug!(steps = self.attempts, time = self.time, "integration finished");
                return Ok(self.sample());
            }
            if due {
                return Ok(self.sample());
            }
        }
    }
}

impl<A: AerodynamicModel, S: ControlSchedule> Iterator for TrajectoryIter<'_, '_, A, S> {
    type Item = Result<TrajectorySample>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            if self.trajectory.duration <= Self::tolerance(0.0) {
                self.finished = true;
            }
            return Some(Ok(self.sample()));
        }
        match self.advance() {
            Ok(sample) => Some(Ok(sample)),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
