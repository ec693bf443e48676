use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::aircraft::{AircraftControls, AircraftState, ControlIndex};
use crate::utils::{ensure_finite, ensure_positive, FlightDynamicsError, Result};

/// Step-size control for the Dormand-Prince integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorConfig {
    pub rtol: f64,
    pub atol: f64,
    pub initial_step: f64,
    /// A proposed step below this is an integration failure.
    pub min_step: f64,
    pub max_step: f64,
    pub max_steps: usize,
    /// Emit samples on this grid instead of at every accepted step.
    pub output_interval: Option<f64>,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            rtol: 1e-6,
            atol: 1e-8,
            initial_step: 1e-2,
            min_step: 1e-10,
            max_step: 1.0,
            max_steps: 1_000_000,
            output_interval: None,
        }
    }
}

impl IntegratorConfig {
    pub fn with_output_interval(mut self, interval: f64) -> Self {
        self.output_interval = Some(interval);
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("rtol", self.rtol)?;
        ensure_positive("atol", self.atol)?;
        ensure_positive("initial_step", self.initial_step)?;
        ensure_positive("min_step", self.min_step)?;
        ensure_positive("max_step", self.max_step)?;
        if self.min_step > self.max_step {
            return Err(FlightDynamicsError::invalid(format!(
                "min_step {} exceeds max_step {}",
                self.min_step, self.max_step
            )));
        }
        if self.max_steps == 0 {
            return Err(FlightDynamicsError::invalid("max_steps must be at least 1"));
        }
        if let Some(interval) = self.output_interval {
            ensure_positive("output_interval", interval)?;
        }
        Ok(())
    }
}

/// One point of a simulated trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub time: f64,
    pub state: AircraftState,
    /// Controls applied at `time`.
    pub controls: AircraftControls,
}

/// Control inputs as a function of time during a simulation.
///
/// Implementations must be piecewise smooth. Times where the output jumps
/// are listed by [`ControlSchedule::discontinuities`] so the integrator can
/// end a step exactly on them.
pub trait ControlSchedule: Send + Sync {
    fn controls(&self, time: f64, state: &AircraftState) -> AircraftControls;

    fn discontinuities(&self) -> Vec<f64> {
        Vec::new()
    }
}

impl ControlSchedule for AircraftControls {
    fn controls(&self, _time: f64, _state: &AircraftState) -> AircraftControls {
        *self
    }
}

impl<S: ControlSchedule + ?Sized> ControlSchedule for &S {
    fn controls(&self, time: f64, state: &AircraftState) -> AircraftControls {
        (**self).controls(time, state)
    }

    fn discontinuities(&self) -> Vec<f64> {
        (**self).discontinuities()
    }
}

impl<S: ControlSchedule + ?Sized> ControlSchedule for Box<S> {
    fn controls(&self, time: f64, state: &AircraftState) -> AircraftControls {
        (**self).controls(time, state)
    }

    fn discontinuities(&self) -> Vec<f64> {
        (**self).discontinuities()
    }
}

/// A step of `amplitude` on one channel, active on `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPulse {
    pub base: AircraftControls,
    pub channel: ControlIndex,
    pub amplitude: f64,
    pub start: f64,
    pub end: f64,
}

impl ControlPulse {
    pub fn new(
        base: AircraftControls,
        channel: ControlIndex,
        amplitude: f64,
        start: f64,
        end: f64,
    ) -> Result<Self> {
        ensure_finite("amplitude", amplitude)?;
        ensure_finite("start", start)?;
        ensure_finite("end", end)?;
        if end < start {
            return Err(FlightDynamicsError::invalid(format!(
                "pulse ends at {end} s before it starts at {start} s"
            )));
        }
        if !base.is_finite() {
            return Err(FlightDynamicsError::invalid("base controls must be finite"));
        }
        Ok(Self {
            base,
            channel,
            amplitude,
            start,
            end,
        })
    }

    pub fn is_active(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }
}

impl ControlSchedule for ControlPulse {
    fn controls(&self, time: f64, _state: &AircraftState) -> AircraftControls {
        if self.is_active(time) {
            let value = self.base.get(self.channel) + self.amplitude;
            self.base.with(self.channel, value)
        } else {
            self.base
        }
    }

    fn discontinuities(&self) -> Vec<f64> {
        vec![self.start, self.end]
    }
}

/// Controls from a closure of time and state.
pub struct FnSchedule<F> {
    f: F,
    discontinuities: Vec<f64>,
}

impl<F> FnSchedule<F>
where
    F: Fn(f64, &AircraftState) -> AircraftControls + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            discontinuities: Vec::new(),
        }
    }

    pub fn with_discontinuities(mut self, times: impl IntoIterator<Item = f64>) -> Self {
        self.discontinuities.extend(times);
        self
    }
}

impl<F> fmt::Debug for FnSchedule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSchedule")
            .field("discontinuities", &self.discontinuities)
            .finish_non_exhaustive()
    }
}

impl<F> ControlSchedule for FnSchedule<F>
where
    F: Fn(f64, &AircraftState) -> AircraftControls + Send + Sync,
{
    fn controls(&self, time: f64, state: &AircraftState) -> AircraftControls {
        (self.f)(time, state)
    }

    fn discontinuities(&self) -> Vec<f64> {
        self.discontinuities.clone()
    }
}
