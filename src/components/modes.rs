use nalgebra::{Complex, Vector4};
use serde::{Deserialize, Serialize};
use std::f64::consts::{LN_2, PI};
use std::fmt;

use crate::components::linear::Subsystem;
use crate::utils::{ensure_non_negative, ensure_positive, FlightDynamicsError, Result};

/// Thresholds used to label and judge eigenvalues.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeClassifierConfig {
    /// A root is real when |Im λ| ≤ this × max(1, |λ|).
    pub complex_tolerance: f64,
    /// Longitudinal real roots at least this fast (rad/s) are short-period.
    pub short_period_min_frequency: f64,
    /// A mode is stable when Re λ < −margin.
    pub stability_margin: f64,
    /// Inverse-iteration sweeps used for each mode shape.
    pub shape_iterations: usize,
    /// Relative shift off the eigenvalue keeping inverse iteration solvable.
    pub shape_shift: f64,
}

impl Default for ModeClassifierConfig {
    fn default() -> Self {
        Self {
            complex_tolerance: 1e-9,
            short_period_min_frequency: 1.0,
            stability_margin: 0.0,
            shape_iterations: 3,
            shape_shift: 1e-10,
        }
    }
}

impl ModeClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("complex_tolerance", self.complex_tolerance)?;
        ensure_non_negative("short_period_min_frequency", self.short_period_min_frequency)?;
        ensure_non_negative("stability_margin", self.stability_margin)?;
        ensure_positive("shape_shift", self.shape_shift)?;
        if self.shape_iterations == 0 {
            return Err(FlightDynamicsError::invalid(
                "shape_iterations must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Named natural modes of a conventional aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    ShortPeriod,
    Phugoid,
    DutchRoll,
    /// Slow lateral oscillation from a coupled roll and spiral.
    LateralPhugoid,
    Roll,
    Spiral,
}

impl ModeKind {
    pub fn name(self) -> &'static str {
        match self {
            ModeKind::ShortPeriod => "short period",
            ModeKind::Phugoid => "phugoid",
            ModeKind::DutchRoll => "dutch roll",
            ModeKind::LateralPhugoid => "lateral phugoid",
            ModeKind::Roll => "roll",
            ModeKind::Spiral => "spiral",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Qualitative time response of one mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ModeResponse {
    DampedOscillation { period: f64, time_to_half: f64 },
    DivergentOscillation { period: f64, time_to_double: f64 },
    Subsidence { time_constant: f64, time_to_half: f64 },
    Divergence { time_to_double: f64 },
    Neutral,
}

/// One natural mode. Conjugate pairs appear once, with Im λ > 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigenmode {
    pub kind: ModeKind,
    pub subsystem: Subsystem,
    pub eigenvalue: Complex<f64>,
    /// |λ| (rad/s).
    pub natural_frequency: f64,
    /// −Re λ / |λ|; ±1 for real roots.
    pub damping_ratio: f64,
    /// 2 for a conjugate pair, 1 for a real root.
    pub multiplicity: usize,
    /// Eigenvector over the subsystem states, largest component 1.
    pub shape: Vector4<Complex<f64>>,
    pub stable: bool,
}

impl Eigenmode {
    pub fn new(
        kind: ModeKind,
        subsystem: Subsystem,
        eigenvalue: Complex<f64>,
        shape: Vector4<Complex<f64>>,
        stability_margin: f64,
    ) -> Self {
        let natural_frequency = eigenvalue.norm();
        let damping_ratio = if natural_frequency > 0.0 {
            -eigenvalue.re / natural_frequency
        } else {
            0.0
        };
        Self {
            kind,
            subsystem,
            eigenvalue,
            natural_frequency,
            damping_ratio,
            multiplicity: if eigenvalue.im != 0.0 { 2 } else { 1 },
            shape,
            stable: eigenvalue.re < -stability_margin,
        }
    }

    pub fn real(&self) -> f64 {
        self.eigenvalue.re
    }

    pub fn imag(&self) -> f64 {
        self.eigenvalue.im
    }

    pub fn is_oscillatory(&self) -> bool {
        self.multiplicity == 2
    }

    /// Damped period (s) of an oscillatory mode.
    pub fn period(&self) -> Option<f64> {
        self.is_oscillatory().then(|| 2.0 * PI / self.eigenvalue.im.abs())
    }

    /// τ = −1/λ for a decaying real root.
    pub fn time_constant(&self) -> Option<f64> {
        (!self.is_oscillatory() && self.eigenvalue.re < 0.0).then(|| -1.0 / self.eigenvalue.re)
    }

    pub fn time_to_half(&self) -> Option<f64> {
        (self.eigenvalue.re < 0.0).then(|| LN_2 / -self.eigenvalue.re)
    }

    pub fn time_to_double(&self) -> Option<f64> {
        (self.eigenvalue.re > 0.0).then(|| LN_2 / self.eigenvalue.re)
    }

    pub fn response(&self) -> ModeResponse {
        let re = self.eigenvalue.re;
        match (self.period(), self.time_constant()) {
            (Some(period), _) if re < 0.0 => ModeResponse::DampedOscillation {
                period,
                time_to_half: LN_2 / -re,
            },
            (Some(period), _) if re > 0.0 => ModeResponse::DivergentOscillation {
                period,
                time_to_double: LN_2 / re,
            },
            (None, Some(time_constant)) => ModeResponse::Subsidence {
                time_constant,
                time_to_half: LN_2 / -re,
            },
            (None, None) if re > 0.0 => ModeResponse::Divergence {
                time_to_double: LN_2 / re,
            },
            _ => ModeResponse::Neutral,
        }
    }
}

/// Modes of both subsystems, each list sorted by natural frequency,
/// fastest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalAnalysis {
    pub longitudinal: Vec<Eigenmode>,
    pub lateral: Vec<Eigenmode>,
}

impl ModalAnalysis {
    pub fn modes(&self, subsystem: Subsystem) -> &[Eigenmode] {
        match subsystem {
            Subsystem::Longitudinal => &self.longitudinal,
            Subsystem::Lateral => &self.lateral,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Eigenmode> {
        self.longitudinal.iter().chain(self.lateral.iter())
    }

    /// The fastest mode labelled `kind`.
    pub fn find(&self, kind: ModeKind) -> Option<&Eigenmode> {
        self.iter().find(|mode| mode.kind == kind)
    }

    pub fn is_stable(&self) -> bool {
        self.iter().all(|mode| mode.stable)
    }

    pub fn unstable_modes(&self) -> impl Iterator<Item = &Eigenmode> {
        self.iter().filter(|mode| !mode.stable)
    }
}
