use thiserror::Error;

use crate::components::aircraft::config::ConfigError;

#[derive(Error, Debug)]
pub enum FlightDynamicsError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Trim did not converge after {iterations} iterations: {reason} (residual {residual:.3e})")]
    Convergence {
        iterations: usize,
        residual: f64,
        reason: String,
    },

    #[error("Infeasible trim: {0}")]
    InfeasibleTrim(String),

    #[error("Linearization failed: {0}")]
    Linearization(String),

    #[error("Integration failed at t = {time:.6} s (step {step:.3e} s): {reason}")]
    Integration { time: f64, step: f64, reason: String },

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl FlightDynamicsError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameter(_) => "invalid_parameter",
            Self::Convergence { .. } => "convergence",
            Self::InfeasibleTrim(_) => "infeasible_trim",
            Self::Linearization(_) => "linearization",
            Self::Integration { .. } => "integration",
            Self::Config(_) => "config",
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}

pub type Result<T, E = FlightDynamicsError> = std::result::Result<T, E>;

/// Fails with `InvalidParameter` unless `value` is finite and strictly positive.
pub fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FlightDynamicsError::invalid(format!(
            "{name} must be greater than 0 (got {value})"
        )))
    }
}

/// Fails with `InvalidParameter` unless `value` is finite and not negative.
pub fn ensure_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FlightDynamicsError::invalid(format!(
            "{name} must be greater than or equal to 0 (got {value})"
        )))
    }
}

pub fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FlightDynamicsError::invalid(format!(
            "{name} must be finite (got {value})"
        )))
    }
}
