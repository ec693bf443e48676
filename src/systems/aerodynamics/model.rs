use serde::{Deserialize, Serialize};

use crate::components::aircraft::AircraftControls;
use crate::utils::Result;

/// Flow condition handed to an aerodynamic model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AeroInput {
    /// Angle of attack (rad).
    pub alpha: f64,
    /// Sideslip angle (rad).
    pub beta: f64,
    /// Normalised roll rate `p b / 2V`.
    pub p_hat: f64,
    /// Normalised pitch rate `q c / 2V`.
    pub q_hat: f64,
    /// Normalised yaw rate `r b / 2V`.
    pub r_hat: f64,
    pub controls: AircraftControls,
    /// Dynamic pressure (Pa).
    pub dynamic_pressure: f64,
    pub mach: f64,
}

/// Non-dimensional force and moment coefficients.
///
/// Lift and drag are in wind axes, side force and the three moments in body
/// axes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AeroCoefficients {
    pub c_d: f64,
    pub c_y: f64,
    pub c_l: f64,
    /// Rolling moment coefficient.
    pub c_roll: f64,
    pub c_m: f64,
    pub c_n: f64,
}

impl AeroCoefficients {
    pub fn is_finite(&self) -> bool {
        [self.c_d, self.c_y, self.c_l, self.c_roll, self.c_m, self.c_n]
            .iter()
            .all(|c| c.is_finite())
    }
}

/// Anything that can turn a flow condition into aerodynamic coefficients.
///
/// The dynamics only ever see this trait; an aircraft is a parameter set, not
/// a code path. Implementations must be smooth in every input because the
/// trim solver and the linearizer differentiate through them numerically.
pub trait AerodynamicModel: Send + Sync {
    fn coefficients(&self, input: &AeroInput) -> AeroCoefficients;

    /// Physical validity of the model parameters.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl<T: AerodynamicModel + ?Sized> AerodynamicModel for &T {
    fn coefficients(&self, input: &AeroInput) -> AeroCoefficients {
        (**self).coefficients(input)
    }

    fn validate(&self) -> Result<()> {
        (**self).validate()
    }
}

impl<T: AerodynamicModel + ?Sized> AerodynamicModel for Box<T> {
    fn coefficients(&self, input: &AeroInput) -> AeroCoefficients {
        (**self).coefficients(input)
    }

    fn validate(&self) -> Result<()> {
        (**self).validate()
    }
}
