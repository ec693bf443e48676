use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::{ensure_finite, ensure_positive, FlightDynamicsError, Result};

/// Mass and inertia as they appear in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MassProperties {
    pub mass: f64,
    pub ixx: f64,
    pub iyy: f64,
    pub izz: f64,
    #[serde(default)]
    pub ixz: f64,
}

/// Mass model with the inertia tensor and its inverse.
///
/// The inverse is always derived from the moments of inertia, so the two can
/// never disagree. Only the total mass is open for direct edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MassProperties", into = "MassProperties")]
pub struct MassModel {
    /// Total mass of the aircraft (Kg).
    pub mass: f64,
    inertia: Matrix3<f64>,
    inertia_inv: Matrix3<f64>,
}

impl MassModel {
    /// Creates a new `MassModel` instance with specified mass and inertia components.
    ///
    /// # Arguments
    /// * `mass` - Total mass of the aircraft (kg).
    /// * `ixx` - Moment of inertia about the x-axis (kg·m²).
    /// * `iyy` - Moment of inertia about the y-axis (kg·m²).
    /// * `izz` - Moment of inertia about the z-axis (kg·m²).
    /// * `ixz` - Product of inertia between the x and z axes (kg·m²).
    ///
    /// Fails unless the mass is positive and the tensor is positive definite.
    pub fn new(mass: f64, ixx: f64, iyy: f64, izz: f64, ixz: f64) -> Result<Self> {
        ensure_positive("mass", mass)?;
        ensure_positive("ixx", ixx)?;
        ensure_positive("iyy", iyy)?;
        ensure_positive("izz", izz)?;
        ensure_finite("ixz", ixz)?;
        if ixx * izz - ixz * ixz <= 0.0 {
            return Err(FlightDynamicsError::invalid(format!(
                "inertia tensor must be positive definite (ixx * izz = {:.3} <= ixz^2 = {:.3})",
                ixx * izz,
                ixz * ixz
            )));
        }
        Ok(Self::from_moments(mass, ixx, iyy, izz, ixz))
    }

    /// Builds the tensor and its closed-form inverse. Callers guarantee
    /// `iyy > 0` and `ixx * izz > ixz²`.
    fn from_moments(mass: f64, ixx: f64, iyy: f64, izz: f64, ixz: f64) -> Self {
        let inertia = Matrix3::from_columns(&[
            Vector3::new(ixx, 0.0, -ixz),
            Vector3::new(0.0, iyy, 0.0),
            Vector3::new(-ixz, 0.0, izz),
        ]);
        let det_xz = ixx * izz - ixz * ixz;
        let inertia_inv = Matrix3::from_columns(&[
            Vector3::new(izz / det_xz, 0.0, ixz / det_xz),
            Vector3::new(0.0, 1.0 / iyy, 0.0),
            Vector3::new(ixz / det_xz, 0.0, ixx / det_xz),
        ]);

        Self {
            mass,
            inertia,
            inertia_inv,
        }
    }

    /// The same inertia carried by a different total mass.
    pub fn with_mass(&self, mass: f64) -> Result<Self> {
        ensure_positive("mass", mass)?;
        Ok(Self {
            mass,
            ..self.clone()
        })
    }

    pub fn inertia(&self) -> &Matrix3<f64> {
        &self.inertia
    }

    pub fn inertia_inv(&self) -> &Matrix3<f64> {
        &self.inertia_inv
    }

    pub fn ixx(&self) -> f64 {
        self.inertia[(0, 0)]
    }

    pub fn iyy(&self) -> f64 {
        self.inertia[(1, 1)]
    }

    pub fn izz(&self) -> f64 {
        self.inertia[(2, 2)]
    }

    /// Product of inertia I_xz (stored negated off the diagonal).
    pub fn ixz(&self) -> f64 {
        -self.inertia[(0, 2)]
    }

    pub fn properties(&self) -> MassProperties {
        MassProperties {
            mass: self.mass,
            ixx: self.ixx(),
            iyy: self.iyy(),
            izz: self.izz(),
            ixz: self.ixz(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("mass", self.mass)?;
        let residual = (self.inertia * self.inertia_inv - Matrix3::identity()).amax();
        if !(residual <= 1e-9) {
            return Err(FlightDynamicsError::invalid(format!(
                "inertia inverse does not match the tensor (|I * I^-1 - 1| = {residual:e})"
            )));
        }
        Ok(())
    }

    pub fn cessna_172() -> Self {
        Self::from_moments(1111.0, 1285.3, 1824.9, 2666.9, 0.0)
    }

    pub fn twin_otter() -> Self {
        Self::from_moments(4874.8, 28366.4, 32852.8, 52097.3, 1384.3)
    }
}

impl TryFrom<MassProperties> for MassModel {
    type Error = FlightDynamicsError;

    fn try_from(raw: MassProperties) -> Result<Self> {
        Self::new(raw.mass, raw.ixx, raw.iyy, raw.izz, raw.ixz)
    }
}

impl From<MassModel> for MassProperties {
    fn from(model: MassModel) -> Self {
        model.properties()
    }
}
