use nalgebra::Matrix4;
use tracing::{debug, warn};

use super::jacobian::central_difference_jacobians;
use crate::components::aircraft::{AircraftConfig, AircraftControls, AircraftState};
use crate::components::linear::{LinearSubsystem, LinearizerConfig, StateSpaceModel, Subsystem};
use crate::components::trim::TrimState;
use crate::resources::{Atmosphere, PhysicsConfig};
use crate::systems::aerodynamics::AerodynamicModel;
use crate::systems::physics::EquationsOfMotion;
use crate::utils::{ensure_positive, rad_to_deg, FlightDynamicsError, Result};

/// Finite-difference linearization of the equations of motion.
#[derive(Debug, Clone, Default)]
pub struct Linearizer {
    config: LinearizerConfig,
    physics: PhysicsConfig,
}

impl Linearizer {
    pub fn new(config: LinearizerConfig) -> Self {
        Self {
            config,
            physics: PhysicsConfig::default(),
        }
    }

    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    pub fn config(&self) -> &LinearizerConfig {
        &self.config
    }

    /// Linear model about a trim point.
    ///
    /// The longitudinal/lateral split assumes a wings-level trim without
    /// sideslip; other trims are still linearized but logged as coupled.
    pub fn linearize<A: AerodynamicModel>(
        &self,
        aircraft: &AircraftConfig<A>,
        atmosphere: &Atmosphere,
        trim: &TrimState,
    ) -> Result<StateSpaceModel> {
        let lateral = trim.lateral();
        let tolerance = self.config.decoupling_tolerance;
        if lateral.beta.abs() > tolerance || lateral.phi.abs() > tolerance {
            warn!(
                beta_deg = rad_to_deg(lateral.beta),
                phi_deg = rad_to_deg(lateral.phi),
                "trim is not symmetric, longitudinal and lateral subsystems are coupled"
            );
        }
        self.linearize_about(aircraft, atmosphere, trim.state(), trim.controls())
    }

    /// Linear model about an arbitrary operating point.
    pub fn linearize_about<A: AerodynamicModel>(
        &self,
        aircraft: &AircraftConfig<A>,
        atmosphere: &Atmosphere,
        state: &AircraftState,
        controls: &AircraftControls,
    ) -> Result<StateSpaceModel> {
        self.validate()?;
        self.physics.validate()?;
        aircraft.validate()?;
        if !state.is_finite() || !controls.is_finite() {
            return Err(FlightDynamicsError::Linearization(
                "operating point must be finite".to_string(),
            ));
        }

        let eom = EquationsOfMotion::new(aircraft, atmosphere, &self.physics);
        let (a, b) = central_difference_jacobians(&eom, state, controls, &self.config)?;
        let model = StateSpaceModel::new(a, b, *state, *controls);

        for kind in Subsystem::ALL {
            let subsystem = model.subsystem(kind);
            let condition = self.check_subsystem(&subsystem)?;
            debug!(subsystem = %kind, condition, "subsystem checked");
        }
        debug!(coupling = model.coupling_norm(), "linearized");

        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        ensure_positive("relative_step", self.config.relative_step)?;
        ensure_positive("min_velocity_scale", self.config.min_velocity_scale)?;
        ensure_positive("rate_scale", self.config.rate_scale)?;
        ensure_positive("angle_scale", self.config.angle_scale)?;
        ensure_positive("position_scale", self.config.position_scale)?;
        ensure_positive("control_scale", self.config.control_scale)?;
        ensure_positive("max_condition_number", self.config.max_condition_number)
    }

    /// Rejects a subsystem with a state that nothing drives or that drives
    /// nothing, or one too ill-conditioned to trust. Returns the condition
    /// number.
    pub fn check_subsystem(&self, subsystem: &LinearSubsystem) -> Result<f64> {
        let threshold = self.config.zero_threshold;
        for (i, state) in subsystem.states.iter().enumerate() {
            if subsystem.a.row(i).iter().all(|v| v.abs() <= threshold) {
                return Err(FlightDynamicsError::Linearization(format!(
                    "{} A matrix has a zero row for {state}",
                    subsystem.kind
                )));
            }
            if subsystem.a.column(i).iter().all(|v| v.abs() <= threshold) {
                return Err(FlightDynamicsError::Linearization(format!(
                    "{} A matrix has a zero column for {state}",
                    subsystem.kind
                )));
            }
        }

        let condition = condition_number(&subsystem.a);
        if condition.is_nan() || condition > self.config.max_condition_number {
            return Err(FlightDynamicsError::Linearization(format!(
                "{} A matrix is ill-conditioned (condition number {condition:.3e})",
                subsystem.kind
            )));
        }
        Ok(condition)
    }
}

/// Ratio of the largest to the smallest singular value; infinite when
/// singular.
pub fn condition_number(matrix: &Matrix4<f64>) -> f64 {
    let singular_values = matrix.singular_values();
    let max = singular_values.max();
    let min = singular_values.min();
    if min > 0.0 {
        max / min
    } else {
        f64::INFINITY
    }
}
