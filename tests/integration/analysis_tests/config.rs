use approx::assert_relative_eq;
use phugoid::components::aircraft::AircraftAeroCoefficients;
use phugoid::components::{AircraftConfig, ModalAnalysis, ModeKind};
use phugoid::systems::aerodynamics::{AeroCoefficients, AeroInput, AerodynamicModel};
use phugoid::utils::Result;
use pretty_assertions::assert_eq;

use crate::common::{asset_path, cessna, cruise_target, full_analysis, standard_atmosphere};

#[test]
fn test_yaml_asset_matches_preset() {
    let loaded = AircraftConfig::from_file(asset_path("aircraft/cessna_172.yaml")).unwrap();
    let preset = cessna();

    assert_eq!(loaded.name, preset.name);
    assert_eq!(loaded.aero_coef, preset.aero_coef);
    assert_eq!(loaded.geometry, preset.geometry);
    assert_relative_eq!(loaded.mass.mass, preset.mass.mass);
    assert_relative_eq!(loaded.mass.iyy(), preset.mass.iyy());
    assert_relative_eq!(
        loaded.propulsion.total_max_thrust(),
        preset.propulsion.total_max_thrust()
    );
}

#[test]
fn test_missing_file_is_a_config_error() {
    assert!(AircraftConfig::from_file(asset_path("aircraft/missing.yaml")).is_err());
}

/// Derivative table with extra tail volume.
#[derive(Debug)]
struct LargerTail {
    base: AircraftAeroCoefficients,
    extra_c_m_alpha: f64,
}

impl AerodynamicModel for LargerTail {
    fn coefficients(&self, input: &AeroInput) -> AeroCoefficients {
        let mut coefficients = self.base.coefficients(input);
        coefficients.c_m += self.extra_c_m_alpha * input.alpha;
        coefficients
    }

    fn validate(&self) -> Result<()> {
        self.base.validate()
    }
}

#[test]
fn test_boxed_aerodynamic_model() {
    let atmosphere = standard_atmosphere();
    let base = cessna();
    let model: Box<dyn AerodynamicModel> = Box::new(LargerTail {
        base: base.aero_coef,
        extra_c_m_alpha: -0.5,
    });
    let stiffer = base.clone().with_aero(model);

    let (_, _, baseline) = full_analysis(&base, &atmosphere, cruise_target());
    let (trim, _, modes) = full_analysis(&stiffer, &atmosphere, cruise_target());

    assert!(trim.residuals().max_abs() < 1e-6);
    let short_period = |analysis: &ModalAnalysis| {
        analysis.find(ModeKind::ShortPeriod).unwrap().natural_frequency
    };
    assert!(short_period(&modes) > short_period(&baseline));
}
