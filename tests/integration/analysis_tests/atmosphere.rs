use approx::assert_relative_eq;
use phugoid::resources::{Atmosphere, AtmosphereConfig, AtmosphereType};

use crate::common::standard_atmosphere;

#[test]
fn test_sea_level_standard_day() {
    let air = standard_atmosphere().properties(0.0).unwrap();
    assert_relative_eq!(air.density, 1.225, epsilon = 1e-3);
    assert_relative_eq!(air.pressure, 101_325.0, epsilon = 1e-6);
    assert_relative_eq!(air.temperature, 288.15, epsilon = 1e-9);
    assert_relative_eq!(air.speed_of_sound, 340.29, epsilon = 0.01);
}

#[test]
fn test_reference_altitudes() {
    let atmosphere = standard_atmosphere();
    assert_relative_eq!(atmosphere.density(1524.0).unwrap(), 1.05555, epsilon = 1e-4);

    let tropopause = atmosphere.properties(11_000.0).unwrap();
    assert_relative_eq!(tropopause.density, 0.36392, epsilon = 1e-4);
    assert_relative_eq!(tropopause.pressure, 22_632.04, epsilon = 0.5);
    assert_relative_eq!(tropopause.temperature, 216.65, epsilon = 1e-9);
}

#[test]
fn test_density_decreases_with_altitude() {
    let atmosphere = standard_atmosphere();
    let densities: Vec<f64> = (0..=80)
        .map(|k| atmosphere.density(k as f64 * 1000.0).unwrap())
        .collect();
    assert!(densities.windows(2).all(|pair| pair[1] < pair[0]));
}

#[test]
fn test_repeated_queries_hit_the_memo() {
    let atmosphere = standard_atmosphere();
    let first = atmosphere.properties(2000.0).unwrap();
    let misses = atmosphere.cache().misses();
    let second = atmosphere.properties(2000.0).unwrap();

    assert_eq!(first, second);
    assert_eq!(atmosphere.cache().misses(), misses);
    assert!(atmosphere.cache().hits() >= 1);
}

#[test]
fn test_out_of_range_altitudes_clamp() {
    let atmosphere = standard_atmosphere();
    assert_eq!(atmosphere.properties(-500.0).unwrap(), atmosphere.properties(0.0).unwrap());
    assert_eq!(atmosphere.properties(-500.0).unwrap().altitude, 0.0);
    assert!(atmosphere.properties(200_000.0).unwrap().density > 0.0);
}

#[test]
fn test_constant_model() {
    let atmosphere = Atmosphere::new(AtmosphereConfig {
        model_type: AtmosphereType::Constant,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(atmosphere.density(0.0).unwrap(), atmosphere.density(5000.0).unwrap());
}

#[test]
fn test_non_finite_altitude_is_an_error() {
    let atmosphere = standard_atmosphere();
    let err = atmosphere.properties(f64::NAN).unwrap_err();
    assert_eq!(err.kind(), "invalid_parameter");
    assert!(atmosphere.density(f64::INFINITY).is_err());
    assert_eq!(atmosphere.cache().len(), 0);
}
