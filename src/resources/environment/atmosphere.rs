use serde::{Deserialize, Serialize};

use super::cache::LruCache;
use super::config::{AtmosphereConfig, AtmosphereType};
use crate::utils::{
    ensure_finite, Result, AIR_GAS_CONSTANT, GRAVITY, HEAT_CAPACITY_RATIO, ISA_CEILING, ISA_FLOOR, ISA_LAYERS,
};

/// Air properties at a single altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereProperties {
    /// Altitude the properties were evaluated at (m), after clamping.
    pub altitude: f64,
    /// Density (kg/m³).
    pub density: f64,
    /// Static pressure (Pa).
    pub pressure: f64,
    /// Static temperature (K).
    pub temperature: f64,
    /// Speed of sound (m/s).
    pub speed_of_sound: f64,
}

#[derive(Debug, Clone, Copy)]
struct LayerBase {
    altitude: f64,
    lapse_rate: f64,
    temperature: f64,
    pressure: f64,
}

/// Layered standard atmosphere with a bounded memo of recent altitudes.
///
/// Altitudes outside `[0, 84852] m` are clamped to the nearest boundary and the
/// returned [`AtmosphereProperties::altitude`] reports the clamped value.
#[derive(Debug)]
pub struct Atmosphere {
    config: AtmosphereConfig,
    layers: Vec<LayerBase>,
    cache: LruCache<u64, AtmosphereProperties>,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self::standard()
    }
}

impl Atmosphere {
    pub fn new(config: AtmosphereConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// The 1976 standard day.
    pub fn standard() -> Self {
        Self::build(AtmosphereConfig::default())
    }

    fn build(config: AtmosphereConfig) -> Self {
        let mut layers = Vec::with_capacity(ISA_LAYERS.len());
        let mut base = LayerBase {
            altitude: ISA_LAYERS[0].0,
            lapse_rate: ISA_LAYERS[0].1,
            temperature: config.sea_level_temperature,
            pressure: config.sea_level_pressure,
        };
        layers.push(base);

        for &(altitude, lapse_rate) in ISA_LAYERS.iter().skip(1) {
            let (temperature, pressure) = layer_conditions(&base, altitude);
            base = LayerBase {
                altitude,
                lapse_rate,
                temperature,
                pressure,
            };
            layers.push(base);
        }

        let cache = LruCache::new(config.cache_capacity);
        Self {
            config,
            layers,
            cache,
        }
    }

    pub fn config(&self) -> &AtmosphereConfig {
        &self.config
    }

    pub fn cache(&self) -> &LruCache<u64, AtmosphereProperties> {
        &self.cache
    }

    /// Memoised air properties at `altitude` (m). A non-finite altitude is an
    /// [`InvalidParameter`](crate::utils::FlightDynamicsError::InvalidParameter)
    /// error and never reaches the memo.
    pub fn properties(&self, altitude: f64) -> Result<AtmosphereProperties> {
        ensure_finite("altitude", altitude)?;
        let altitude = clamp_altitude(altitude);
        // +0.0 folds -0.0 onto the same key.
        let key = (altitude + 0.0).to_bits();
        Ok(self
            .cache
            .get_or_insert_with(key, || self.evaluate(altitude)))
    }

    pub fn density(&self, altitude: f64) -> Result<f64> {
        Ok(self.properties(altitude)?.density)
    }

    /// Air properties without touching the memo.
    pub fn compute(&self, altitude: f64) -> Result<AtmosphereProperties> {
        ensure_finite("altitude", altitude)?;
        Ok(self.evaluate(clamp_altitude(altitude)))
    }

    /// Lowest and highest altitudes (m) evaluated without clamping.
    pub fn envelope(&self) -> (f64, f64) {
        (ISA_FLOOR, ISA_CEILING)
    }

    fn evaluate(&self, altitude: f64) -> AtmosphereProperties {
        let (temperature, pressure) = match self.config.model_type {
            AtmosphereType::Constant => (
                self.config.sea_level_temperature,
                self.config.sea_level_pressure,
            ),
            AtmosphereType::Standard => {
                let base = self
                    .layers
                    .iter()
                    .rev()
                    .find(|layer| altitude >= layer.altitude)
                    .unwrap_or(&self.layers[0]);
                layer_conditions(base, altitude)
            }
        };

        AtmosphereProperties {
            altitude,
            density: pressure / (AIR_GAS_CONSTANT * temperature),
            pressure,
            temperature,
            speed_of_sound: (HEAT_CAPACITY_RATIO * AIR_GAS_CONSTANT * temperature).sqrt(),
        }
    }
}

fn clamp_altitude(altitude: f64) -> f64 {
    altitude.clamp(ISA_FLOOR, ISA_CEILING)
}

/// Temperature and pressure at `altitude` inside the layer starting at `base`.
fn layer_conditions(base: &LayerBase, altitude: f64) -> (f64, f64) {
    let dh = altitude - base.altitude;
    if base.lapse_rate == 0.0 {
        let pressure =
            base.pressure * (-GRAVITY * dh / (AIR_GAS_CONSTANT * base.temperature)).exp();
        (base.temperature, pressure)
    } else {
        let temperature = base.temperature + base.lapse_rate * dh;
        let exponent = -GRAVITY / (AIR_GAS_CONSTANT * base.lapse_rate);
        let pressure = base.pressure * (temperature / base.temperature).powf(exponent);
        (temperature, pressure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sea_level() {
        let atmosphere = Atmosphere::standard();
        let sl = atmosphere.properties(0.0).unwrap();

        assert_relative_eq!(sl.density, 1.225, epsilon = 1e-4);
        assert_relative_eq!(sl.pressure, 101325.0, epsilon = 1e-6);
        assert_relative_eq!(sl.temperature, 288.15, epsilon = 1e-9);
        assert_relative_eq!(sl.speed_of_sound, 340.294, epsilon = 1e-2);
    }

    #[test]
    fn test_tropopause() {
        let atmosphere = Atmosphere::standard();
        let tp = atmosphere.properties(11000.0).unwrap();

        assert_relative_eq!(tp.temperature, 216.65, epsilon = 1e-9);
        assert_relative_eq!(tp.pressure, 22632.0, epsilon = 1.0);
        assert_relative_eq!(tp.density, 0.36392, epsilon = 1e-4);
    }

    #[test]
    fn test_stratosphere_is_isothermal() {
        let atmosphere = Atmosphere::standard();
        let low = atmosphere.properties(12000.0).unwrap();
        let high = atmosphere.properties(19000.0).unwrap();

        assert_relative_eq!(low.temperature, 216.65, epsilon = 1e-9);
        assert_relative_eq!(high.temperature, 216.65, epsilon = 1e-9);
        assert!(high.pressure < low.pressure);
    }

    #[test]
    fn test_layers_are_continuous() {
        let atmosphere = Atmosphere::standard();
        for &(base, _) in ISA_LAYERS.iter().skip(1) {
            let below = atmosphere.compute(base - 1e-6).unwrap();
            let above = atmosphere.compute(base + 1e-6).unwrap();
            assert_relative_eq!(below.pressure, above.pressure, max_relative = 1e-8);
            assert_relative_eq!(below.temperature, above.temperature, max_relative = 1e-8);
        }
    }

    #[test]
    fn test_out_of_envelope_is_clamped() {
        let atmosphere = Atmosphere::standard();

        let below = atmosphere.properties(-500.0).unwrap();
        assert_eq!(below.altitude, 0.0);
        assert_eq!(below, atmosphere.properties(0.0).unwrap());

        let above = atmosphere.properties(120_000.0).unwrap();
        assert_eq!(above.altitude, ISA_CEILING);
        assert_eq!(above, atmosphere.properties(ISA_CEILING).unwrap());
        assert!(above.density > 0.0 && above.density.is_finite());
    }

    #[test]
    fn test_memoised_by_altitude() {
        let atmosphere = Atmosphere::standard();
        let first = atmosphere.properties(1524.0).unwrap();
        let second = atmosphere.properties(1524.0).unwrap();
        let _ = atmosphere.properties(-0.0).unwrap();
        let _ = atmosphere.properties(0.0).unwrap();

        assert_eq!(first, second);
        assert_eq!(atmosphere.cache().len(), 2);
        assert_eq!(atmosphere.cache().hits(), 2);
    }

    #[test]
    fn test_cache_stays_bounded() {
        let atmosphere = Atmosphere::new(AtmosphereConfig {
            cache_capacity: 16,
            ..Default::default()
        })
        .expect("valid atmosphere config");

        for i in 0..1000 {
            atmosphere.properties(i as f64).unwrap();
        }
        assert_eq!(atmosphere.cache().len(), 16);
    }

    #[test]
    fn test_non_finite_altitude_is_rejected() {
        let atmosphere = Atmosphere::standard();
        for altitude in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = atmosphere.properties(altitude).unwrap_err();
            assert_eq!(err.kind(), "invalid_parameter");
            assert!(atmosphere.density(altitude).is_err());
            assert!(atmosphere.compute(altitude).is_err());
        }
        assert!(atmosphere.cache().is_empty());
        assert_eq!(atmosphere.cache().misses(), 0);
    }

    #[test]
    fn test_constant_model() {
        let atmosphere = Atmosphere::new(AtmosphereConfig {
            model_type: AtmosphereType::Constant,
            ..Default::default()
        })
        .expect("valid atmosphere config");

        assert_eq!(atmosphere.density(0.0).unwrap(), atmosphere.density(8000.0).unwrap());
    }

    #[test]
    fn test_hot_day_is_thinner() {
        let hot = Atmosphere::new(AtmosphereConfig {
            sea_level_temperature: 303.15,
            ..Default::default()
        })
        .expect("valid atmosphere config");

        assert!(hot.density(1524.0).unwrap() < Atmosphere::standard().density(1524.0).unwrap());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Atmosphere::new(AtmosphereConfig {
            sea_level_pressure: 0.0,
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
