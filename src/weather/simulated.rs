//! Random weather with fixed latency.

use anyhow::{Result, bail};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

use super::{WeatherCondition, WeatherData, WeatherProvider};
use crate::common::constants::*;
use crate::geo::City;

/// Weather provider that sleeps for `delay` and then returns uniformly random
/// values: 5-24 °C in whole degrees, any of the four conditions, 40-89 %
/// humidity. With `failure_rate > 0` a share of fetches fail instead.
pub struct SimulatedWeather {
    delay: Duration,
    failure_rate: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedWeather {
    pub fn new(delay: Duration, failure_rate: f64) -> Self {
        Self::with_rng(delay, failure_rate, StdRng::from_os_rng())
    }

    /// Deterministic sequence of observations for a given seed.
    pub fn seeded(delay: Duration, failure_rate: f64, seed: u64) -> Self {
        Self::with_rng(delay, failure_rate, StdRng::seed_from_u64(seed))
    }

    fn with_rng(delay: Duration, failure_rate: f64, rng: StdRng) -> Self {
        Self {
            delay,
            failure_rate: failure_rate.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }
}

impl WeatherProvider for SimulatedWeather {
    fn fetch(&self, city: City) -> Result<WeatherData> {
        if !self.delay.is_zero() {
            crate::time::source::sleep(self.delay);
        }

        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if self.failure_rate > 0.0 && rng.random_bool(self.failure_rate) {
            bail!("Simulated weather service unavailable for {city}");
        }

        let temperature =
            f64::from(rng.random_range(SIMULATED_TEMPERATURE_MIN..=SIMULATED_TEMPERATURE_MAX));
        let conditions = *WeatherCondition::ALL
            .choose(&mut *rng)
            .unwrap_or(&WeatherCondition::Sunny);
        let humidity = rng.random_range(SIMULATED_HUMIDITY_MIN..=SIMULATED_HUMIDITY_MAX);

        Ok(WeatherData {
            city,
            temperature,
            conditions,
            humidity,
            timestamp: crate::time::source::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_stay_in_range() {
        let provider = SimulatedWeather::seeded(Duration::ZERO, 0.0, 7);
        for _ in 0..500 {
            let data = provider.fetch(City::Tampere).unwrap();
            assert_eq!(data.city, City::Tampere);
            assert!((5.0..=24.0).contains(&data.temperature));
            assert_eq!(data.temperature.fract(), 0.0);
            assert!((40..=89).contains(&data.humidity));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = SimulatedWeather::seeded(Duration::ZERO, 0.0, 42);
        let b = SimulatedWeather::seeded(Duration::ZERO, 0.0, 42);
        for _ in 0..10 {
            let (x, y) = (a.fetch(City::Oulu).unwrap(), b.fetch(City::Oulu).unwrap());
            assert_eq!((x.temperature, x.conditions, x.humidity), (y.temperature, y.conditions, y.humidity));
        }
    }

    #[test]
    fn test_failure_rate_one_always_fails() {
        let provider = SimulatedWeather::seeded(Duration::ZERO, 1.0, 1);
        let err = provider.fetch(City::Utsjoki).unwrap_err();
        assert!(err.to_string().contains("Utsjoki"));
    }

    #[test]
    fn test_failure_rate_is_clamped() {
        let provider = SimulatedWeather::seeded(Duration::ZERO, -3.0, 1);
        assert!(provider.fetch(City::Helsinki).is_ok());
    }
}
