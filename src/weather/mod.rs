//! Weather data and the provider abstraction.
//!
//! The Core never generates weather itself; it asks a [`WeatherProvider`] on a
//! worker thread and folds the answer into the next snapshot. The shipped
//! provider is [`SimulatedWeather`], which answers with random values after a
//! fixed delay. A real HTTP client would implement the same trait.

mod simulated;

pub use simulated::SimulatedWeather;

use anyhow::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo::City;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 4] = [
        WeatherCondition::Sunny,
        WeatherCondition::Cloudy,
        WeatherCondition::Rainy,
        WeatherCondition::Snowy,
    ];

    /// Single-cell glyph for the weather card.
    pub fn symbol(self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "☀",
            WeatherCondition::Cloudy => "☁",
            WeatherCondition::Rainy => "☂",
            WeatherCondition::Snowy => "❄",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherCondition::Sunny => write!(f, "Sunny"),
            WeatherCondition::Cloudy => write!(f, "Cloudy"),
            WeatherCondition::Rainy => write!(f, "Rainy"),
            WeatherCondition::Snowy => write!(f, "Snowy"),
        }
    }
}

/// One weather observation for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub city: City,
    /// Degrees Celsius.
    pub temperature: f64,
    pub conditions: WeatherCondition,
    /// Relative humidity in percent.
    pub humidity: u8,
    pub timestamp: DateTime<Local>,
}

/// Source of weather observations.
///
/// `fetch` may block (network, simulated latency); the Core always calls it
/// from a worker thread.
#[cfg_attr(test, mockall::automock)]
pub trait WeatherProvider: Send + Sync {
    fn fetch(&self, city: City) -> Result<WeatherData>;
}

/// Provider that always answers with the same observation, re-stamped for the
/// requested city. Useful wherever output must be reproducible.
#[derive(Debug, Clone)]
pub struct FixedWeather {
    pub temperature: f64,
    pub conditions: WeatherCondition,
    pub humidity: u8,
    pub timestamp: DateTime<Local>,
}

impl WeatherProvider for FixedWeather {
    fn fetch(&self, city: City) -> Result<WeatherData> {
        Ok(WeatherData {
            city,
            temperature: self.temperature,
            conditions: self.conditions,
            humidity: self.humidity,
            timestamp: self.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_weather_restamps_city() {
        let provider = FixedWeather {
            temperature: 12.0,
            conditions: WeatherCondition::Cloudy,
            humidity: 55,
            timestamp: Local::now(),
        };
        let data = provider.fetch(City::Oulu).unwrap();
        assert_eq!(data.city, City::Oulu);
        assert_eq!(data.temperature, 12.0);
        assert_eq!(data.conditions, WeatherCondition::Cloudy);
    }

    #[test]
    fn test_condition_serializes_as_name() {
        let json = serde_json::to_string(&WeatherCondition::Snowy).unwrap();
        assert_eq!(json, "\"Snowy\"");
    }
}
