//! Configuration validation.
//!
//! Runs on the raw parsed file, before defaults are applied, so only fields
//! the user actually wrote are checked.

use anyhow::Result;

use super::Config;
use crate::common::constants::*;
use crate::geo::City;

pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(name) = config.default_city.as_deref()
        && City::from_name(name).is_none()
    {
        anyhow::bail!(
            "default_city '{}' is not supported. Choose one of: {}",
            name,
            City::ALL.map(City::name).join(", ")
        );
    }

    if let Some(interval) = config.refresh_interval
        && !(MINIMUM_REFRESH_INTERVAL..=MAXIMUM_REFRESH_INTERVAL).contains(&interval)
    {
        anyhow::bail!(
            "refresh_interval ({} seconds) must be between {} and {} seconds",
            interval,
            MINIMUM_REFRESH_INTERVAL,
            MAXIMUM_REFRESH_INTERVAL
        );
    }

    if let Some(delay) = config.weather_delay
        && delay > MAXIMUM_WEATHER_DELAY
    {
        anyhow::bail!(
            "weather_delay ({} ms) must be between 0 and {} milliseconds",
            delay,
            MAXIMUM_WEATHER_DELAY
        );
    }

    if let Some(rate) = config.weather_failure_rate
        && !(0.0..=1.0).contains(&rate)
    {
        anyhow::bail!(
            "weather_failure_rate ({}) must be between 0.0 and 1.0",
            rate
        );
    }

    Ok(())
}
