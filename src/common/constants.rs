//! Application-wide defaults, limits and fixed values.

use std::time::Duration;

// # Orchestration timing

/// Clock tick driving snapshot republication.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Full refresh (including weather) in seconds.
pub const DEFAULT_REFRESH_INTERVAL: u64 = 15 * 60;
pub const MINIMUM_REFRESH_INTERVAL: u64 = 60;
pub const MAXIMUM_REFRESH_INTERVAL: u64 = 24 * 60 * 60;

// # Simulated time

/// Accepted range for `--speed`.
pub const MINIMUM_SPEED: f64 = 0.01;
pub const MAXIMUM_SPEED: f64 = 10_000.0;

// # Simulated weather

/// Simulated provider latency in milliseconds.
pub const DEFAULT_WEATHER_DELAY: u64 = 700;
pub const MAXIMUM_WEATHER_DELAY: u64 = 10_000;

pub const DEFAULT_WEATHER_FAILURE_RATE: f64 = 0.0;

/// Inclusive range of simulated temperatures in °C.
pub const SIMULATED_TEMPERATURE_MIN: i32 = 5;
pub const SIMULATED_TEMPERATURE_MAX: i32 = 24;

/// Inclusive range of simulated relative humidity in percent.
pub const SIMULATED_HUMIDITY_MIN: u8 = 40;
pub const SIMULATED_HUMIDITY_MAX: u8 = 89;

// # Display

pub const DEFAULT_CITY: &str = "Helsinki";
pub const DEFAULT_CLOCK_STYLE: &str = "both";
pub const DEFAULT_SHOW_SECONDS: bool = true;
pub const DEFAULT_DARK_MODE: bool = false;

/// Radius of the analog dial in character cells (height; width is doubled).
pub const DIAL_RADIUS: i32 = 7;

// # Files

pub const CONFIG_FILE_NAME: &str = "kello.toml";
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";
pub const APP_DIR_NAME: &str = "kello";

// # Exit codes

pub const EXIT_FAILURE: i32 = 1;
