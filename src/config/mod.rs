//! Configuration system for kello.
//!
//! Settings live in `kello.toml` under `$XDG_CONFIG_HOME/kello/` (or the
//! directory passed with `--config`). A commented default file is written on
//! first start.
//!
//! ```toml
//! #[Location]
//! default_city = "Helsinki"   # Used until a city is chosen: Helsinki, Tampere, Oulu, Rovaniemi, Utsjoki
//!
//! #[Clock]
//! clock_style = "both"        # "analog", "digital" or "both"
//! show_seconds = true         # Show the seconds hand and seconds digits
//!
//! #[Weather]
//! refresh_interval = 900      # Full refresh including weather, in seconds (60-86400)
//! weather_delay = 700         # Simulated weather latency in milliseconds (0-10000)
//! weather_failure_rate = 0.0  # Share of simulated fetches that fail (0.0-1.0)
//! ```
//!
//! Every field is optional. The file is parsed, validated, and then missing
//! fields are filled with defaults, so code past [`load`] can rely on the
//! accessor methods.
//!
//! The selected city and theme are not configuration: they are user state
//! persisted by [`crate::state`]. `default_city` only seeds the selection
//! when nothing has been persisted yet.

pub mod builder;
pub mod loading;
pub mod validation;

use anyhow::Result;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::common::constants::*;
use crate::geo::City;

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};


/// Which clock faces the display draws.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClockStyle {
    Analog,
    Digital,
    Both,
}

impl ClockStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockStyle::Analog => "analog",
            ClockStyle::Digital => "digital",
            ClockStyle::Both => "both",
        }
    }

    pub fn shows_analog(&self) -> bool {
        matches!(self, ClockStyle::Analog | ClockStyle::Both)
    }

    pub fn shows_digital(&self) -> bool {
        matches!(self, ClockStyle::Digital | ClockStyle::Both)
    }
}

impl fmt::Display for ClockStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed `kello.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// City shown when no selection has been persisted yet.
    pub default_city: Option<String>,
    pub clock_style: Option<ClockStyle>,
    pub show_seconds: Option<bool>,
    /// Seconds between full refreshes.
    pub refresh_interval: Option<u64>,
    /// Milliseconds of simulated weather latency.
    pub weather_delay: Option<u64>,
    pub weather_failure_rate: Option<f64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        load()
    }

    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        load_from_path(path)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        get_config_path()
    }

    /// Fill every unset field with its default.
    pub fn apply_defaults(&mut self) {
        self.default_city.get_or_insert_with(|| DEFAULT_CITY.to_string());
        self.clock_style.get_or_insert(ClockStyle::Both);
        self.show_seconds.get_or_insert(DEFAULT_SHOW_SECONDS);
        self.refresh_interval.get_or_insert(DEFAULT_REFRESH_INTERVAL);
        self.weather_delay.get_or_insert(DEFAULT_WEATHER_DELAY);
        self.weather_failure_rate
            .get_or_insert(DEFAULT_WEATHER_FAILURE_RATE);
    }

    pub fn default_city(&self) -> City {
        self.default_city
            .as_deref()
            .map(City::from_name_or_default)
            .unwrap_or_default()
    }

    pub fn clock_style(&self) -> ClockStyle {
        self.clock_style.unwrap_or(ClockStyle::Both)
    }

    pub fn show_seconds(&self) -> bool {
        self.show_seconds.unwrap_or(DEFAULT_SHOW_SECONDS)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval.unwrap_or(DEFAULT_REFRESH_INTERVAL))
    }

    pub fn weather_delay(&self) -> Duration {
        Duration::from_millis(self.weather_delay.unwrap_or(DEFAULT_WEATHER_DELAY))
    }

    pub fn weather_failure_rate(&self) -> f64 {
        self.weather_failure_rate
            .unwrap_or(DEFAULT_WEATHER_FAILURE_RATE)
    }

    /// Print the effective settings as a log block.
    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");
        log_indented!("Default city: {}", self.default_city());
        log_indented!("Clock style: {}", self.clock_style());
        log_indented!("Show seconds: {}", self.show_seconds());
        log_indented!(
            "Refresh interval: {}",
            crate::common::utils::format_duration(self.refresh_interval().as_secs())
        );
        log_indented!("Weather delay: {}ms", self.weather_delay().as_millis());
        if self.weather_failure_rate() > 0.0 {
            log_indented!(
                "Weather failure rate: {:.0}%",
                self.weather_failure_rate() * 100.0
            );
        }
    }
}
