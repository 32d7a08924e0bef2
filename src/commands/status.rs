//! Status command - print one full clock snapshot.
//!
//! Builds the same `ViewState` the live display would show, fetching weather
//! synchronously from the configured provider, and prints it either rendered
//! or as JSON.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, TimeZone};
use std::io::IsTerminal;

use super::{instant_for, quiet_for_json, resolve_city};
use crate::config::Config;
use crate::display::{self, RenderOptions};
use crate::geo::City;
use crate::state::display::ViewState;
use crate::state::{FilePreferenceStore, PreferenceStore};
use crate::weather::{SimulatedWeather, WeatherProvider};

/// Handle `kello status`.
///
/// # Arguments
/// * `city` - City to show instead of the persisted selection
/// * `date` - Show noon on this date instead of now
/// * `json` - Output the snapshot as JSON
pub fn handle_status_command(city: Option<&str>, date: Option<NaiveDate>, json: bool) -> Result<()> {
    quiet_for_json(json);

    let config = Config::load()?;
    let preferences = FilePreferenceStore::default_location().load(config.default_city());
    let city = city.map_or(preferences.selected_city, resolve_city);
    let instant = instant_for(date)?;

    let provider = SimulatedWeather::new(config.weather_delay(), config.weather_failure_rate());
    let state = build_snapshot(&provider, &instant, city, preferences.is_dark_mode);

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        let color = std::io::stdout().is_terminal();
        println!(
            "{}",
            display::render(&state, &RenderOptions::from_config(&config, color))
        );
    }
    Ok(())
}

/// Snapshot for `now` with weather from `provider`. A failed fetch leaves the
/// weather card unavailable.
pub fn build_snapshot<Z: TimeZone>(
    provider: &dyn WeatherProvider,
    now: &DateTime<Z>,
    city: City,
    is_dark_mode: bool,
) -> ViewState {
    let mut state = ViewState::compute(now, city, is_dark_mode);
    match provider.fetch(city) {
        Ok(weather) => state.weather = Some(weather),
        Err(e) => log_warning!("Weather unavailable: {}", e),
    }
    state
}

/// Display detailed help for the status command.
pub fn display_help() {
    log_version!();
    log_block_start!("status - Print the full clock snapshot once");
    log_block_start!("Usage: kello status [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("--city <name>       Show this city instead of the selected one");
    log_indented!("--date <YYYY-MM-DD> Show noon on this date instead of now");
    log_indented!("-j, --json          Output the snapshot as JSON");
    log_block_start!("Examples:");
    log_indented!("kello status");
    log_indented!("kello status --city Utsjoki --date 2024-12-21");
    log_indented!("kello status --json");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::{FixedWeather, MockWeatherProvider, WeatherCondition};
    use chrono::{Local, Utc};

    #[test]
    fn test_snapshot_includes_weather() {
        let provider = FixedWeather {
            temperature: -4.0,
            conditions: WeatherCondition::Snowy,
            humidity: 81,
            timestamp: Local::now(),
        };
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap();

        let state = build_snapshot(&provider, &now, City::Rovaniemi, true);

        assert_eq!(state.selected_city, City::Rovaniemi);
        assert!(state.is_dark_mode);
        assert!(!state.is_loading);
        assert!(state.season.is_some());
        assert!(state.light.is_some());
        let weather = state.current_weather().unwrap();
        assert_eq!(weather.conditions, WeatherCondition::Snowy);
        assert_eq!(weather.city, City::Rovaniemi);
    }

    #[test]
    fn test_snapshot_without_weather_on_failure() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("offline")));
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();

        let state = build_snapshot(&provider, &now, City::Tampere, false);

        assert!(state.weather.is_none());
        assert_eq!(state.offset_label, "UTC+3 (EEST)");
    }
}
