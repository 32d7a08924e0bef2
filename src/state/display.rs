//! Snapshot of everything a display surface shows.
//!
//! The core owns one `ViewState`, updates it on every tick and weather result,
//! and broadcasts clones. Surfaces never mutate it; they send commands instead.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::almanac::{self, LightInfo, SeasonInfo};
use crate::geo::City;
use crate::weather::WeatherData;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Finnish wall-clock time of this snapshot.
    pub now: DateTime<FixedOffset>,
    pub selected_city: City,
    pub is_dark_mode: bool,
    /// Latest weather for `selected_city`, kept across failed refreshes.
    pub weather: Option<WeatherData>,
    pub season: Option<SeasonInfo>,
    pub light: Option<LightInfo>,
    pub is_dst: bool,
    pub offset_label: String,
    /// A weather request for the selected city is in flight.
    pub is_loading: bool,
}

impl ViewState {
    /// State before the first tick: clock set, almanac cards not yet computed.
    pub fn new<Z: TimeZone>(now: &DateTime<Z>, selected_city: City, is_dark_mode: bool) -> Self {
        let now = crate::time::finnish_time(now).fixed_offset();
        let date = now.date_naive();
        Self {
            now,
            selected_city,
            is_dark_mode,
            weather: None,
            season: None,
            light: None,
            is_dst: almanac::is_dst(date),
            offset_label: almanac::current_offset_label(date).to_string(),
            is_loading: false,
        }
    }

    /// Fully computed state for `now`, without weather.
    pub fn compute<Z: TimeZone>(now: &DateTime<Z>, selected_city: City, is_dark_mode: bool) -> Self {
        let mut state = Self::new(now, selected_city, is_dark_mode);
        state.recompute();
        state
    }

    /// Move the clock and recompute the date-derived cards.
    pub fn advance_to(&mut self, now: &DateTime<Local>) {
        self.now = crate::time::finnish_time(now).fixed_offset();
        self.recompute();
    }

    /// Recompute season, daylight and DST for the current date and city.
    pub fn recompute(&mut self) {
        let date = self.date();
        self.season = Some(almanac::season_for(date));
        self.light = Some(almanac::estimate(self.selected_city.name(), date));
        self.is_dst = almanac::is_dst(date);
        self.offset_label = almanac::current_offset_label(date).to_string();
    }

    /// Finnish calendar date of this snapshot.
    pub fn date(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Weather only if it belongs to the selected city.
    pub fn current_weather(&self) -> Option<&WeatherData> {
        self.weather
            .as_ref()
            .filter(|w| w.city == self.selected_city)
    }
}
