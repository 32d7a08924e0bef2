//! Approximate daylight from latitude and day of year.
//!
//! Day length follows a cosine over the year peaking at the summer solstice
//! (day 172). Its swing around 12 hours scales linearly with latitude. Sunrise
//! and sunset are placed symmetrically around 12:00 local time.
//!
//! This is deliberately not an astronomical model: it ignores solar
//! declination, the equation of time and the city's longitude within its
//! timezone. It is kept stable so the card shows the same numbers as the
//! clock always has.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use super::day_of_year;
use crate::geo::City;

/// Day of year used as the summer solstice reference (about June 21).
const SOLSTICE_DAY: f64 = 172.0;
const DAYS_PER_YEAR: f64 = 365.0;
/// Hours of daylight swing per degree of latitude.
const AMPLITUDE_PER_DEGREE: f64 = 0.133;

const MIDNIGHT_SUN_MIN_HOURS: f64 = 20.0;
const POLAR_NIGHT_MAX_HOURS: f64 = 4.0;

/// Extreme-latitude phenomena flagged on the daylight card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialCondition {
    None,
    MidnightSun,
    PolarNight,
}

impl fmt::Display for SpecialCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialCondition::None => write!(f, "none"),
            SpecialCondition::MidnightSun => write!(f, "Midnight sun"),
            SpecialCondition::PolarNight => write!(f, "Polar night"),
        }
    }
}

/// Daylight card contents for one city and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightInfo {
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
    pub daylight_hours: f64,
    pub special_condition: SpecialCondition,
}

impl LightInfo {
    /// Midpoint of sunrise and sunset; always 12:00 in this model.
    pub fn solar_noon(&self) -> NaiveTime {
        solar_noon()
    }

    /// Whether `time` of day falls between sunrise and sunset.
    pub fn sun_is_up(&self, time: NaiveTime) -> bool {
        time >= self.sunrise && time < self.sunset
    }
}

fn solar_noon() -> NaiveTime {
    NaiveTime::MIN + Duration::hours(12)
}

/// Daylight estimate for a city name. Unknown names use Helsinki.
pub fn estimate(city: &str, date: NaiveDate) -> LightInfo {
    estimate_for_latitude(City::from_name_or_default(city).latitude(), date)
}

/// Daylight estimate for any latitude in degrees (clamped to ±90).
pub fn estimate_for_latitude(latitude: f64, date: NaiveDate) -> LightInfo {
    let latitude = latitude.clamp(-90.0, 90.0);
    let doy = day_of_year(date);

    let amplitude = latitude * AMPLITUDE_PER_DEGREE;
    let phase = 2.0 * PI * (f64::from(doy) - SOLSTICE_DAY) / DAYS_PER_YEAR;
    let daylight_hours = 12.0 + amplitude * phase.cos();

    // Half the daylight in minutes on each side of noon
    let offset = Duration::minutes((daylight_hours * 30.0).round() as i64);
    let noon = solar_noon();

    LightInfo {
        sunrise: noon - offset,
        sunset: noon + offset,
        daylight_hours,
        special_condition: special_condition(daylight_hours, doy),
    }
}

fn special_condition(daylight_hours: f64, doy: u32) -> SpecialCondition {
    if daylight_hours > MIDNIGHT_SUN_MIN_HOURS && doy > 152 && doy < 212 {
        SpecialCondition::MidnightSun
    } else if daylight_hours < POLAR_NIGHT_MAX_HOURS && (doy < 31 || doy > 334) {
        SpecialCondition::PolarNight
    } else {
        SpecialCondition::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn day(doy: u32) -> NaiveDate {
        // 2023 is a common year so ordinal0 == doy
        NaiveDate::from_yo_opt(2023, doy + 1).unwrap()
    }

    #[test]
    fn test_utsjoki_midsummer_is_midnight_sun() {
        let info = estimate("Utsjoki", day(172));
        let expected = 12.0 + 69.91 * 0.133;
        assert!((info.daylight_hours - expected).abs() < 1e-9);
        assert!((info.daylight_hours - 21.3).abs() < 0.05);
        assert_eq!(info.special_condition, SpecialCondition::MidnightSun);
    }

    #[test]
    fn test_utsjoki_midwinter_is_polar_night() {
        let info = estimate("Utsjoki", day(355));
        assert!((info.daylight_hours - 2.7).abs() < 0.05);
        assert_eq!(info.special_condition, SpecialCondition::PolarNight);
    }

    #[test]
    fn test_helsinki_only_crosses_threshold_at_solstice() {
        // 60.17 * 0.133 puts the solstice a hair above 20 hours
        let solstice = estimate("Helsinki", day(172));
        assert!(solstice.daylight_hours > 20.0 && solstice.daylight_hours < 20.01);
        assert_eq!(solstice.special_condition, SpecialCondition::MidnightSun);

        let early_june = estimate("Helsinki", day(160));
        assert!(early_june.daylight_hours < 20.0);
        assert_eq!(early_june.special_condition, SpecialCondition::None);
    }

    #[test]
    fn test_sunrise_sunset_symmetric_around_noon() {
        let info = estimate("Utsjoki", day(172));
        // round(21.298 * 30) = 639 minutes each side of noon
        assert_eq!((info.sunrise.hour(), info.sunrise.minute()), (1, 21));
        assert_eq!((info.sunset.hour(), info.sunset.minute()), (22, 39));
        assert_eq!(info.solar_noon(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());

        let before = info.solar_noon() - info.sunrise;
        let after = info.sunset - info.solar_noon();
        assert_eq!(before, after);
    }

    #[test]
    fn test_unknown_city_matches_helsinki() {
        for doy in [0, 90, 172, 260, 355] {
            assert_eq!(estimate("Atlantis", day(doy)), estimate("Helsinki", day(doy)));
        }
    }

    #[test]
    fn test_condition_windows_are_exclusive() {
        // Hours are extreme, but the day is outside the midsummer window
        assert_eq!(special_condition(21.0, 152), SpecialCondition::None);
        assert_eq!(special_condition(21.0, 212), SpecialCondition::None);
        assert_eq!(special_condition(21.0, 153), SpecialCondition::MidnightSun);
        assert_eq!(special_condition(3.0, 31), SpecialCondition::None);
        assert_eq!(special_condition(3.0, 334), SpecialCondition::None);
        assert_eq!(special_condition(3.0, 335), SpecialCondition::PolarNight);
        assert_eq!(special_condition(3.0, 30), SpecialCondition::PolarNight);
    }

    #[test]
    fn test_sun_is_up() {
        let info = estimate("Helsinki", day(80));
        assert!(info.sun_is_up(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
        assert!(!info.sun_is_up(NaiveTime::from_hms_opt(0, 30, 0).unwrap()));
    }

    #[test]
    fn test_extreme_latitude_stays_within_a_day() {
        let info = estimate_for_latitude(95.0, day(172));
        assert!(info.daylight_hours <= 24.0);
        assert!(info.sunrise < info.sunset);
    }

    #[test]
    fn test_serializes_condition_in_kebab_case() {
        let json = serde_json::to_string(&SpecialCondition::MidnightSun).unwrap();
        assert_eq!(json, "\"midnight-sun\"");
    }
}
