//! Season bands by day of year.
//!
//! Seasons follow fixed day-of-year bands that assume a 365-day year; leap
//! years are not adjusted, so from March onwards a leap-year date sits one day
//! later in its band than the same calendar date in a common year.
//!
//! | Season | Days of year      |
//! |--------|-------------------|
//! | Winter | 0-59 and 334-365  |
//! | Spring | 60-150            |
//! | Summer | 151-242           |
//! | Fall   | 243-333           |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::day_of_year;

const SPRING_START: u32 = 60;
const SUMMER_START: u32 = 151;
const FALL_START: u32 = 243;
const WINTER_START: u32 = 334;

/// Days from January 1 to the spring boundary of the following year, so that
/// `NEXT_SPRING - doy` counts down through December.
const NEXT_SPRING: u32 = 365 + SPRING_START;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn description(self) -> &'static str {
        match self {
            Season::Winter => "Snow, frost and the shortest days of the year",
            Season::Spring => "Melting snow and rapidly lengthening days",
            Season::Summer => "Bright nights and the warmest weeks of the year",
            Season::Fall => "Ruska colours and quickly returning darkness",
        }
    }

    pub fn tip(self) -> &'static str {
        match self {
            Season::Winter => "Dress in layers and catch the daylight around noon.",
            Season::Spring => "Mornings refreeze after a thaw, so watch for ice.",
            Season::Summer => "Blackout curtains help you sleep through the light nights.",
            Season::Fall => "Wear a reflector when walking in the dark evenings.",
        }
    }

    /// The season that follows this one.
    pub fn next(self) -> Season {
        match self {
            Season::Winter => Season::Spring,
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall => Season::Winter,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Winter => write!(f, "Winter"),
            Season::Spring => write!(f, "Spring"),
            Season::Summer => write!(f, "Summer"),
            Season::Fall => write!(f, "Fall"),
        }
    }
}

/// Season card contents for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonInfo {
    pub season: Season,
    pub description: String,
    pub tip: String,
    /// Days until the next season starts. Always at least 1.
    pub days_left: u32,
}

/// Season, description, tip and days remaining for `date`.
pub fn season_for(date: NaiveDate) -> SeasonInfo {
    let (season, days_left) = classify(day_of_year(date));
    SeasonInfo {
        season,
        description: season.description().to_string(),
        tip: season.tip().to_string(),
        days_left,
    }
}

fn classify(doy: u32) -> (Season, u32) {
    match doy {
        d if d < SPRING_START => (Season::Winter, SPRING_START - d),
        d if d < SUMMER_START => (Season::Spring, SUMMER_START - d),
        d if d < FALL_START => (Season::Summer, FALL_START - d),
        d if d < WINTER_START => (Season::Fall, WINTER_START - d),
        d => (Season::Winter, NEXT_SPRING - d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(classify(0), (Season::Winter, 60));
        assert_eq!(classify(59), (Season::Winter, 1));
        assert_eq!(classify(60), (Season::Spring, 91));
        assert_eq!(classify(150), (Season::Spring, 1));
        assert_eq!(classify(151), (Season::Summer, 92));
        assert_eq!(classify(172), (Season::Summer, 71));
        assert_eq!(classify(242), (Season::Summer, 1));
        assert_eq!(classify(243), (Season::Fall, 91));
        assert_eq!(classify(333), (Season::Fall, 1));
        assert_eq!(classify(334), (Season::Winter, 91));
        assert_eq!(classify(364), (Season::Winter, 61));
        assert_eq!(classify(365), (Season::Winter, 60));
    }

    #[test]
    fn test_season_for_calendar_dates() {
        let jan1 = season_for(date(2023, 1, 1));
        assert_eq!(jan1.season, Season::Winter);
        assert_eq!(jan1.days_left, 60);

        assert_eq!(season_for(date(2023, 6, 21)).season, Season::Summer);
        assert_eq!(season_for(date(2023, 4, 1)).season, Season::Spring);
        assert_eq!(season_for(date(2023, 9, 1)).season, Season::Fall);
        assert_eq!(season_for(date(2023, 12, 1)).season, Season::Winter);
    }

    #[test]
    fn test_leap_year_shifts_bands_by_one_day() {
        // Feb 29 takes day 59, so March 1 only starts spring in leap years
        assert_eq!(season_for(date(2023, 3, 1)).season, Season::Winter);
        let info = season_for(date(2024, 2, 29));
        assert_eq!(info.season, Season::Winter);
        assert_eq!(info.days_left, 1);
        assert_eq!(season_for(date(2024, 3, 1)).season, Season::Spring);
    }

    #[test]
    fn test_text_matches_season() {
        let info = season_for(date(2023, 7, 1));
        assert_eq!(info.description, Season::Summer.description());
        assert_eq!(info.tip, Season::Summer.tip());
    }

    #[test]
    fn test_countdown_reaches_next_season() {
        let start = date(2023, 1, 1);
        let mut day = start;
        while day.year() == 2023 {
            let info = season_for(day);
            let boundary = day + Duration::days(i64::from(info.days_left));
            if boundary.year() == 2023 {
                assert_eq!(season_for(boundary).season, info.season.next());
                let before = season_for(boundary - Duration::days(1));
                assert_eq!(before.season, info.season);
                assert_eq!(before.days_left, 1);
            }
            day += Duration::days(1);
        }
    }

    #[test]
    fn test_idempotent() {
        let d = date(2025, 10, 16);
        assert_eq!(season_for(d), season_for(d));
    }
}
