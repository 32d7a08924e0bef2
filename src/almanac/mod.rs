//! Calendar and sky calculations for the clock cards.
//!
//! Three pure calculators, each a function of a date (and, for daylight, a
//! city):
//!
//! - [`season`]: meteorological season, advisory tip and days until the next season
//! - [`daylight`]: approximate sunrise, sunset and day length from a cosine model
//! - [`dst`]: Finnish daylight saving window and UTC offset label
//!
//! None of them hold state or fail; calling any of them twice with the same
//! input gives the same output.

pub mod daylight;
pub mod dst;
pub mod season;

pub use daylight::{LightInfo, SpecialCondition, estimate, estimate_for_latitude};
pub use dst::{DstWindow, current_offset_label, find_last_sunday, is_dst, utc_offset_hours};
pub use season::{Season, SeasonInfo, season_for};

use chrono::{Datelike, NaiveDate};

/// Zero-based day of the year: January 1 is 0.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal0()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_year_is_zero_based() {
        let date = |m, d| NaiveDate::from_ymd_opt(2023, m, d).unwrap();
        assert_eq!(day_of_year(date(1, 1)), 0);
        assert_eq!(day_of_year(date(3, 1)), 59);
        assert_eq!(day_of_year(date(12, 31)), 364);

        let leap_end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(day_of_year(leap_end), 365);
    }
}
