//! Finnish daylight saving time by date.
//!
//! Finland observes EU summer time: clocks move to UTC+3 (EEST) on the last
//! Sunday of March and back to UTC+2 (EET) on the last Sunday of October.
//! This module works on whole dates, and both changeover Sundays count as
//! standard time. A date is summer time only when it falls strictly between
//! the two.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub const EEST_LABEL: &str = "UTC+3 (EEST)";
pub const EET_LABEL: &str = "UTC+2 (EET)";

const MARCH: u32 = 3;
const OCTOBER: u32 = 10;

/// The last Sunday of `month` in `year`, or `None` for an invalid month.
///
/// Walks backwards from the last day of the month; a Sunday is always found
/// within the final seven days.
pub fn find_last_sunday(year: i32, month: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;

    std::iter::successors(Some(last), NaiveDate::pred_opt)
        .take_while(|day| day.month() == month)
        .find(|day| day.weekday() == Weekday::Sun)
}

/// Summer time changeover dates for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DstWindow {
    pub year: i32,
    /// Last Sunday of March.
    pub start: NaiveDate,
    /// Last Sunday of October.
    pub end: NaiveDate,
}

impl DstWindow {
    pub fn for_year(year: i32) -> Option<DstWindow> {
        Some(DstWindow {
            year,
            start: find_last_sunday(year, MARCH)?,
            end: find_last_sunday(year, OCTOBER)?,
        })
    }

    /// Open interval: the changeover Sundays themselves are excluded.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date > self.start && date < self.end
    }
}

/// Whether `date` falls inside Finnish summer time.
pub fn is_dst(date: NaiveDate) -> bool {
    DstWindow::for_year(date.year()).is_some_and(|window| window.contains(date))
}

/// `"UTC+3 (EEST)"` during summer time, `"UTC+2 (EET)"` otherwise.
pub fn current_offset_label(date: NaiveDate) -> &'static str {
    if is_dst(date) { EEST_LABEL } else { EET_LABEL }
}

/// UTC offset in whole hours for `date`.
pub fn utc_offset_hours(date: NaiveDate) -> i32 {
    if is_dst(date) { 3 } else { 2 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_sundays_2024() {
        assert_eq!(find_last_sunday(2024, 3), Some(date(2024, 3, 31)));
        assert_eq!(find_last_sunday(2024, 10), Some(date(2024, 10, 27)));
    }

    #[test]
    fn test_last_sundays_other_years() {
        assert_eq!(find_last_sunday(2023, 3), Some(date(2023, 3, 26)));
        assert_eq!(find_last_sunday(2023, 10), Some(date(2023, 10, 29)));
        assert_eq!(find_last_sunday(2025, 3), Some(date(2025, 3, 30)));
        assert_eq!(find_last_sunday(2025, 10), Some(date(2025, 10, 26)));
        // February of a leap year ending on a Thursday
        assert_eq!(find_last_sunday(2024, 2), Some(date(2024, 2, 25)));
        assert_eq!(find_last_sunday(2024, 12), Some(date(2024, 12, 29)));
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(find_last_sunday(2024, 0), None);
        assert_eq!(find_last_sunday(2024, 13), None);
    }

    #[test]
    fn test_is_dst_examples() {
        assert!(is_dst(date(2024, 6, 15)));
        assert!(!is_dst(date(2024, 3, 31)));
        assert!(!is_dst(date(2024, 11, 1)));
    }

    #[test]
    fn test_boundaries_are_standard_time() {
        assert!(!is_dst(date(2024, 3, 30)));
        assert!(!is_dst(date(2024, 3, 31)));
        assert!(is_dst(date(2024, 4, 1)));
        assert!(is_dst(date(2024, 10, 26)));
        assert!(!is_dst(date(2024, 10, 27)));
        assert!(!is_dst(date(2024, 10, 28)));
    }

    #[test]
    fn test_offset_label() {
        assert_eq!(current_offset_label(date(2024, 7, 1)), "UTC+3 (EEST)");
        assert_eq!(current_offset_label(date(2024, 1, 1)), "UTC+2 (EET)");
        assert_eq!(utc_offset_hours(date(2024, 7, 1)), 3);
        assert_eq!(utc_offset_hours(date(2024, 12, 1)), 2);
    }

    #[test]
    fn test_window_start_before_end() {
        for year in 1990..2100 {
            let window = DstWindow::for_year(year).unwrap();
            assert!(window.start < window.end);
            assert_eq!(window.start.weekday(), Weekday::Sun);
            assert_eq!(window.end.weekday(), Weekday::Sun);
            assert!(window.start.day() >= 25);
            assert!(window.end.day() >= 25);
        }
    }
}
