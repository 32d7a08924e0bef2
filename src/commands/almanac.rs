//! Season, daylight and DST commands.
//!
//! Thin wrappers over the almanac calculators for a single date.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde_json::json;

use super::{instant_for, quiet_for_json, resolve_city};
use crate::almanac::{self, DstWindow, SpecialCondition};
use crate::common::utils::format_hours;

fn target_date(date: Option<NaiveDate>) -> Result<NaiveDate> {
    Ok(instant_for(date)?.date_naive())
}

/// Handle `kello season`.
pub fn handle_season_command(date: Option<NaiveDate>, json: bool) -> Result<()> {
    quiet_for_json(json);
    let date = target_date(date)?;
    let info = almanac::season_for(date);

    if json {
        let output = json!({ "date": date, "season": info });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    log_block_start!("Season on {}", date.format("%-d.%-m.%Y"));
    log_indented!("{}: {}", info.season, info.description);
    log_indented!("{} {} until {}", info.days_left, plural_days(info.days_left), info.season.next());
    log_indented!("Tip: {}", info.tip);
    log_end!();
    Ok(())
}

/// Handle `kello daylight`.
pub fn handle_daylight_command(city: Option<&str>, date: Option<NaiveDate>, json: bool) -> Result<()> {
    quiet_for_json(json);
    let city = city.map_or(crate::geo::City::Helsinki, resolve_city);
    let date = target_date(date)?;
    let light = almanac::estimate(city.name(), date);

    if json {
        let output = json!({ "city": city, "date": date, "daylight": light });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    log_block_start!("Daylight in {} on {}", city, date.format("%-d.%-m.%Y"));
    log_indented!("Sunrise: {}", light.sunrise.format("%H:%M"));
    log_indented!("Sunset: {}", light.sunset.format("%H:%M"));
    log_indented!("Day length: {}", format_hours(light.daylight_hours));
    if light.special_condition != SpecialCondition::None {
        log_indented!("{}", light.special_condition);
    }
    log_end!();
    Ok(())
}

/// Handle `kello dst`.
///
/// With `year`, shows that year's changeover dates. Otherwise shows whether
/// `date` (default today) is summer time, alongside its year's window.
pub fn handle_dst_command(year: Option<i32>, date: Option<NaiveDate>, json: bool) -> Result<()> {
    quiet_for_json(json);

    let (day, year) = match year {
        Some(year) => (None, year),
        None => {
            let day = target_date(date)?;
            (Some(day), day.year())
        }
    };
    let window =
        DstWindow::for_year(year).with_context(|| format!("No DST window for year {year}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dst_json(&window, day))?);
        return Ok(());
    }

    if let Some(day) = day {
        let state = if almanac::is_dst(day) { "summer time" } else { "standard time" };
        log_block_start!("{} is {}", day.format("%-d.%-m.%Y"), state);
        log_indented!("Offset: {}", almanac::current_offset_label(day));
    }
    log_block_start!("Summer time {}", window.year);
    log_indented!("Starts: {}", window.start.format("%A %-d.%-m."));
    log_indented!("Ends: {}", window.end.format("%A %-d.%-m."));
    log_end!();
    Ok(())
}

/// JSON body for `kello dst --json`, keyed in snake_case like `status --json`.
fn dst_json(window: &DstWindow, day: Option<NaiveDate>) -> serde_json::Value {
    let mut output = json!({ "window": window });
    if let Some(day) = day {
        output["date"] = json!(day);
        output["is_dst"] = json!(almanac::is_dst(day));
        output["offset_label"] = json!(almanac::current_offset_label(day));
    }
    output
}

fn plural_days(days: u32) -> &'static str {
    if days == 1 { "day" } else { "days" }
}

pub fn display_season_help() {
    log_version!();
    log_block_start!("season - Current season and days until the next");
    log_block_start!("Usage: kello season [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("--date <YYYY-MM-DD> Use this date instead of today");
    log_indented!("-j, --json          Output as JSON");
    log_block_start!("Seasons:");
    log_indented!("Winter  December to February");
    log_indented!("Spring  March to May");
    log_indented!("Summer  June to August");
    log_indented!("Fall    September to November");
    log_end!();
}

pub fn display_daylight_help() {
    log_version!();
    log_block_start!("daylight - Sunrise, sunset and day length");
    log_block_start!("Usage: kello daylight [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("--city <name>       Helsinki, Tampere, Oulu, Rovaniemi or Utsjoki");
    log_indented!("--date <YYYY-MM-DD> Use this date instead of today");
    log_indented!("-j, --json          Output as JSON");
    log_pipe!();
    log_info!("Times are a latitude-based estimate around solar noon at 12:00.");
    log_end!();
}

pub fn display_dst_help() {
    log_version!();
    log_block_start!("dst - Finnish daylight saving time");
    log_block_start!("Usage: kello dst [--year <YYYY> | --date <YYYY-MM-DD>] [--json]");
    log_block_start!("Options:");
    log_indented!("--year <YYYY>       Show the changeover dates for a year");
    log_indented!("--date <YYYY-MM-DD> Check whether a date is summer time");
    log_indented!("-j, --json          Output as JSON");
    log_pipe!();
    log_info!("Summer time runs between the last Sundays of March and October.");
    log_end!();
}
