//! Command-line command handlers for kello.
//!
//! Each one-shot command computes its answer once and prints it, either as
//! log-styled text or as JSON with `--json`. None of them start the Core.

pub mod almanac;
pub mod city;
pub mod help;
pub mod status;
pub mod theme;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use chrono_tz::Europe::Helsinki;
use chrono_tz::Tz;

use crate::common::logger::Log;
use crate::geo::City;

/// Noon on `date` in Finland, or the current Finnish time without a date.
pub(crate) fn instant_for(date: Option<NaiveDate>) -> Result<DateTime<Tz>> {
    match date {
        None => Ok(crate::time::finnish_now()),
        Some(date) => date
            .and_hms_opt(12, 0, 0)
            .and_then(|noon| noon.and_local_timezone(Helsinki).single())
            .with_context(|| format!("No Finnish noon on {date}")),
    }
}

/// Lenient city lookup for read-only commands: unknown names fall back to
/// Helsinki with a warning.
pub(crate) fn resolve_city(name: &str) -> City {
    City::from_name(name).unwrap_or_else(|| {
        log_warning!("Unknown city '{}', using {}", name, City::Helsinki);
        City::Helsinki
    })
}

/// JSON goes to stdout on its own; log lines would corrupt it.
pub(crate) fn quiet_for_json(json: bool) {
    if json {
        Log::set_enabled(false);
    }
}
