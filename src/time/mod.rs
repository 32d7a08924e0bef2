//! Time handling: the global time source and Finnish wall-clock conversion.

pub mod source;

use chrono::{DateTime, TimeZone};
use chrono_tz::Europe::Helsinki;
use chrono_tz::Tz;

/// Express any instant as Finnish wall-clock time (`Europe/Helsinki`).
///
/// The clock always shows Finnish time regardless of the host timezone.
pub fn finnish_time<Z: TimeZone>(instant: &DateTime<Z>) -> DateTime<Tz> {
    instant.with_timezone(&Helsinki)
}

/// Current Finnish wall-clock time from the installed time source.
pub fn finnish_now() -> DateTime<Tz> {
    finnish_time(&source::now())
}
