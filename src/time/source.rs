//! Time source abstraction for real and simulated clocks.
//!
//! The Core and the logger read "now" through this module rather than calling
//! `Local::now()` directly, so the live display can be started at an arbitrary
//! instant (`--at`) and run faster than real time (`--speed`).

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDateTime, TimeZone};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::{Duration as StdDuration, Instant};

use crate::common::constants::{MAXIMUM_SPEED, MINIMUM_SPEED};

static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Furthest a simulated clock may run ahead of its start (about 1000 years).
const MAX_SIMULATED_SPAN: ChronoDuration = ChronoDuration::days(365_250);

pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Block for `duration` of this source's time.
    fn sleep(&self, duration: StdDuration);

    fn is_simulated(&self) -> bool;

    /// Wall-clock time that `duration` of this source's time takes to pass.
    fn real_duration(&self, duration: StdDuration) -> StdDuration {
        duration
    }
}

/// System clock.
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep(&self, duration: StdDuration) {
        std::thread::sleep(duration);
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Clock that starts at a chosen instant and advances `multiplier` times
/// faster than real time.
pub struct SimulatedTimeSource {
    start_time: DateTime<Local>,
    started_at: Instant,
    multiplier: f64,
}

impl SimulatedTimeSource {
    /// Non-positive or non-finite multipliers fall back to real speed; others
    /// are clamped to `MINIMUM_SPEED..=MAXIMUM_SPEED`.
    pub fn new(start_time: DateTime<Local>, multiplier: f64) -> Self {
        let multiplier = if multiplier.is_finite() && multiplier > 0.0 {
            multiplier.clamp(MINIMUM_SPEED, MAXIMUM_SPEED)
        } else {
            1.0
        };
        Self {
            start_time,
            started_at: Instant::now(),
            multiplier,
        }
    }

    pub fn start_time(&self) -> DateTime<Local> {
        self.start_time
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Saturates at `MAX_SIMULATED_SPAN` past the start.
    fn simulated_after(&self, real_elapsed: StdDuration) -> DateTime<Local> {
        let max_ms = MAX_SIMULATED_SPAN.num_milliseconds();
        let simulated_ms =
            ((real_elapsed.as_secs_f64() * self.multiplier * 1000.0) as i64).clamp(0, max_ms);
        let elapsed = ChronoDuration::try_milliseconds(simulated_ms).unwrap_or(MAX_SIMULATED_SPAN);

        self.start_time
            .checked_add_signed(elapsed)
            .or_else(|| self.start_time.checked_add_signed(MAX_SIMULATED_SPAN))
            .unwrap_or(self.start_time)
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now(&self) -> DateTime<Local> {
        self.simulated_after(self.started_at.elapsed())
    }

    fn sleep(&self, duration: StdDuration) {
        std::thread::sleep(self.real_duration(duration));
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn real_duration(&self, duration: StdDuration) -> StdDuration {
        StdDuration::try_from_secs_f64(duration.as_secs_f64() / self.multiplier)
            .unwrap_or(StdDuration::MAX)
    }
}

/// Install the global time source. Only the first call has any effect.
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

fn source() -> &'static Arc<dyn TimeSource> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource))
}

pub fn now() -> DateTime<Local> {
    source().now()
}

pub fn sleep(duration: StdDuration) {
    source().sleep(duration)
}

pub fn is_simulated() -> bool {
    source().is_simulated()
}

/// Real-time length of `duration` under the installed source.
///
/// The Core uses this as its `recv_timeout` so that ticks keep pace with an
/// accelerated clock.
pub fn real_duration(duration: StdDuration) -> StdDuration {
    source().real_duration(duration)
}

/// Parse `YYYY-MM-DD HH:MM:SS` in the local timezone.
pub fn parse_datetime(s: &str) -> Result<DateTime<Local>, String> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))?;
    Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| "Ambiguous or invalid local time".to_string())
}
