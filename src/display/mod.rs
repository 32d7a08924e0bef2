//! Terminal rendering of view-state snapshots.
//!
//! [`render`] turns a [`ViewState`] into plain lines of text (optionally
//! colored). It is used both by the live display and by `kello status`.

pub mod face;
pub mod live;
pub mod theme;

use chrono::Timelike;

use crate::almanac::SpecialCondition;
use crate::common::utils::format_hours;
use crate::config::{ClockStyle, Config};
use crate::state::display::ViewState;
use theme::{Theme, paint};

pub use theme::Palette;

/// How a snapshot is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub clock_style: ClockStyle,
    pub show_seconds: bool,
    /// Emit ANSI colors from the snapshot's theme.
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            clock_style: ClockStyle::Both,
            show_seconds: true,
            color: false,
        }
    }
}

impl RenderOptions {
    pub fn from_config(config: &Config, color: bool) -> Self {
        Self {
            clock_style: config.clock_style(),
            show_seconds: config.show_seconds(),
            color,
        }
    }
}

/// Render `state` as newline-separated text.
pub fn render(state: &ViewState, options: &RenderOptions) -> String {
    render_lines(state, options).join("\n")
}

pub fn render_lines(state: &ViewState, options: &RenderOptions) -> Vec<String> {
    let palette = Theme::from_dark_mode(state.is_dark_mode).palette();
    let color = options.color;
    let accent = |text: &str| paint(text, palette.accent, color);
    let muted = |text: &str| paint(text, palette.muted, color);
    let plain = |text: &str| paint(text, palette.foreground, color);

    let mut lines = Vec::new();

    lines.push(format!(
        "{} {}",
        accent(state.selected_city.name()),
        muted(&format!("· {}", state.offset_label))
    ));
    lines.push(String::new());

    let time = state.now.time();
    if options.clock_style.shows_analog() {
        lines.extend(
            face::render_dial(time, options.show_seconds)
                .iter()
                .map(|line| accent(line.as_str())),
        );
        lines.push(String::new());
    }

    if options.clock_style.shows_digital() {
        let digits = if options.show_seconds {
            format!(
                "{:02}:{:02}:{:02}",
                time.hour(),
                time.minute(),
                time.second()
            )
        } else {
            format!("{:02}:{:02}", time.hour(), time.minute())
        };
        lines.push(accent(&digits));
    }
    lines.push(plain(&state.now.format("%A %-d.%-m.%Y").to_string()));
    lines.push(String::new());

    if let Some(season) = &state.season {
        let days = if season.days_left == 1 { "day" } else { "days" };
        lines.push(format!(
            "{}  {}",
            accent("Season"),
            plain(&format!(
                "{} · {} {} until {}",
                season.season,
                season.days_left,
                days,
                season.season.next()
            ))
        ));
        lines.push(format!("  {}", muted(&season.description)));
        lines.push(format!("  {}", muted(&format!("Tip: {}", season.tip))));
        lines.push(String::new());
    }

    if let Some(light) = &state.light {
        lines.push(format!(
            "{}  {}",
            accent("Daylight"),
            plain(&format!(
                "sunrise {} · sunset {} · {}",
                light.sunrise.format("%H:%M"),
                light.sunset.format("%H:%M"),
                format_hours(light.daylight_hours)
            ))
        ));
        if light.special_condition != SpecialCondition::None {
            lines.push(format!("  {}", muted(&light.special_condition.to_string())));
        }
        lines.push(String::new());
    }

    let weather_line = match (state.current_weather(), state.is_loading) {
        (Some(weather), loading) => {
            let mut text = format!(
                "{} {:.0}°C {} · humidity {}%",
                weather.conditions.symbol(),
                weather.temperature,
                weather.conditions,
                weather.humidity
            );
            if loading {
                text.push_str(" · updating…");
            }
            text
        }
        (None, true) => "Loading…".to_string(),
        (None, false) => "Unavailable".to_string(),
    };
    lines.push(format!("{}  {}", accent("Weather"), plain(&weather_line)));

    lines
}

/// Key help shown at the bottom of the live display.
pub fn key_hints(state: &ViewState, color: bool) -> String {
    let palette = Theme::from_dark_mode(state.is_dark_mode).palette();
    paint(
        "[t] theme  [1-5] city  [r] refresh  [q] quit",
        palette.muted,
        color,
    )
}
