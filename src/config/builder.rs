//! Default configuration file generation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::common::constants::*;
use crate::common::utils::private_path;
use crate::geo::City;

/// Write a commented default `kello.toml` to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content())
        .with_context(|| format!("Failed to write default config to {}", private_path(path)))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", private_path(path));

    Ok(())
}

/// Text of the default configuration file.
pub fn default_config_content() -> String {
    let cities = City::ALL.map(City::name).join(", ");

    let mut content = ConfigBuilder::new()
        .add_section("Location")
        .add_setting(
            "default_city",
            &format!("\"{DEFAULT_CITY}\""),
            &format!("Used until a city is chosen: {cities}"),
        )
        .add_section("Clock")
        .add_setting(
            "clock_style",
            &format!("\"{DEFAULT_CLOCK_STYLE}\""),
            "\"analog\", \"digital\" or \"both\"",
        )
        .add_setting(
            "show_seconds",
            &DEFAULT_SHOW_SECONDS.to_string(),
            "Show the seconds hand and seconds digits",
        )
        .add_section("Weather")
        .add_setting(
            "refresh_interval",
            &DEFAULT_REFRESH_INTERVAL.to_string(),
            &format!(
                "Full refresh including weather, in seconds ({MINIMUM_REFRESH_INTERVAL}-{MAXIMUM_REFRESH_INTERVAL})"
            ),
        )
        .add_setting(
            "weather_delay",
            &DEFAULT_WEATHER_DELAY.to_string(),
            &format!("Simulated weather latency in milliseconds (0-{MAXIMUM_WEATHER_DELAY})"),
        )
        .add_setting(
            "weather_failure_rate",
            &format!("{DEFAULT_WEATHER_FAILURE_RATE:.1}"),
            "Share of simulated fetches that fail (0.0-1.0)",
        )
        .build();
    content.push('\n');
    content
}

/// Builds TOML text with section headers and aligned trailing comments.
struct ConfigBuilder {
    entries: Vec<Entry>,
}

enum Entry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(Entry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(Entry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        // One space between the longest setting and its comment
        let width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Setting { line, .. } => Some(line.len()),
                Entry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut lines = Vec::new();
        for entry in self.entries {
            match entry {
                Entry::Section(header) => {
                    if !lines.is_empty() {
                        lines.push(String::new());
                    }
                    lines.push(header);
                }
                Entry::Setting { line, comment } => {
                    lines.push(format!("{line:<width$}{comment}"));
                }
            }
        }

        lines.join("\n")
    }
}
