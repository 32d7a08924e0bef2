//! Small helpers shared by commands and the display.

use std::path::Path;

/// Render a path with the home directory shortened to `~`.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        return format!("~/{}", stripped.display());
    }
    path.display().to_string()
}

/// Compact human duration: `3h20m`, `45m`, `12s`.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        if minutes > 0 {
            format!("{hours}h{minutes}m")
        } else {
            format!("{hours}h")
        }
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{seconds}s")
    }
}

/// Format fractional hours as `Hh MMm`, e.g. `21.33` → `21h 20m`.
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round().max(0.0) as u64;
    format!("{}h {:02}m", total_minutes / 60, total_minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(61), "1m");
        assert_eq!(format_duration(3600), "1h");
        assert_eq!(format_duration(3 * 3600 + 20 * 60), "3h20m");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(12.0), "12h 00m");
        assert_eq!(format_hours(2.75), "2h 45m");
        assert_eq!(format_hours(21.33), "21h 20m");
    }

    #[test]
    fn test_private_path_outside_home() {
        assert_eq!(private_path(Path::new("/etc/kello.toml")), "/etc/kello.toml");
    }
}
