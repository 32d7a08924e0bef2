//! Help command implementation for kello.
//!
//! Dispatches to command-specific help, or lists the commands.

use anyhow::Result;

/// Show brief usage for a command (used for error messages)
pub fn show_command_usage(command: &str) {
    match command {
        "city" | "c" => log_block_start!("Usage: kello city <name>"),
        "daylight" => log_block_start!("Usage: kello daylight [--city <name>] [--date <YYYY-MM-DD>]"),
        "dst" => log_block_start!("Usage: kello dst [--year <YYYY> | --date <YYYY-MM-DD>]"),
        "run" | "r" => log_block_start!("Usage: kello run [--at <datetime>] [--speed <N>]"),
        "season" => log_block_start!("Usage: kello season [--date <YYYY-MM-DD>]"),
        "status" | "s" => log_block_start!("Usage: kello status [OPTIONS]"),
        "theme" | "t" => log_block_start!("Usage: kello theme <dark|light|toggle>"),
        _ => log_block_start!("Usage: kello [OPTIONS] [COMMAND]"),
    }
}

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("city") | Some("c") => super::city::display_help(),
        Some("daylight") => super::almanac::display_daylight_help(),
        Some("dst") => super::almanac::display_dst_help(),
        Some("help") | Some("h") => display_help_help(),
        Some("run") | Some("r") => display_run_help(),
        Some("season") => super::almanac::display_season_help(),
        Some("status") | Some("s") => super::status::display_help(),
        Some("theme") | Some("t") => super::theme::display_help(),
        Some(unknown) => {
            log_warning!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

/// Display general help focused on commands (for the help command)
fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("run, r                  Live clock (default)");
    log_indented!("status, s               Print the full clock snapshot once");
    log_indented!("season                  Current season and days until the next");
    log_indented!("daylight                Sunrise, sunset and day length");
    log_indented!("dst                     Finnish daylight saving time");
    log_indented!("city, c <name>          Select and remember a city");
    log_indented!("theme, t <mode>         Select dark, light or toggle the theme");
    log_indented!("help, h [COMMAND]       Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'kello help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'kello --help' to see all options and general usage.");
    log_end!();
}

fn display_run_help() {
    log_version!();
    log_block_start!("run - Live clock");
    log_block_start!("Usage: kello [run] [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("--at <datetime>     Start at \"YYYY-MM-DD HH:MM:SS\" local time");
    log_indented!("--speed <N>         Run the clock N times faster (0.01 to 10000)");
    log_block_start!("Keys:");
    log_indented!("1-5                 Helsinki, Tampere, Oulu, Rovaniemi, Utsjoki");
    log_indented!("t                   Toggle dark mode");
    log_indented!("r                   Refresh weather now");
    log_indented!("q, Esc, Ctrl+C      Quit");
    log_pipe!();
    log_info!("Send SIGUSR1 to refresh weather from outside the terminal.");
    log_end!();
}

fn display_help_help() {
    log_version!();
    log_block_start!("help - Show detailed help for commands");
    log_block_start!("Usage: kello help [COMMAND]");
    log_block_start!("Examples:");
    log_indented!("kello help");
    log_indented!("kello help dst");
    log_end!();
}
