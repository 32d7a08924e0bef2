//! Main entry point for kello.
//!
//! Parses the command line and dispatches to the live clock or a one-shot
//! command. Application logic lives in the library crate.

use anyhow::Result;

use kello::args::{CliAction, ParsedArgs};
use kello::common::constants::EXIT_FAILURE;
use kello::common::logger::Log;
use kello::{Kello, commands, config, log_error_exit};

fn main() -> Result<()> {
    let parsed = ParsedArgs::from_env();

    Log::set_debug(parsed.debug_enabled);
    let log_guard = match parsed.log_file.clone() {
        Some(path) => Some(Log::start_file_logging(path)?),
        None => None,
    };
    config::set_config_dir(parsed.config_dir.clone())?;

    let result = match parsed.action {
        CliAction::ShowVersion => {
            kello::args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            kello::args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            kello::args::display_help();
            drop(log_guard);
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Help { command } => commands::help::run_help_command(command.as_deref()),
        CliAction::Run { start_at, speed } => Kello::new(parsed.debug_enabled)
            .starting_at(start_at)
            .with_speed(speed)
            .run(),
        CliAction::Status { city, date, json } => {
            commands::status::handle_status_command(city.as_deref(), date, json)
        }
        CliAction::Season { date, json } => commands::almanac::handle_season_command(date, json),
        CliAction::Daylight { city, date, json } => {
            commands::almanac::handle_daylight_command(city.as_deref(), date, json)
        }
        CliAction::Dst { year, date, json } => {
            commands::almanac::handle_dst_command(year, date, json)
        }
        CliAction::City { name } => commands::city::handle_city_command(&name).inspect_err(|_| {
            commands::help::show_command_usage("city");
        }),
        CliAction::Theme { choice } => commands::theme::handle_theme_command(choice),
    };

    if let Err(e) = result {
        Log::set_enabled(true);
        log_error_exit!("{}", e);
        for cause in e.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        drop(log_guard);
        std::process::exit(EXIT_FAILURE);
    }

    drop(log_guard);
    Ok(())
}
