//! Command-line argument parsing and processing.
//!
//! Global flags (`--debug`, `--config`, `--log`) may appear anywhere on the
//! command line. The first bare word selects a command; without one, kello
//! runs the live clock.

use chrono::{DateTime, Local, NaiveDate};

use crate::common::constants::{MAXIMUM_SPEED, MINIMUM_SPEED};
use crate::display::theme::Theme;

/// What `kello theme` should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Dark,
    Light,
    Toggle,
}

impl ThemeChoice {
    pub fn from_name(name: &str) -> Option<Self> {
        if name.trim().eq_ignore_ascii_case("toggle") {
            return Some(ThemeChoice::Toggle);
        }
        Theme::from_name(name).map(|theme| match theme {
            Theme::Dark => ThemeChoice::Dark,
            Theme::Light => ThemeChoice::Light,
        })
    }
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Live clock, optionally on simulated time
    Run {
        start_at: Option<DateTime<Local>>,
        speed: Option<f64>,
    },
    Status {
        city: Option<String>,
        date: Option<NaiveDate>,
        json: bool,
    },
    Season {
        date: Option<NaiveDate>,
        json: bool,
    },
    Daylight {
        city: Option<String>,
        date: Option<NaiveDate>,
        json: bool,
    },
    Dst {
        year: Option<i32>,
        date: Option<NaiveDate>,
        json: bool,
    },
    /// Persist the selected city
    City { name: String },
    /// Persist the theme
    Theme { choice: ThemeChoice },
    /// Detailed help for one command, or the command overview
    Help { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
#[derive(Debug)]
pub struct ParsedArgs {
    pub action: CliAction,
    pub debug_enabled: bool,
    pub config_dir: Option<String>,
    pub log_file: Option<String>,
}

/// Value-taking flags collected before the action is chosen.
#[derive(Default)]
struct Flags {
    city: Option<String>,
    date: Option<NaiveDate>,
    year: Option<i32>,
    json: bool,
    start_at: Option<DateTime<Local>>,
    speed: Option<f64>,
}

impl ParsedArgs {
    /// Parse command-line arguments (including the program name) into an action.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut invalid = false;
        let mut config_dir: Option<String> = None;
        let mut log_file: Option<String> = None;
        let mut flags = Flags::default();
        let mut words: Vec<String> = Vec::new();

        let mut i = 0;
        while i < args_vec.len() {
            let arg = args_vec[i].as_str();

            // Flags that consume the next argument
            let mut take_value = |usage: &str| -> Option<String> {
                match args_vec.get(i + 1) {
                    Some(value) if !value.starts_with("--") => {
                        i += 1;
                        Some(value.clone())
                    }
                    _ => {
                        log_warning!("Missing value for {}. Usage: {}", arg, usage);
                        None
                    }
                }
            };

            match arg {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--json" | "-j" => flags.json = true,
                "--config" | "-c" => match take_value("--config <directory>") {
                    Some(dir) => config_dir = Some(dir),
                    None => invalid = true,
                },
                "--log" | "-l" => match take_value("--log <file>") {
                    Some(path) => log_file = Some(path),
                    None => invalid = true,
                },
                "--city" => match take_value("--city <name>") {
                    Some(city) => flags.city = Some(city),
                    None => invalid = true,
                },
                "--date" => match take_value("--date <YYYY-MM-DD>") {
                    Some(value) => match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
                        Ok(date) => flags.date = Some(date),
                        Err(_) => {
                            log_warning!("Invalid date '{}'. Use YYYY-MM-DD", value);
                            invalid = true;
                        }
                    },
                    None => invalid = true,
                },
                "--year" => match take_value("--year <YYYY>") {
                    Some(value) => match value.parse::<i32>() {
                        Ok(year) if (1..=9999).contains(&year) => flags.year = Some(year),
                        _ => {
                            log_warning!("Invalid year '{}'", value);
                            invalid = true;
                        }
                    },
                    None => invalid = true,
                },
                "--at" => match take_value("--at \"YYYY-MM-DD HH:MM:SS\"") {
                    Some(value) => match crate::time::source::parse_datetime(&value) {
                        Ok(start) => flags.start_at = Some(start),
                        Err(e) => {
                            log_warning!("{}", e);
                            invalid = true;
                        }
                    },
                    None => invalid = true,
                },
                "--speed" => match take_value("--speed <multiplier>") {
                    Some(value) => match value.parse::<f64>() {
                        Ok(speed) if (MINIMUM_SPEED..=MAXIMUM_SPEED).contains(&speed) => {
                            flags.speed = Some(speed)
                        }
                        _ => {
                            log_warning!(
                                "Speed must be between {} and {}, got '{}'",
                                MINIMUM_SPEED,
                                MAXIMUM_SPEED,
                                value
                            );
                            invalid = true;
                        }
                    },
                    None => invalid = true,
                },
                unknown if unknown.starts_with('-') => {
                    log_warning!("Unknown argument: {}", unknown);
                    invalid = true;
                }
                word => words.push(word.to_string()),
            }
            i += 1;
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if invalid {
            CliAction::ShowHelpDueToError
        } else if display_help {
            match words.first() {
                Some(command) => CliAction::Help {
                    command: Some(command.clone()),
                },
                None => CliAction::ShowHelp,
            }
        } else {
            Self::command_action(&words, flags)
        };

        ParsedArgs {
            action,
            debug_enabled,
            config_dir,
            log_file,
        }
    }

    fn command_action(words: &[String], flags: Flags) -> CliAction {
        let Some((command, rest)) = words.split_first() else {
            return CliAction::Run {
                start_at: flags.start_at,
                speed: flags.speed,
            };
        };

        let expect_no_arguments = |action: CliAction| {
            if let Some(extra) = rest.first() {
                log_warning!("Unexpected argument for {}: {}", command, extra);
                CliAction::ShowHelpDueToError
            } else {
                action
            }
        };

        match command.as_str() {
            "run" | "r" => expect_no_arguments(CliAction::Run {
                start_at: flags.start_at,
                speed: flags.speed,
            }),
            "status" | "s" => expect_no_arguments(CliAction::Status {
                city: flags.city,
                date: flags.date,
                json: flags.json,
            }),
            "season" => expect_no_arguments(CliAction::Season {
                date: flags.date,
                json: flags.json,
            }),
            "daylight" => expect_no_arguments(CliAction::Daylight {
                city: flags.city,
                date: flags.date,
                json: flags.json,
            }),
            "dst" => {
                if flags.year.is_some() && flags.date.is_some() {
                    log_warning!("Use either --year or --date with dst, not both");
                    return CliAction::ShowHelpDueToError;
                }
                expect_no_arguments(CliAction::Dst {
                    year: flags.year,
                    date: flags.date,
                    json: flags.json,
                })
            }
            "city" | "c" => match rest {
                [name] => CliAction::City { name: name.clone() },
                [] => {
                    log_warning!("Missing city name. Usage: kello city <name>");
                    CliAction::ShowHelpDueToError
                }
                [_, extra, ..] => {
                    log_warning!("Unexpected argument for city: {}", extra);
                    CliAction::ShowHelpDueToError
                }
            },
            "theme" | "t" => match rest {
                [name] => match ThemeChoice::from_name(name) {
                    Some(choice) => CliAction::Theme { choice },
                    None => {
                        log_warning!("Unknown theme '{}'. Use dark, light or toggle", name);
                        CliAction::ShowHelpDueToError
                    }
                },
                _ => {
                    log_warning!("Usage: kello theme <dark|light|toggle>");
                    CliAction::ShowHelpDueToError
                }
            },
            "help" | "h" => CliAction::Help {
                command: rest.first().cloned(),
            },
            unknown => {
                log_warning!("Unknown command: {}", unknown);
                CliAction::ShowHelpDueToError
            }
        }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    crate::common::logger::Log::emit_raw(concat!("┗ ", env!("CARGO_PKG_DESCRIPTION")));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("kello [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>       Use custom configuration directory");
    log_indented!("-d, --debug              Enable detailed debug output");
    log_indented!("-h, --help               Print help information");
    log_indented!("-l, --log <file>         Write log output to a file");
    log_indented!("-V, --version            Print version information");
    log_block_start!("Commands:");
    log_indented!("run, r                   Live clock (default)");
    log_indented!("status, s                Print the full clock snapshot once");
    log_indented!("season                   Current season and days until the next");
    log_indented!("daylight                 Sunrise, sunset and day length");
    log_indented!("dst                      Finnish daylight saving window");
    log_indented!("city, c <name>           Select and remember a city");
    log_indented!("theme, t <mode>          Select dark, light or toggle the theme");
    log_indented!("help, h [COMMAND]        Show detailed help for a command");
    log_end!();
}
