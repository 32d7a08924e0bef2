//! Structured logging with box-drawing output.
//!
//! Every line kello prints to the terminal outside of the live display goes
//! through this module, so one-shot commands, startup messages and errors all
//! share the same visual frame:
//!
//! ```text
//! ┏ kello v0.3.0 ━━╸
//! ┃
//! ┣ Loading configuration
//! ┃   Default city: Helsinki
//! ┣[WARNING] Stored city 'Turku' is unknown, using Helsinki
//! ╹
//! ```
//!
//! Logging can be switched off at runtime (the live display does this while it
//! owns the screen) and can be redirected to a file through a background
//! writer thread.
//!
//! ## Conventions
//!
//! - `log_block_start!` opens a new conceptual block (`┃` spacer then `┣ message`).
//! - `log_decorated!` continues a block (`┣ message`).
//! - `log_indented!` lists details under the previous line (`┃   message`).
//! - `log_pipe!` inserts a bare `┃` before a semantic message that starts a block.
//! - `log_info!`, `log_warning!`, `log_error!`, `log_debug!`, `log_critical!` print a
//!   colored `[LEVEL]` tag after the pipe.
//! - `log_version!` and `log_end!` open and close a whole run.

use std::fmt;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, channel};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
// `[DEBUG]` lines are dropped unless --debug is given
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

// Set when --log is active; output then goes to the writer thread instead of stdout
static LOG_CHANNEL: OnceLock<Sender<LogMessage>> = OnceLock::new();

enum LogMessage {
    Formatted(String),
    Shutdown,
}

/// Shape of a single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// `┣ message`
    Decorated,
    /// `┃   message`
    Indented,
    /// `┃` followed by `┣ message`
    BlockStart,
    /// `┃` followed by `┗[ERROR] message`
    ErrorExit,
    /// `┣[LEVEL] message`
    Level(Level),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Debug,
    Warning,
    Error,
    Critical,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Info => "\x1b[32mINFO\x1b[0m",
            Level::Debug => "\x1b[32mDEBUG\x1b[0m",
            Level::Warning => "\x1b[33mWARNING\x1b[0m",
            Level::Error => "\x1b[31mERROR\x1b[0m",
            Level::Critical => "\x1b[31mCRITICAL\x1b[0m",
        }
    }
}

/// Logging entry point used by the macros.
pub struct Log;

impl Log {
    /// Enable or disable all log output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_debug() -> bool {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Route all further output to `file_path` until the returned guard drops.
    pub fn start_file_logging(file_path: String) -> anyhow::Result<LoggerGuard> {
        let (tx, rx) = channel();

        LOG_CHANNEL
            .set(tx.clone())
            .map_err(|_| anyhow::anyhow!("Logger channel already initialized"))?;

        let handle = std::thread::Builder::new()
            .name("log-writer".to_string())
            .spawn(move || {
                let mut file = std::fs::File::create(&file_path)?;
                loop {
                    match rx.recv() {
                        Ok(LogMessage::Formatted(text)) => file.write_all(text.as_bytes())?,
                        Ok(LogMessage::Shutdown) | Err(_) => {
                            file.flush()?;
                            break;
                        }
                    }
                }
                Ok::<(), anyhow::Error>(())
            })?;

        Ok(LoggerGuard {
            tx,
            handle: Some(handle),
        })
    }

    /// `[HH:MM:SS] ` while running on simulated time, empty otherwise.
    pub fn timestamp_prefix() -> String {
        if crate::time::source::is_initialized() && crate::time::source::is_simulated() {
            let now = crate::time::source::now();
            format!("[{}] ", now.format("%H:%M:%S"))
        } else {
            String::new()
        }
    }

    /// Build the full text of one log line, including the trailing newline.
    pub fn format_line(line: Line, prefix: &str, message: &str) -> String {
        match line {
            Line::Decorated => format!("{prefix}┣ {message}\n"),
            Line::Indented => format!("{prefix}┃   {message}\n"),
            Line::BlockStart => format!("{prefix}┃\n{prefix}┣ {message}\n"),
            Line::ErrorExit => format!(
                "{prefix}┃\n{prefix}┗[{}] {message}\n",
                Level::Error.tag()
            ),
            Line::Level(level) => format!("{prefix}┣[{}] {message}\n", level.tag()),
        }
    }

    /// Format and write one line if logging is enabled.
    pub fn emit(line: Line, args: fmt::Arguments<'_>) {
        if !Self::is_enabled() || (line == Line::Level(Level::Debug) && !Self::is_debug()) {
            return;
        }
        let prefix = Self::timestamp_prefix();
        write_output(&Self::format_line(line, &prefix, &args.to_string()));
    }

    /// Write a line that has no message part (`┃`, `╹`, the version header).
    pub fn emit_raw(text: &str) {
        if !Self::is_enabled() {
            return;
        }
        let prefix = Self::timestamp_prefix();
        write_output(&format!("{prefix}{text}\n"));
    }
}

/// Keeps the file writer thread alive; flushes and joins it on drop.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Send text to the log file when file logging is active, stdout otherwise.
pub fn write_output(text: &str) {
    if let Some(tx) = LOG_CHANNEL.get() {
        let _ = tx.send(LogMessage::Formatted(strip_ansi_codes(text)));
    } else {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

// # Logging Macros

#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit(
            $crate::common::logger::Line::Decorated,
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit(
            $crate::common::logger::Line::Indented,
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit(
            $crate::common::logger::Line::BlockStart,
            format_args!($($arg)*),
        )
    };
}

/// Error line that closes the current run (`┗[ERROR]`).
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit(
            $crate::common::logger::Line::ErrorExit,
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::common::logger::Log::emit_raw("┃")
    };
}

#[macro_export]
macro_rules! log_version {
    () => {
        $crate::common::logger::Log::emit_raw(concat!(
            "┏ kello v",
            env!("CARGO_PKG_VERSION"),
            " ━━╸"
        ))
    };
}

#[macro_export]
macro_rules! log_end {
    () => {
        $crate::common::logger::Log::emit_raw("╹")
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit(
            $crate::common::logger::Line::Level($crate::common::logger::Level::Info),
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit(
            $crate::common::logger::Line::Level($crate::common::logger::Level::Debug),
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit(
            $crate::common::logger::Line::Level($crate::common::logger::Level::Warning),
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit(
            $crate::common::logger::Line::Level($crate::common::logger::Level::Error),
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_critical {
    ($($arg:tt)*) => {
        $crate::common::logger::Log::emit(
            $crate::common::logger::Line::Level($crate::common::logger::Level::Critical),
            format_args!($($arg)*),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_shapes() {
        assert_eq!(Log::format_line(Line::Decorated, "", "hello"), "┣ hello\n");
        assert_eq!(Log::format_line(Line::Indented, "", "detail"), "┃   detail\n");
        assert_eq!(
            Log::format_line(Line::BlockStart, "[12:00:00] ", "start"),
            "[12:00:00] ┃\n[12:00:00] ┣ start\n"
        );
    }

    #[test]
    fn test_level_lines_strip_to_plain_tags() {
        let line = Log::format_line(Line::Level(Level::Warning), "", "careful");
        assert_eq!(strip_ansi_codes(&line), "┣[WARNING] careful\n");

        let exit = Log::format_line(Line::ErrorExit, "", "fatal");
        assert_eq!(strip_ansi_codes(&exit), "┃\n┗[ERROR] fatal\n");
    }

    #[test]
    fn test_strip_ansi_keeps_lone_escape() {
        assert_eq!(strip_ansi_codes("a\x1bb"), "a\x1bb");
        assert_eq!(strip_ansi_codes("\x1b[1;31mred\x1b[0m"), "red");
    }
}
