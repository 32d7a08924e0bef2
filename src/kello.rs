//! Application coordinator for the live clock.
//!
//! Wires the pieces together and owns their lifetimes:
//! - configuration and the optional simulated time source
//! - the simulated weather provider and the preferences file handed to the Core
//! - the Core thread, the signal forwarder and the live display
//!
//! The `Kello` struct uses a builder pattern:
//! - Normal startup: `Kello::new(debug_enabled).run()`
//! - Time travel: `Kello::new(false).starting_at(start).with_speed(Some(60.0)).run()`

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Local};
use std::io::IsTerminal;
use std::sync::Arc;
use std::thread;

use crate::{
    config::Config,
    core::{Core, CoreMessage, CoreParams},
    display::{self, RenderOptions},
    io::signals::setup_signal_handler,
    state::{FilePreferenceStore, PreferenceStore},
    time::source::{SimulatedTimeSource, init_time_source},
    weather::{SimulatedWeather, WeatherProvider},
};

/// Builder for configuring and running the live clock.
///
/// # Examples
///
/// ```no_run
/// use kello::Kello;
///
/// # fn main() -> anyhow::Result<()> {
/// Kello::new(false).run()?;
/// # Ok(())
/// # }
/// ```
pub struct Kello {
    debug_enabled: bool,
    start_at: Option<DateTime<Local>>,
    speed: Option<f64>,
}

impl Kello {
    /// Create a new runner with defaults matching normal run
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            start_at: None,
            speed: None,
        }
    }

    /// Start the clock at `start` instead of now
    pub fn starting_at(mut self, start: Option<DateTime<Local>>) -> Self {
        self.start_at = start;
        self
    }

    /// Run the clock `speed` times faster than real time
    pub fn with_speed(mut self, speed: Option<f64>) -> Self {
        self.speed = speed;
        self
    }

    /// Execute the live clock until the user quits or a shutdown signal arrives.
    pub fn run(self) -> Result<()> {
        log_version!();
        if self.debug_enabled {
            log_pipe!();
            log_debug!("Debug mode enabled");
        }

        if !std::io::stdout().is_terminal() {
            bail!("The live clock needs a terminal; use 'kello status' for one-shot output");
        }

        let config = Config::load().context("Configuration failed")?;
        config.log_config();

        self.install_time_source();

        let provider: Arc<dyn WeatherProvider> = Arc::new(SimulatedWeather::new(
            config.weather_delay(),
            config.weather_failure_rate(),
        ));
        let store: Arc<dyn PreferenceStore> = Arc::new(FilePreferenceStore::default_location());
        let options = RenderOptions::from_config(&config, true);

        let mut core = Core::new(CoreParams {
            provider,
            store,
            config,
        });
        let snapshots = core.subscribe();
        let commands = core.sender();
        let _signals = setup_signal_handler(core.sender())?;

        let core_thread = thread::Builder::new()
            .name("core".to_string())
            .spawn(move || core.run())
            .context("Failed to start the core thread")?;

        let result = display::live::run(commands.clone(), snapshots, options);

        // The display may have exited on error; make sure the Core follows
        let _ = commands.send(CoreMessage::Shutdown);
        core_thread
            .join()
            .map_err(|_| anyhow!("Core thread panicked"))?;

        if result.is_ok() {
            log_end!();
        }
        result
    }

    fn install_time_source(&self) {
        let Some(source) = self.simulated_time_source() else {
            return;
        };

        log_block_start!(
            "Simulated time from {} at {}x",
            source.start_time().format("%Y-%m-%d %H:%M:%S"),
            source.multiplier()
        );
        init_time_source(Arc::new(source));
    }

    /// A simulated clock when `--at` or `--speed` was given, otherwise `None`.
    fn simulated_time_source(&self) -> Option<SimulatedTimeSource> {
        if self.start_at.is_none() && self.speed.is_none() {
            return None;
        }

        let start = self.start_at.unwrap_or_else(Local::now);
        Some(SimulatedTimeSource::new(start, self.speed.unwrap_or(1.0)))
    }
}
