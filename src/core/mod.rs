//! Core orchestration loop.
//!
//! The `Core` owns the only mutable [`ViewState`]. Everything else talks to it
//! through a single message channel:
//!
//! - display surfaces and the signal thread send commands ([`CoreMessage`])
//! - weather workers send their results back as [`CoreMessage::WeatherFetched`]
//!
//! Between messages the loop wakes once per tick, recomputes the date-derived
//! cards, starts a weather refresh when one is due, and broadcasts a snapshot.
//!
//! Weather results can arrive out of order (a slow fetch for the previous city
//! finishing after a fast one for the new city). Every request carries a
//! sequence number; a result is applied only when it is newer than the one
//! on screen and still matches the selected city.

pub mod broadcast;

use anyhow::Result;
use chrono::{DateTime, Local, TimeDelta};
use std::ops::ControlFlow;
use std::sync::{Arc, mpsc};
use std::time::Instant;

use crate::common::constants::TICK_INTERVAL;
use crate::config::Config;
use crate::geo::City;
use crate::state::display::ViewState;
use crate::state::{PreferenceStore, Preferences, save_or_warn};
use crate::weather::{WeatherData, WeatherProvider};

pub use broadcast::SnapshotBroadcaster;

/// Everything that can change the Core's state.
#[derive(Debug)]
pub enum CoreMessage {
    SetLocation(City),
    ToggleDarkMode,
    /// Fetch weather now and restart the refresh interval.
    Refresh,
    Shutdown,
    WeatherFetched {
        seq: u64,
        city: City,
        result: Result<WeatherData>,
    },
}

/// Dependencies for creating a Core.
pub struct CoreParams {
    pub provider: Arc<dyn WeatherProvider>,
    pub store: Arc<dyn PreferenceStore>,
    pub config: Config,
}

pub struct Core {
    provider: Arc<dyn WeatherProvider>,
    store: Arc<dyn PreferenceStore>,
    config: Config,
    state: ViewState,
    broadcaster: SnapshotBroadcaster,
    sender: mpsc::Sender<CoreMessage>,
    receiver: mpsc::Receiver<CoreMessage>,
    /// Sequence number of the most recently issued weather request.
    last_issued_seq: u64,
    /// Sequence number of the request whose result is on screen.
    last_applied_seq: u64,
    /// When the next scheduled refresh is due, in time-source time.
    next_refresh: Option<DateTime<Local>>,
}

impl Core {
    /// Load preferences and build the initial state for the current time.
    pub fn new(params: CoreParams) -> Self {
        let preferences = params.store.load(params.config.default_city());
        let state = ViewState::new(
            &crate::time::source::now(),
            preferences.selected_city,
            preferences.is_dark_mode,
        );
        let (sender, receiver) = mpsc::channel();

        Self {
            provider: params.provider,
            store: params.store,
            config: params.config,
            state,
            broadcaster: SnapshotBroadcaster::new(),
            sender,
            receiver,
            last_issued_seq: 0,
            last_applied_seq: 0,
            next_refresh: None,
        }
    }

    /// Handle for sending commands into the loop.
    pub fn sender(&self) -> mpsc::Sender<CoreMessage> {
        self.sender.clone()
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<ViewState> {
        self.broadcaster.subscribe()
    }

    pub fn snapshot(&self) -> &ViewState {
        &self.state
    }

    /// Run until a `Shutdown` message arrives.
    pub fn run(mut self) {
        log_block_start!("Clock running for {}", self.state.selected_city);

        self.tick(crate::time::source::now());
        let mut next_tick = Instant::now() + crate::time::source::real_duration(TICK_INTERVAL);

        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(timeout) {
                Ok(message) => {
                    if self.handle_message(message).is_break() {
                        break;
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                // The Core holds a sender itself, so this only happens on teardown
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }

            if Instant::now() >= next_tick {
                self.tick(crate::time::source::now());
                next_tick = Instant::now() + crate::time::source::real_duration(TICK_INTERVAL);
            }
        }

        log_block_start!("Clock stopped");
    }

    /// Advance the clock to `now`, start a refresh if one is due, and publish.
    pub fn tick(&mut self, now: DateTime<Local>) {
        self.state.advance_to(&now);

        if self.next_refresh.is_none_or(|due| now >= due) {
            self.request_weather(now);
        }

        self.publish();
    }

    pub fn handle_message(&mut self, message: CoreMessage) -> ControlFlow<()> {
        match message {
            CoreMessage::SetLocation(city) => self.set_location(city),
            CoreMessage::ToggleDarkMode => self.toggle_dark_mode(),
            CoreMessage::Refresh => {
                log_decorated!("Refreshing weather for {}", self.state.selected_city);
                self.request_weather(crate::time::source::now());
            }
            CoreMessage::Shutdown => return ControlFlow::Break(()),
            CoreMessage::WeatherFetched { seq, city, result } => {
                self.apply_weather(seq, city, result)
            }
        }

        self.publish();
        ControlFlow::Continue(())
    }

    fn set_location(&mut self, city: City) {
        if city != self.state.selected_city {
            log_decorated!("Location set to {}", city);
            self.state.selected_city = city;
            // Weather on screen belonged to the previous city
            self.state.weather = None;
            self.state.recompute();
        }

        self.save_preferences();
        self.request_weather(crate::time::source::now());
    }

    fn toggle_dark_mode(&mut self) {
        self.state.is_dark_mode = !self.state.is_dark_mode;
        log_decorated!(
            "Theme set to {}",
            if self.state.is_dark_mode { "dark" } else { "light" }
        );
        self.save_preferences();
    }

    fn save_preferences(&self) {
        save_or_warn(
            self.store.as_ref(),
            &Preferences {
                selected_city: self.state.selected_city,
                is_dark_mode: self.state.is_dark_mode,
            },
        );
    }

    /// Register a new request for the selected city, mark it loading and
    /// schedule the next refresh one interval after `now`.
    fn begin_request(&mut self, now: DateTime<Local>) -> (u64, City) {
        self.last_issued_seq += 1;
        self.state.is_loading = true;

        self.next_refresh = TimeDelta::from_std(self.config.refresh_interval())
            .ok()
            .and_then(|interval| now.checked_add_signed(interval));

        (self.last_issued_seq, self.state.selected_city)
    }

    /// Fetch weather for the selected city on a worker thread.
    fn request_weather(&mut self, now: DateTime<Local>) {
        let (seq, city) = self.begin_request(now);
        let provider = Arc::clone(&self.provider);
        let sender = self.sender.clone();

        log_debug!("Weather request {} for {}", seq, city);

        let spawned = std::thread::Builder::new()
            .name(format!("weather-{seq}"))
            .spawn(move || {
                let result = provider.fetch(city);
                let _ = sender.send(CoreMessage::WeatherFetched { seq, city, result });
            });

        if let Err(e) = spawned {
            self.apply_weather(
                seq,
                city,
                Err(anyhow::anyhow!("Failed to start weather worker: {e}")),
            );
        }
    }

    fn apply_weather(&mut self, seq: u64, city: City, result: Result<WeatherData>) {
        let is_latest = seq == self.last_issued_seq;
        if is_latest {
            self.state.is_loading = false;
        }

        match result {
            Ok(data) if seq > self.last_applied_seq && city == self.state.selected_city => {
                log_debug!(
                    "Weather for {}: {:.0}°C, {}, {}%",
                    city,
                    data.temperature,
                    data.conditions,
                    data.humidity
                );
                self.last_applied_seq = seq;
                self.state.weather = Some(data);
            }
            Ok(_) => {
                log_debug!("Discarding stale weather result {} for {}", seq, city);
            }
            Err(e) if is_latest => {
                log_warning!("Weather refresh failed: {}", e);
            }
            Err(e) => {
                log_debug!("Stale weather request {} failed: {}", seq, e);
            }
        }
    }

    fn publish(&mut self) {
        self.broadcaster.publish(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryPreferenceStore;
    use crate::weather::{FixedWeather, MockWeatherProvider, WeatherCondition};
    use chrono::TimeZone;
    use std::time::Duration;

    fn weather(city: City, temperature: f64) -> WeatherData {
        WeatherData {
            city,
            temperature,
            conditions: WeatherCondition::Sunny,
            humidity: 60,
            timestamp: Local::now(),
        }
    }

    fn fixed_provider() -> Arc<dyn WeatherProvider> {
        Arc::new(FixedWeather {
            temperature: 15.0,
            conditions: WeatherCondition::Rainy,
            humidity: 70,
            timestamp: Local::now(),
        })
    }

    fn core_with(
        provider: Arc<dyn WeatherProvider>,
        store: Arc<MemoryPreferenceStore>,
    ) -> Core {
        Core::new(CoreParams {
            provider,
            store,
            config: Config::default(),
        })
    }

    fn fetched(seq: u64, city: City, result: Result<WeatherData>) -> CoreMessage {
        CoreMessage::WeatherFetched { seq, city, result }
    }

    #[test]
    fn test_new_uses_stored_preferences() {
        let store = Arc::new(MemoryPreferenceStore::new(Some(Preferences {
            selected_city: City::Rovaniemi,
            is_dark_mode: true,
        })));
        let core = core_with(fixed_provider(), store);

        assert_eq!(core.snapshot().selected_city, City::Rovaniemi);
        assert!(core.snapshot().is_dark_mode);
    }

    #[test]
    fn test_new_falls_back_to_configured_city() {
        let store = Arc::new(MemoryPreferenceStore::default());
        let config = Config {
            default_city: Some("Oulu".to_string()),
            ..Config::default()
        };
        let core = Core::new(CoreParams {
            provider: fixed_provider(),
            store,
            config,
        });

        assert_eq!(core.snapshot().selected_city, City::Oulu);
        assert!(!core.snapshot().is_dark_mode);
    }

    #[test]
    fn test_first_tick_computes_cards_and_requests_weather() {
        let mut core = core_with(fixed_provider(), Arc::default());
        let now = Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        core.tick(now);

        let state = core.snapshot();
        assert!(state.season.is_some());
        assert!(state.light.is_some());
        assert!(state.is_dst);
        assert!(state.is_loading);
        assert_eq!(core.last_issued_seq, 1);
    }

    #[test]
    fn test_ticks_within_interval_do_not_refetch() {
        let mut core = core_with(fixed_provider(), Arc::default());
        let now = crate::time::source::now();

        core.tick(now);
        core.tick(now + TimeDelta::seconds(1));
        core.tick(now + TimeDelta::seconds(60));
        assert_eq!(core.last_issued_seq, 1);

        core.tick(now + TimeDelta::minutes(16));
        assert_eq!(core.last_issued_seq, 2);
    }

    #[test]
    fn test_stale_result_does_not_overwrite_newer() {
        let mut core = core_with(fixed_provider(), Arc::default());
        let (first, city) = core.begin_request(Local::now());
        let (second, _) = core.begin_request(Local::now());

        let _ = core.handle_message(fetched(second, city, Ok(weather(city, 20.0))));
        let _ = core.handle_message(fetched(first, city, Ok(weather(city, 5.0))));

        let state = core.snapshot();
        assert_eq!(state.weather.as_ref().unwrap().temperature, 20.0);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_result_for_previous_city_is_discarded() {
        let mut core = core_with(fixed_provider(), Arc::default());
        let (seq, helsinki) = core.begin_request(Local::now());
        assert_eq!(helsinki, City::Helsinki);

        core.state.selected_city = City::Utsjoki;
        let _ = core.handle_message(fetched(seq, helsinki, Ok(weather(helsinki, 18.0))));

        assert!(core.snapshot().weather.is_none());
        assert!(!core.snapshot().is_loading);
    }

    #[test]
    fn test_loading_tracks_latest_request_only() {
        let mut core = core_with(fixed_provider(), Arc::default());
        let (first, city) = core.begin_request(Local::now());
        let (second, _) = core.begin_request(Local::now());

        let _ = core.handle_message(fetched(first, city, Ok(weather(city, 9.0))));
        assert!(core.snapshot().is_loading);
        assert_eq!(core.snapshot().weather.as_ref().unwrap().temperature, 9.0);

        let _ = core.handle_message(fetched(second, city, Ok(weather(city, 11.0))));
        assert!(!core.snapshot().is_loading);
        assert_eq!(core.snapshot().weather.as_ref().unwrap().temperature, 11.0);
    }

    #[test]
    fn test_failure_keeps_prior_weather() {
        let mut core = core_with(fixed_provider(), Arc::default());
        let (seq, city) = core.begin_request(Local::now());
        let _ = core.handle_message(fetched(seq, city, Ok(weather(city, 13.0))));

        let (seq, city) = core.begin_request(Local::now());
        assert!(core.snapshot().is_loading);
        let _ = core.handle_message(fetched(seq, city, Err(anyhow::anyhow!("offline"))));

        let state = core.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.weather.as_ref().unwrap().temperature, 13.0);
    }

    #[test]
    fn test_set_location_fetches_for_new_city() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch()
            .withf(|city| *city == City::Oulu)
            .times(1)
            .returning(|city| Ok(weather(city, 7.0)));

        let store = Arc::new(MemoryPreferenceStore::default());
        let mut core = core_with(Arc::new(provider), Arc::clone(&store));

        let _ = core.handle_message(CoreMessage::SetLocation(City::Oulu));
        assert!(core.snapshot().is_loading);
        assert_eq!(store.stored().unwrap().selected_city, City::Oulu);

        let message = core.receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        let _ = core.handle_message(message);

        let state = core.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.current_weather().unwrap().temperature, 7.0);
    }

    #[test]
    fn test_set_location_clears_other_city_weather() {
        let mut core = core_with(fixed_provider(), Arc::default());
        let (seq, city) = core.begin_request(Local::now());
        let _ = core.handle_message(fetched(seq, city, Ok(weather(city, 13.0))));

        let _ = core.handle_message(CoreMessage::SetLocation(City::Tampere));

        assert!(core.snapshot().weather.is_none());
        assert_eq!(core.snapshot().selected_city, City::Tampere);
    }

    #[test]
    fn test_toggle_dark_mode_persists() {
        let store = Arc::new(MemoryPreferenceStore::default());
        let mut core = core_with(fixed_provider(), Arc::clone(&store));

        let _ = core.handle_message(CoreMessage::ToggleDarkMode);
        assert!(core.snapshot().is_dark_mode);
        assert!(store.stored().unwrap().is_dark_mode);

        let _ = core.handle_message(CoreMessage::ToggleDarkMode);
        assert!(!store.stored().unwrap().is_dark_mode);
    }

    #[test]
    fn test_failed_preference_write_does_not_affect_state() {
        let mut core = core_with(
            fixed_provider(),
            Arc::new(MemoryPreferenceStore::failing()),
        );

        let _ = core.handle_message(CoreMessage::ToggleDarkMode);
        assert!(core.snapshot().is_dark_mode);
    }

    #[test]
    fn test_refresh_restarts_schedule() {
        let mut core = core_with(fixed_provider(), Arc::default());
        let _ = core.handle_message(CoreMessage::Refresh);
        assert_eq!(core.last_issued_seq, 1);
        assert!(core.next_refresh.is_some());
    }

    #[test]
    fn test_shutdown_breaks_loop() {
        let mut core = core_with(fixed_provider(), Arc::default());
        assert!(core.handle_message(CoreMessage::Shutdown).is_break());
        assert!(
            core.handle_message(CoreMessage::ToggleDarkMode)
                .is_continue()
        );
    }

    #[test]
    fn test_messages_publish_snapshots() {
        let mut core = core_with(fixed_provider(), Arc::default());
        let snapshots = core.subscribe();

        let _ = core.handle_message(CoreMessage::ToggleDarkMode);

        assert!(snapshots.try_recv().unwrap().is_dark_mode);
    }
}
