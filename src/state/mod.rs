//! Persisted user state, following XDG Base Directory standards.
//!
//! Configuration (`kello.toml`) is hand-edited and read-only to the program.
//! Preferences are the opposite: written by the program whenever the user
//! picks a city or flips the theme, and kept in `XDG_STATE_HOME`.
//!
//! ```json
//! { "selectedCity": "Oulu", "isDarkMode": true }
//! ```

pub mod display;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::common::constants::*;
use crate::common::utils::private_path;
use crate::geo::City;

/// Directory holding kello's state files.
pub fn get_state_dir() -> PathBuf {
    let state_home = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".local/state")
        });

    state_home.join(APP_DIR_NAME)
}

/// Selected city and theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub selected_city: City,
    pub is_dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            selected_city: City::default(),
            is_dark_mode: DEFAULT_DARK_MODE,
        }
    }
}

/// On-disk shape. The city stays a plain string so an unknown name can be
/// recovered from instead of failing the whole file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_dark_mode: Option<bool>,
}

impl Preferences {
    /// Build preferences from stored JSON text. Missing keys use `fallback_city`
    /// and light mode; an unknown city name resolves to Helsinki.
    pub fn from_json(content: &str, fallback_city: City) -> Result<Self> {
        let stored: StoredPreferences =
            serde_json::from_str(content).context("Failed to parse preferences")?;

        let selected_city = match stored.selected_city.as_deref() {
            None => fallback_city,
            Some(name) => City::from_name(name).unwrap_or_else(|| {
                log_warning!("Stored city '{}' is not supported, using Helsinki", name);
                City::Helsinki
            }),
        };

        Ok(Self {
            selected_city,
            is_dark_mode: stored.is_dark_mode.unwrap_or(DEFAULT_DARK_MODE),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        let stored = StoredPreferences {
            selected_city: Some(self.selected_city.name().to_string()),
            is_dark_mode: Some(self.is_dark_mode),
        };
        Ok(serde_json::to_string_pretty(&stored)?)
    }
}

/// Where preferences are read from and written to.
pub trait PreferenceStore: Send + Sync {
    /// Load stored preferences, seeding a missing city with `fallback_city`.
    fn load(&self, fallback_city: City) -> Preferences;

    fn save(&self, preferences: &Preferences) -> Result<()>;
}

/// JSON file under the state directory.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at `$XDG_STATE_HOME/kello/preferences.json`.
    pub fn default_location() -> Self {
        Self::new(get_state_dir().join(PREFERENCES_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, fallback_city: City) -> Preferences {
        let defaults = Preferences {
            selected_city: fallback_city,
            ..Preferences::default()
        };

        if !self.path.exists() {
            return defaults;
        }

        let loaded = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", private_path(&self.path)))
            .and_then(|content| Preferences::from_json(&content, fallback_city));

        match loaded {
            Ok(preferences) => preferences,
            Err(e) => {
                log_warning!("Ignoring stored preferences: {}", e);
                defaults
            }
        }
    }

    fn save(&self, preferences: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory {}", private_path(parent))
            })?;
        }

        fs::write(&self.path, preferences.to_json()?)
            .with_context(|| format!("Failed to write {}", private_path(&self.path)))
    }
}

/// Process-local store. `fail_writes` makes every save return an error.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    stored: Mutex<Option<Preferences>>,
    fail_writes: bool,
}

impl MemoryPreferenceStore {
    pub fn new(initial: Option<Preferences>) -> Self {
        Self {
            stored: Mutex::new(initial),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            stored: Mutex::new(None),
            fail_writes: true,
        }
    }

    pub fn stored(&self) -> Option<Preferences> {
        *self.stored.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, fallback_city: City) -> Preferences {
        self.stored().unwrap_or(Preferences {
            selected_city: fallback_city,
            ..Preferences::default()
        })
    }

    fn save(&self, preferences: &Preferences) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("Preference storage is read-only");
        }
        *self.stored.lock().unwrap_or_else(|p| p.into_inner()) = Some(*preferences);
        Ok(())
    }
}

/// Save and log on failure. Callers never see storage errors.
pub fn save_or_warn(store: &dyn PreferenceStore, preferences: &Preferences) {
    if let Err(e) = store.save(preferences) {
        log_warning!("Failed to save preferences: {}", e);
    }
}
