//! Supported Finnish cities and their latitudes.
//!
//! The set of cities is closed: the clock only knows five locations spread
//! from the south coast to the northernmost municipality. Anything else is
//! treated as Helsinki rather than as an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;


/// A city the clock can display.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    #[default]
    Helsinki,
    Tampere,
    Oulu,
    Rovaniemi,
    Utsjoki,
}

impl City {
    /// All cities, south to north. The live display maps keys `1`-`5` onto this order.
    pub const ALL: [City; 5] = [
        City::Helsinki,
        City::Tampere,
        City::Oulu,
        City::Rovaniemi,
        City::Utsjoki,
    ];

    pub fn name(self) -> &'static str {
        match self {
            City::Helsinki => "Helsinki",
            City::Tampere => "Tampere",
            City::Oulu => "Oulu",
            City::Rovaniemi => "Rovaniemi",
            City::Utsjoki => "Utsjoki",
        }
    }

    /// Latitude in degrees north.
    pub fn latitude(self) -> f64 {
        match self {
            City::Helsinki => 60.17,
            City::Tampere => 61.50,
            City::Oulu => 65.01,
            City::Rovaniemi => 66.50,
            City::Utsjoki => 69.91,
        }
    }

    /// Case-insensitive lookup by name. `None` for anything outside the table.
    pub fn from_name(name: &str) -> Option<City> {
        let name = name.trim();
        City::ALL
            .into_iter()
            .find(|city| city.name().eq_ignore_ascii_case(name))
    }

    /// Like [`City::from_name`] but unknown names resolve to Helsinki.
    pub fn from_name_or_default(name: &str) -> City {
        City::from_name(name).unwrap_or_default()
    }

    /// 1-based position in [`City::ALL`].
    pub fn from_index(index: usize) -> Option<City> {
        index
            .checked_sub(1)
            .and_then(|i| City::ALL.get(i))
            .copied()
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::from_name(s).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown city '{}'. Choose one of: {}",
                s,
                City::ALL.map(City::name).join(", ")
            )
        })
    }
}

/// Latitude for a city name, falling back to Helsinki for unknown names.
pub fn latitude_for_name(name: &str) -> f64 {
    City::from_name_or_default(name).latitude()
}
