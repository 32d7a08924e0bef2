//! Theme command - persist dark or light mode.

use anyhow::Result;

use crate::args::ThemeChoice;
use crate::config::Config;
use crate::display::theme::Theme;
use crate::state::{FilePreferenceStore, PreferenceStore, Preferences};

/// Handle `kello theme <dark|light|toggle>`.
pub fn handle_theme_command(choice: ThemeChoice) -> Result<()> {
    let config = Config::load()?;
    let store = FilePreferenceStore::default_location();

    let current = store.load(config.default_city());
    let updated = apply_theme(&store, current, choice)?;

    log_block_start!(
        "Theme: {}",
        Theme::from_dark_mode(updated.is_dark_mode).name()
    );
    log_end!();
    Ok(())
}

/// Resolve `choice` against `current` and store the result.
pub fn apply_theme(
    store: &dyn PreferenceStore,
    current: Preferences,
    choice: ThemeChoice,
) -> Result<Preferences> {
    let theme = match choice {
        ThemeChoice::Dark => Theme::Dark,
        ThemeChoice::Light => Theme::Light,
        ThemeChoice::Toggle => Theme::from_dark_mode(current.is_dark_mode).toggled(),
    };
    let updated = Preferences {
        is_dark_mode: theme.is_dark(),
        ..current
    };
    store.save(&updated)?;
    Ok(updated)
}

pub fn display_help() {
    log_version!();
    log_block_start!("theme - Select the color theme");
    log_block_start!("Usage: kello theme <dark|light|toggle>");
    log_block_start!("Arguments:");
    log_indented!("dark     Light text on a dark background");
    log_indented!("light    Dark text on a light background");
    log_indented!("toggle   Switch to the other theme");
    log_pipe!();
    log_info!("Press 't' in the live clock to toggle without leaving it.");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::City;
    use crate::state::MemoryPreferenceStore;

    fn light_in_oulu() -> Preferences {
        Preferences {
            selected_city: City::Oulu,
            is_dark_mode: false,
        }
    }

    #[test]
    fn test_toggle_flips_and_persists() {
        let store = MemoryPreferenceStore::default();

        let dark = apply_theme(&store, light_in_oulu(), ThemeChoice::Toggle).unwrap();
        assert!(dark.is_dark_mode);
        assert_eq!(dark.selected_city, City::Oulu);

        let light = apply_theme(&store, dark, ThemeChoice::Toggle).unwrap();
        assert!(!light.is_dark_mode);
        assert_eq!(store.stored(), Some(light));
    }

    #[test]
    fn test_explicit_choice_is_idempotent() {
        let store = MemoryPreferenceStore::default();
        let once = apply_theme(&store, light_in_oulu(), ThemeChoice::Dark).unwrap();
        let twice = apply_theme(&store, once, ThemeChoice::Dark).unwrap();
        assert!(twice.is_dark_mode);

        let light = apply_theme(&store, twice, ThemeChoice::Light).unwrap();
        assert!(!light.is_dark_mode);
    }
}
