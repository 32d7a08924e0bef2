//! City command - persist the selected city.

use anyhow::Result;

use crate::common::utils::private_path;
use crate::config::Config;
use crate::geo::City;
use crate::state::{FilePreferenceStore, PreferenceStore, Preferences};

/// Handle `kello city <name>`. Unknown names are an error listing the choices.
pub fn handle_city_command(name: &str) -> Result<()> {
    let city: City = name.parse()?;
    let config = Config::load()?;
    let store = FilePreferenceStore::default_location();

    let previous = store.load(config.default_city());
    let updated = select_city(&store, previous, city)?;

    if previous.selected_city == updated.selected_city {
        log_block_start!("{} is already selected", city);
    } else {
        log_block_start!("Selected {} (was {})", city, previous.selected_city);
    }
    log_indented!("Saved to {}", private_path(store.path()));
    log_end!();
    Ok(())
}

/// Store `city` as the selection, keeping the rest of `current`.
pub fn select_city(
    store: &dyn PreferenceStore,
    current: Preferences,
    city: City,
) -> Result<Preferences> {
    let updated = Preferences {
        selected_city: city,
        ..current
    };
    store.save(&updated)?;
    Ok(updated)
}

pub fn display_help() {
    log_version!();
    log_block_start!("city - Select and remember a city");
    log_block_start!("Usage: kello city <name>");
    log_block_start!("Cities:");
    for (index, city) in City::ALL.iter().enumerate() {
        log_indented!("{}  {:<10} {:.2}°N", index + 1, city.name(), city.latitude());
    }
    log_pipe!();
    log_info!("The live clock switches cities with the number keys shown above.");
    log_end!();
}
