//! # Kello Library
//!
//! Internal library for the kello binary: a Finnish terminal clock with
//! season, daylight, DST and weather cards.
//!
//! This library exists to enable testing of the internals and to keep CLI
//! dispatch (main.rs) separate from application logic.
//!
//! ## Architecture
//!
//! - **Entry Point**: `Kello` builder wires configuration, the Core and the live display
//! - **Almanac**: pure calculators for seasons, daylight and Finnish DST
//! - **Core**: single-owner state loop, weather sequencing and snapshot broadcast
//! - **Configuration**: `config` module for TOML-based settings
//! - **State**: persisted preferences and the `ViewState` snapshot
//! - **Display**: terminal rendering, themes and the analog dial
//! - **Commands**: one-shot CLI subcommands (status, season, daylight, dst, city, theme)
//! - **Infrastructure**: logging, time source, signal handling

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod common;

pub mod almanac;
pub mod args;
pub mod commands;
pub mod config;
pub mod core;
pub mod display;
pub mod geo;
pub mod io;
pub mod state;
pub mod time;
pub mod weather;

mod kello;

pub use kello::Kello;
