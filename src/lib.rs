//! # skystate
//!
//! Sky state derivation engine and the `skystate` command-line front end.
//!
//! Given a location, the current time, sunrise/sunset data and raw cloud
//! cover, skystate derives what a sky visualization should draw: the sun's
//! angle along its arc, a day/golden-hour/night theme, the ordered cloud
//! types, and a live countdown to the next sunrise or sunset.
//!
//! ## Architecture
//!
//! - **Engine**: `sky` holds the pure derivation functions and value types
//! - **Orchestration**: `core` runs a session, owns the observable
//!   [`SkyState`](core::SkyState) and its refresh and countdown loops
//! - **Providers**: `providers` defines the location, sun event and cloud
//!   data traits together with offline implementations
//! - **Configuration**: `config` for TOML-based settings
//! - **Commands**: `args` and `commands` implement the CLI
//! - **Infrastructure**: logging, the clock abstraction, signal handling

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod providers;
pub mod signals;
pub mod sky;
pub mod time_source;

pub use crate::core::{Providers, SessionSettings, SkyOrchestrator, SkyState};
