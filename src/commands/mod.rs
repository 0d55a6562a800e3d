//! Command-line command handlers for skystate.
//!
//! Each command lives in its own submodule. The helpers here assemble a
//! session from the configuration: the clock (real, or pinned with `--at`),
//! the offline providers, and the orchestrator that ties them together.

pub mod classify;
pub mod help;
pub mod location;
pub mod status;
pub mod watch;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::core::{Providers, SessionSettings, SkyOrchestrator};
use crate::providers::{ConfiguredCloudProvider, FileLocationStore, SolarEventsProvider};
use crate::sky::DisplayZone;
use crate::time_source::{self, FixedTimeSource, RealTimeSource, TimeSource};

/// Real clock, or a fixed one when `at` is given.
///
/// `at` is read as wall-clock time in the display zone.
pub(crate) fn build_clock(at: Option<&str>, zone: &DisplayZone) -> Result<Arc<dyn TimeSource>> {
    let Some(text) = at else {
        return Ok(Arc::new(RealTimeSource));
    };

    let instant = match zone {
        DisplayZone::System => time_source::parse_datetime(text),
        DisplayZone::Named(tz) => time_source::parse_datetime_in_tz(text, tz),
    }
    .map_err(|e| anyhow::anyhow!(e))
    .with_context(|| format!("Invalid --at value '{text}'"))?;

    Ok(Arc::new(FixedTimeSource::new(instant)))
}

/// Orchestrator wired to the offline providers.
pub(crate) fn build_session(
    config: &Config,
    clock: Arc<dyn TimeSource>,
) -> Result<SkyOrchestrator> {
    let settings = SessionSettings::from_config(config)?;
    let providers = Providers {
        location: Arc::new(FileLocationStore::open_default()?),
        sun: Arc::new(SolarEventsProvider::new(Arc::clone(&clock), settings.zone)),
        clouds: Arc::new(ConfiguredCloudProvider::new(config.cloud_inputs())),
    };

    if clock.is_simulated() {
        log_debug!("Clock pinned to {}", clock.now());
    }

    Ok(SkyOrchestrator::new(providers, clock, settings))
}
