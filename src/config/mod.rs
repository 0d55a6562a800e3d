//! Configuration system for skystate.
//!
//! Settings are read from `skystate.toml` in `$XDG_CONFIG_HOME/skystate/`
//! (or the directory passed with `--config`). Every field is optional:
//!
//! ```toml
//! #[Session timing]
//! refresh_interval = 60          # Sky refresh period in seconds (10-3600)
//! countdown_interval = 1000      # Countdown tick period in milliseconds (100-10000)
//!
//! #[Derivation]
//! clear_cover_threshold = 15     # Total cover (%) at or below which the sky is clear (0-100)
//! timezone = "Europe/Lisbon"     # IANA zone for event times and dates (default: system)
//!
//! #[Diagnostics]
//! debug = false
//!
//! #[Fixed cloud data]
//! [clouds]
//! total = 70
//! low = 30
//! mid = 65
//! high = 10
//! weather_code = 3
//! ```
//!
//! The active location is not part of this file; it is kept in
//! `location.toml` by [`FileLocationStore`](crate::providers::FileLocationStore).

pub mod loading;
pub mod validation;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::common::constants::*;
use crate::sky::{CloudClassifier, CloudInputs, DisplayZone};

pub use loading::{
    create_default_config, get_config_base_dir, get_config_path, get_custom_config_dir, load,
    load_from_path, set_config_dir,
};

/// Fixed cloud observations, served by
/// [`ConfiguredCloudProvider`](crate::providers::ConfiguredCloudProvider).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudsConfig {
    pub total: i32,
    pub low: i32,
    pub mid: i32,
    pub high: i32,
    pub weather_code: Option<i32>,
}

impl CloudsConfig {
    pub fn to_inputs(&self) -> CloudInputs {
        CloudInputs {
            total_cover_pct: self.total,
            low_cover_pct: self.low,
            mid_cover_pct: self.mid,
            high_cover_pct: self.high,
            weather_code: self.weather_code,
        }
    }
}

/// Configuration structure for skystate settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Seconds between full sky refreshes.
    pub refresh_interval: Option<u64>,
    /// Milliseconds between countdown ticks while the detail view is open.
    pub countdown_interval: Option<u64>,
    /// Total cover percentage treated as a clear sky.
    pub clear_cover_threshold: Option<u8>,
    /// IANA time zone used for event labels and calendar dates.
    pub timezone: Option<String>,
    /// Print debug output.
    pub debug: Option<bool>,
    /// Fixed cloud observations.
    pub clouds: Option<CloudsConfig>,
}

impl Config {
    /// Load the configuration from the default (or `--config`) location.
    pub fn load() -> Result<Self> {
        loading::load()
    }

    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        loading::load_from_path(path)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        loading::get_config_path()
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval.unwrap_or(DEFAULT_REFRESH_INTERVAL))
    }

    pub fn countdown_interval(&self) -> Duration {
        Duration::from_millis(
            self.countdown_interval
                .unwrap_or(DEFAULT_COUNTDOWN_INTERVAL),
        )
    }

    pub fn classifier(&self) -> CloudClassifier {
        CloudClassifier::new(
            self.clear_cover_threshold
                .unwrap_or(DEFAULT_CLEAR_COVER_THRESHOLD),
        )
    }

    pub fn display_zone(&self) -> Result<DisplayZone> {
        match self.timezone.as_deref() {
            Some(name) => DisplayZone::from_name(name),
            None => Ok(DisplayZone::System),
        }
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.unwrap_or(false)
    }

    pub fn cloud_inputs(&self) -> Option<CloudInputs> {
        self.clouds.as_ref().map(CloudsConfig::to_inputs)
    }

    /// Log the effective settings.
    pub fn log_config(&self) {
        log_block_start!("Loaded configuration");
        log_indented!("Refresh interval: {}s", self.refresh_interval().as_secs());
        log_indented!(
            "Countdown interval: {}ms",
            self.countdown_interval().as_millis()
        );
        log_indented!(
            "Clear sky threshold: {}%",
            self.classifier().clear_threshold()
        );
        match self.display_zone() {
            Ok(zone) => log_indented!("Time zone: {zone}"),
            Err(e) => log_indented!("Time zone: invalid ({e})"),
        }
        match &self.clouds {
            Some(clouds) => log_indented!(
                "Cloud data: total {}%, low {}%, mid {}%, high {}%, code {}",
                clouds.total,
                clouds.low,
                clouds.mid,
                clouds.high,
                clouds
                    .weather_code
                    .map_or_else(|| "unknown".to_string(), |c| c.to_string())
            ),
            None => log_indented!("Cloud data: not configured"),
        }
    }
}
