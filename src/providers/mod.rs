//! External data collaborators of the sky engine.
//!
//! The orchestrator talks to three providers:
//!
//! - [`LocationProvider`]: the single active location and its label
//! - [`SunEventsProvider`]: sunrise/sunset for a point and date
//! - [`CloudDataProvider`]: raw cloud cover for a point
//!
//! Offline implementations ship with the crate: [`FileLocationStore`] keeps
//! the active location in `location.toml`, [`SolarEventsProvider`] computes
//! sun events astronomically, and [`ConfiguredCloudProvider`] serves cloud
//! inputs from the configuration file. Network-backed providers can be
//! plugged in by implementing the same traits.

pub mod clouds;
pub mod location;
pub mod solar;

pub use clouds::ConfiguredCloudProvider;
pub use location::FileLocationStore;
pub use solar::SolarEventsProvider;

use anyhow::Result;
use std::fmt;

use crate::sky::{CloudInputs, GeoPoint, SunEvents};

/// Source of the active location.
#[cfg_attr(any(test, feature = "testing-support"), mockall::automock)]
pub trait LocationProvider: Send + Sync {
    /// Coordinates of the active location.
    fn active_point(&self) -> Result<GeoPoint>;

    /// Human readable label of the active location.
    fn active_label(&self) -> Result<String>;

    fn has_active_location(&self) -> bool;

    /// Forget the active location.
    fn clear_active_location(&self) -> Result<()>;

    /// Make `point` the active location under `label`.
    fn save_active_location(&self, label: &str, point: GeoPoint) -> Result<()>;
}

/// Source of sunrise/sunset times.
pub trait SunEventsProvider: Send + Sync {
    /// Events for `date` (`YYYY-MM-DD`), or for the provider's "today" when
    /// `date` is `None`.
    fn events_for(&self, point: GeoPoint, date: Option<&str>) -> Result<SunEvents>;

    /// Current sun angle in degrees at `point`.
    fn angle_now(&self, point: GeoPoint) -> Result<f64>;
}

/// Source of raw cloud data.
///
/// Failures are an expected outcome: cloud data is supplementary, and the
/// orchestrator treats an error as "no clouds detected".
#[cfg_attr(any(test, feature = "testing-support"), mockall::automock)]
pub trait CloudDataProvider: Send + Sync {
    fn cloud_inputs_for(&self, point: GeoPoint) -> Result<CloudInputs>;
}

/// Permanent refusal to access the device location.
///
/// Location providers return this (wrapped in `anyhow::Error`) so the
/// orchestrator can show a specific message instead of a generic failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationAccessDenied {
    pub reason: String,
}

impl fmt::Display for LocationAccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location access denied: {}", self.reason)
    }
}

impl std::error::Error for LocationAccessDenied {}
