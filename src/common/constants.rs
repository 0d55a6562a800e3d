//! Application-wide constants.
//!
//! Business thresholds for the sky derivation engine live here next to the
//! configuration defaults and validation ranges, so that every module agrees
//! on the same numbers.

// # Cloud classification

/// Total cover at or below this percentage counts as a clear sky.
pub const DEFAULT_CLEAR_COVER_THRESHOLD: u8 = 15;
/// Weather codes at or above this value mean precipitation or storms.
pub const PRECIPITATION_WEATHER_CODE: i32 = 51;
/// Fog and depositing rime fog.
pub const FOG_WEATHER_CODES: [i32; 2] = [45, 48];
/// Overcast sky.
pub const OVERCAST_WEATHER_CODE: i32 = 3;
pub const HIGH_CLOUD_CIRRUS_MIN: i32 = 20;
pub const MID_CLOUD_MIN: i32 = 25;
pub const MID_CLOUD_STRATUS_MIN: i32 = 60;
pub const LOW_CLOUD_MIN: i32 = 25;
pub const LOW_CLOUD_STRATUS_MIN: i32 = 50;
/// Fallback split between stratus and cumulus when no layer qualifies.
pub const TOTAL_COVER_STRATUS_ABOVE: i32 = 50;
/// Upper bound on the number of classified cloud types.
pub const MAX_CLOUD_TYPES: usize = 4;

// # Sun angle and themes

pub const MIN_SUN_ANGLE: f64 = 0.0;
pub const MAX_SUN_ANGLE: f64 = 180.0;
pub const NIGHT_THRESHOLD: f64 = 15.0;
pub const GOLDEN_HOUR_THRESHOLD: f64 = 35.0;
/// Angle shown while the night theme is active (sun parked at the center).
pub const NIGHT_SUN_ANGLE: f64 = 90.0;
/// Angle used when sun events for "now" could not be obtained.
pub const FALLBACK_SUN_ANGLE: f64 = 45.0;
/// Angle used when sun events are degenerate (zero-length day).
pub const MALFORMED_EVENTS_SUN_ANGLE: f64 = 90.0;

// # Session timing

pub const DEFAULT_REFRESH_INTERVAL: u64 = 60; // seconds
pub const MINIMUM_REFRESH_INTERVAL: u64 = 10;
pub const MAXIMUM_REFRESH_INTERVAL: u64 = 3600;

pub const DEFAULT_COUNTDOWN_INTERVAL: u64 = 1000; // milliseconds
pub const MINIMUM_COUNTDOWN_INTERVAL: u64 = 100;
pub const MAXIMUM_COUNTDOWN_INTERVAL: u64 = 10_000;

// # Formats

pub const EVENT_TIME_FORMAT: &str = "%H:%M";
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const SIMULATED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// # Messages

pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";
pub const LOCATION_DENIED_MESSAGE: &str = "Location access denied. Choose a location manually.";
pub const NO_ACTIVE_LOCATION_MESSAGE: &str = "No active location selected";

// # Files

pub const CONFIG_DIR_NAME: &str = "skystate";
pub const CONFIG_FILE_NAME: &str = "skystate.toml";
pub const LOCATION_FILE_NAME: &str = "location.toml";

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
