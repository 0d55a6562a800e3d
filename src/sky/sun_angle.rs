//! Linear sun angle model.
//!
//! The sun travels from 0° at sunrise through 90° at the midpoint of the day
//! to 180° at sunset. This is a placement model for drawing, not true solar
//! elevation.

use chrono::{DateTime, Utc};

use crate::common::constants::{MALFORMED_EVENTS_SUN_ANGLE, MAX_SUN_ANGLE, MIN_SUN_ANGLE};

/// Sun angle in degrees for `now`, always within `[0, 180]`.
///
/// Before sunrise the sun sits on the eastern horizon (0°), after sunset on
/// the western one (180°). A zero-length day yields the center angle.
pub fn angle_now(sunrise: DateTime<Utc>, sunset: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    if now < sunrise {
        return MIN_SUN_ANGLE;
    }
    if now > sunset {
        return MAX_SUN_ANGLE;
    }

    let day_length_ms = (sunset - sunrise).num_milliseconds();
    if day_length_ms <= 0 {
        return MALFORMED_EVENTS_SUN_ANGLE;
    }

    let elapsed_ms = (now - sunrise).num_milliseconds();
    let progress = elapsed_ms as f64 / day_length_ms as f64;
    (progress * MAX_SUN_ANGLE).clamp(MIN_SUN_ANGLE, MAX_SUN_ANGLE)
}
