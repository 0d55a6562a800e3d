//! Theme selection from the sun angle.

use super::ThemeType;
use crate::common::constants::{
    GOLDEN_HOUR_THRESHOLD, MAX_SUN_ANGLE, NIGHT_SUN_ANGLE, NIGHT_THRESHOLD,
};

/// Theme for a sun angle in degrees.
///
/// Night covers the first and last 15° of the arc, golden hour the next 20°
/// on each side (both ends inclusive), and day everything in between.
pub fn theme_for(angle_deg: f64) -> ThemeType {
    let night_end = MAX_SUN_ANGLE - NIGHT_THRESHOLD;
    let golden_start = MAX_SUN_ANGLE - GOLDEN_HOUR_THRESHOLD;

    if angle_deg < NIGHT_THRESHOLD || angle_deg > night_end {
        ThemeType::Night
    } else if (NIGHT_THRESHOLD..=GOLDEN_HOUR_THRESHOLD).contains(&angle_deg)
        || (golden_start..=night_end).contains(&angle_deg)
    {
        ThemeType::GoldenHour
    } else {
        ThemeType::Day
    }
}

/// Angle to draw for a computed angle and its theme.
///
/// At night the sun is parked at the center of the arc instead of sitting on
/// the horizon.
pub fn displayed_angle(angle_deg: f64, theme: ThemeType) -> f64 {
    if theme.is_night() {
        NIGHT_SUN_ANGLE
    } else {
        angle_deg
    }
}
