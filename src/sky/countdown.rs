//! Countdown to the next sunrise or sunset.
//!
//! During the day the target is always today's sunset; once it has passed
//! there is no daytime target until the theme flips to night. At night the
//! target is today's sunrise if it is still ahead, otherwise tomorrow's
//! sunrise, requested by calendar date (`YYYY-MM-DD`) in the display zone.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use std::fmt;

use super::{CountdownState, GeoPoint};
use crate::common::constants::{EVENT_DATE_FORMAT, EVENT_TIME_FORMAT};
use crate::providers::SunEventsProvider;

/// Time zone used for event labels and calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DisplayZone {
    /// The system's local time zone.
    #[default]
    System,
    /// A fixed IANA time zone.
    Named(Tz),
}

impl DisplayZone {
    /// Parse an IANA time zone name such as `Europe/Lisbon`.
    pub fn from_name(name: &str) -> Result<Self> {
        let tz = name
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Unknown time zone '{name}'"))?;
        Ok(Self::Named(tz))
    }

    /// Wall-clock `HH:MM` of an instant.
    pub fn format_time(&self, instant: DateTime<Utc>) -> String {
        match self {
            Self::System => instant
                .with_timezone(&Local)
                .format(EVENT_TIME_FORMAT)
                .to_string(),
            Self::Named(tz) => instant.with_timezone(tz).format(EVENT_TIME_FORMAT).to_string(),
        }
    }

    /// Calendar date of an instant.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::System => instant.with_timezone(&Local).date_naive(),
            Self::Named(tz) => instant.with_timezone(tz).date_naive(),
        }
    }

    /// Calendar date of an instant as `YYYY-MM-DD`.
    pub fn format_date(&self, instant: DateTime<Utc>) -> String {
        self.date_of(instant).format(EVENT_DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system local"),
            Self::Named(tz) => write!(f, "{tz}"),
        }
    }
}

/// Countdown from `now` to the next relevant sun event.
///
/// Returns `None` when no forward-looking event exists for the current
/// theme, and also when the provider fails at any step.
pub fn next_event(
    now: DateTime<Utc>,
    is_night_theme: bool,
    point: GeoPoint,
    provider: &dyn SunEventsProvider,
    zone: &DisplayZone,
) -> Option<CountdownState> {
    match resolve_next_event(now, is_night_theme, point, provider, zone) {
        Ok(countdown) => countdown,
        Err(e) => {
            log_debug!("Countdown unavailable: {e:#}");
            None
        }
    }
}

fn resolve_next_event(
    now: DateTime<Utc>,
    is_night_theme: bool,
    point: GeoPoint,
    provider: &dyn SunEventsProvider,
    zone: &DisplayZone,
) -> Result<Option<CountdownState>> {
    let today = provider
        .events_for(point, None)
        .context("Failed to fetch today's sun events")?;

    if !is_night_theme {
        // Only today's sunset is a daytime target
        if now < today.sunset {
            return Ok(Some(countdown_to(today.sunset, now, zone, false)));
        }
        return Ok(None);
    }

    let sunrise = if now < today.sunrise {
        today.sunrise
    } else {
        let tomorrow = zone.format_date(now + Duration::hours(24));
        provider
            .events_for(point, Some(&tomorrow))
            .with_context(|| format!("Failed to fetch sun events for {tomorrow}"))?
            .sunrise
    };

    if now < sunrise {
        Ok(Some(countdown_to(sunrise, now, zone, true)))
    } else {
        Ok(None)
    }
}

fn countdown_to(
    event: DateTime<Utc>,
    now: DateTime<Utc>,
    zone: &DisplayZone,
    is_sunrise: bool,
) -> CountdownState {
    CountdownState {
        seconds_remaining: (event.timestamp() - now.timestamp()).max(0),
        event_local_time: zone.format_time(event),
        is_before_sunrise: is_sunrise,
        is_before_sunset: !is_sunrise,
    }
}
