//! Offline sun events computed from coordinates.
//!
//! Uses the NOAA-based algorithm from the `sunrise` crate, so no network
//! access is needed. "Today" is the current calendar date in the display
//! zone, matching how countdown dates are formatted.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::sync::Arc;
use sunrise::{Coordinates, SolarDay, SolarEvent};

use super::SunEventsProvider;
use crate::common::constants::EVENT_DATE_FORMAT;
use crate::sky::{DisplayZone, GeoPoint, SunEvents, angle_now};
use crate::time_source::TimeSource;

/// Sun events provider backed by astronomical calculation.
pub struct SolarEventsProvider {
    clock: Arc<dyn TimeSource>,
    zone: DisplayZone,
}

impl SolarEventsProvider {
    pub fn new(clock: Arc<dyn TimeSource>, zone: DisplayZone) -> Self {
        Self { clock, zone }
    }

    /// Sunrise and sunset at `point` on `date`.
    ///
    /// Fails for invalid coordinates and for polar day/night, where the sun
    /// does not cross the horizon.
    pub fn events_on(&self, point: GeoPoint, date: NaiveDate) -> Result<SunEvents> {
        let coord = Coordinates::new(point.latitude_deg, point.longitude_deg)
            .ok_or_else(|| anyhow::anyhow!("Invalid coordinates: {point}"))?;

        let solar_day = SolarDay::new(coord, date);
        let sunrise = solar_day.event_time(SolarEvent::Sunrise);
        let sunset = solar_day.event_time(SolarEvent::Sunset);

        if sunset <= sunrise {
            anyhow::bail!("The sun does not rise and set at {point} on {date}");
        }

        Ok(SunEvents { sunrise, sunset })
    }
}

impl SunEventsProvider for SolarEventsProvider {
    fn events_for(&self, point: GeoPoint, date: Option<&str>) -> Result<SunEvents> {
        let date = match date {
            Some(text) => NaiveDate::parse_from_str(text, EVENT_DATE_FORMAT)
                .with_context(|| format!("Invalid date '{text}', expected YYYY-MM-DD"))?,
            None => self.zone.date_of(self.clock.now()),
        };
        self.events_on(point, date)
    }

    fn angle_now(&self, point: GeoPoint) -> Result<f64> {
        let events = self.events_for(point, None)?;
        Ok(angle_now(events.sunrise, events.sunset, self.clock.now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_source::FixedTimeSource;
    use chrono::{TimeZone, Timelike, Utc};

    fn provider_at(h: u32, m: u32) -> SolarEventsProvider {
        let now = Utc.with_ymd_and_hms(2026, 6, 21, h, m, 0).unwrap();
        SolarEventsProvider::new(
            Arc::new(FixedTimeSource::new(now)),
            DisplayZone::Named(chrono_tz::UTC),
        )
    }

    // Greenwich sits on the prime meridian, so UTC times are local solar times
    const GREENWICH: GeoPoint = GeoPoint {
        latitude_deg: 51.4779,
        longitude_deg: 0.0,
    };

    #[test]
    fn test_summer_solstice_in_greenwich() {
        let events = provider_at(12, 0).events_for(GREENWICH, None).unwrap();
        // Roughly 03:43 and 20:21 UTC, give or take the model's precision
        assert!((3..=4).contains(&events.sunrise.hour()));
        assert!((20..=21).contains(&events.sunset.hour()));
        assert!(events.sunrise < events.sunset);
    }

    #[test]
    fn test_explicit_date_is_used() {
        let provider = provider_at(12, 0);
        let winter = provider.events_for(GREENWICH, Some("2026-12-21")).unwrap();
        let summer = provider.events_for(GREENWICH, None).unwrap();
        let winter_day = winter.sunset - winter.sunrise;
        let summer_day = summer.sunset - summer.sunrise;
        assert!(winter_day < summer_day);
        assert_eq!(winter.sunrise.date_naive().to_string(), "2026-12-21");
    }

    #[test]
    fn test_invalid_date_string() {
        let err = provider_at(12, 0)
            .events_for(GREENWICH, Some("21/12/2026"))
            .unwrap_err();
        assert!(err.to_string().contains("expected YYYY-MM-DD"));
    }

    #[test]
    fn test_invalid_coordinates() {
        let result = provider_at(12, 0).events_for(GeoPoint::new(123.0, 0.0), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_angle_now_tracks_the_day() {
        let noonish = provider_at(12, 0).angle_now(GREENWICH).unwrap();
        assert!((80.0..=100.0).contains(&noonish), "angle was {noonish}");

        assert_eq!(provider_at(1, 0).angle_now(GREENWICH).unwrap(), 0.0);
        assert_eq!(provider_at(23, 0).angle_now(GREENWICH).unwrap(), 180.0);
    }
}
