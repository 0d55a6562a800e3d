//! Clock abstraction for real and simulated time.
//!
//! Everything that needs "now" receives a [`TimeSource`] instead of calling
//! `Utc::now()` directly. The real clock is used by default; a
//! [`FixedTimeSource`] pins time to a chosen instant so that the CLI can
//! show the sky at any moment (`--at`) and tests stay deterministic.

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDateTime, TimeZone, Utc};
use std::sync::{Mutex, PoisonError};

use crate::common::constants::SIMULATED_TIME_FORMAT;

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;

    /// Check if this is a simulated time source
    fn is_simulated(&self) -> bool;
}

/// Real-time implementation that uses actual system time
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Simulated clock that only moves when told to.
pub struct FixedTimeSource {
    current: Mutex<DateTime<Utc>>,
}

impl FixedTimeSource {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    /// Move the clock forward (or backward for negative durations).
    pub fn advance(&self, by: ChronoDuration) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current += by;
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS" as local time
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    parse_datetime_in_tz(s, &Local)
}

/// Parse a datetime string in a specific timezone
pub fn parse_datetime_in_tz<Tz: TimeZone>(s: &str, tz: &Tz) -> Result<DateTime<Utc>, String> {
    let naive = NaiveDateTime::parse_from_str(s, SIMULATED_TIME_FORMAT)
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))?;

    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| "Ambiguous or invalid local time".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_time_source_moves_only_on_demand() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let clock = FixedTimeSource::new(start);
        assert_eq!(clock.now(), start);
        assert!(clock.is_simulated());

        clock.advance(ChronoDuration::seconds(90));
        assert_eq!(clock.now(), start + ChronoDuration::seconds(90));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_real_time_source_is_not_simulated() {
        assert!(!RealTimeSource.is_simulated());
    }

    #[test]
    fn test_parse_datetime_in_tz() {
        let tz = chrono_tz::Europe::Berlin;
        let parsed = parse_datetime_in_tz("2026-07-01 12:00:00", &tz).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 7, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_datetime_rejects_bad_format() {
        let err = parse_datetime_in_tz("2026-07-01T12:00", &Utc).unwrap_err();
        assert!(err.contains("YYYY-MM-DD HH:MM:SS"));
    }

    #[test]
    fn test_parse_datetime_rejects_dst_gap() {
        // 02:30 does not exist in Berlin on the spring-forward night
        let tz = chrono_tz::Europe::Berlin;
        assert!(parse_datetime_in_tz("2026-03-29 02:30:00", &tz).is_err());
    }
}
