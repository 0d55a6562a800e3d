use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use tempfile::TempDir;

use skystate::providers::{
    ConfiguredCloudProvider, FileLocationStore, LocationAccessDenied, LocationProvider,
    MockLocationProvider, SolarEventsProvider,
};
use skystate::sky::{CloudInputs, CloudType, DisplayZone, GeoPoint, InfoContent, ThemeType};
use skystate::time_source::FixedTimeSource;
use skystate::{Providers, SessionSettings, SkyOrchestrator};

// Greenwich sits on the prime meridian, so UTC is close to local solar time
const GREENWICH: GeoPoint = GeoPoint {
    latitude_deg: 51.4779,
    longitude_deg: 0.0,
};

fn solstice(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 21, h, m, 0).unwrap()
}

fn settings() -> SessionSettings {
    SessionSettings {
        zone: DisplayZone::Named(chrono_tz::UTC),
        ..SessionSettings::default()
    }
}

/// A session backed by the offline providers and a location file in a
/// temporary directory.
fn offline_session(
    now: DateTime<Utc>,
    clouds: Option<CloudInputs>,
) -> (TempDir, SkyOrchestrator) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileLocationStore::new(dir.path().join("location.toml"));
    store.save_active_location("Greenwich", GREENWICH).unwrap();

    let clock = Arc::new(FixedTimeSource::new(now));
    let settings = settings();
    let providers = Providers {
        location: Arc::new(store),
        sun: Arc::new(SolarEventsProvider::new(clock.clone(), settings.zone)),
        clouds: Arc::new(ConfiguredCloudProvider::new(clouds)),
    };
    (dir, SkyOrchestrator::new(providers, clock, settings))
}

#[test]
fn test_midday_session() {
    let inputs = CloudInputs {
        total_cover_pct: 40,
        low_cover_pct: 30,
        mid_cover_pct: 0,
        high_cover_pct: 25,
        weather_code: Some(2),
    };
    let (_dir, sky) = offline_session(solstice(12, 0), Some(inputs));

    sky.refresh();
    sky.open_detail().unwrap();
    sky.tick_countdown();
    let state = sky.state();
    sky.shutdown();

    assert_eq!(state.theme_type, ThemeType::Day);
    assert!((state.sun_angle_deg - 90.0).abs() < 2.0, "{}", state.sun_angle_deg);
    assert_eq!(state.active_location_label(), Some("Greenwich"));
    assert_eq!(
        state.cloud_classification.types,
        vec![CloudType::Cumulus, CloudType::Cirrus]
    );
    assert_eq!(state.selected_info, Some(InfoContent::Cloud(CloudType::Cumulus)));

    let countdown = state.countdown.unwrap();
    assert!(countdown.is_before_sunset);
    assert!(countdown.event_local_time.starts_with("20:"));
    assert!((7 * 3600..9 * 3600).contains(&countdown.seconds_remaining));
}

#[test]
fn test_late_night_counts_down_to_tomorrow() {
    let (_dir, sky) = offline_session(solstice(23, 0), None);

    sky.refresh();
    sky.open_detail().unwrap();
    sky.tick_countdown();
    let state = sky.state();
    sky.shutdown();

    assert_eq!(state.theme_type, ThemeType::Night);
    assert_eq!(state.sun_angle_deg, 90.0);
    assert!(state.cloud_classification.is_clear());
    assert_eq!(state.last_error, None);

    let countdown = state.countdown.unwrap();
    assert!(countdown.is_before_sunrise);
    assert!(countdown.event_local_time.starts_with("03:"));
    assert!((4 * 3600..6 * 3600).contains(&countdown.seconds_remaining));
}

#[test]
fn test_golden_hour_evening() {
    let (_dir, sky) = offline_session(solstice(18, 0), None);
    sky.refresh();

    let state = sky.state();
    assert_eq!(state.theme_type, ThemeType::GoldenHour);
    assert!(state.sun_angle_deg > 145.0 && state.sun_angle_deg < 165.0);
}

#[test]
fn test_missing_location_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(FixedTimeSource::new(solstice(12, 0)));
    let providers = Providers {
        location: Arc::new(FileLocationStore::new(dir.path().join("location.toml"))),
        sun: Arc::new(SolarEventsProvider::new(clock.clone(), settings().zone)),
        clouds: Arc::new(ConfiguredCloudProvider::default()),
    };
    let sky = SkyOrchestrator::new(providers, clock, settings());
    sky.refresh();

    let state = sky.state();
    assert_eq!(state.location, None);
    assert_eq!(
        state.last_error.as_deref(),
        Some("No active location selected")
    );
    assert!(!state.is_loading);
}

#[test]
fn test_denied_location_message() {
    let mut location = MockLocationProvider::new();
    location.expect_active_label().returning(|| {
        Err(LocationAccessDenied {
            reason: "user declined".to_string(),
        }
        .into())
    });

    let clock = Arc::new(FixedTimeSource::new(solstice(12, 0)));
    let providers = Providers {
        location: Arc::new(location),
        sun: Arc::new(SolarEventsProvider::new(clock.clone(), settings().zone)),
        clouds: Arc::new(ConfiguredCloudProvider::default()),
    };
    let sky = SkyOrchestrator::new(providers, clock, settings());
    sky.refresh();

    assert_eq!(
        sky.state().last_error.as_deref(),
        Some("Location access denied. Choose a location manually.")
    );
}

#[test]
fn test_change_location_forgets_stored_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("location.toml");
    let store = FileLocationStore::new(&path);
    store.save_active_location("Greenwich", GREENWICH).unwrap();

    let clock = Arc::new(FixedTimeSource::new(solstice(12, 0)));
    let providers = Providers {
        location: Arc::new(FileLocationStore::new(&path)),
        sun: Arc::new(SolarEventsProvider::new(clock.clone(), settings().zone)),
        clouds: Arc::new(ConfiguredCloudProvider::default()),
    };
    let sky = SkyOrchestrator::new(providers, clock, settings());
    sky.refresh();
    assert!(sky.state().location.is_some());

    let mut navigated = false;
    sky.change_location(|| navigated = true);

    assert!(navigated);
    assert!(!store.has_active_location());
    assert_eq!(sky.state().location, None);
}
