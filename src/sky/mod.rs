//! Sky state derivation engine.
//!
//! Pure, deterministic computations that turn raw astronomical and
//! meteorological inputs into the values the presentation layer draws:
//!
//! - [`clouds`]: cloud cover percentages and weather code to an ordered list
//!   of [`CloudType`]s
//! - [`sun_angle`]: sunrise/sunset and the current instant to a 0–180° angle
//! - [`theme`]: sun angle to a [`ThemeType`]
//! - [`countdown`]: time remaining until the next sunrise or sunset
//!
//! None of these functions perform I/O except [`countdown::next_event`],
//! which asks a [`SunEventsProvider`](crate::providers::SunEventsProvider)
//! for today's (and possibly tomorrow's) events.

pub mod clouds;
pub mod countdown;
pub mod sun_angle;
pub mod theme;

pub use clouds::CloudClassifier;
pub use countdown::{DisplayZone, next_event};
pub use sun_angle::angle_now;
pub use theme::{displayed_angle, theme_for};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoPoint {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.latitude_deg, self.longitude_deg)
    }
}

/// Raw cloud data for one refresh.
///
/// Percentages are expected in `0..=100`; keeping them in range is the
/// caller's contract and is not checked here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudInputs {
    pub total_cover_pct: i32,
    pub low_cover_pct: i32,
    pub mid_cover_pct: i32,
    pub high_cover_pct: i32,
    /// Provider weather code; `None` means unknown.
    pub weather_code: Option<i32>,
}

/// Visual cloud category.
///
/// Variants are declared in display priority order, so the derived `Ord`
/// sorts NIMBUS first and CIRRUS last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CloudType {
    Nimbus,
    Stratus,
    Cumulus,
    Cirrus,
}

impl CloudType {
    /// All cloud types in priority order.
    pub const PRIORITY: [CloudType; 4] = [
        CloudType::Nimbus,
        CloudType::Stratus,
        CloudType::Cumulus,
        CloudType::Cirrus,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nimbus => "Nimbus",
            Self::Stratus => "Stratus",
            Self::Cumulus => "Cumulus",
            Self::Cirrus => "Cirrus",
        }
    }
}

impl fmt::Display for CloudType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Classified cloud types together with the inputs they were derived from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudClassification {
    /// At most four unique types, in [`CloudType::PRIORITY`] order.
    pub types: Vec<CloudType>,
    pub inputs: CloudInputs,
}

impl CloudClassification {
    /// The "no clouds detected" result used when cloud data is unavailable.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_clear(&self) -> bool {
        self.types.is_empty()
    }

    pub fn dominant(&self) -> Option<CloudType> {
        self.types.first().copied()
    }
}

/// Sunrise and sunset for one calendar date at one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunEvents {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

/// Visual theme derived from the sun angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThemeType {
    #[default]
    Day,
    GoldenHour,
    Night,
}

impl ThemeType {
    pub fn is_night(&self) -> bool {
        matches!(self, Self::Night)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::GoldenHour => "Golden hour",
            Self::Night => "Night",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Day => "☀",
            Self::GoldenHour => "◐",
            Self::Night => "☾",
        }
    }
}

impl fmt::Display for ThemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Live countdown to the next sun event shown in the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownState {
    pub seconds_remaining: i64,
    /// Local time of the target event, `HH:MM`.
    pub event_local_time: String,
    pub is_before_sunrise: bool,
    pub is_before_sunset: bool,
}

/// Stars that can be picked for the secondary info panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StarType {
    Capella,
    Castor,
    Sirius,
    Rigel,
}

impl fmt::Display for StarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Capella => "Capella",
            Self::Castor => "Castor",
            Self::Sirius => "Sirius",
            Self::Rigel => "Rigel",
        };
        f.write_str(name)
    }
}

/// Content of the secondary info panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "type", rename_all = "lowercase")]
pub enum InfoContent {
    Cloud(CloudType),
    Star(StarType),
}

impl fmt::Display for InfoContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cloud(cloud) => write!(f, "{cloud} cloud"),
            Self::Star(star) => write!(f, "{star} star"),
        }
    }
}
