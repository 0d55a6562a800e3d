//! Observable session state.
//!
//! [`SkyState`] is the single snapshot the presentation layer renders from.
//! [`StateStore`] owns the current snapshot and replaces it whole on every
//! change, so readers never observe a half-applied update.

use serde::Serialize;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::sky::{CloudClassification, CountdownState, GeoPoint, InfoContent, ThemeType};

/// The active location as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiLocation {
    pub label: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl UiLocation {
    pub fn new(label: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            label: label.into(),
            latitude_deg: point.latitude_deg,
            longitude_deg: point.longitude_deg,
        }
    }
}

/// Everything the presentation layer needs to draw one frame.
///
/// `theme_type` is always `theme_for` of the raw angle from the same refresh,
/// and `sun_angle_deg` is the displayed angle (90° at night).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkyState {
    pub sun_angle_deg: f64,
    pub location: Option<UiLocation>,
    pub cloud_classification: CloudClassification,
    pub theme_type: ThemeType,
    /// Present only while the detail view is expanded.
    pub countdown: Option<CountdownState>,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub is_expanded: bool,
    pub is_info_panel_visible: bool,
    pub selected_info: Option<InfoContent>,
}

impl Default for SkyState {
    fn default() -> Self {
        Self {
            sun_angle_deg: 0.0,
            location: None,
            cloud_classification: CloudClassification::none(),
            theme_type: ThemeType::Day,
            countdown: None,
            is_loading: false,
            last_error: None,
            is_expanded: false,
            is_info_panel_visible: false,
            selected_info: None,
        }
    }
}

impl SkyState {
    pub fn active_location_label(&self) -> Option<&str> {
        self.location.as_ref().map(|l| l.label.as_str())
    }
}

struct StoreInner {
    state: SkyState,
    subscribers: Vec<Sender<SkyState>>,
}

/// Holder of the current [`SkyState`] with change notification.
///
/// Subscribers receive a full snapshot after every change, in the order the
/// changes were applied. Disconnected receivers are pruned on the next publish.
pub struct StateStore {
    inner: Mutex<StoreInner>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(SkyState::default())
    }
}

impl StateStore {
    pub fn new(initial: SkyState) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                state: initial,
                subscribers: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SkyState {
        self.lock().state.clone()
    }

    /// Register for change notifications.
    ///
    /// The current state is delivered first.
    pub fn subscribe(&self) -> Receiver<SkyState> {
        let (tx, rx) = mpsc::channel();
        let mut inner = self.lock();
        let _ = tx.send(inner.state.clone());
        inner.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// Apply `f` to a copy of the current state and install the result.
    ///
    /// The closure runs under the store lock, so its decision to apply or skip
    /// and the replacement itself are one atomic step. Subscribers are only
    /// notified when the state actually changed.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut SkyState) -> R) -> R {
        let mut inner = self.lock();
        let mut next = inner.state.clone();
        let result = f(&mut next);

        if next != inner.state {
            inner.state = next;
            let StoreInner { state, subscribers } = &mut *inner;
            subscribers.retain(|tx| tx.send(state.clone()).is_ok());
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_delivers_current_state_first() {
        let store = StateStore::default();
        store.update(|s| s.is_loading = true);

        let rx = store.subscribe();
        assert!(rx.try_recv().unwrap().is_loading);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_updates_are_published_in_order() {
        let store = StateStore::default();
        let rx = store.subscribe();
        let _ = rx.try_recv();

        store.update(|s| s.sun_angle_deg = 30.0);
        store.update(|s| s.sun_angle_deg = 60.0);

        assert_eq!(rx.try_recv().unwrap().sun_angle_deg, 30.0);
        assert_eq!(rx.try_recv().unwrap().sun_angle_deg, 60.0);
    }

    #[test]
    fn test_unchanged_update_is_not_published() {
        let store = StateStore::default();
        let rx = store.subscribe();
        let _ = rx.try_recv();

        let applied = store.update(|_| false);
        assert!(!applied);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let store = StateStore::default();
        let rx = store.subscribe();
        let _keep = store.subscribe();
        drop(rx);

        store.update(|s| s.is_expanded = true);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn test_state_serializes_camel_case() {
        let state = SkyState {
            location: Some(UiLocation::new("Lisbon", GeoPoint::new(38.72, -9.14))),
            ..SkyState::default()
        };
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["sunAngleDeg"], 0.0);
        assert_eq!(json["themeType"], "DAY");
        assert_eq!(json["location"]["label"], "Lisbon");
        assert_eq!(json["isInfoPanelVisible"], false);
        assert!(json["countdown"].is_null());
    }
}
