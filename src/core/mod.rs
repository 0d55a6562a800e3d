//! Session orchestration.
//!
//! [`SkyOrchestrator`] owns one viewing session: it periodically pulls the
//! active location, sun angle and cloud data from the providers, derives the
//! displayed values with the [`sky`](crate::sky) engine, and publishes the
//! result as a single [`SkyState`] snapshot. It also handles the user
//! interactions of the detail view:
//!
//! - expanding and collapsing the detail view, which starts and stops the
//!   countdown ticker
//! - showing, hiding and choosing the content of the info panel
//! - clearing the active location before navigating to the location picker
//!
//! Provider failures never escape: sun angle failures fall back to 45°,
//! cloud failures to "no clouds", and location failures are reported through
//! [`SkyState::last_error`] while previously displayed values are kept.
//!
//! Work happens on two background threads (refresh and countdown), both
//! owned by the orchestrator and stopped by [`SkyOrchestrator::shutdown`] or
//! on drop.

pub mod state;
pub mod ticker;

pub use state::{SkyState, StateStore, UiLocation};
pub use ticker::PeriodicTask;

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::common::constants::*;
use crate::config::Config;
use crate::providers::{
    CloudDataProvider, LocationAccessDenied, LocationProvider, SunEventsProvider,
};
use crate::sky::{
    CloudClassification, CloudClassifier, DisplayZone, GeoPoint, InfoContent, displayed_angle,
    next_event, theme_for,
};
use crate::time_source::TimeSource;

/// The external collaborators of a session.
#[derive(Clone)]
pub struct Providers {
    pub location: Arc<dyn LocationProvider>,
    pub sun: Arc<dyn SunEventsProvider>,
    pub clouds: Arc<dyn CloudDataProvider>,
}

/// Tunables of a session, normally taken from [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub refresh_interval: Duration,
    pub countdown_interval: Duration,
    pub classifier: CloudClassifier,
    pub zone: DisplayZone,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL),
            countdown_interval: Duration::from_millis(DEFAULT_COUNTDOWN_INTERVAL),
            classifier: CloudClassifier::default(),
            zone: DisplayZone::System,
        }
    }
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            refresh_interval: config.refresh_interval(),
            countdown_interval: config.countdown_interval(),
            classifier: config.classifier(),
            zone: config
                .display_zone()
                .context("Invalid timezone in configuration")?,
        })
    }
}

/// Result of one successful provider round.
struct SkyReading {
    location: UiLocation,
    raw_angle: f64,
    clouds: CloudClassification,
}

/// State shared with the background threads.
struct Shared {
    providers: Providers,
    clock: Arc<dyn TimeSource>,
    settings: SessionSettings,
    store: StateStore,
    refresh_issued: AtomicU64,
    /// Highest refresh sequence number that may no longer be applied.
    refresh_applied: AtomicU64,
    /// Bumped on every open and close of the detail view; ticks carrying an
    /// older generation are discarded.
    countdown_generation: AtomicU64,
    tick_issued: AtomicU64,
    tick_applied: AtomicU64,
}

impl Shared {
    fn refresh(&self) {
        let seq = self.refresh_issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.store.update(|state| {
            if seq > self.refresh_applied.load(Ordering::SeqCst) {
                state.is_loading = true;
            }
        });

        let outcome = self.read_sky();

        self.store.update(|state| {
            // A newer refresh already landed, or the session was reset
            if seq <= self.refresh_applied.load(Ordering::SeqCst) {
                return;
            }
            self.refresh_applied.store(seq, Ordering::SeqCst);

            match outcome {
                Ok(reading) => apply_reading(state, reading),
                Err(message) => {
                    state.is_loading = false;
                    state.last_error = Some(message);
                }
            }
        });
    }

    fn read_sky(&self) -> Result<SkyReading, String> {
        let location = &self.providers.location;
        let label = location.active_label().map_err(describe_location_error)?;
        let point = location.active_point().map_err(describe_location_error)?;

        let raw_angle = self.sun_angle(point);
        let clouds = match self.providers.clouds.cloud_inputs_for(point) {
            Ok(inputs) => self.settings.classifier.classify_inputs(inputs),
            Err(e) => {
                log_debug!("Cloud data unavailable, assuming no clouds: {e:#}");
                CloudClassification::none()
            }
        };

        log_debug!(
            "Refreshed {label} ({point}): angle {raw_angle:.1}°, clouds {:?}",
            clouds.types
        );

        Ok(SkyReading {
            location: UiLocation::new(label, point),
            raw_angle,
            clouds,
        })
    }

    fn sun_angle(&self, point: GeoPoint) -> f64 {
        match self.providers.sun.angle_now(point) {
            Ok(angle) if angle.is_nan() => MALFORMED_EVENTS_SUN_ANGLE,
            Ok(angle) => angle.clamp(MIN_SUN_ANGLE, MAX_SUN_ANGLE),
            Err(e) => {
                log_warning!("Sun position unavailable, using {FALLBACK_SUN_ANGLE}°: {e:#}");
                FALLBACK_SUN_ANGLE
            }
        }
    }

    fn tick_countdown(&self, generation: u64) {
        let seq = self.tick_issued.fetch_add(1, Ordering::SeqCst) + 1;
        let current = self.store.snapshot();
        if !current.is_expanded || generation != self.countdown_generation.load(Ordering::SeqCst)
        {
            return;
        }

        let now = self.clock.now();
        let countdown = match self.providers.location.active_point() {
            Ok(point) => next_event(
                now,
                current.theme_type.is_night(),
                point,
                self.providers.sun.as_ref(),
                &self.settings.zone,
            ),
            Err(e) => {
                log_debug!("Countdown skipped, no active location: {e:#}");
                None
            }
        };

        self.store.update(|state| {
            let stale = generation != self.countdown_generation.load(Ordering::SeqCst)
                || seq <= self.tick_applied.load(Ordering::SeqCst);
            if stale || !state.is_expanded {
                return;
            }
            self.tick_applied.store(seq, Ordering::SeqCst);
            state.countdown = countdown;
        });
    }
}

fn apply_reading(state: &mut SkyState, reading: SkyReading) {
    let theme = theme_for(reading.raw_angle);
    state.sun_angle_deg = displayed_angle(reading.raw_angle, theme);
    state.theme_type = theme;
    state.location = Some(reading.location);
    state.is_loading = false;
    state.last_error = None;
    if state.selected_info.is_none() {
        state.selected_info = reading.clouds.dominant().map(InfoContent::Cloud);
    }
    state.cloud_classification = reading.clouds;
}

fn describe_location_error(error: anyhow::Error) -> String {
    if error.downcast_ref::<LocationAccessDenied>().is_some() {
        return LOCATION_DENIED_MESSAGE.to_string();
    }
    log_warning!("Location unavailable: {error:#}");
    let message = error.to_string();
    if message.is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Coordinator of one sky viewing session.
pub struct SkyOrchestrator {
    shared: Arc<Shared>,
    refresh_task: Mutex<Option<PeriodicTask>>,
    countdown_task: Mutex<Option<PeriodicTask>>,
}

impl SkyOrchestrator {
    pub fn new(
        providers: Providers,
        clock: Arc<dyn TimeSource>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                providers,
                clock,
                settings,
                store: StateStore::default(),
                refresh_issued: AtomicU64::new(0),
                refresh_applied: AtomicU64::new(0),
                countdown_generation: AtomicU64::new(0),
                tick_issued: AtomicU64::new(0),
                tick_applied: AtomicU64::new(0),
            }),
            refresh_task: Mutex::new(None),
            countdown_task: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.shared.settings
    }

    /// Current state snapshot.
    pub fn state(&self) -> SkyState {
        self.shared.store.snapshot()
    }

    /// Receive a snapshot after every state change, starting with the
    /// current one.
    pub fn subscribe(&self) -> std::sync::mpsc::Receiver<SkyState> {
        self.shared.store.subscribe()
    }

    /// Start the periodic refresh loop. The first refresh runs immediately.
    ///
    /// Calling this again while the loop is running does nothing.
    pub fn start(&self) -> Result<()> {
        let mut slot = lock(&self.refresh_task);
        if slot.as_ref().is_some_and(PeriodicTask::is_running) {
            return Ok(());
        }

        let shared = Arc::clone(&self.shared);
        let interval = self.shared.settings.refresh_interval;
        let task = PeriodicTask::spawn("sky-refresh", interval, move || shared.refresh())?;
        *slot = Some(task);
        Ok(())
    }

    /// Run one refresh on the calling thread.
    pub fn refresh(&self) {
        self.shared.refresh();
    }

    /// Expand the detail view and start the countdown ticker.
    ///
    /// Opening an already expanded view restarts the ticker; ticks from the
    /// previous one are ignored.
    pub fn open_detail(&self) -> Result<()> {
        let generation = self.shared.store.update(|state| {
            state.is_expanded = true;
            state.is_info_panel_visible = false;
            self.shared.countdown_generation.fetch_add(1, Ordering::SeqCst) + 1
        });

        let shared = Arc::clone(&self.shared);
        let task = PeriodicTask::spawn(
            "sky-countdown",
            self.shared.settings.countdown_interval,
            move || shared.tick_countdown(generation),
        )?;

        if let Some(mut previous) = lock(&self.countdown_task).replace(task) {
            previous.cancel();
        }
        Ok(())
    }

    /// Back navigation from the detail view.
    ///
    /// A visible info panel is hidden first. Otherwise the view collapses,
    /// the ticker stops, and the countdown is cleared before this returns.
    pub fn close_detail(&self) {
        let collapsed = self.shared.store.update(|state| {
            if state.is_info_panel_visible {
                state.is_info_panel_visible = false;
                return false;
            }
            self.shared.countdown_generation.fetch_add(1, Ordering::SeqCst);
            state.is_expanded = false;
            state.countdown = None;
            true
        });

        if collapsed && let Some(mut task) = lock(&self.countdown_task).take() {
            task.cancel();
        }
    }

    /// Compute the countdown once for the currently open detail view.
    pub fn tick_countdown(&self) {
        let generation = self.shared.countdown_generation.load(Ordering::SeqCst);
        self.shared.tick_countdown(generation);
    }

    /// Show or hide the info panel. Showing it selects the dominant cloud
    /// type when there is one.
    pub fn toggle_info_panel(&self) {
        self.shared.store.update(|state| {
            state.is_info_panel_visible = !state.is_info_panel_visible;
            if state.is_info_panel_visible
                && let Some(cloud) = state.cloud_classification.dominant()
            {
                state.selected_info = Some(InfoContent::Cloud(cloud));
            }
        });
    }

    pub fn hide_info_panel(&self) {
        self.shared
            .store
            .update(|state| state.is_info_panel_visible = false);
    }

    /// Show the info panel with `content`, e.g. after a star was tapped.
    pub fn select_info(&self, content: InfoContent) {
        self.shared.store.update(|state| {
            state.selected_info = Some(content);
            state.is_info_panel_visible = true;
        });
    }

    /// Forget the active location, reset the session state and hand control
    /// to the location picker via `navigate`.
    ///
    /// Both background loops are stopped and refreshes still in flight are
    /// discarded. Call [`start`](Self::start) again once a new location has
    /// been chosen.
    ///
    /// If the location store cannot be cleared the error is recorded and
    /// `navigate` is not called.
    pub fn change_location<F: FnOnce()>(&self, navigate: F) {
        if let Err(e) = self.shared.providers.location.clear_active_location() {
            log_warning!("Failed to clear active location: {e:#}");
            let message = e.to_string();
            self.shared.store.update(|state| state.last_error = Some(message));
            return;
        }

        for mut task in self.take_tasks() {
            task.cancel();
        }

        let shared = &self.shared;
        shared.store.update(|state| {
            let issued = shared.refresh_issued.load(Ordering::SeqCst);
            shared.refresh_applied.fetch_max(issued, Ordering::SeqCst);
            *state = SkyState::default();
        });
        navigate();
    }

    /// Stop both background loops and wait for them to exit.
    pub fn shutdown(&self) {
        for task in self.take_tasks() {
            task.join();
        }
    }

    /// Detach both loops and invalidate pending countdown ticks.
    fn take_tasks(&self) -> Vec<PeriodicTask> {
        self.shared
            .countdown_generation
            .fetch_add(1, Ordering::SeqCst);
        [lock(&self.refresh_task).take(), lock(&self.countdown_task).take()]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl Drop for SkyOrchestrator {
    fn drop(&mut self) {
        for mut task in self.take_tasks() {
            task.cancel();
        }
    }
}
