//! Watch command - follow the sky until interrupted.
//!
//! Starts the refresh loop (and optionally the detail view with its live
//! countdown) and prints a line for every meaningful state change. Stops on
//! SIGINT, SIGTERM or SIGHUP.

use anyhow::Result;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use super::status::{describe_clouds, describe_countdown};
use crate::config::Config;
use crate::core::SkyState;
use crate::logger::Log;
use crate::signals::setup_signal_handler;

/// How often the loop checks for a shutdown signal.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Handle the watch command.
pub fn handle_watch_command(detail: bool, at: Option<&str>) -> Result<()> {
    let signal_state = setup_signal_handler()?;

    let config = Config::load()?;
    let zone = config.display_zone()?;
    let clock = super::build_clock(at, &zone)?;
    Log::set_simulated(clock.is_simulated());

    let sky = super::build_session(&config, clock)?;

    log_version!();
    log_block_start!(
        "Watching the sky every {}s (Ctrl+C to stop)",
        sky.settings().refresh_interval.as_secs()
    );

    let updates = sky.subscribe();
    sky.start()?;
    if detail {
        sky.open_detail()?;
    }

    let mut last_shown: Option<SkyState> = None;
    while signal_state.is_running() {
        match updates.recv_timeout(POLL_INTERVAL) {
            Ok(state) => {
                if state.is_loading {
                    continue;
                }
                print_changes(last_shown.as_ref(), &state);
                last_shown = Some(state);
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    sky.shutdown();
    log_block_start!("Stopped watching");
    log_end!();
    Ok(())
}

fn print_changes(previous: Option<&SkyState>, state: &SkyState) {
    let sky_changed = previous.is_none_or(|p| {
        p.location != state.location
            || p.theme_type != state.theme_type
            || p.sun_angle_deg != state.sun_angle_deg
            || p.cloud_classification != state.cloud_classification
    });
    let error_changed = previous.is_none_or(|p| p.last_error != state.last_error);
    let countdown_changed = previous.is_none_or(|p| p.countdown != state.countdown);

    if error_changed && let Some(message) = &state.last_error {
        log_warning!("{}", message);
    }

    if sky_changed && let Some(location) = &state.location {
        log_decorated!(
            "{}: {} {} at {:.1}°, {}",
            location.label,
            state.theme_type.symbol(),
            state.theme_type,
            state.sun_angle_deg,
            describe_clouds(state)
        );
    }

    if countdown_changed && let Some(countdown) = &state.countdown {
        log_indented!("{}", describe_countdown(countdown));
    }
}
