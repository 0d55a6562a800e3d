//! Status command - derive the sky once and print it.
//!
//! Runs a single refresh against the configured providers, computes the
//! countdown as the detail view would, and prints the resulting
//! [`SkyState`] either as a human-readable block or as JSON.

use anyhow::Result;

use crate::common::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::common::utils::format_countdown;
use crate::config::Config;
use crate::core::SkyState;
use crate::sky::CountdownState;

/// Handle the status command.
///
/// # Arguments
/// * `json` - Output the full state as JSON
/// * `at` - Optional `YYYY-MM-DD HH:MM:SS` to pin the clock to
///
/// Returns the process exit code. A missing location is already part of the
/// printed output, so it is reported through the code rather than as an error.
pub fn handle_status_command(json: bool, at: Option<&str>) -> Result<i32> {
    let config = Config::load()?;
    let zone = config.display_zone()?;
    let clock = super::build_clock(at, &zone)?;
    let sky = super::build_session(&config, clock)?;

    sky.refresh();
    sky.open_detail()?;
    sky.tick_countdown();
    let state = sky.state();
    sky.shutdown();

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        display_human_readable(&state);
    }

    Ok(exit_code_for(&state))
}

fn exit_code_for(state: &SkyState) -> i32 {
    match (&state.location, &state.last_error) {
        (None, Some(_)) => EXIT_FAILURE,
        _ => EXIT_SUCCESS,
    }
}

/// One line describing the countdown, e.g. `Sunset at 18:00 (in 05:59:59)`.
pub(crate) fn describe_countdown(countdown: &CountdownState) -> String {
    let event = if countdown.is_before_sunrise {
        "Sunrise"
    } else {
        "Sunset"
    };
    format!(
        "{event} at {} (in {})",
        countdown.event_local_time,
        format_countdown(countdown.seconds_remaining)
    )
}

/// Comma-separated cloud names, or "Clear sky".
pub(crate) fn describe_clouds(state: &SkyState) -> String {
    let types = &state.cloud_classification.types;
    if types.is_empty() {
        return "Clear sky".to_string();
    }
    types
        .iter()
        .map(|t| t.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_human_readable(state: &SkyState) {
    log_version!();

    let Some(location) = &state.location else {
        if let Some(message) = &state.last_error {
            log_block_start!("{}", message);
        }
        log_indented!("Set one with: skystate location set <label> <latitude> <longitude>");
        log_end!();
        return;
    };

    log_block_start!(
        "{} ({:.4}°, {:.4}°)",
        location.label,
        location.latitude_deg,
        location.longitude_deg
    );
    log_indented!(
        "Theme:      {} {}",
        state.theme_type.symbol(),
        state.theme_type
    );
    log_indented!("Sun angle:  {:.1}°", state.sun_angle_deg);
    log_indented!("Clouds:     {}", describe_clouds(state));
    match &state.countdown {
        Some(countdown) => log_indented!("Next event: {}", describe_countdown(countdown)),
        None => log_indented!("Next event: none before the theme changes"),
    }
    if let Some(info) = &state.selected_info {
        log_indented!("Info:       {}", info);
    }
    log_end!();
}
