//! Help command implementation for skystate.
//!
//! Shows command-specific help, or the general command list when no command
//! is named.

use anyhow::Result;

/// Show brief usage for a command (used for error messages)
pub fn show_command_usage(command: &str) {
    match command {
        "status" | "s" => log_block_start!("Usage: skystate status [--json] [--at <time>]"),
        "watch" | "w" => log_block_start!("Usage: skystate watch [--detail] [--at <time>]"),
        "classify" | "c" => {
            log_block_start!("Usage: skystate classify <total> <low> <mid> <high> [weather_code]")
        }
        "location" | "l" => log_block_start!(
            "Usage: skystate location [show | clear | set <label> <latitude> <longitude>]"
        ),
        _ => log_block_start!("Usage: skystate [OPTIONS] [COMMAND]"),
    }
}

/// Run the help command (dispatcher)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("status") | Some("s") => display_status_help(),
        Some("watch") | Some("w") => display_watch_help(),
        Some("classify") | Some("c") => display_classify_help(),
        Some("location") | Some("l") => display_location_help(),
        Some(unknown) => {
            log_warning_standalone!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("status, s               Show the current sky (default)");
    log_indented!("watch, w                Follow the sky until interrupted");
    log_indented!("classify, c <values>    Classify cloud cover percentages");
    log_indented!("location, l [action]    Show, set or clear the active location");
    log_indented!("help, h [COMMAND]       Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'skystate help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'skystate --help' to see all options and general usage.");
    log_end!();
}

fn display_status_help() {
    log_version!();
    log_block_start!("status - Derive the sky once and print it");
    show_command_usage("status");
    log_block_start!("Options:");
    log_indented!("-j, --json     Print the full state as JSON");
    log_indented!("--at <time>    Pin the clock to \"YYYY-MM-DD HH:MM:SS\" in the display zone");
    log_block_start!("Examples:");
    log_indented!("skystate status");
    log_indented!("skystate status --at \"2026-06-21 20:30:00\" --json");
    log_end!();
}

fn display_watch_help() {
    log_version!();
    log_block_start!("watch - Refresh periodically and print every change");
    show_command_usage("watch");
    log_block_start!("Options:");
    log_indented!("--detail       Open the detail view and show a live countdown");
    log_indented!("--at <time>    Pin the clock to \"YYYY-MM-DD HH:MM:SS\" in the display zone");
    log_block_start!("The refresh period is set by refresh_interval in skystate.toml.");
    log_end!();
}

fn display_classify_help() {
    log_version!();
    log_block_start!("classify - Map cloud cover to cloud types");
    show_command_usage("classify");
    log_block_start!("Arguments:");
    log_indented!("total, low, mid, high   Cover percentages (0-100)");
    log_indented!("weather_code            Optional WMO weather code");
    log_block_start!("Examples:");
    log_indented!("skystate classify 70 30 65 10 2     # Stratus, Cumulus");
    log_indented!("skystate classify 80 70 0 0 61      # Nimbus, Stratus");
    log_end!();
}

fn display_location_help() {
    log_version!();
    log_block_start!("location - Manage the active location");
    show_command_usage("location");
    log_block_start!("Actions:");
    log_indented!("show                       Print the active location (default)");
    log_indented!("clear                      Forget the active location");
    log_indented!("set <label> <lat> <lon>    Choose a new active location");
    log_block_start!("Examples:");
    log_indented!("skystate location set Lisbon 38.7223 -9.1393");
    log_end!();
}
