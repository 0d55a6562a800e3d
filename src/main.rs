//! Main application entry point.
//!
//! Parses the command line, applies the global flags (`--config`,
//! `--debug`), and dispatches to the command handlers in
//! [`skystate::commands`]. Errors are printed once here and turned into a
//! non-zero exit code.

use anyhow::Result;

use skystate::args::{self, CliAction, ParsedArgs};
use skystate::commands;
use skystate::common::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use skystate::config::{self, Config};
use skystate::logger::Log;
use skystate::{log_error_exit, log_pipe};

fn main() {
    let parsed = ParsedArgs::parse(std::env::args());

    let code = match run(parsed.action) {
        Ok(code) => code,
        Err(e) => {
            Log::set_enabled(true);
            log_pipe!();
            log_error_exit!("{e:#}");
            EXIT_FAILURE
        }
    };

    std::process::exit(code);
}

/// Apply the flags shared by every command.
fn prepare(debug_enabled: bool, config_dir: Option<String>, quiet: bool) -> Result<()> {
    config::set_config_dir(config_dir)?;

    // A config file can switch debug output on as well
    let debug_from_config = Config::load().map(|c| c.debug_enabled()).unwrap_or(false);
    Log::set_debug(debug_enabled || debug_from_config);
    Log::set_enabled(!quiet);
    Ok(())
}

fn run(action: CliAction) -> Result<i32> {
    match action {
        CliAction::Status {
            debug_enabled,
            config_dir,
            json,
            at,
        } => {
            prepare(debug_enabled, config_dir, json)?;
            return commands::status::handle_status_command(json, at.as_deref());
        }
        CliAction::Watch {
            debug_enabled,
            config_dir,
            detail,
            at,
        } => {
            prepare(debug_enabled, config_dir, false)?;
            commands::watch::handle_watch_command(detail, at.as_deref())?;
        }
        CliAction::Classify {
            debug_enabled,
            config_dir,
            inputs,
            json,
        } => {
            prepare(debug_enabled, config_dir, json)?;
            commands::classify::handle_classify_command(inputs, json)?;
        }
        CliAction::Location {
            debug_enabled,
            config_dir,
            action,
        } => {
            prepare(debug_enabled, config_dir, false)?;
            commands::location::handle_location_command(&action)?;
        }
        CliAction::HelpCommand { command } => {
            commands::help::run_help_command(command.as_deref())?;
        }
        CliAction::ShowHelp => args::display_help(),
        CliAction::ShowVersion => args::display_version_info(),
        CliAction::ShowHelpDueToError => {
            args::display_help();
            return Ok(EXIT_FAILURE);
        }
    }
    Ok(EXIT_SUCCESS)
}
