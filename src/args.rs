//! Command-line argument parsing and processing.
//!
//! Arguments are parsed by hand into a [`CliAction`]. Global flags
//! (`--debug`, `--config <dir>`, `--help`, `--version`) may appear anywhere;
//! the first positional argument selects the command. Coordinates such as
//! `-9.14` are treated as positional values, not flags.

use crate::sky::CloudInputs;

/// What to do with the active location.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationAction {
    Show,
    Clear,
    Set {
        label: String,
        latitude: f64,
        longitude: f64,
    },
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    /// Derive and print the sky once
    Status {
        debug_enabled: bool,
        config_dir: Option<String>,
        json: bool,
        at: Option<String>,
    },
    /// Keep refreshing and print every state change until interrupted
    Watch {
        debug_enabled: bool,
        config_dir: Option<String>,
        detail: bool,
        at: Option<String>,
    },
    /// Classify cloud cover values given on the command line
    Classify {
        debug_enabled: bool,
        config_dir: Option<String>,
        inputs: CloudInputs,
        json: bool,
    },
    /// Inspect or change the active location
    Location {
        debug_enabled: bool,
        config_dir: Option<String>,
        action: LocationAction,
    },
    /// Detailed help for one command
    HelpCommand { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

/// Flags that consume the following argument.
const VALUE_FLAGS: [&str; 3] = ["--config", "-c", "--at"];

/// Flags that stand alone.
const SWITCH_FLAGS: [&str; 8] = [
    "--debug", "-d", "--json", "-j", "--detail", "--help", "-h", "--version",
];

fn is_flag(arg: &str) -> bool {
    arg.starts_with('-') && arg.parse::<f64>().is_err()
}

/// Positional arguments in order, skipping flags and flag values.
fn positionals(args: &[String]) -> Vec<String> {
    let mut result = Vec::new();
    let mut idx = 0;
    while idx < args.len() {
        let arg = args[idx].as_str();
        if VALUE_FLAGS.contains(&arg) {
            idx += 2;
            continue;
        }
        if !is_flag(arg) {
            result.push(args[idx].clone());
        }
        idx += 1;
    }
    result
}

fn flag_value(args: &[String], names: &[&str]) -> Option<String> {
    args.iter()
        .position(|arg| names.contains(&arg.as_str()))
        .and_then(|idx| args.get(idx + 1))
        .cloned()
}

fn has_flag(args: &[String], names: &[&str]) -> bool {
    args.iter().any(|arg| names.contains(&arg.as_str()))
}

impl ParsedArgs {
    /// Parse command-line arguments (including the program name) into an
    /// action.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        ParsedArgs {
            action: Self::parse_action(&args_vec),
        }
    }

    fn parse_action(args: &[String]) -> CliAction {
        if has_flag(args, &["--version", "-V", "-v"]) {
            return CliAction::ShowVersion;
        }
        if has_flag(args, &["--help", "-h"]) {
            return CliAction::ShowHelp;
        }

        for arg in args {
            let known = VALUE_FLAGS.contains(&arg.as_str()) || SWITCH_FLAGS.contains(&arg.as_str());
            if is_flag(arg) && !known {
                log_warning!("Unknown option: {}", arg);
                return CliAction::ShowHelpDueToError;
            }
        }

        let debug_enabled = has_flag(args, &["--debug", "-d"]);
        let json = has_flag(args, &["--json", "-j"]);

        let config_dir = flag_value(args, &["--config", "-c"]);
        if has_flag(args, &["--config", "-c"])
            && config_dir.as_deref().is_none_or(|dir| dir.starts_with('-'))
        {
            log_warning!("Missing directory for --config. Usage: --config <directory>");
            return CliAction::ShowHelpDueToError;
        }

        let at = flag_value(args, &["--at"]);
        if has_flag(args, &["--at"]) && at.is_none() {
            log_warning!("Missing time for --at. Usage: --at \"YYYY-MM-DD HH:MM:SS\"");
            return CliAction::ShowHelpDueToError;
        }

        let positional = positionals(args);
        let Some((command, rest)) = positional.split_first() else {
            return CliAction::Status {
                debug_enabled,
                config_dir,
                json,
                at,
            };
        };

        match command.as_str() {
            "status" | "s" => {
                if let Some(extra) = rest.first() {
                    log_warning!("Unexpected argument for status: {}", extra);
                    return CliAction::ShowHelpDueToError;
                }
                CliAction::Status {
                    debug_enabled,
                    config_dir,
                    json,
                    at,
                }
            }
            "watch" | "w" => {
                if let Some(extra) = rest.first() {
                    log_warning!("Unexpected argument for watch: {}", extra);
                    return CliAction::ShowHelpDueToError;
                }
                CliAction::Watch {
                    debug_enabled,
                    config_dir,
                    detail: has_flag(args, &["--detail"]),
                    at,
                }
            }
            "classify" | "c" => match parse_cloud_inputs(rest) {
                Some(inputs) => CliAction::Classify {
                    debug_enabled,
                    config_dir,
                    inputs,
                    json,
                },
                None => {
                    log_warning!(
                        "Invalid cloud values. Usage: skystate classify <total> <low> <mid> <high> [weather_code]"
                    );
                    CliAction::ShowHelpDueToError
                }
            },
            "location" | "l" => match parse_location_action(rest) {
                Some(action) => CliAction::Location {
                    debug_enabled,
                    config_dir,
                    action,
                },
                None => {
                    log_warning!(
                        "Invalid location arguments. Usage: skystate location [show | clear | set <label> <latitude> <longitude>]"
                    );
                    CliAction::ShowHelpDueToError
                }
            },
            "help" | "h" => CliAction::HelpCommand {
                command: rest.first().cloned(),
            },
            _ => {
                log_warning!("Unknown command: {}", command);
                CliAction::ShowHelpDueToError
            }
        }
    }
}

fn parse_cloud_inputs(values: &[String]) -> Option<CloudInputs> {
    if !(4..=5).contains(&values.len()) {
        return None;
    }
    let numbers: Vec<i32> = values
        .iter()
        .map(|v| v.parse::<i32>())
        .collect::<Result<_, _>>()
        .ok()?;

    Some(CloudInputs {
        total_cover_pct: numbers[0],
        low_cover_pct: numbers[1],
        mid_cover_pct: numbers[2],
        high_cover_pct: numbers[3],
        weather_code: numbers.get(4).copied(),
    })
}

fn parse_location_action(values: &[String]) -> Option<LocationAction> {
    match values {
        [] => Some(LocationAction::Show),
        [cmd] if cmd == "show" => Some(LocationAction::Show),
        [cmd] if cmd == "clear" => Some(LocationAction::Clear),
        [cmd, label, latitude, longitude] if cmd == "set" => Some(LocationAction::Set {
            label: label.clone(),
            latitude: latitude.parse().ok()?,
            longitude: longitude.parse().ok()?,
        }),
        _ => None,
    }
}

/// Print the version header.
pub fn display_version_info() {
    log_version!();
    log_end!();
}

/// Print general usage.
pub fn display_help() {
    log_version!();
    log_block_start!("Usage: skystate [OPTIONS] [COMMAND]");
    log_block_start!("Commands:");
    log_indented!("status, s                      Show the current sky (default)");
    log_indented!("watch, w                       Follow the sky until interrupted");
    log_indented!("classify, c <t> <l> <m> <h> [code]  Classify cloud cover values");
    log_indented!("location, l [show|clear|set]   Manage the active location");
    log_indented!("help, h [COMMAND]              Show help for a command");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>    Use a custom configuration directory");
    log_indented!("-d, --debug           Print detailed derivation output");
    log_indented!("-j, --json            Machine readable output (status, classify)");
    log_indented!("    --at <time>       Pin the clock to \"YYYY-MM-DD HH:MM:SS\"");
    log_indented!("    --detail          Open the detail view with a live countdown (watch)");
    log_indented!("-h, --help            Print help");
    log_indented!("-V, --version         Print version");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        let mut full = vec!["skystate"];
        full.extend_from_slice(args);
        ParsedArgs::parse(full).action
    }

    #[test]
    fn test_parse_no_args_is_status() {
        assert_eq!(
            parse(&[]),
            CliAction::Status {
                debug_enabled: false,
                config_dir: None,
                json: false,
                at: None,
            }
        );
    }

    #[test]
    fn test_parse_status_with_flags() {
        assert_eq!(
            parse(&["status", "--json", "-d", "--at", "2026-03-10 12:00:00"]),
            CliAction::Status {
                debug_enabled: true,
                config_dir: None,
                json: true,
                at: Some("2026-03-10 12:00:00".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_config_before_command() {
        assert_eq!(
            parse(&["--config", "/tmp/sky", "watch", "--detail"]),
            CliAction::Watch {
                debug_enabled: false,
                config_dir: Some("/tmp/sky".to_string()),
                detail: true,
                at: None,
            }
        );
    }

    #[test]
    fn test_parse_help_and_version() {
        assert_eq!(parse(&["--help"]), CliAction::ShowHelp);
        assert_eq!(parse(&["status", "-h"]), CliAction::ShowHelp);
        assert_eq!(parse(&["--version"]), CliAction::ShowVersion);
        assert_eq!(parse(&["-V"]), CliAction::ShowVersion);
    }

    #[test]
    fn test_parse_classify() {
        assert_eq!(
            parse(&["classify", "70", "30", "65", "10", "3"]),
            CliAction::Classify {
                debug_enabled: false,
                config_dir: None,
                inputs: CloudInputs {
                    total_cover_pct: 70,
                    low_cover_pct: 30,
                    mid_cover_pct: 65,
                    high_cover_pct: 10,
                    weather_code: Some(3),
                },
                json: false,
            }
        );

        match parse(&["c", "20", "20", "0", "0"]) {
            CliAction::Classify { inputs, .. } => assert_eq!(inputs.weather_code, None),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_parse_classify_rejects_bad_values() {
        assert_eq!(parse(&["classify", "70", "30"]), CliAction::ShowHelpDueToError);
        assert_eq!(
            parse(&["classify", "70", "30", "lots", "10"]),
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_parse_location_set_with_negative_longitude() {
        assert_eq!(
            parse(&["location", "set", "Lisbon", "38.72", "-9.14"]),
            CliAction::Location {
                debug_enabled: false,
                config_dir: None,
                action: LocationAction::Set {
                    label: "Lisbon".to_string(),
                    latitude: 38.72,
                    longitude: -9.14,
                },
            }
        );
    }

    #[test]
    fn test_parse_location_subcommands() {
        match parse(&["location"]) {
            CliAction::Location { action, .. } => assert_eq!(action, LocationAction::Show),
            other => panic!("unexpected action: {other:?}"),
        }
        match parse(&["l", "clear"]) {
            CliAction::Location { action, .. } => assert_eq!(action, LocationAction::Clear),
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(
            parse(&["location", "set", "Lisbon", "north", "-9.14"]),
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_parse_help_command() {
        assert_eq!(
            parse(&["help", "classify"]),
            CliAction::HelpCommand {
                command: Some("classify".to_string())
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse(&["sunbathe"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["--loud"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["status", "--config"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["status", "--at"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["status", "extra"]), CliAction::ShowHelpDueToError);
    }
}
