//! Structured terminal logging with box-drawing output.
//!
//! Every line written by skystate goes through this module so that the
//! output keeps one visual shape:
//!
//! ```text
//! ┏ skystate v0.3.0 ━━╸
//! ┃
//! ┣ Refreshing sky state for Lisbon
//! ┃   Sun angle: 72.4°
//! ┣[WARNING] Cloud data unavailable
//! ╹
//! ```
//!
//! ## Conventions
//!
//! - `log_block_start!` opens a new conceptual block (prepends an empty `┃`).
//! - `log_decorated!` continues the current block with `┣ message`.
//! - `log_indented!` nests details under the previous line (`┃   message`).
//! - `log_pipe!` inserts a single spacer line before a semantic message.
//! - `log_info!` and `log_warning!` carry a `[LEVEL]` tag; `log_debug!` is
//!   only printed while debug output is on.
//! - `log_warning_standalone!` skips the pipe prefix and is meant for
//!   one-shot CLI messages.
//! - `log_error_exit!` closes the block with an `[ERROR]` line.
//! - `log_version!` and `log_end!` bracket a whole run.
//!
//! Output can be silenced at runtime with [`Log::set_enabled`], which the
//! JSON output mode and the test suites rely on.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
static SIMULATED_CLOCK: AtomicBool = AtomicBool::new(false);

/// Runtime switches for the logger.
pub struct Log;

impl Log {
    /// Enable or disable all output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable or disable `log_debug!` lines.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_debug() -> bool {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Mark the process as running against a fixed (simulated) clock.
    ///
    /// While set, each line is prefixed with the wall-clock time it was
    /// written at so simulated runs can be told apart from live ones.
    pub fn set_simulated(simulated: bool) {
        SIMULATED_CLOCK.store(simulated, Ordering::SeqCst);
    }

    /// Timestamp prefix for the current line, empty outside simulation.
    pub fn get_timestamp_prefix() -> String {
        if SIMULATED_CLOCK.load(Ordering::SeqCst) {
            format!("[{}] ", chrono::Local::now().format("%H:%M:%S"))
        } else {
            String::new()
        }
    }
}

/// Write already formatted text to stdout.
pub fn write_output(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_line {
    ($template:literal, $($arg:tt)*) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let message = format!($($arg)*);
            let formatted = format!($template, prefix = prefix, message = message);
            $crate::logger::write_output(&formatted);
        }
    }};
}

/// Log a decorated message as part of the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)*) => {
        $crate::__log_line!("{prefix}┣ {message}\n", $($arg)*)
    };
}

/// Log an indented detail line.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)*) => {
        $crate::__log_line!("{prefix}┃   {message}\n", $($arg)*)
    };
}

/// Insert an empty spacer line.
#[macro_export]
macro_rules! log_pipe {
    () => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            $crate::logger::write_output(&format!("{prefix}┃\n"));
        }
    }};
}

/// Start a new block of related lines.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)*) => {
        $crate::__log_line!("{prefix}┃\n{prefix}┣ {message}\n", $($arg)*)
    };
}

/// Print the startup header.
#[macro_export]
macro_rules! log_version {
    () => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let version = env!("CARGO_PKG_VERSION");
            $crate::logger::write_output(&format!("{prefix}┏ skystate v{version} ━━╸\n"));
        }
    }};
}

/// Print the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            $crate::logger::write_output(&format!("{prefix}╹\n"));
        }
    }};
}

/// Log a warning (yellow tag).
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::__log_line!("{prefix}┣[\x1b[33mWARNING\x1b[0m] {message}\n", $($arg)*)
    };
}

/// Log a warning without the pipe prefix.
#[macro_export]
macro_rules! log_warning_standalone {
    ($($arg:tt)*) => {
        $crate::__log_line!("{prefix}[\x1b[33mWARNING\x1b[0m] {message}\n", $($arg)*)
    };
}

/// Log an error that closes the current block.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)*) => {
        $crate::__log_line!("{prefix}┃\n{prefix}┗[\x1b[31mERROR\x1b[0m] {message}\n", $($arg)*)
    };
}

/// Log an informational message (green tag).
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::__log_line!("{prefix}┣[\x1b[32mINFO\x1b[0m] {message}\n", $($arg)*)
    };
}

/// Log a debug message; dropped unless debug output is enabled.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        if $crate::logger::Log::is_debug() {
            $crate::__log_line!("{prefix}┣[\x1b[32mDEBUG\x1b[0m] {message}\n", $($arg)*)
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_enable_toggle() {
        let original = Log::is_enabled();
        Log::set_enabled(false);
        assert!(!Log::is_enabled());
        log_decorated!("not printed {}", 1);
        Log::set_enabled(true);
        assert!(Log::is_enabled());
        Log::set_enabled(original);
    }

    #[test]
    #[serial]
    fn test_timestamp_prefix_only_in_simulation() {
        Log::set_simulated(false);
        assert!(Log::get_timestamp_prefix().is_empty());

        Log::set_simulated(true);
        let prefix = Log::get_timestamp_prefix();
        assert!(prefix.starts_with('[') && prefix.ends_with("] "));
        assert_eq!(prefix.len(), "[00:00:00] ".len());
        Log::set_simulated(false);
    }
}
