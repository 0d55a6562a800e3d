//! Small helpers shared by the CLI and the providers.

use std::path::Path;

/// Render a path for display, replacing the home directory with `~`.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        return format!("~/{}", stripped.display());
    }
    path.display().to_string()
}

/// Format a number of seconds as `HH:MM:SS`.
pub fn format_countdown(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(0), "00:00:00");
        assert_eq!(format_countdown(59), "00:00:59");
        assert_eq!(format_countdown(3661), "01:01:01");
        assert_eq!(format_countdown(86_399), "23:59:59");
        assert_eq!(format_countdown(-5), "00:00:00");
    }

    #[test]
    fn test_private_path_outside_home() {
        let path = Path::new("/etc/skystate/skystate.toml");
        assert_eq!(private_path(path), "/etc/skystate/skystate.toml");
    }
}
