//! Configuration loading functionality.
//!
//! Resolves the configuration directory, creates a commented default file on
//! first run, and parses and validates `skystate.toml`.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;
use super::validation::validate_config;
use crate::common::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::common::utils::private_path;

/// Global configuration directory, set once at startup
static CONFIG_DIR: OnceCell<Option<PathBuf>> = OnceCell::new();

const DEFAULT_CONFIG: &str = r#"#[Session timing]
refresh_interval = 60          # Sky refresh period in seconds (10-3600)
countdown_interval = 1000      # Countdown tick period in milliseconds (100-10000)

#[Derivation]
clear_cover_threshold = 15     # Total cover (%) at or below which the sky is clear (0-100)
#timezone = "Europe/Lisbon"    # IANA zone for event times and dates (default: system)

#[Diagnostics]
debug = false

#[Fixed cloud data]
#[clouds]
#total = 70
#low = 30
#mid = 65
#high = 10
#weather_code = 3
"#;

/// Set the configuration directory for the current process.
/// This can only be called once, typically at startup.
pub fn set_config_dir(dir: Option<String>) -> Result<()> {
    CONFIG_DIR
        .set(dir.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration directory already set"))
}

/// Get the custom configuration directory if one was set.
pub fn get_custom_config_dir() -> Option<PathBuf> {
    CONFIG_DIR.get().and_then(|d| d.clone())
}

/// Directory containing `skystate.toml` and `location.toml`.
pub fn get_config_base_dir() -> Result<PathBuf> {
    if let Some(custom_dir) = get_custom_config_dir() {
        return Ok(custom_dir);
    }
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(CONFIG_DIR_NAME))
}

/// Path of `skystate.toml`.
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_base_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration using automatic path detection.
///
/// A commented default file is written if none exists yet.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        create_default_config(&config_path)
            .context("Failed to create default config during load")?;
    }

    load_from_path(&config_path).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            private_path(&config_path)
        )
    })
}

/// Load configuration from a specific path.
///
/// Unlike [`load`], a missing file is an error here.
pub fn load_from_path(path: &PathBuf) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!(
            "Configuration file not found at {}",
            private_path(path)
        );
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", private_path(path)))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", private_path(path)))?;

    validate_config(&config)?;

    Ok(config)
}

/// Write the commented default configuration to `path`.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", private_path(parent)))?;
    }

    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write default config to {}", private_path(path)))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", private_path(path));
    Ok(())
}
