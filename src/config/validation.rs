//! Configuration validation functionality.

use anyhow::Result;

use super::{CloudsConfig, Config};
use crate::common::constants::*;
use crate::sky::DisplayZone;

/// Reject values outside their documented ranges.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(interval) = config.refresh_interval
        && !(MINIMUM_REFRESH_INTERVAL..=MAXIMUM_REFRESH_INTERVAL).contains(&interval)
    {
        anyhow::bail!(
            "refresh_interval ({} s) must be between {} and {} seconds",
            interval,
            MINIMUM_REFRESH_INTERVAL,
            MAXIMUM_REFRESH_INTERVAL
        );
    }

    if let Some(interval) = config.countdown_interval
        && !(MINIMUM_COUNTDOWN_INTERVAL..=MAXIMUM_COUNTDOWN_INTERVAL).contains(&interval)
    {
        anyhow::bail!(
            "countdown_interval ({} ms) must be between {} and {} milliseconds",
            interval,
            MINIMUM_COUNTDOWN_INTERVAL,
            MAXIMUM_COUNTDOWN_INTERVAL
        );
    }

    if let Some(threshold) = config.clear_cover_threshold
        && threshold > 100
    {
        anyhow::bail!(
            "clear_cover_threshold ({}%) must be between 0 and 100",
            threshold
        );
    }

    if let Some(name) = config.timezone.as_deref() {
        DisplayZone::from_name(name)?;
    }

    if let Some(clouds) = &config.clouds {
        validate_clouds(clouds)?;
    }

    Ok(())
}

fn validate_clouds(clouds: &CloudsConfig) -> Result<()> {
    for (field, value) in [
        ("clouds.total", clouds.total),
        ("clouds.low", clouds.low),
        ("clouds.mid", clouds.mid),
        ("clouds.high", clouds.high),
    ] {
        if !(0..=100).contains(&value) {
            anyhow::bail!("{field} ({value}%) must be between 0 and 100");
        }
    }

    if let Some(code) = clouds.weather_code
        && !(0..=99).contains(&code)
    {
        anyhow::bail!("clouds.weather_code ({code}) must be a WMO code between 0 and 99");
    }

    Ok(())
}
