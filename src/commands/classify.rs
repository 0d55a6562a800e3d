//! Classify command - run the cloud classifier on values from the command line.

use anyhow::Result;

use crate::config::Config;
use crate::sky::CloudInputs;

/// Handle the classify command using the configured clear-sky threshold.
pub fn handle_classify_command(inputs: CloudInputs, json: bool) -> Result<()> {
    let config = Config::load()?;
    let classifier = config.classifier();
    let classification = classifier.classify_inputs(inputs);

    if json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    }

    log_version!();
    log_block_start!(
        "Cover: total {}%, low {}%, mid {}%, high {}%, code {}",
        inputs.total_cover_pct,
        inputs.low_cover_pct,
        inputs.mid_cover_pct,
        inputs.high_cover_pct,
        inputs
            .weather_code
            .map_or_else(|| "unknown".to_string(), |c| c.to_string())
    );
    if classification.is_clear() {
        log_indented!(
            "Clear sky (total cover at or below {}%)",
            classifier.clear_threshold()
        );
    } else {
        for (rank, cloud) in classification.types.iter().enumerate() {
            log_indented!("{}. {}", rank + 1, cloud);
        }
    }
    log_end!();
    Ok(())
}
