//! Cloud data taken from the `[clouds]` configuration table.
//!
//! Lets a fixed sky be described without a weather service:
//!
//! ```toml
//! [clouds]
//! total = 70
//! low = 30
//! mid = 65
//! high = 10
//! weather_code = 3
//! ```

use anyhow::Result;

use super::CloudDataProvider;
use crate::sky::{CloudInputs, GeoPoint};

/// Cloud provider returning the same configured inputs for every point.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredCloudProvider {
    inputs: Option<CloudInputs>,
}

impl ConfiguredCloudProvider {
    pub fn new(inputs: Option<CloudInputs>) -> Self {
        Self { inputs }
    }
}

impl CloudDataProvider for ConfiguredCloudProvider {
    fn cloud_inputs_for(&self, _point: GeoPoint) -> Result<CloudInputs> {
        self.inputs
            .ok_or_else(|| anyhow::anyhow!("No cloud data source configured"))
    }
}
