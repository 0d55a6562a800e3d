//! Cloud cover classification.
//!
//! Maps the four cover percentages reported by a weather provider and an
//! optional weather code onto the cloud categories drawn in the sky. The
//! rules are threshold based and applied in a fixed sequence:
//!
//! 1. Precipitation or storm codes (`>= 51`) always add NIMBUS.
//! 2. Fog codes (45, 48) add STRATUS.
//! 3. High cover of 20% or more adds CIRRUS.
//! 4. Mid cover of 25% or more adds STRATUS when thick (`>= 60`) or overcast
//!    (code 3), otherwise CUMULUS.
//! 5. Low cover of 25% or more adds STRATUS when thick (`>= 50`) or overcast,
//!    otherwise CUMULUS.
//! 6. When no layer qualified, total cover decides: STRATUS above 50%,
//!    CUMULUS otherwise.
//!
//! A sky whose total cover is at or below the clear threshold and that has no
//! precipitation yields an empty list.

use std::collections::BTreeSet;

use super::{CloudClassification, CloudInputs, CloudType};
use crate::common::constants::*;

/// Classifier holding the configurable clear-sky threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudClassifier {
    clear_threshold: i32,
}

impl Default for CloudClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_CLEAR_COVER_THRESHOLD)
    }
}

impl CloudClassifier {
    /// Create a classifier; total cover `<= clear_threshold` counts as clear.
    pub fn new(clear_threshold: u8) -> Self {
        Self {
            clear_threshold: i32::from(clear_threshold),
        }
    }

    pub fn clear_threshold(&self) -> i32 {
        self.clear_threshold
    }

    /// Classify raw cover values.
    pub fn classify(
        &self,
        total_cover: i32,
        low_cover: i32,
        mid_cover: i32,
        high_cover: i32,
        weather_code: Option<i32>,
    ) -> CloudClassification {
        self.classify_inputs(CloudInputs {
            total_cover_pct: total_cover,
            low_cover_pct: low_cover,
            mid_cover_pct: mid_cover,
            high_cover_pct: high_cover,
            weather_code,
        })
    }

    /// Classify a full set of inputs, keeping them alongside the result.
    pub fn classify_inputs(&self, inputs: CloudInputs) -> CloudClassification {
        CloudClassification {
            types: self.detect(&inputs),
            inputs,
        }
    }

    fn detect(&self, inputs: &CloudInputs) -> Vec<CloudType> {
        let code = inputs.weather_code;
        let is_precip_or_storm = code.is_some_and(|c| c >= PRECIPITATION_WEATHER_CODE);

        if inputs.total_cover_pct <= self.clear_threshold && !is_precip_or_storm {
            return Vec::new();
        }

        let is_overcast = code == Some(OVERCAST_WEATHER_CODE);

        // Ord on CloudType is the display priority, so the set iterates in order
        let mut detected = BTreeSet::new();

        if is_precip_or_storm {
            detected.insert(CloudType::Nimbus);
        }

        if code.is_some_and(|c| FOG_WEATHER_CODES.contains(&c)) {
            detected.insert(CloudType::Stratus);
        }

        if inputs.high_cover_pct >= HIGH_CLOUD_CIRRUS_MIN {
            detected.insert(CloudType::Cirrus);
        }

        if inputs.mid_cover_pct >= MID_CLOUD_MIN {
            detected.insert(layer_type(
                inputs.mid_cover_pct >= MID_CLOUD_STRATUS_MIN || is_overcast,
            ));
        }

        if inputs.low_cover_pct >= LOW_CLOUD_MIN {
            detected.insert(layer_type(
                inputs.low_cover_pct >= LOW_CLOUD_STRATUS_MIN || is_overcast,
            ));
        }

        if detected.is_empty() && inputs.total_cover_pct > self.clear_threshold {
            detected.insert(layer_type(
                inputs.total_cover_pct > TOTAL_COVER_STRATUS_ABOVE,
            ));
        }

        detected.into_iter().take(MAX_CLOUD_TYPES).collect()
    }
}

fn layer_type(is_stratiform: bool) -> CloudType {
    if is_stratiform {
        CloudType::Stratus
    } else {
        CloudType::Cumulus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CloudType::*;

    fn classify(total: i32, low: i32, mid: i32, high: i32, code: i32) -> Vec<CloudType> {
        CloudClassifier::default()
            .classify(total, low, mid, high, Some(code))
            .types
    }

    #[test]
    fn test_clear_sky_below_threshold() {
        assert!(classify(5, 2, 2, 1, 0).is_empty());
        assert!(classify(15, 40, 40, 40, 2).is_empty());
        assert!(classify(0, 0, 0, 0, 0).is_empty());
    }

    #[test]
    fn test_rain_code_gives_nimbus_regardless_of_cover() {
        assert_eq!(classify(5, 5, 0, 0, 61), vec![Nimbus]);
        assert_eq!(classify(0, 0, 0, 0, 95), vec![Nimbus]);
    }

    #[test]
    fn test_light_clouds_fall_back_to_cumulus() {
        assert_eq!(classify(20, 20, 0, 0, 1), vec![Cumulus]);
    }

    #[test]
    fn test_heavy_total_falls_back_to_stratus() {
        assert_eq!(classify(80, 10, 10, 10, 1), vec![Stratus]);
        assert_eq!(classify(50, 10, 10, 10, 1), vec![Cumulus]);
    }

    #[test]
    fn test_cirrus_only() {
        assert_eq!(classify(25, 0, 0, 25, 1), vec![Cirrus]);
    }

    #[test]
    fn test_heavy_low_stratus() {
        assert_eq!(classify(85, 60, 0, 0, 3), vec![Stratus]);
    }

    #[test]
    fn test_overcast_code_turns_layers_stratiform() {
        assert_eq!(classify(60, 30, 30, 0, 3), vec![Stratus]);
        assert_eq!(classify(60, 30, 30, 0, 2), vec![Cumulus]);
    }

    #[test]
    fn test_mixed_layers() {
        // mid 30 and low 30 are both cumulus, high 30 is cirrus
        assert_eq!(classify(70, 30, 30, 30, 1), vec![Cumulus, Cirrus]);
        // thick mid layer is stratus, thin low layer cumulus
        assert_eq!(classify(100, 30, 70, 0, 1), vec![Stratus, Cumulus]);
    }

    #[test]
    fn test_fog_adds_stratus() {
        assert_eq!(classify(100, 100, 100, 100, 45), vec![Stratus, Cirrus]);
        assert_eq!(classify(20, 0, 0, 0, 48), vec![Stratus]);
    }

    #[test]
    fn test_all_four_types_in_priority_order() {
        assert_eq!(
            classify(100, 30, 100, 100, 95),
            vec![Nimbus, Stratus, Cumulus, Cirrus]
        );
    }

    #[test]
    fn test_cumulus_ranks_above_cirrus() {
        assert_eq!(classify(100, 30, 0, 80, 1), vec![Cumulus, Cirrus]);
    }

    #[test]
    fn test_unknown_weather_code() {
        let result = CloudClassifier::default().classify(10, 0, 0, 0, None);
        assert!(result.types.is_empty());

        let result = CloudClassifier::default().classify(40, 0, 0, 0, None);
        assert_eq!(result.types, vec![Cumulus]);
        assert_eq!(result.inputs.weather_code, None);
    }

    #[test]
    fn test_custom_threshold() {
        let strict = CloudClassifier::new(0);
        assert_eq!(strict.classify(5, 2, 2, 1, Some(0)).types, vec![Cumulus]);
        assert!(strict.classify(0, 0, 0, 0, Some(0)).types.is_empty());
    }

    #[test]
    fn test_inputs_are_kept_for_audit() {
        let result = CloudClassifier::default().classify(70, 30, 30, 30, Some(1));
        assert_eq!(result.inputs.total_cover_pct, 70);
        assert_eq!(result.inputs.low_cover_pct, 30);
        assert_eq!(result.inputs.mid_cover_pct, 30);
        assert_eq!(result.inputs.high_cover_pct, 30);
        assert_eq!(result.inputs.weather_code, Some(1));
    }
}
