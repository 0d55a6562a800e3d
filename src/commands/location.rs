//! Location command - show, set or clear the active location.

use anyhow::Result;

use crate::args::LocationAction;
use crate::common::utils::private_path;
use crate::providers::{FileLocationStore, LocationProvider};
use crate::sky::GeoPoint;

/// Handle the location command against the default location store.
pub fn handle_location_command(action: &LocationAction) -> Result<()> {
    let store = FileLocationStore::open_default()?;
    log_debug!("Location file: {}", private_path(store.path()));
    run_location_action(&store, action)
}

pub(crate) fn run_location_action(
    store: &dyn LocationProvider,
    action: &LocationAction,
) -> Result<()> {
    log_version!();
    match action {
        LocationAction::Show => {
            if store.has_active_location() {
                let label = store.active_label()?;
                let point = store.active_point()?;
                log_block_start!("Active location: {}", label);
                log_indented!("{}", point);
            } else {
                log_block_start!("No active location selected");
                log_indented!("Set one with: skystate location set <label> <latitude> <longitude>");
            }
        }
        LocationAction::Clear => {
            store.clear_active_location()?;
            log_block_start!("Active location cleared");
        }
        LocationAction::Set {
            label,
            latitude,
            longitude,
        } => {
            let point = GeoPoint::new(*latitude, *longitude);
            store.save_active_location(label, point)?;
            log_block_start!("Active location set to {}", label);
            log_indented!("{}", point);
        }
    }
    log_end!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockLocationProvider;

    #[test]
    fn test_set_saves_point() {
        let mut store = MockLocationProvider::new();
        store
            .expect_save_active_location()
            .withf(|label, point| label == "Lisbon" && *point == GeoPoint::new(38.72, -9.14))
            .times(1)
            .returning(|_, _| Ok(()));

        let action = LocationAction::Set {
            label: "Lisbon".to_string(),
            latitude: 38.72,
            longitude: -9.14,
        };
        run_location_action(&store, &action).unwrap();
    }

    #[test]
    fn test_clear_propagates_errors() {
        let mut store = MockLocationProvider::new();
        store
            .expect_clear_active_location()
            .returning(|| Err(anyhow::anyhow!("read-only")));

        assert!(run_location_action(&store, &LocationAction::Clear).is_err());
    }

    #[test]
    fn test_show_without_location_succeeds() {
        let mut store = MockLocationProvider::new();
        store.expect_has_active_location().returning(|| false);

        run_location_action(&store, &LocationAction::Show).unwrap();
    }
}
