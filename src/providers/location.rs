//! Single-slot persistent location store.
//!
//! The active location lives in `location.toml` next to `skystate.toml`:
//!
//! ```toml
//! label = "Lisbon, Portugal"
//! latitude = 38.7223
//! longitude = -9.1393
//! ```
//!
//! Keeping it in its own file lets the main configuration be shared or
//! version controlled without leaking where the user is.

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use super::LocationProvider;
use crate::common::constants::NO_ACTIVE_LOCATION_MESSAGE;
use crate::common::utils::private_path;
use crate::sky::GeoPoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredLocation {
    label: String,
    latitude: f64,
    longitude: f64,
}

/// Location provider persisting the active location to a TOML file.
pub struct FileLocationStore {
    path: PathBuf,
}

impl FileLocationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location inside the configuration directory.
    pub fn open_default() -> Result<Self> {
        let dir = crate::config::get_config_base_dir()?;
        Ok(Self::new(
            dir.join(crate::common::constants::LOCATION_FILE_NAME),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<StoredLocation>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open {}", private_path(&self.path)));
            }
        };

        // Writers truncate before rewriting, so read under the shared lock
        FileExt::lock_shared(&file)
            .with_context(|| format!("Failed to lock {}", private_path(&self.path)))?;
        let mut content = String::new();
        let read = file.read_to_string(&mut content);
        FileExt::unlock(&file)?;
        read.with_context(|| format!("Failed to read {}", private_path(&self.path)))?;
        let stored: StoredLocation = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", private_path(&self.path)))?;

        if !(-90.0..=90.0).contains(&stored.latitude)
            || !(-180.0..=180.0).contains(&stored.longitude)
        {
            anyhow::bail!(
                "Stored location has out-of-range coordinates ({}, {})",
                stored.latitude,
                stored.longitude
            );
        }

        Ok(Some(stored))
    }

    fn require(&self) -> Result<StoredLocation> {
        self.read()?
            .ok_or_else(|| anyhow::anyhow!(NO_ACTIVE_LOCATION_MESSAGE))
    }
}

impl LocationProvider for FileLocationStore {
    fn active_point(&self) -> Result<GeoPoint> {
        let stored = self.require()?;
        Ok(GeoPoint::new(stored.latitude, stored.longitude))
    }

    fn active_label(&self) -> Result<String> {
        Ok(self.require()?.label)
    }

    fn has_active_location(&self) -> bool {
        matches!(self.read(), Ok(Some(_)))
    }

    fn clear_active_location(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove {}", private_path(&self.path))),
        }
    }

    fn save_active_location(&self, label: &str, point: GeoPoint) -> Result<()> {
        if !(-90.0..=90.0).contains(&point.latitude_deg) {
            anyhow::bail!(
                "latitude must be between -90 and 90 degrees (got {})",
                point.latitude_deg
            );
        }
        if !(-180.0..=180.0).contains(&point.longitude_deg) {
            anyhow::bail!(
                "longitude must be between -180 and 180 degrees (got {})",
                point.longitude_deg
            );
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", private_path(parent)))?;
        }

        let content = toml::to_string(&StoredLocation {
            label: label.to_string(),
            latitude: point.latitude_deg,
            longitude: point.longitude_deg,
        })
        .context("Failed to serialize location")?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", private_path(&self.path)))?;

        // Hold the lock while rewriting so concurrent writers never interleave
        file.lock_exclusive()
            .with_context(|| format!("Failed to lock {}", private_path(&self.path)))?;
        file.set_len(0)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        FileExt::unlock(&file)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_store() {
        let dir = tempdir().unwrap();
        let store = FileLocationStore::new(dir.path().join("location.toml"));

        assert!(!store.has_active_location());
        let err = store.active_point().unwrap_err();
        assert_eq!(err.to_string(), NO_ACTIVE_LOCATION_MESSAGE);
        assert!(store.active_label().is_err());
    }

    #[test]
    fn test_save_and_read_back() {
        let dir = tempdir().unwrap();
        let store = FileLocationStore::new(dir.path().join("nested").join("location.toml"));

        store
            .save_active_location("Lisbon", GeoPoint::new(38.7223, -9.1393))
            .unwrap();

        assert!(store.has_active_location());
        assert_eq!(store.active_label().unwrap(), "Lisbon");
        assert_eq!(store.active_point().unwrap(), GeoPoint::new(38.7223, -9.1393));
    }

    #[test]
    fn test_overwrite_shorter_content() {
        let dir = tempdir().unwrap();
        let store = FileLocationStore::new(dir.path().join("location.toml"));

        store
            .save_active_location("Llanfairpwllgwyngyll, Wales", GeoPoint::new(53.22, -4.2))
            .unwrap();
        store.save_active_location("Oslo", GeoPoint::new(59.91, 10.75)).unwrap();

        assert_eq!(store.active_label().unwrap(), "Oslo");
        assert_eq!(store.active_point().unwrap(), GeoPoint::new(59.91, 10.75));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileLocationStore::new(dir.path().join("location.toml"));

        store.save_active_location("Oslo", GeoPoint::new(59.91, 10.75)).unwrap();
        store.clear_active_location().unwrap();
        assert!(!store.has_active_location());
        store.clear_active_location().unwrap();
    }

    #[test]
    fn test_rejects_out_of_range_coordinates() {
        let dir = tempdir().unwrap();
        let store = FileLocationStore::new(dir.path().join("location.toml"));

        assert!(store.save_active_location("Nowhere", GeoPoint::new(91.0, 0.0)).is_err());
        assert!(store.save_active_location("Nowhere", GeoPoint::new(0.0, -181.0)).is_err());
        assert!(!store.has_active_location());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("location.toml");
        fs::write(&path, "label = \"Oslo\"\nlatitude = \"north\"\n").unwrap();

        let store = FileLocationStore::new(path);
        assert!(!store.has_active_location());
        let err = store.active_point().unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse"));
    }

    #[test]
    fn test_reads_never_see_a_rewrite_in_progress() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("location.toml");
        let store = FileLocationStore::new(&path);
        store.save_active_location("Oslo", GeoPoint::new(59.91, 10.75)).unwrap();

        std::thread::scope(|scope| {
            scope.spawn(|| {
                let writer = FileLocationStore::new(&path);
                for i in 0..200 {
                    let label = if i % 2 == 0 { "Lisbon" } else { "Oslo" };
                    writer
                        .save_active_location(label, GeoPoint::new(38.72, -9.14))
                        .unwrap();
                }
            });

            for _ in 0..200 {
                let label = store.active_label().unwrap();
                assert!(label == "Lisbon" || label == "Oslo", "{label}");
            }
        });
    }
}
