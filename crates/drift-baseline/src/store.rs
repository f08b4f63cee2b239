//! Baseline store: dated snapshot partitions plus an active-baseline index.
//!
//! Layout under the store root:
//!
//! ```text
//! baseline/
//!   baseline_index.json          <- device -> active baseline entry
//!   2025_11_01/core-sw1.json     <- one snapshot per device per date
//!   2025_12_12/core-sw1.json
//! ```
//!
//! The index alone decides which baseline is active; snapshot files it does
//! not reference are orphans (ignored by comparison, reported by the
//! consistency checker). Every write goes to a temporary sibling first and
//! is renamed into place, so a cancelled run leaves either the old file or
//! a complete new one.

use crate::error::{BaselineError, Result};
use chrono::NaiveDate;
use drift_types::DeviceSnapshot;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the index file under the store root.
pub const INDEX_FILE_NAME: &str = "baseline_index.json";

/// Date partition directory name format.
const DATE_DIR_FORMAT: &str = "%Y_%m_%d";

static DATE_DIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}_\d{2}_\d{2}$").unwrap());

/// One device's active baseline location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Snapshot file path relative to the store root.
    pub path: String,
    /// Capture date of the active baseline.
    pub date: NaiveDate,
    /// Advisory fingerprint: byte length of the file when indexed.
    pub fingerprint: u64,
}

/// The active-baseline index, keyed by device name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineIndex {
    /// Device name to active baseline entry.
    pub devices: BTreeMap<String, IndexEntry>,
}

/// Filesystem-backed baseline store.
#[derive(Debug)]
pub struct BaselineStore {
    root: PathBuf,
    index: BaselineIndex,
}

/// Serialize a value to JSON and atomically replace `path` with it.
fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl BaselineStore {
    /// Open a store at `root`, creating the directory and an empty index
    /// when none exists yet.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        let index_path = root.join(INDEX_FILE_NAME);
        let index = if index_path.exists() {
            let data = fs::read_to_string(&index_path)?;
            serde_json::from_str(&data).map_err(|e| BaselineError::Corrupt {
                path: index_path.clone(),
                reason: e.to_string(),
            })?
        } else {
            debug!(root = %root.display(), "no index file, starting empty");
            BaselineIndex::default()
        };

        Ok(Self { root, index })
    }

    /// Store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read-only view of the index.
    pub fn index(&self) -> &BaselineIndex {
        &self.index
    }

    /// Absolute path of an index entry's snapshot file.
    pub fn resolve(&self, entry: &IndexEntry) -> PathBuf {
        self.root.join(&entry.path)
    }

    /// Load the active baseline for a device.
    ///
    /// A device absent from the index yields [`BaselineError::Missing`],
    /// which callers treat as "establish baseline now". A referenced file
    /// that cannot be read or decoded yields [`BaselineError::Corrupt`].
    pub fn load(&self, device: &str) -> Result<DeviceSnapshot> {
        let entry = self.index.devices.get(device).ok_or_else(|| {
            BaselineError::Missing {
                device: device.to_string(),
            }
        })?;
        let path = self.resolve(entry);
        let data = fs::read_to_string(&path).map_err(|e| BaselineError::Corrupt {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&data).map_err(|e| BaselineError::Corrupt {
            path,
            reason: e.to_string(),
        })
    }

    /// Persist a snapshot as the active baseline for its device.
    ///
    /// The snapshot file lands in the partition for its capture date; the
    /// index entry is updated and the index file atomically replaced. Both
    /// writes are write-then-rename.
    pub fn save(&mut self, snapshot: &DeviceSnapshot) -> Result<()> {
        let partition = snapshot.captured_on.format(DATE_DIR_FORMAT).to_string();
        let dir = self.root.join(&partition);
        fs::create_dir_all(&dir)?;

        let file = dir.join(format!("{}.json", snapshot.device));
        write_atomic(&file, snapshot)?;

        let fingerprint = fs::metadata(&file)?.len();
        self.index.devices.insert(
            snapshot.device.clone(),
            IndexEntry {
                path: format!("{}/{}.json", partition, snapshot.device),
                date: snapshot.captured_on,
                fingerprint,
            },
        );
        self.save_index()?;

        info!(
            device = snapshot.device.as_str(),
            partition = partition.as_str(),
            "baseline saved"
        );
        Ok(())
    }

    /// Atomically replace the index file with the in-memory index.
    fn save_index(&self) -> Result<()> {
        write_atomic(&self.root.join(INDEX_FILE_NAME), &self.index)
    }

    /// List date partitions in the store, oldest first.
    pub fn partitions(&self) -> Result<Vec<NaiveDate>> {
        let mut dates = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !DATE_DIR.is_match(name) {
                continue;
            }
            if let Ok(date) = NaiveDate::parse_from_str(name, DATE_DIR_FORMAT) {
                dates.push(date);
            }
        }
        dates.sort_unstable();
        Ok(dates)
    }

    /// Rebuild the index from the snapshot files on disk.
    ///
    /// Scans every date partition; the newest parseable snapshot per device
    /// becomes active. Unparseable files are skipped with a warning so one
    /// bad file never blocks the rebuild. The index file is atomically
    /// replaced. Returns the number of indexed devices.
    pub fn rebuild_index(&mut self) -> Result<usize> {
        let mut rebuilt: BTreeMap<String, IndexEntry> = BTreeMap::new();

        for date in self.partitions()? {
            let partition = date.format(DATE_DIR_FORMAT).to_string();
            let dir = self.root.join(&partition);
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                let Some(device) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                // Index from file contents, not the file name alone.
                let snapshot: DeviceSnapshot = match fs::read_to_string(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|d| serde_json::from_str(&d).map_err(|e| e.to_string()))
                {
                    Ok(s) => s,
                    Err(reason) => {
                        warn!(path = %path.display(), reason, "skipping unparseable snapshot");
                        continue;
                    }
                };
                let fingerprint = fs::metadata(&path)?.len();
                let new_entry = IndexEntry {
                    path: format!("{}/{}.json", partition, device),
                    date: snapshot.captured_on,
                    fingerprint,
                };
                // Partitions iterate oldest-first, so a later date replaces
                // an earlier one.
                rebuilt.insert(device.to_string(), new_entry);
            }
        }

        let count = rebuilt.len();
        self.index = BaselineIndex { devices: rebuilt };
        self.save_index()?;
        info!(devices = count, "baseline index rebuilt");
        Ok(count)
    }
}
