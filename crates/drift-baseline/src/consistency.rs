//! Consistency checker: validates that the index and the snapshot files on
//! disk are mutually coherent and individually parseable.
//!
//! The checker never repairs anything; rebuilding or re-establishing a
//! baseline is a separate operator action. One device's failure never stops
//! the remaining checks.

use crate::store::BaselineStore;
use drift_types::DeviceSnapshot;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Health of one index entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaselineHealth {
    /// File present and re-parses cleanly into a snapshot.
    Ok,
    /// Indexed but the file is absent.
    Missing {
        /// The path the index points at.
        path: PathBuf,
    },
    /// File present but unreadable or structurally invalid.
    Corrupt {
        /// The unreadable file.
        path: PathBuf,
        /// Why parsing failed.
        reason: String,
    },
}

/// Check result for one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCheck {
    /// Device name from the index.
    pub device: String,
    /// Health verdict.
    pub health: BaselineHealth,
    /// True when the file parsed but its size no longer matches the
    /// recorded fingerprint (advisory only).
    pub fingerprint_mismatch: bool,
}

impl DeviceCheck {
    /// Returns true when the entry is fully healthy.
    pub fn is_ok(&self) -> bool {
        self.health == BaselineHealth::Ok
    }
}

/// Full consistency report over a baseline store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// Per-device verdicts, in index order.
    pub checks: Vec<DeviceCheck>,
    /// Snapshot files on disk that no index entry references.
    pub orphans: Vec<PathBuf>,
}

impl ConsistencyReport {
    /// Count of entries that are not OK (orphans and fingerprint drift are
    /// warnings, not issues).
    pub fn issue_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.is_ok()).count()
    }

    /// Returns true when every index entry checks out.
    pub fn is_healthy(&self) -> bool {
        self.issue_count() == 0
    }
}

/// Run the consistency check over a store.
pub fn check_store(store: &BaselineStore) -> ConsistencyReport {
    let mut report = ConsistencyReport::default();
    let mut referenced: BTreeSet<PathBuf> = BTreeSet::new();

    for (device, entry) in &store.index().devices {
        let path = store.resolve(entry);
        referenced.insert(path.clone());

        let check = match fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(device = device.as_str(), path = %path.display(), "baseline file missing");
                DeviceCheck {
                    device: device.clone(),
                    health: BaselineHealth::Missing { path },
                    fingerprint_mismatch: false,
                }
            }
            Err(e) => DeviceCheck {
                device: device.clone(),
                health: BaselineHealth::Corrupt {
                    path,
                    reason: e.to_string(),
                },
                fingerprint_mismatch: false,
            },
            Ok(data) => match serde_json::from_str::<DeviceSnapshot>(&data) {
                Err(e) => {
                    warn!(device = device.as_str(), "baseline file corrupt: {}", e);
                    DeviceCheck {
                        device: device.clone(),
                        health: BaselineHealth::Corrupt {
                            path,
                            reason: e.to_string(),
                        },
                        fingerprint_mismatch: false,
                    }
                }
                Ok(_) => {
                    let mismatch = data.len() as u64 != entry.fingerprint;
                    if mismatch {
                        debug!(
                            device = device.as_str(),
                            "baseline fingerprint drifted since indexing"
                        );
                    }
                    DeviceCheck {
                        device: device.clone(),
                        health: BaselineHealth::Ok,
                        fingerprint_mismatch: mismatch,
                    }
                }
            },
        };
        report.checks.push(check);
    }

    // Snapshot files nothing references are orphans: ignored by normal
    // comparison but worth surfacing.
    if let Ok(partitions) = store.partitions() {
        for date in partitions {
            let dir = store.root().join(date.format("%Y_%m_%d").to_string());
            let Ok(entries) = fs::read_dir(&dir) else { continue };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some("json")
                    && !referenced.contains(&path)
                {
                    report.orphans.push(path);
                }
            }
        }
    }

    report
}
