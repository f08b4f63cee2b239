//! Drift anomaly and report types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a detected drift anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyCategory {
    /// A monitored status field changed on an interface present in both
    /// snapshots.
    InterfaceStatus,
    /// An interface exists only in the current snapshot.
    InterfaceAppeared,
    /// An interface exists only in the baseline snapshot.
    InterfaceDisappeared,
    /// Spanning-tree role or state changed.
    StpStatus,
    /// An LLDP neighbor tuple was added or removed.
    LldpNeighbor,
}

impl fmt::Display for AnomalyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnomalyCategory::InterfaceStatus => "INTERFACE_STATUS",
            AnomalyCategory::InterfaceAppeared => "INTERFACE_APPEARED",
            AnomalyCategory::InterfaceDisappeared => "INTERFACE_DISAPPEARED",
            AnomalyCategory::StpStatus => "STP_STATUS",
            AnomalyCategory::LldpNeighbor => "LLDP_NEIGHBOR",
        };
        write!(f, "{}", s)
    }
}

/// One detected difference between baseline and current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Anomaly category.
    pub category: AnomalyCategory,
    /// Canonical interface name the anomaly applies to.
    pub interface: String,
    /// The field that changed (e.g. "line_status", "role", "neighbor").
    pub field: String,
    /// Value recorded in the baseline, if any.
    pub baseline_value: Option<String>,
    /// Value observed in the current snapshot, if any.
    pub current_value: Option<String>,
}

impl Anomaly {
    pub fn new(
        category: AnomalyCategory,
        interface: impl Into<String>,
        field: impl Into<String>,
        baseline_value: Option<String>,
        current_value: Option<String>,
    ) -> Self {
        Self {
            category,
            interface: interface.into(),
            field: field.into(),
            baseline_value,
            current_value,
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {} -> {}",
            self.category,
            self.interface,
            self.field,
            self.baseline_value.as_deref().unwrap_or("-"),
            self.current_value.as_deref().unwrap_or("-"),
        )
    }
}

/// Ordered set of anomalies for one device.
///
/// An empty report is a first-class result meaning "no drift".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Device the report covers.
    pub device: String,
    /// Anomalies in deterministic order.
    pub anomalies: Vec<Anomaly>,
}

impl DiffReport {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            anomalies: Vec::new(),
        }
    }

    /// Returns true when no drift was detected.
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    /// Count of anomalies in the given category.
    pub fn count_in(&self, category: AnomalyCategory) -> usize {
        self.anomalies
            .iter()
            .filter(|a| a.category == category)
            .count()
    }
}
