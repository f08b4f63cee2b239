//! LLDP neighbor tuple.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One discovered neighbor on a local interface.
///
/// Ordering and equality cover the full tuple, so a set of neighbors
/// de-duplicates exact repeats while allowing several distinct neighbors
/// on the same local interface.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LldpNeighbor {
    /// Canonical local interface name.
    pub local_interface: String,
    /// Neighbor device identifier (system name or chassis ID).
    pub neighbor_device: String,
    /// Neighbor port identifier.
    pub neighbor_port: String,
}

impl LldpNeighbor {
    pub fn new(
        local_interface: impl Into<String>,
        neighbor_device: impl Into<String>,
        neighbor_port: impl Into<String>,
    ) -> Self {
        Self {
            local_interface: local_interface.into(),
            neighbor_device: neighbor_device.into(),
            neighbor_port: neighbor_port.into(),
        }
    }
}

impl fmt::Display for LldpNeighbor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}:{}",
            self.local_interface, self.neighbor_device, self.neighbor_port
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    #[test]
    fn test_set_dedup_by_full_tuple() {
        let mut set = BTreeSet::new();
        set.insert(LldpNeighbor::new("GE0/0/1", "core-sw1", "GE1/0/24"));
        set.insert(LldpNeighbor::new("GE0/0/1", "core-sw1", "GE1/0/24"));
        set.insert(LldpNeighbor::new("GE0/0/1", "core-sw2", "GE1/0/24"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display() {
        let n = LldpNeighbor::new("GE0/0/1", "core-sw1", "GE1/0/24");
        assert_eq!(n.to_string(), "GE0/0/1 -> core-sw1:GE1/0/24");
    }
}
