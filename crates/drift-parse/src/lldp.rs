//! LLDP neighbor list parser, shared by both vendor families.
//!
//! The two families differ only in header spelling and column order:
//! Comware lists `LocalIf / Nbr chassis ID / Nbr Port ID / Nbr System Name`,
//! VRP lists `Local Intf / Neighbor Dev / Neighbor Intf / Exptime`. Rows
//! de-duplicate by the full tuple; several neighbors on one local interface
//! are all kept.

use crate::normalize::canonical_interface;
use crate::RawBlock;
use drift_types::LldpNeighbor;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Local ports eligible for neighbor records (physical Ethernet ports).
static LOCAL_PORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:GE|XGE|25GE|40GE|100GE)\d+/\d+/\d+$").unwrap());

/// Which family's column order the detected header implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LldpLayout {
    /// Comware: port ID in column 2, system name in column 3.
    Comware,
    /// VRP: device in column 1, port in column 2.
    Vrp,
}

fn detect_layout(line: &str) -> Option<LldpLayout> {
    if line.contains("LocalIf") && line.contains("Nbr chassis ID") {
        return Some(LldpLayout::Comware);
    }
    if line.contains("Local Interface") && line.contains("Chassis ID") {
        return Some(LldpLayout::Comware);
    }
    if line.contains("Local Intf") && line.contains("Neighbor Dev") {
        return Some(LldpLayout::Vrp);
    }
    None
}

/// Parse an LLDP neighbor block into a de-duplicated neighbor set.
pub fn parse_lldp_block(block: &RawBlock) -> BTreeSet<LldpNeighbor> {
    let mut neighbors = BTreeSet::new();
    let mut layout: Option<LldpLayout> = None;

    for raw in &block.lines {
        let line = raw.trim();

        if let Some(found) = detect_layout(line) {
            layout = Some(found);
            continue;
        }
        let Some(layout) = layout else {
            continue;
        };
        if line.is_empty() {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = parts.first() else {
            continue;
        };
        let local = canonical_interface(first);
        if !LOCAL_PORT.is_match(&local) {
            continue;
        }

        // Short rows mean "a neighbor exists but its identity was not
        // reported"; keep them with empty identifiers.
        let (device, port) = if parts.len() >= 4 {
            match layout {
                LldpLayout::Comware => (parts[3], parts[2]),
                LldpLayout::Vrp => (parts[1], parts[2]),
            }
        } else {
            ("", "")
        };
        neighbors.insert(LldpNeighbor::new(local, device, port));
    }
    neighbors
}
