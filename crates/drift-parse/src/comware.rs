//! Dual-mode interface parser for the Comware (H3C) family.
//!
//! Comware's `display interface brief` splits output into per-mode sections
//! announced by "Brief information on interfaces in route mode:" and
//! "... in bridge mode:" headers, each with its own column schema. A log
//! may contain both sections, and sections may repeat; the parser is an
//! explicit state machine threaded through the line loop so records from
//! every section accumulate into one set.

use crate::normalize::{canonical_interface, classify_phy_token, StatusToken};
use crate::vendor::VendorParser;
use crate::{lldp, stp, RawBlock};
use drift_types::{InterfaceMode, InterfaceRecord, LldpNeighbor, ParseQuality, StpRecord};
use std::collections::BTreeSet;
use tracing::trace;

/// Current section of the dual-mode listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before any mode header, or after a section terminated.
    Seeking,
    /// Inside "Brief information on interfaces in route mode:".
    Route,
    /// Inside "Brief information on interfaces in bridge mode:".
    Bridge,
}

const ROUTE_HEADER: &str = "Brief information on interfaces in route mode:";
const BRIDGE_HEADER: &str = "Brief information on interfaces in bridge mode:";

/// Legend lines Comware prints between the mode header and the table.
fn is_legend(line: &str) -> bool {
    line.contains("Link:") || line.contains("Speed:") || line.contains("Duplex:")
        || line.contains("Type:") || line.contains("Protocol:")
}

/// Interface parser for the Comware family.
pub struct ComwareParser;

impl ComwareParser {
    /// Parse one route-mode row: `name link protocol [primary-ip] [description...]`.
    fn parse_route_row(parts: &[&str]) -> Option<InterfaceRecord> {
        if parts.len() < 3 || parts[0] == "Interface" {
            return None;
        }
        let phy = StatusToken::from_token(parts[1])?;
        let protocol = parts[2];
        let (admin, line) = classify_phy_token(phy, Some(protocol));

        let mut rec = InterfaceRecord::new(canonical_interface(parts[0]), admin, line);
        rec.mode = InterfaceMode::Route;
        rec.protocol = Some(protocol.to_uppercase());
        if parts.len() >= 4 && parts[3] != "--" {
            rec.primary_ip = Some(parts[3].to_string());
        }
        if parts.len() >= 5 {
            rec.description = Some(parts[4..].join(" "));
        }
        Some(rec)
    }

    /// Parse one bridge-mode row: `name link speed duplex type pvid [description...]`.
    fn parse_bridge_row(parts: &[&str]) -> Option<InterfaceRecord> {
        if parts.len() < 6 || parts[0] == "Interface" {
            return None;
        }
        let phy = StatusToken::from_token(parts[1])?;
        // Bridge rows carry no protocol column; the link token decides.
        let (admin, line) = classify_phy_token(phy, None);

        let mut rec = InterfaceRecord::new(canonical_interface(parts[0]), admin, line);
        rec.mode = InterfaceMode::Bridge;
        rec.protocol = Some(if line.is_up() { "UP" } else { "DOWN" }.to_string());
        rec.speed = Some(parts[2].to_string());
        rec.duplex = Some(parts[3].to_string());
        rec.pvid = Some(parts[5].to_string());
        if parts.len() > 6 {
            rec.description = Some(parts[6..].join(" "));
        }
        Some(rec)
    }

    /// Relaxed layout for rows seen before any mode header (older firmware
    /// that prints a single table).
    fn parse_unsectioned_row(parts: &[&str]) -> Option<InterfaceRecord> {
        if parts.len() < 4 || parts[0] == "Interface" {
            return None;
        }
        let phy = StatusToken::from_token(parts[1])?;
        let protocol = parts.get(2).copied();
        let (admin, line) = classify_phy_token(phy, protocol);

        let mut rec = InterfaceRecord::new(canonical_interface(parts[0]), admin, line);
        if let Some(p) = protocol {
            rec.protocol = Some(p.to_uppercase());
        }
        Some(rec)
    }
}

impl VendorParser for ComwareParser {
    fn vendor(&self) -> &'static str {
        "comware"
    }

    fn quality(&self) -> ParseQuality {
        ParseQuality::Full
    }

    fn parse_interfaces(&self, block: &RawBlock) -> Vec<InterfaceRecord> {
        let mut records = Vec::new();
        let mut section = Section::Seeking;

        for raw in &block.lines {
            let line = raw.trim();

            // Mode headers may appear any number of times.
            if line.contains(ROUTE_HEADER) {
                section = Section::Route;
                continue;
            }
            if line.contains(BRIDGE_HEADER) {
                section = Section::Bridge;
                continue;
            }

            if line.is_empty() {
                // Blank line terminates the current section.
                if section != Section::Seeking {
                    trace!(device = block.device.as_str(), "section ended");
                    section = Section::Seeking;
                }
                continue;
            }
            if is_legend(line) {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let rec = match section {
                Section::Route => Self::parse_route_row(&parts),
                Section::Bridge => Self::parse_bridge_row(&parts),
                Section::Seeking => Self::parse_unsectioned_row(&parts),
            };
            if let Some(rec) = rec {
                records.push(rec);
            }
        }
        records
    }

    fn parse_stp(&self, block: &RawBlock) -> Vec<StpRecord> {
        stp::parse_stp_block(block)
    }

    fn parse_lldp(&self, block: &RawBlock) -> BTreeSet<LldpNeighbor> {
        lldp::parse_lldp_block(block)
    }
}
