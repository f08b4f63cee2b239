//! Heuristic fallback parser for unrecognized layouts.
//!
//! Used when neither vendor family's markers are found (degraded logs,
//! unexpected firmware). Extraction is best-effort column guessing: a row
//! counts as an interface row when its second token is an up/down status
//! token. Also understands the per-interface `... current state : UP`
//! verbose form. Never fails; snapshots built this way are tagged degraded.

use crate::normalize::{canonical_interface, classify_phy_token, StatusToken};
use crate::vendor::VendorParser;
use crate::{lldp, stp, RawBlock};
use drift_types::{AdminState, InterfaceRecord, LineState, LldpNeighbor, ParseQuality, StpRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// `<port> current state : <STATE>` verbose interface line.
static CURRENT_STATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([A-Za-z][\w-]*\d+(?:/\d+)*)\s+current\s+state\s*:\s*(.+)$").unwrap()
});

/// Lines that are clearly table furniture, not data rows.
fn is_noise(line: &str) -> bool {
    line.contains("Interface")
        || line.contains("PHY:")
        || line.contains("Link:")
        || line.contains("InUti")
        || line.contains("Brief information")
}

/// Fallback parser: column-position heuristics, degraded confidence.
pub struct FallbackParser;

impl FallbackParser {
    fn parse_current_state_line(line: &str) -> Option<InterfaceRecord> {
        let caps = CURRENT_STATE.captures(line)?;
        let name = canonical_interface(&caps[1]);
        let state = caps[2].trim();
        let (admin, line_state) = if state.to_lowercase().contains("administratively") {
            (AdminState::Down, LineState::Down)
        } else if state.eq_ignore_ascii_case("up") {
            (AdminState::Up, LineState::Up)
        } else {
            (AdminState::Up, LineState::Down)
        };
        Some(InterfaceRecord::new(name, admin, line_state))
    }

    fn parse_columnar_line(line: &str) -> Option<InterfaceRecord> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            return None;
        }
        let phy = StatusToken::from_token(parts[1])?;
        // Treat the third column as protocol only when it reads like a
        // status token; otherwise the physical reading decides alone.
        let protocol = parts
            .get(2)
            .copied()
            .filter(|p| StatusToken::from_token(p).is_some());
        let (admin, line_state) = classify_phy_token(phy, protocol);

        let mut rec = InterfaceRecord::new(canonical_interface(parts[0]), admin, line_state);
        if let Some(p) = protocol {
            rec.protocol = Some(p.to_uppercase());
        }
        Some(rec)
    }
}

impl VendorParser for FallbackParser {
    fn vendor(&self) -> &'static str {
        "fallback"
    }

    fn quality(&self) -> ParseQuality {
        ParseQuality::Degraded
    }

    fn parse_interfaces(&self, block: &RawBlock) -> Vec<InterfaceRecord> {
        let mut records = Vec::new();
        for raw in &block.lines {
            let line = raw.trim();
            if line.is_empty() || is_noise(line) {
                continue;
            }
            let rec = Self::parse_current_state_line(line)
                .or_else(|| Self::parse_columnar_line(line));
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
