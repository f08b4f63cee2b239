//! Vendor detection and parser dispatch.
//!
//! A parser implementation is selected once per device: the declared device
//! type wins, otherwise the log content is scanned for vendor banners, and
//! anything unrecognized falls back to column heuristics so a batch never
//! aborts on an unknown type.

use crate::{ComwareParser, FallbackParser, RawBlock, VrpParser};
use drift_types::{InterfaceRecord, LldpNeighbor, ParseQuality, StpRecord};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Supported vendor parser families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    /// H3C Comware: interface brief split into route/bridge mode sections.
    Comware,
    /// Huawei VRP: single table with a recognizable header row.
    Vrp,
}

/// Capability set implemented by every vendor parser family.
///
/// Parsers are pure: they read a segmented block and return normalized
/// records, never touching shared state, so devices can be parsed in
/// parallel.
pub trait VendorParser: Send + Sync {
    /// Short family name for logs and reports.
    fn vendor(&self) -> &'static str;

    /// Parse confidence this family produces when its layout matches.
    fn quality(&self) -> ParseQuality;

    /// Parse interface-brief output into records with canonical names, in
    /// row order. The snapshot builder keys them and flags collisions.
    fn parse_interfaces(&self, block: &RawBlock) -> Vec<InterfaceRecord>;

    /// Parse spanning-tree brief output, in row order.
    fn parse_stp(&self, block: &RawBlock) -> Vec<StpRecord>;

    /// Parse LLDP neighbor output into a de-duplicated set.
    fn parse_lldp(&self, block: &RawBlock) -> BTreeSet<LldpNeighbor>;
}

/// Scan log content for vendor identification strings.
///
/// Banners and version strings appear near the top of a capture, but
/// degraded logs may bury them, so the whole text is scanned.
pub fn detect_vendor(log: &str) -> Option<Vendor> {
    for line in log.lines() {
        let lower = line.to_lowercase();
        if lower.contains("huawei") {
            return Some(Vendor::Vrp);
        }
        if lower.contains("h3c") || lower.contains("new h3c technologies") {
            return Some(Vendor::Comware);
        }
    }
    None
}

/// Map a declared device type string to a vendor family.
fn vendor_from_declared(declared: &str) -> Option<Vendor> {
    match declared.trim().to_lowercase().as_str() {
        "h3c" | "comware" | "hp_comware" => Some(Vendor::Comware),
        "huawei" | "vrp" => Some(Vendor::Vrp),
        _ => None,
    }
}

/// Select the parser for a device.
///
/// `declared` is the operator-supplied device type, if any; `log` is the
/// raw capture used for content detection when the declaration is absent
/// or unrecognized. Unknown types select the fallback parser rather than
/// failing.
pub fn parser_for(declared: Option<&str>, log: &str) -> Box<dyn VendorParser> {
    if let Some(decl) = declared {
        match vendor_from_declared(decl) {
            Some(Vendor::Comware) => return Box::new(ComwareParser),
            Some(Vendor::Vrp) => return Box::new(VrpParser),
            None => {
                warn!(declared = decl, "unrecognized device type, trying content detection");
            }
        }
    }
    match detect_vendor(log) {
        Some(Vendor::Comware) => Box::new(ComwareParser),
        Some(Vendor::Vrp) => Box::new(VrpParser),
        None => {
            debug!("no vendor markers found, using fallback parser");
            Box::new(FallbackParser)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_from_banner() {
        assert_eq!(
            detect_vendor("Copyright (c) Huawei Technologies Co., Ltd."),
            Some(Vendor::Vrp)
        );
        assert_eq!(
            detect_vendor("New H3C Technologies Co., Ltd. All rights reserved."),
            Some(Vendor::Comware)
        );
        assert_eq!(detect_vendor("GE1/0/1 UP UP"), None);
    }

    #[test]
    fn test_declared_type_wins() {
        let parser = parser_for(Some("h3c"), "Copyright (c) Huawei");
        assert_eq!(parser.vendor(), "comware");
    }

    #[test]
    fn test_unknown_declared_falls_through_to_content() {
        let parser = parser_for(Some("cisco_ios"), "Copyright (c) Huawei");
        assert_eq!(parser.vendor(), "vrp");
    }

    #[test]
    fn test_no_markers_selects_fallback() {
        let parser = parser_for(None, "nothing recognizable here");
        assert_eq!(parser.vendor(), "fallback");
        assert_eq!(parser.quality(), ParseQuality::Degraded);
    }
}
