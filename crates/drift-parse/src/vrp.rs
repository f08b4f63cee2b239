//! Header-adaptive interface parser for the VRP (Huawei) family.
//!
//! VRP's `display interface brief` prints one table whose layout is best
//! read off the header row (`Interface PHY Protocol InUti OutUti ...`).
//! The parser locates the header, records which column carries each label,
//! then reads subsequent rows positionally. A `*down` PHY token means
//! administratively down; the marker alone forces both states down.

use crate::normalize::{canonical_interface, classify_phy_token, StatusToken};
use crate::vendor::VendorParser;
use crate::{lldp, stp, RawBlock};
use drift_types::{InterfaceRecord, LldpNeighbor, ParseQuality, StpRecord};
use std::collections::BTreeSet;
use tracing::trace;

/// Column layout read off the header row.
#[derive(Debug, Clone, Copy)]
struct Layout {
    phy: usize,
    protocol: usize,
}

/// Detect the header row and derive the column layout from its labels.
fn detect_layout(line: &str) -> Option<Layout> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() || !tokens[0].starts_with("Interface") {
        return None;
    }
    let phy = tokens.iter().position(|t| t.eq_ignore_ascii_case("PHY"))?;
    let protocol = tokens
        .iter()
        .position(|t| t.eq_ignore_ascii_case("Protocol"))?;
    // Utilization columns confirm this is the brief table rather than some
    // other Interface-led header.
    let has_uti = tokens
        .iter()
        .any(|t| t.eq_ignore_ascii_case("InUti") || t.eq_ignore_ascii_case("OutUti"));
    if !has_uti {
        return None;
    }
    Some(Layout { phy, protocol })
}

/// Interface parser for the VRP family.
pub struct VrpParser;

impl VendorParser for VrpParser {
    fn vendor(&self) -> &'static str {
        "vrp"
    }

    fn quality(&self) -> ParseQuality {
        ParseQuality::Full
    }

    fn parse_interfaces(&self, block: &RawBlock) -> Vec<InterfaceRecord> {
        let mut records = Vec::new();
        let mut layout: Option<Layout> = None;

        for raw in &block.lines {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(found) = detect_layout(line) {
                trace!(device = block.device.as_str(), ?found, "detected column layout");
                layout = Some(found);
                continue;
            }
            let Some(layout) = layout else {
                // Rows before the header are banner/legend text.
                continue;
            };

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() <= layout.phy.max(layout.protocol) {
                continue;
            }
            let Some(phy) = StatusToken::from_token(parts[layout.phy]) else {
                continue;
            };
            let protocol = parts[layout.protocol];
            let (admin, line_state) = classify_phy_token(phy, Some(protocol));

            let mut rec =
                InterfaceRecord::new(canonical_interface(parts[0]), admin, line_state);
            rec.protocol = Some(protocol.to_uppercase());
            records.push(rec);
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

#[cfg(test)]
mod tests {
    use super::*;
    use drift_types::{AdminState, LineState};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn index(records: Vec<InterfaceRecord>) -> BTreeMap<String, InterfaceRecord> {
        records.into_iter().map(|r| (r.name.clone(), r)).collect()
    }

    fn block(lines: &[&str]) -> RawBlock {
        RawBlock {
            device: "test-sw".to_string(),
            command: "display interface brief".to_string(),
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_header_adaptive_row_parse() {
        let block = block(&[
            "PHY: Physical state of the interface",
            "*down: administratively down",
            "Interface                   PHY     Protocol  InUti OutUti   inErrors  outErrors",
            "GigabitEthernet0/0/1        up      up        0.01%  0.01%          0          0",
            "GigabitEthernet0/0/2        down    down      0%     0%             0          0",
            "GigabitEthernet0/0/3        *down   down      0%     0%             0          0",
        ]);
        let records = index(VrpParser.parse_interfaces(&block));
        assert_eq!(records.len(), 3);

        // The long name normalizes to the short form.
        let ge1 = &records["GE0/0/1"];
        assert_eq!(ge1.admin_status, AdminState::Up);
        assert_eq!(ge1.line_status, LineState::Up);

        let ge2 = &records["GE0/0/2"];
        assert_eq!(ge2.admin_status, AdminState::Up);
        assert_eq!(ge2.line_status, LineState::Down);

        // *down marks administratively down regardless of the protocol
        // column.
        let ge3 = &records["GE0/0/3"];
        assert_eq!(ge3.admin_status, AdminState::Down);
        assert_eq!(ge3.line_status, LineState::Down);
    }

    #[test]
    fn test_admin_down_with_protocol_up_stays_down() {
        let block = block(&[
            "Interface        PHY    Protocol InUti OutUti",
            "Eth-Trunk10      *down  up       0%    0%",
        ]);
        let records = index(VrpParser.parse_interfaces(&block));
        let rec = &records["Eth-Trunk10"];
        assert_eq!(rec.admin_status, AdminState::Down);
        assert_eq!(rec.line_status, LineState::Down);
    }

    #[test]
    fn test_subinterface_rows_accepted() {
        let block = block(&[
            "Interface                   PHY     Protocol  InUti OutUti",
            "GigabitEthernet0/0/1        up      up        0.01% 0.01%",
            "  GigabitEthernet0/0/1.100  up      up        0%    0%",
        ]);
        let records = index(VrpParser.parse_interfaces(&block));
        assert!(records.contains_key("GE0/0/1"));
        assert!(records.contains_key("GE0/0/1.100"));
    }

    #[test]
    fn test_rows_before_header_ignored() {
        let block = block(&[
            "GigabitEthernet9/9/9  up  up  0% 0%",
            "Interface  PHY  Protocol InUti OutUti",
            "GigabitEthernet0/0/1  up  up  0% 0%",
        ]);
        let records = index(VrpParser.parse_interfaces(&block));
        assert_eq!(records.len(), 1);
        assert!(records.contains_key("GE0/0/1"));
    }

    #[test]
    fn test_no_header_yields_empty_set() {
        let block = block(&["nothing here", "GE1/0/1 up up"]);
        assert!(VrpParser.parse_interfaces(&block).is_empty());
    }
}
