//! Spanning-tree brief parser, shared by both vendor families.
//!
//! Both families print an `MST ID / Port / Role / STP State` table; only
//! the header spacing differs. Rows are matched positionally by regex and
//! accepted only when the state column carries a known STP state token.

use crate::normalize::canonical_interface;
use crate::RawBlock;
use drift_types::{StpRecord, StpRole, StpState};
use once_cell::sync::Lazy;
use regex::Regex;

/// `<mst-id> <port> <role> <state>` row; the port keeps its slot notation.
static STP_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*\d+\s+([A-Za-z][\w-]*\d+/\d+/\d+)\s+(\w+)\s+(\w+)").unwrap()
});

/// Returns true for the table header that opens the STP section.
fn is_section_header(line: &str) -> bool {
    line.contains("MST ID   Port") || line.contains("MSTID   Port")
}

/// Parse an STP-brief block into records with canonical port names.
pub fn parse_stp_block(block: &RawBlock) -> Vec<StpRecord> {
    let mut records = Vec::new();
    let mut in_section = false;

    for raw in &block.lines {
        let line = raw.trim_end();
        if is_section_header(line) {
            in_section = true;
            continue;
        }
        if !in_section {
            continue;
        }
        if line.trim().is_empty() {
            break;
        }
        // Repeated column headers inside the section.
        if line.contains("Role") || line.contains("STP State") {
            continue;
        }

        let Some(caps) = STP_ROW.captures(line) else {
            continue;
        };
        // Only rows with a valid state token are STP rows at all.
        let Ok(state) = caps[3].parse::<StpState>() else {
            continue;
        };
        let role = caps[2].parse::<StpRole>().unwrap_or(StpRole::Unknown);
        let port = canonical_interface(&caps[1]);
        records.push(StpRecord::new(port, role, state));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn index(records: Vec<StpRecord>) -> BTreeMap<String, StpRecord> {
        records.into_iter().map(|r| (r.interface.clone(), r)).collect()
    }

    fn block(lines: &[&str]) -> RawBlock {
        RawBlock {
            device: "test-sw".to_string(),
            command: "display stp brief".to_string(),
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_stp_rows_parsed() {
        let block = block(&[
            " MST ID   Port                         Role  STP State   Protection",
            " 0        GigabitEthernet1/0/1         DESI  FORWARDING  NONE",
            " 0        GigabitEthernet1/0/2         ROOT  FORWARDING  NONE",
            " 0        GigabitEthernet1/0/3         ALTE  DISCARDING  NONE",
        ]);
        let records = index(parse_stp_block(&block));
        assert_eq!(records.len(), 3);
        assert_eq!(records["GE1/0/1"].role, StpRole::Desi);
        assert_eq!(records["GE1/0/2"].role, StpRole::Root);
        assert_eq!(records["GE1/0/3"].state, StpState::Discarding);
    }

    #[test]
    fn test_legacy_state_tokens() {
        let block = block(&[
            " MSTID   Port                          Role  STP State",
            " 0       GigabitEthernet1/0/4          DESI  LISTENING",
            " 0       GigabitEthernet1/0/5          BACK  BLOCKING",
        ]);
        let records = index(parse_stp_block(&block));
        assert_eq!(records["GE1/0/4"].state, StpState::Learning);
        assert_eq!(records["GE1/0/5"].state, StpState::Discarding);
    }

    #[test]
    fn test_unknown_role_kept_as_unknown() {
        let block = block(&[
            " MST ID   Port                         Role  STP State",
            " 0        GigabitEthernet1/0/6         MSTR  FORWARDING",
        ]);
        let records = index(parse_stp_block(&block));
        assert_eq!(records["GE1/0/6"].role, StpRole::Unknown);
        assert_eq!(records["GE1/0/6"].state, StpState::Forwarding);
    }

    #[test]
    fn test_invalid_state_row_skipped() {
        let block = block(&[
            " MST ID   Port                         Role  STP State",
            " 0        GigabitEthernet1/0/7         DESI  FLAPPING",
        ]);
        assert!(parse_stp_block(&block).is_empty());
    }

    #[test]
    fn test_blank_line_ends_section() {
        let block = block(&[
            " MST ID   Port                         Role  STP State",
            " 0        GigabitEthernet1/0/1         DESI  FORWARDING",
            "",
            " 0        GigabitEthernet1/0/9         DESI  FORWARDING",
        ]);
        let records = index(parse_stp_block(&block));
        assert_eq!(records.len(), 1);
        assert!(!records.contains_key("GE1/0/9"));
    }

    #[test]
    fn test_rows_before_header_ignored() {
        let block = block(&[" 0   GigabitEthernet1/0/1  DESI  FORWARDING"]);
        assert!(parse_stp_block(&block).is_empty());
    }
}
