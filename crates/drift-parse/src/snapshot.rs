//! Snapshot builder: raw log in, normalized device snapshot out.
//!
//! Segments the three monitored command families out of a capture log,
//! runs the selected vendor parser over each block, and assembles the
//! results into one [`DeviceSnapshot`]. Parse confidence is resolved here:
//! fallback parsing marks the snapshot degraded, a missing or unproductive
//! command block marks it partial, and an interface-name collision after
//! normalization is treated as a parser defect (last record wins, quality
//! drops to partial).

use crate::segment::segment;
use crate::vendor::{parser_for, VendorParser};
use crate::{FallbackParser, ParseError, RawBlock};
use chrono::NaiveDate;
use drift_types::{DeviceSnapshot, InterfaceRecord, ParseQuality};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Echo spellings of the interface-brief command.
const INTERFACE_ALIASES: &[&str] = &["display interface brief", "dis int brief"];
/// Echo spellings of the STP-brief command.
const STP_ALIASES: &[&str] = &["display stp brief", "dis stp brief"];
/// Echo spellings of the LLDP neighbor listing.
const LLDP_ALIASES: &[&str] = &["display lldp neighbor", "dis lldp n"];

/// `[device]_[date]` log file naming convention.
static LOG_FILE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(?P<device>.+?)\]_\[(?P<date>\d{4}_\d{2}_\d{2})\]").unwrap());

/// Extract the device name and capture date from a log file name following
/// the `[device]_[date].log` convention. Returns `None` for files outside
/// the convention; callers report those rather than dropping them silently.
pub fn device_from_file_name(file_name: &str) -> Option<(String, NaiveDate)> {
    let caps = LOG_FILE_NAME.captures(file_name)?;
    let device = caps["device"].to_string();
    let date = NaiveDate::parse_from_str(&caps["date"], "%Y_%m_%d").ok()?;
    Some((device, date))
}

/// Key interface records by name, flagging collisions after normalization.
fn key_interfaces(
    device: &str,
    records: Vec<InterfaceRecord>,
) -> (BTreeMap<String, InterfaceRecord>, bool) {
    let mut keyed = BTreeMap::new();
    let mut collided = false;
    for rec in records {
        if let Some(prev) = keyed.insert(rec.name.clone(), rec) {
            warn!(
                device,
                interface = prev.name.as_str(),
                "duplicate interface name after normalization, keeping last"
            );
            collided = true;
        }
    }
    (keyed, collided)
}

/// Run the family parser over an interface block, rejecting a silent miss.
///
/// A family parser that extracts nothing from a non-empty block did not
/// recognize the layout at all; that is an [`ParseError::UnsupportedFormat`]
/// rather than an empty device, and the caller reacts by degrading to the
/// fallback parser.
fn parse_interface_block(
    parser: &dyn VendorParser,
    block: &RawBlock,
) -> Result<Vec<InterfaceRecord>, ParseError> {
    let records = parser.parse_interfaces(block);
    if records.is_empty() && !block.is_empty() && parser.quality() == ParseQuality::Full {
        return Err(ParseError::UnsupportedFormat {
            command: block.command.clone(),
        });
    }
    Ok(records)
}

/// Build a normalized snapshot for one device from its raw capture log.
///
/// `declared_type` is the operator-declared device type, if known. The
/// builder never fails: segmentation misses and unrecognized layouts only
/// lower [`ParseQuality`].
pub fn build_snapshot(
    device: &str,
    captured_on: NaiveDate,
    log: &str,
    declared_type: Option<&str>,
) -> DeviceSnapshot {
    let parser = parser_for(declared_type, log);
    debug!(device, vendor = parser.vendor(), "building snapshot");

    let mut snapshot = DeviceSnapshot::new(device, captured_on);
    let mut quality = parser.quality();
    let mut partial = false;

    // Interface brief.
    match segment(device, log, INTERFACE_ALIASES) {
        Ok(block) => {
            let records = match parse_interface_block(parser.as_ref(), &block) {
                Ok(records) => records,
                Err(err) => {
                    // Degrade to heuristics rather than losing the data
                    // point.
                    warn!(device, error = %err, "using fallback heuristics");
                    quality = ParseQuality::Degraded;
                    FallbackParser.parse_interfaces(&block)
                }
            };
            let (keyed, collided) = key_interfaces(device, records);
            partial |= collided;
            snapshot.interfaces = keyed;
        }
        Err(err) => {
            warn!(device, error = %err, "command output missing from log");
            partial = true;
        }
    }

    // STP brief.
    match segment(device, log, STP_ALIASES) {
        Ok(block) => {
            for rec in parser.parse_stp(&block) {
                snapshot.stp.insert(rec.interface.clone(), rec);
            }
        }
        Err(_) => {
            debug!(device, "no STP output in log");
            partial = true;
        }
    }

    // LLDP neighbors.
    match segment(device, log, LLDP_ALIASES) {
        Ok(block) => {
            snapshot.lldp = parser.parse_lldp(&block);
        }
        Err(_) => {
            debug!(device, "no LLDP output in log");
            partial = true;
        }
    }

    snapshot.parse_quality = if quality == ParseQuality::Degraded {
        ParseQuality::Degraded
    } else if partial {
        ParseQuality::Partial
    } else {
        quality
    };

    info!(
        device,
        interfaces = snapshot.interfaces.len(),
        stp = snapshot.stp.len(),
        lldp = snapshot.lldp.len(),
        quality = %snapshot.parse_quality,
        "snapshot built"
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_types::{AdminState, LineState};
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 12).unwrap()
    }

    const H3C_LOG: &str = "\
<core-sw1>display interface brief
Brief information on interfaces in route mode:
Link: ADM - administratively down; Stby - standby
Interface            Link Protocol Primary IP      Description
Vlan100              UP   UP       10.1.1.1
<core-sw1>display stp brief
 MST ID   Port                         Role  STP State   Protection
 0        GigabitEthernet1/0/1         DESI  FORWARDING  NONE
<core-sw1>display lldp neighbor list
LocalIf         Nbr chassis ID  Nbr Port ID          Nbr System Name
GE1/0/1         00e0-fc12-3456  GE1/0/24             core-sw2
<core-sw1>quit
New H3C Technologies Co., Ltd.
";

    #[test]
    fn test_full_snapshot_from_h3c_log() {
        let snap = build_snapshot("core-sw1", date(), H3C_LOG, Some("h3c"));
        assert_eq!(snap.parse_quality, ParseQuality::Full);
        assert_eq!(snap.interfaces.len(), 1);
        assert!(snap.interfaces["Vlan100"].is_operational());
        assert_eq!(snap.stp.len(), 1);
        assert_eq!(snap.lldp.len(), 1);
    }

    #[test]
    fn test_missing_command_marks_partial() {
        let log = "\
<sw1>display interface brief
Interface  PHY  Protocol InUti OutUti
GigabitEthernet0/0/1  up  up  0%  0%
";
        let snap = build_snapshot("sw1", date(), log, Some("huawei"));
        assert_eq!(snap.parse_quality, ParseQuality::Partial);
        let ge = &snap.interfaces["GE0/0/1"];
        assert_eq!(ge.admin_status, AdminState::Up);
        assert_eq!(ge.line_status, LineState::Up);
    }

    #[test]
    fn test_silent_parser_miss_is_unsupported_format() {
        use crate::VrpParser;

        // A headerless block never matches the VRP layout; extracting
        // nothing from a non-empty block is an unsupported format, not an
        // empty device.
        let block = RawBlock {
            device: "sw1".to_string(),
            command: "display interface brief".to_string(),
            lines: vec!["GigabitEthernet0/0/1  up  up  0%  0%".to_string()],
        };
        let err = parse_interface_block(&VrpParser, &block).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat { .. }));

        // An empty block is an empty result, not a format error.
        let empty = RawBlock {
            device: "sw1".to_string(),
            command: "display interface brief".to_string(),
            lines: Vec::new(),
        };
        assert!(parse_interface_block(&VrpParser, &empty).unwrap().is_empty());
    }

    #[test]
    fn test_unrecognized_layout_degrades_to_fallback() {
        let log = "\
<sw1>display interface brief
GigabitEthernet0/0/1  up  up  0%  0%
GigabitEthernet0/0/2  *down  down  0%  0%
<sw1>display stp brief
<sw1>display lldp neighbor list
<sw1>quit
";
        // Declared Huawei, but the header row is missing, so the VRP layout
        // never matches and heuristics take over.
        let snap = build_snapshot("sw1", date(), log, Some("huawei"));
        assert_eq!(snap.parse_quality, ParseQuality::Degraded);
        assert_eq!(snap.interfaces.len(), 2);
        assert_eq!(snap.interfaces["GE0/0/2"].admin_status, AdminState::Down);
    }

    #[test]
    fn test_empty_log_yields_empty_partial_snapshot() {
        let snap = build_snapshot("sw1", date(), "", None);
        assert!(snap.is_empty());
        // Fallback parser plus missing blocks: degraded wins.
        assert_eq!(snap.parse_quality, ParseQuality::Degraded);
    }

    #[test]
    fn test_device_from_file_name() {
        let (device, d) = device_from_file_name("[core-sw1]_[2025_12_12].log").unwrap();
        assert_eq!(device, "core-sw1");
        assert_eq!(d, date());
    }

    #[test]
    fn test_unconventional_file_name_rejected() {
        assert!(device_from_file_name("core-sw1.log").is_none());
        assert!(device_from_file_name("[core-sw1]_[12-12-2025].log").is_none());
    }
}
