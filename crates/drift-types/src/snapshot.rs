//! Device snapshot: everything captured from one device at one time.

use crate::{InterfaceRecord, LldpNeighbor, StpRecord, TokenError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// How confidently a snapshot was built from the raw log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseQuality {
    /// A recognized vendor layout matched all command blocks.
    #[default]
    Full,
    /// No vendor layout was recognized; records come from heuristics.
    Degraded,
    /// Some command blocks were missing or unparsed.
    Partial,
}

impl ParseQuality {
    /// Returns true for anything weaker than a full parse.
    pub const fn is_degraded(&self) -> bool {
        !matches!(self, ParseQuality::Full)
    }
}

impl fmt::Display for ParseQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseQuality::Full => "full",
            ParseQuality::Degraded => "degraded",
            ParseQuality::Partial => "partial",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ParseQuality {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(ParseQuality::Full),
            "degraded" => Ok(ParseQuality::Degraded),
            "partial" => Ok(ParseQuality::Partial),
            _ => Err(TokenError::InvalidParseQuality(s.to_string())),
        }
    }
}

/// Normalized operational state of one device at one capture time.
///
/// Interface and STP records are keyed by canonical interface name; the
/// builder guarantees uniqueness after normalization. LLDP neighbors are a
/// set keyed by the full tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    /// Device name as carried in the log file name.
    pub device: String,
    /// Capture date of the underlying log.
    pub captured_on: NaiveDate,
    /// Interface records keyed by canonical name.
    pub interfaces: BTreeMap<String, InterfaceRecord>,
    /// Spanning-tree records keyed by canonical name.
    pub stp: BTreeMap<String, StpRecord>,
    /// Discovered LLDP neighbors.
    pub lldp: BTreeSet<LldpNeighbor>,
    /// Parse confidence for this snapshot.
    #[serde(default)]
    pub parse_quality: ParseQuality,
}

impl DeviceSnapshot {
    /// Create an empty snapshot for a device/date.
    pub fn new(device: impl Into<String>, captured_on: NaiveDate) -> Self {
        Self {
            device: device.into(),
            captured_on,
            interfaces: BTreeMap::new(),
            stp: BTreeMap::new(),
            lldp: BTreeSet::new(),
            parse_quality: ParseQuality::Full,
        }
    }

    /// Returns true when the snapshot carries no records at all.
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty() && self.stp.is_empty() && self.lldp.is_empty()
    }

    /// Total record count across all sections.
    pub fn record_count(&self) -> usize {
        self.interfaces.len() + self.stp.len() + self.lldp.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AdminState, LineState};
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 12).unwrap()
    }

    #[test]
    fn test_empty_snapshot() {
        let snap = DeviceSnapshot::new("core-sw1", date());
        assert!(snap.is_empty());
        assert_eq!(snap.record_count(), 0);
        assert_eq!(snap.parse_quality, ParseQuality::Full);
    }

    #[test]
    fn test_record_count() {
        let mut snap = DeviceSnapshot::new("core-sw1", date());
        snap.interfaces.insert(
            "GE0/0/1".to_string(),
            InterfaceRecord::new("GE0/0/1", AdminState::Up, LineState::Up),
        );
        snap.lldp
            .insert(LldpNeighbor::new("GE0/0/1", "core-sw2", "GE0/0/2"));
        assert_eq!(snap.record_count(), 2);
    }

    #[test]
    fn test_quality_parse() {
        assert_eq!(
            "degraded".parse::<ParseQuality>().unwrap(),
            ParseQuality::Degraded
        );
        assert!(ParseQuality::Partial.is_degraded());
        assert!(!ParseQuality::Full.is_degraded());
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let mut snap = DeviceSnapshot::new("core-sw1", date());
        snap.interfaces.insert(
            "GE0/0/1".to_string(),
            InterfaceRecord::new("GE0/0/1", AdminState::Up, LineState::Down),
        );
        let json = serde_json::to_string(&snap).unwrap();
        let back: DeviceSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
