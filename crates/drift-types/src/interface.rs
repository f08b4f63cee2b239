//! Interface record type and port mode.

use crate::{AdminState, LineState, TokenError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Forwarding mode an interface was reported under.
///
/// Comware devices split the interface-brief output into per-mode sections;
/// VRP output does not distinguish, so records from that family carry
/// [`InterfaceMode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceMode {
    /// Layer-3 routed port.
    Route,
    /// Layer-2 switched port.
    Bridge,
    /// Mode not reported by the device output.
    #[default]
    Unknown,
}

impl fmt::Display for InterfaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InterfaceMode::Route => "route",
            InterfaceMode::Bridge => "bridge",
            InterfaceMode::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for InterfaceMode {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "route" => Ok(InterfaceMode::Route),
            "bridge" => Ok(InterfaceMode::Bridge),
            "unknown" => Ok(InterfaceMode::Unknown),
            _ => Err(TokenError::InvalidInterfaceMode(s.to_string())),
        }
    }
}

/// Normalized operational state of one interface.
///
/// The name is canonical (abbreviated, case-normalized) and unique within a
/// snapshot. Optional fields are populated only when the vendor output
/// carries them; absent fields never participate in drift comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    /// Canonical interface name (e.g. "GE0/0/1").
    pub name: String,
    /// Administrative state.
    pub admin_status: AdminState,
    /// Effective line state (physical and protocol combined).
    pub line_status: LineState,
    /// Forwarding mode, when the output distinguishes.
    #[serde(default)]
    pub mode: InterfaceMode,
    /// Negotiated speed, vendor spelling (e.g. "1G(a)").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
    /// Duplex setting, vendor spelling (e.g. "F(a)").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplex: Option<String>,
    /// Port VLAN ID for bridge-mode ports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pvid: Option<String>,
    /// Protocol layer status token as reported, upper-cased.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Primary IP address for route-mode ports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_ip: Option<String>,
    /// Free-text port description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InterfaceRecord {
    /// Create a record with the given name and status, no optional fields.
    pub fn new(name: impl Into<String>, admin_status: AdminState, line_status: LineState) -> Self {
        Self {
            name: name.into(),
            admin_status,
            line_status,
            mode: InterfaceMode::Unknown,
            speed: None,
            duplex: None,
            pvid: None,
            protocol: None,
            primary_ip: None,
            description: None,
        }
    }

    /// Returns true if the interface is fully operational.
    pub fn is_operational(&self) -> bool {
        self.admin_status.is_up() && self.line_status.is_up()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_record_defaults() {
        let rec = InterfaceRecord::new("GE0/0/1", AdminState::Up, LineState::Up);
        assert_eq!(rec.mode, InterfaceMode::Unknown);
        assert_eq!(rec.speed, None);
        assert!(rec.is_operational());
    }

    #[test]
    fn test_admin_down_not_operational() {
        let rec = InterfaceRecord::new("GE0/0/2", AdminState::Down, LineState::Down);
        assert!(!rec.is_operational());
    }

    #[test]
    fn test_mode_parse_roundtrip() {
        assert_eq!("route".parse::<InterfaceMode>().unwrap(), InterfaceMode::Route);
        assert_eq!("Bridge".parse::<InterfaceMode>().unwrap(), InterfaceMode::Bridge);
        assert_eq!(InterfaceMode::Route.to_string(), "route");
    }

    #[test]
    fn test_serde_skips_absent_fields() {
        let rec = InterfaceRecord::new("GE0/0/1", AdminState::Up, LineState::Up);
        let json = serde_json::to_string(&rec).unwrap();
        assert!(!json.contains("speed"));
        assert!(!json.contains("primary_ip"));
    }
}
