//! Spanning-tree role and state per port.

use crate::TokenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role a port plays in the spanning tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StpRole {
    /// Root port.
    Root,
    /// Designated port.
    Desi,
    /// Alternate port.
    Alte,
    /// Backup port.
    Back,
    /// Role token not recognized.
    #[default]
    Unknown,
}

impl fmt::Display for StpRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StpRole::Root => "ROOT",
            StpRole::Desi => "DESI",
            StpRole::Alte => "ALTE",
            StpRole::Back => "BACK",
            StpRole::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for StpRole {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ROOT" => Ok(StpRole::Root),
            "DESI" | "DESG" => Ok(StpRole::Desi),
            "ALTE" | "ALTN" => Ok(StpRole::Alte),
            "BACK" => Ok(StpRole::Back),
            _ => Err(TokenError::InvalidStpRole(s.to_string())),
        }
    }
}

/// Forwarding state of a port in the spanning tree.
///
/// Legacy STP tokens collapse into the RSTP model: LISTENING is treated as
/// learning, BLOCKING as discarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StpState {
    /// Port forwards traffic.
    Forwarding,
    /// Port discards traffic.
    Discarding,
    /// Port is learning MAC addresses.
    Learning,
    /// State token not recognized.
    #[default]
    Unknown,
}

impl fmt::Display for StpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StpState::Forwarding => "FORWARDING",
            StpState::Discarding => "DISCARDING",
            StpState::Learning => "LEARNING",
            StpState::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for StpState {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FORWARDING" => Ok(StpState::Forwarding),
            "DISCARDING" | "BLOCKING" => Ok(StpState::Discarding),
            "LEARNING" | "LISTENING" => Ok(StpState::Learning),
            _ => Err(TokenError::InvalidStpState(s.to_string())),
        }
    }
}

/// Spanning-tree status of one port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StpRecord {
    /// Canonical interface name.
    pub interface: String,
    /// Port role.
    pub role: StpRole,
    /// Port state.
    pub state: StpState,
}

impl StpRecord {
    pub fn new(interface: impl Into<String>, role: StpRole, state: StpState) -> Self {
        Self {
            interface: interface.into(),
            role,
            state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_role_parse() {
        assert_eq!("desi".parse::<StpRole>().unwrap(), StpRole::Desi);
        assert_eq!("ROOT".parse::<StpRole>().unwrap(), StpRole::Root);
        assert!("none".parse::<StpRole>().is_err());
    }

    #[test]
    fn test_legacy_state_tokens_collapse() {
        assert_eq!("BLOCKING".parse::<StpState>().unwrap(), StpState::Discarding);
        assert_eq!("listening".parse::<StpState>().unwrap(), StpState::Learning);
        assert_eq!("FORWARDING".parse::<StpState>().unwrap(), StpState::Forwarding);
    }

    #[test]
    fn test_display() {
        assert_eq!(StpRole::Alte.to_string(), "ALTE");
        assert_eq!(StpState::Discarding.to_string(), "DISCARDING");
    }
}
