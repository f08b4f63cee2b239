//! Canonicalization of interface names and status tokens.
//!
//! Different commands on the same device spell interface names differently
//! ("GigabitEthernet1/0/1" in one listing, "GE1/0/1" in another). Every
//! vendor parser runs names through [`canonical_interface`] so that records
//! from different commands cross-reference correctly, and runs status
//! columns through [`classify_phy_token`] so downstream code only ever sees
//! the normalized UP/DOWN model.

use drift_types::{AdminState, LineState};

/// Long-form to short-form interface name abbreviations.
///
/// Longer prefixes come first so "Ten-GigabitEthernet" never falls through
/// to the plain "GigabitEthernet" entry.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("Ten-GigabitEthernet", "XGE"),
    ("XGigabitEthernet", "XGE"),
    ("TwentyFiveGigE", "25GE"),
    ("HundredGigE", "100GE"),
    ("FortyGigE", "40GE"),
    ("GigabitEthernet", "GE"),
    ("Eth-Trunk", "Eth-Trunk"),
];

/// Canonicalize an interface name: trim whitespace and abbreviate the
/// well-known long prefixes, matching case-insensitively.
///
/// Names already in short form pass through unchanged, so the canonical
/// form of a long name and its abbreviation always compare equal.
pub fn canonical_interface(name: &str) -> String {
    let name = name.trim();
    for (long, short) in ABBREVIATIONS {
        // Checked slice: arbitrary input may not split on a char boundary.
        let Some(prefix) = name.get(..long.len()) else {
            continue;
        };
        if prefix.eq_ignore_ascii_case(long) {
            return format!("{}{}", short, &name[long.len()..]);
        }
    }
    name.to_string()
}

/// Normalized reading of a physical/link status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusToken {
    /// Layer reports up.
    Up,
    /// Layer reports down, but not administratively.
    Down,
    /// Administratively shut down (Huawei `*down`, Comware `ADM`).
    AdminDown,
}

impl StatusToken {
    /// Classify a raw status token, case-insensitively. Returns `None` for
    /// anything outside the up/down vocabulary so callers can skip header
    /// and legend rows.
    pub fn from_token(token: &str) -> Option<Self> {
        let t = token.trim();
        if t.eq_ignore_ascii_case("*down") {
            return Some(StatusToken::AdminDown);
        }
        if t.eq_ignore_ascii_case("adm") {
            return Some(StatusToken::AdminDown);
        }
        if t.eq_ignore_ascii_case("up") {
            return Some(StatusToken::Up);
        }
        if t.eq_ignore_ascii_case("down") {
            return Some(StatusToken::Down);
        }
        None
    }
}

/// Derive the normalized (admin, line) pair from a physical-layer token and
/// an optional protocol-layer token.
///
/// The admin-down marker alone forces both states down regardless of the
/// protocol column. A physically-up port is line-up only when the protocol
/// layer also reports up; a missing protocol column counts as up only for
/// layouts that never carry one (callers pass `None` in that case and the
/// physical reading decides).
pub fn classify_phy_token(phy: StatusToken, protocol: Option<&str>) -> (AdminState, LineState) {
    match phy {
        StatusToken::AdminDown => (AdminState::Down, LineState::Down),
        StatusToken::Down => (AdminState::Up, LineState::Down),
        StatusToken::Up => {
            let proto_up = match protocol {
                Some(p) => p.trim().eq_ignore_ascii_case("up"),
                None => true,
            };
            let line = if proto_up { LineState::Up } else { LineState::Down };
            (AdminState::Up, line)
        }
    }
}
