//! Normalized interface status states.

use crate::TokenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Administrative state of an interface.
///
/// Down means the interface has been explicitly disabled by an operator,
/// independent of physical link state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdminState {
    /// Interface is administratively enabled (default assumption).
    #[default]
    Up,
    /// Interface has been shut down by configuration.
    Down,
}

impl AdminState {
    /// Returns true if the interface is administratively up.
    pub const fn is_up(&self) -> bool {
        matches!(self, AdminState::Up)
    }

    /// Returns true if the interface is administratively down.
    pub const fn is_down(&self) -> bool {
        matches!(self, AdminState::Down)
    }
}

impl fmt::Display for AdminState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminState::Up => write!(f, "UP"),
            AdminState::Down => write!(f, "DOWN"),
        }
    }
}

impl FromStr for AdminState {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "UP" => Ok(AdminState::Up),
            "DOWN" => Ok(AdminState::Down),
            _ => Err(TokenError::InvalidAdminState(s.to_string())),
        }
    }
}

/// Effective up/down state of an interface.
///
/// Up only when both the physical and protocol layers report up; a missing
/// or ambiguous layer forces Down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LineState {
    /// Interface is not passing traffic (default).
    #[default]
    Down,
    /// Both physical and protocol layers are up.
    Up,
}

impl LineState {
    /// Returns true if the interface line state is up.
    pub const fn is_up(&self) -> bool {
        matches!(self, LineState::Up)
    }

    /// Returns true if the interface line state is down.
    pub const fn is_down(&self) -> bool {
        matches!(self, LineState::Down)
    }
}

impl fmt::Display for LineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineState::Up => write!(f, "UP"),
            LineState::Down => write!(f, "DOWN"),
        }
    }
}

impl FromStr for LineState {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "UP" => Ok(LineState::Up),
            "DOWN" => Ok(LineState::Down),
            _ => Err(TokenError::InvalidLineState(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_admin_state() {
        assert!(AdminState::Up.is_up());
        assert!(!AdminState::Up.is_down());
        assert!(AdminState::Down.is_down());
    }

    #[test]
    fn test_admin_state_parse() {
        assert_eq!("up".parse::<AdminState>().unwrap(), AdminState::Up);
        assert_eq!("DOWN".parse::<AdminState>().unwrap(), AdminState::Down);
        assert!("adm".parse::<AdminState>().is_err());
    }

    #[test]
    fn test_line_state_default_is_down() {
        assert_eq!(LineState::default(), LineState::Down);
        assert!(LineState::default().is_down());
    }

    #[test]
    fn test_display() {
        assert_eq!(AdminState::Up.to_string(), "UP");
        assert_eq!(LineState::Down.to_string(), "DOWN");
    }
}
