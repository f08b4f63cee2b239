//! Common types for network device state drift detection.
//!
//! This crate provides the typed data model shared by the parsing and
//! baseline crates:
//!
//! - [`AdminState`] / [`LineState`]: normalized interface status
//! - [`InterfaceRecord`]: one interface's operational state
//! - [`StpRecord`]: spanning-tree role and state per port
//! - [`LldpNeighbor`]: one discovered neighbor tuple
//! - [`DeviceSnapshot`]: everything captured from one device at one time
//! - [`DiffReport`]: structured anomalies between two snapshots

mod diff;
mod interface;
mod lldp;
mod snapshot;
mod status;
mod stp;

pub use diff::{Anomaly, AnomalyCategory, DiffReport};
pub use interface::{InterfaceMode, InterfaceRecord};
pub use lldp::LldpNeighbor;
pub use snapshot::{DeviceSnapshot, ParseQuality};
pub use status::{AdminState, LineState};
pub use stp::{StpRecord, StpRole, StpState};

/// Common error type for token parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("invalid admin state token: {0}")]
    InvalidAdminState(String),

    #[error("invalid line state token: {0}")]
    InvalidLineState(String),

    #[error("invalid STP role token: {0}")]
    InvalidStpRole(String),

    #[error("invalid STP state token: {0}")]
    InvalidStpState(String),

    #[error("invalid interface mode token: {0}")]
    InvalidInterfaceMode(String),

    #[error("invalid parse quality token: {0}")]
    InvalidParseQuality(String),
}
