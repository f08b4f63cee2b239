//! drift-parse - vendor CLI log parsing for drift detection
//!
//! Turns raw device command logs into normalized [`drift_types::DeviceSnapshot`]
//! structures. The pipeline is: segment the per-command block out of the raw
//! log, pick a vendor parser (declared type first, content detection second,
//! heuristic fallback last), parse interface/STP/LLDP records, and normalize
//! interface names and status tokens so downstream comparison never sees
//! vendor-specific spelling.
//!
//! All parsing is pure and synchronous; snapshots for different devices can
//! be built concurrently without shared state.

mod comware;
mod error;
mod fallback;
mod lldp;
mod normalize;
mod segment;
mod snapshot;
mod stp;
mod vendor;
mod vrp;

pub use comware::ComwareParser;
pub use error::{ParseError, Result};
pub use fallback::FallbackParser;
pub use normalize::{canonical_interface, classify_phy_token, StatusToken};
pub use segment::{segment, RawBlock};
pub use snapshot::{build_snapshot, device_from_file_name};
pub use vendor::{detect_vendor, parser_for, Vendor, VendorParser};
pub use vrp::VrpParser;
