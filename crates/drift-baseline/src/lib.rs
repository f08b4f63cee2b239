//! drift-baseline - baseline persistence and drift comparison
//!
//! Persists normalized device snapshots as the recorded reference state
//! (the baseline), compares later snapshots against them, and validates
//! that the baseline store is internally coherent.
//!
//! Storage layout mirrors the capture layout: one JSON snapshot per device
//! under a `YYYY_MM_DD` partition directory, plus a single index file that
//! is the source of truth for which baseline is active per device. All
//! writes are write-then-rename so an interrupted run never leaves a
//! half-written baseline visible.

mod consistency;
mod diff;
mod error;
mod report;
mod store;

pub use consistency::{check_store, BaselineHealth, ConsistencyReport, DeviceCheck};
pub use diff::compare;
pub use error::{BaselineError, Result};
pub use report::{render_consistency_report, render_diff_reports};
pub use store::{BaselineIndex, BaselineStore, IndexEntry, INDEX_FILE_NAME};
