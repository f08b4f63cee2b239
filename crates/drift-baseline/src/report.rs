//! Human-readable rendering of diff and consistency results.
//!
//! Reports group anomalies by device and category, omit devices with
//! clean reports, and end with a totals line so quiet callers can print
//! just the verdict.

use crate::consistency::{BaselineHealth, ConsistencyReport};
use drift_types::{AnomalyCategory, DiffReport};

const RULE: &str = "============================================================";
const SUB_RULE: &str = "----------------------------------------";

/// Categories in display order.
const CATEGORY_ORDER: &[(AnomalyCategory, &str)] = &[
    (AnomalyCategory::InterfaceStatus, "Interface status changes"),
    (AnomalyCategory::InterfaceAppeared, "Interfaces appeared"),
    (AnomalyCategory::InterfaceDisappeared, "Interfaces disappeared"),
    (AnomalyCategory::StpStatus, "STP changes"),
    (AnomalyCategory::LldpNeighbor, "LLDP neighbor changes"),
];

/// Render per-device drift reports. Devices with empty reports are
/// omitted; a batch with no drift renders as a single verdict line.
pub fn render_diff_reports(reports: &[DiffReport]) -> String {
    let total: usize = reports.iter().map(|r| r.anomalies.len()).sum();
    let mut out = Vec::new();

    for report in reports {
        if report.is_clean() {
            continue;
        }
        out.push(RULE.to_string());
        out.push(format!("Drift report - {}", report.device));
        out.push(RULE.to_string());

        for (category, title) in CATEGORY_ORDER {
            let in_category: Vec<_> = report
                .anomalies
                .iter()
                .filter(|a| a.category == *category)
                .collect();
            if in_category.is_empty() {
                continue;
            }
            out.push(format!("{}:", title));
            out.push(SUB_RULE.to_string());
            for anomaly in in_category {
                out.push(format!(
                    "  {} {}: {} -> {}",
                    anomaly.interface,
                    anomaly.field,
                    anomaly.baseline_value.as_deref().unwrap_or("-"),
                    anomaly.current_value.as_deref().unwrap_or("-"),
                ));
            }
            out.push(String::new());
        }
    }

    if total == 0 {
        out.push("Drift status: no differences".to_string());
    } else {
        out.push(format!("Drift status: {} difference(s) found", total));
    }
    out.join("\n")
}

/// Render a consistency check report.
pub fn render_consistency_report(report: &ConsistencyReport) -> String {
    let mut out = Vec::new();
    out.push(RULE.to_string());
    out.push("Baseline consistency report".to_string());
    out.push(RULE.to_string());
    out.push(format!("Devices indexed: {}", report.checks.len()));

    let issues: Vec<_> = report.checks.iter().filter(|c| !c.is_ok()).collect();
    if !issues.is_empty() {
        out.push("Problems:".to_string());
        out.push(SUB_RULE.to_string());
        for check in &issues {
            match &check.health {
                BaselineHealth::Missing { path } => {
                    out.push(format!(
                        "  [missing] {}: file absent: {}",
                        check.device,
                        path.display()
                    ));
                }
                BaselineHealth::Corrupt { path, reason } => {
                    out.push(format!(
                        "  [corrupt] {}: {}: {}",
                        check.device,
                        path.display(),
                        reason
                    ));
                }
                BaselineHealth::Ok => {}
            }
        }
    }

    let drifted: Vec<_> = report
        .checks
        .iter()
        .filter(|c| c.is_ok() && c.fingerprint_mismatch)
        .collect();
    for check in &drifted {
        out.push(format!(
            "  [warning] {}: file changed since it was indexed",
            check.device
        ));
    }
    for orphan in &report.orphans {
        out.push(format!(
            "  [warning] orphaned snapshot not referenced by index: {}",
            orphan.display()
        ));
    }

    if report.is_healthy() {
        out.push("Consistency status: all baselines consistent".to_string());
    } else {
        out.push(format!(
            "Consistency status: {} problem(s) found",
            report.issue_count()
        ));
    }
    out.push(RULE.to_string());
    out.join("\n")
}
