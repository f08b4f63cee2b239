//! Diff engine: strict delta between a baseline and a current snapshot.
//!
//! The report never restates unchanged state; comparing a snapshot against
//! itself yields an empty report. Anomalies are emitted in deterministic
//! order: interface status changes, appeared, disappeared, STP changes,
//! LLDP additions then removals, each group sorted by interface name.

use drift_types::{Anomaly, AnomalyCategory, DeviceSnapshot, DiffReport, InterfaceRecord};
use tracing::debug;

fn interface_summary(rec: &InterfaceRecord) -> String {
    format!("admin={} line={}", rec.admin_status, rec.line_status)
}

/// Compare a current snapshot against its baseline.
pub fn compare(baseline: &DeviceSnapshot, current: &DeviceSnapshot) -> DiffReport {
    let mut report = DiffReport::new(&current.device);

    // Monitored interface status fields, for interfaces present in both.
    for (name, cur) in &current.interfaces {
        let Some(base) = baseline.interfaces.get(name) else {
            continue;
        };
        if base.admin_status != cur.admin_status {
            report.anomalies.push(Anomaly::new(
                AnomalyCategory::InterfaceStatus,
                name.clone(),
                "admin_status",
                Some(base.admin_status.to_string()),
                Some(cur.admin_status.to_string()),
            ));
        }
        if base.line_status != cur.line_status {
            report.anomalies.push(Anomaly::new(
                AnomalyCategory::InterfaceStatus,
                name.clone(),
                "line_status",
                Some(base.line_status.to_string()),
                Some(cur.line_status.to_string()),
            ));
        }
    }

    // Interfaces only in the current snapshot.
    for (name, cur) in &current.interfaces {
        if !baseline.interfaces.contains_key(name) {
            report.anomalies.push(Anomaly::new(
                AnomalyCategory::InterfaceAppeared,
                name.clone(),
                "interface",
                None,
                Some(interface_summary(cur)),
            ));
        }
    }

    // Interfaces only in the baseline.
    for (name, base) in &baseline.interfaces {
        if !current.interfaces.contains_key(name) {
            report.anomalies.push(Anomaly::new(
                AnomalyCategory::InterfaceDisappeared,
                name.clone(),
                "interface",
                Some(interface_summary(base)),
                None,
            ));
        }
    }

    // STP role and state, for ports present in both.
    for (name, cur) in &current.stp {
        let Some(base) = baseline.stp.get(name) else {
            continue;
        };
        if base.role != cur.role {
            report.anomalies.push(Anomaly::new(
                AnomalyCategory::StpStatus,
                name.clone(),
                "role",
                Some(base.role.to_string()),
                Some(cur.role.to_string()),
            ));
        }
        if base.state != cur.state {
            report.anomalies.push(Anomaly::new(
                AnomalyCategory::StpStatus,
                name.clone(),
                "state",
                Some(base.state.to_string()),
                Some(cur.state.to_string()),
            ));
        }
    }

    // LLDP: symmetric set difference of neighbor tuples.
    for added in current.lldp.difference(&baseline.lldp) {
        report.anomalies.push(Anomaly::new(
            AnomalyCategory::LldpNeighbor,
            added.local_interface.clone(),
            "neighbor",
            None,
            Some(format!("{}:{}", added.neighbor_device, added.neighbor_port)),
        ));
    }
    for removed in baseline.lldp.difference(&current.lldp) {
        report.anomalies.push(Anomaly::new(
            AnomalyCategory::LldpNeighbor,
            removed.local_interface.clone(),
            "neighbor",
            Some(format!(
                "{}:{}",
                removed.neighbor_device, removed.neighbor_port
            )),
            None,
        ));
    }

    debug!(
        device = report.device.as_str(),
        anomalies = report.anomalies.len(),
        "snapshots compared"
    );
    report
}
