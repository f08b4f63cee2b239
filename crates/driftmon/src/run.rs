//! Mode implementations for the driftmon CLI.
//!
//! Per-device work (read + parse + diff) runs as one tokio task per device;
//! all baseline store mutation happens on the coordinating task after the
//! workers are joined, so index updates are serialized and two devices in
//! the same run can never race a read-modify-write of the index file.

use anyhow::{bail, Context, Result};
use chrono::Local;
use drift_baseline::{
    check_store, compare as diff_snapshots, render_consistency_report, render_diff_reports,
    BaselineError, BaselineStore,
};
use drift_parse::{build_snapshot, device_from_file_name};
use drift_types::{DeviceSnapshot, DiffReport};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Resolved CLI options shared by all modes.
#[derive(Debug, Clone)]
pub struct Options {
    pub baseline_dir: PathBuf,
    pub log_dir: PathBuf,
    pub quiet: bool,
    pub verbose: bool,
    pub save_report: bool,
}

/// Overall result of a run, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No anomalies, no failures.
    Clean,
    /// Anomalies or per-device failures were found.
    Findings,
}

/// What happened for one device in a compare run.
#[derive(Debug)]
enum DeviceOutcome {
    /// Diffed against an existing baseline.
    Compared(DiffReport),
    /// First sighting: a baseline was established from the current log.
    BaselineEstablished,
    /// This device's comparison failed; the batch continued.
    Failed { device: String, reason: String },
}

/// Run the consistency checker over the baseline store.
pub fn consistency(opts: &Options) -> Result<Verdict> {
    let store = BaselineStore::open(&opts.baseline_dir)
        .with_context(|| format!("opening baseline store at {}", opts.baseline_dir.display()))?;

    let report = check_store(&store);
    let rendered = render_consistency_report(&report);

    if opts.quiet {
        println!(
            "consistency: {} device(s), {} problem(s)",
            report.checks.len(),
            report.issue_count()
        );
    } else {
        println!("{}", rendered);
    }
    if opts.save_report {
        let path = save_report_file(&opts.baseline_dir, "consistency_report", &rendered)?;
        info!(path = %path.display(), "report saved");
    }

    if report.is_healthy() {
        Ok(Verdict::Clean)
    } else {
        Ok(Verdict::Findings)
    }
}

/// Rebuild the baseline index from stored snapshots.
pub fn rebuild_index(opts: &Options) -> Result<Verdict> {
    let mut store = BaselineStore::open(&opts.baseline_dir)
        .with_context(|| format!("opening baseline store at {}", opts.baseline_dir.display()))?;
    let count = store.rebuild_index().context("rebuilding baseline index")?;
    if !opts.quiet {
        println!("baseline index rebuilt: {} device(s)", count);
    }
    Ok(Verdict::Clean)
}

/// Parse the latest capture run and diff every device against its baseline.
pub async fn compare(opts: &Options) -> Result<Verdict> {
    let mut store = BaselineStore::open(&opts.baseline_dir)
        .with_context(|| format!("opening baseline store at {}", opts.baseline_dir.display()))?;

    let capture_dir = latest_capture_dir(&opts.log_dir)?;
    let (log_files, unmatched) = discover_logs(&capture_dir)?;
    if log_files.is_empty() {
        bail!("no device logs in {}", capture_dir.display());
    }
    info!(
        capture_dir = %capture_dir.display(),
        devices = log_files.len(),
        "comparing capture run against baselines"
    );
    for path in &unmatched {
        warn!(path = %path.display(), "file does not follow the [device]_[date].log convention");
    }

    // One task per device: read + parse are pure per-device work.
    let mut tasks = JoinSet::new();
    for (path, device, date) in log_files {
        tasks.spawn(async move {
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| (device.clone(), e.to_string()))?;
            Ok::<_, (String, String)>(build_snapshot(&device, date, &text, None))
        });
    }

    let mut snapshots: Vec<DeviceSnapshot> = Vec::new();
    let mut outcomes: Vec<DeviceOutcome> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined.context("device task panicked")? {
            Ok(snapshot) => snapshots.push(snapshot),
            Err((device, reason)) => {
                outcomes.push(DeviceOutcome::Failed { device, reason });
            }
        }
    }
    // Deterministic report order regardless of task completion order.
    snapshots.sort_by(|a, b| a.device.cmp(&b.device));

    // Baseline loads, diffs and saves run on this task only; index updates
    // are therefore serialized.
    for snapshot in snapshots {
        match store.load(&snapshot.device) {
            Ok(baseline) => {
                outcomes.push(DeviceOutcome::Compared(diff_snapshots(&baseline, &snapshot)));
            }
            Err(BaselineError::Missing { device }) => {
                debug!(device = device.as_str(), "no baseline yet, establishing one");
                store
                    .save(&snapshot)
                    .with_context(|| format!("establishing baseline for {}", device))?;
                if !opts.quiet {
                    println!("baseline established for {}", device);
                }
                outcomes.push(DeviceOutcome::BaselineEstablished);
            }
            Err(err) => {
                outcomes.push(DeviceOutcome::Failed {
                    device: snapshot.device.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    summarize(opts, outcomes)
}

/// Print the batch summary and derive the verdict.
fn summarize(opts: &Options, outcomes: Vec<DeviceOutcome>) -> Result<Verdict> {
    let mut reports: Vec<DiffReport> = Vec::new();
    let mut established = 0usize;
    let mut failures: Vec<(String, String)> = Vec::new();
    for outcome in outcomes {
        match outcome {
            DeviceOutcome::Compared(report) => reports.push(report),
            DeviceOutcome::BaselineEstablished => established += 1,
            DeviceOutcome::Failed { device, reason } => failures.push((device, reason)),
        }
    }

    let total_anomalies: usize = reports.iter().map(|r| r.anomalies.len()).sum();
    let rendered = render_diff_reports(&reports);

    if opts.quiet {
        println!(
            "compare: {} anomaly(ies), {} baseline(s) established, {} failure(s)",
            total_anomalies,
            established,
            failures.len()
        );
    } else {
        println!("{}", rendered);
        if established > 0 {
            println!("{} new baseline(s) established", established);
        }
    }
    for (device, reason) in &failures {
        if opts.verbose {
            warn!(device = device.as_str(), "device failed: {}", reason);
        } else {
            warn!(device = device.as_str(), "device failed");
        }
    }

    if opts.save_report {
        let path = save_report_file(&opts.baseline_dir, "comparison_report", &rendered)?;
        if !opts.quiet {
            println!("report saved to {}", path.display());
        }
    }

    if total_anomalies == 0 && failures.is_empty() {
        Ok(Verdict::Clean)
    } else {
        Ok(Verdict::Findings)
    }
}

/// The lexically-latest subdirectory of the log directory is the newest
/// capture run (directories are named by date).
fn latest_capture_dir(log_dir: &Path) -> Result<PathBuf> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(log_dir)
        .with_context(|| format!("reading log directory {}", log_dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs.pop()
        .with_context(|| format!("no capture subdirectories in {}", log_dir.display()))
}

type MatchedLog = (PathBuf, String, chrono::NaiveDate);

/// Split a capture directory's `.log` files into convention-matched logs
/// and unmatched leftovers.
fn discover_logs(dir: &Path) -> Result<(Vec<MatchedLog>, Vec<PathBuf>)> {
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("log") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            unmatched.push(path);
            continue;
        };
        match device_from_file_name(name) {
            Some((device, date)) => matched.push((path, device, date)),
            None => unmatched.push(path),
        }
    }
    matched.sort();
    Ok((matched, unmatched))
}

/// Write a timestamped report file under the baseline directory.
fn save_report_file(baseline_dir: &Path, prefix: &str, content: &str) -> Result<PathBuf> {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = baseline_dir.join(format!("{}_{}.txt", prefix, stamp));
    fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_log(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_latest_capture_dir_sorts_lexically() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("2025_11_01")).unwrap();
        fs::create_dir(root.path().join("2025_12_12")).unwrap();
        let latest = latest_capture_dir(root.path()).unwrap();
        assert_eq!(latest.file_name().unwrap(), "2025_12_12");
    }

    #[test]
    fn test_no_capture_dirs_is_an_error() {
        let root = TempDir::new().unwrap();
        assert!(latest_capture_dir(root.path()).is_err());
    }

    #[test]
    fn test_discover_logs_reports_unmatched() {
        let dir = TempDir::new().unwrap();
        write_log(dir.path(), "[core-sw1]_[2025_12_12].log", "");
        write_log(dir.path(), "scratch-notes.log", "");
        write_log(dir.path(), "README.txt", "");

        let (matched, unmatched) = discover_logs(dir.path()).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].1, "core-sw1");
        // The .txt file is not a log at all; only the misnamed .log file
        // is reported.
        assert_eq!(unmatched.len(), 1);
        assert!(unmatched[0].ends_with("scratch-notes.log"));
    }

    #[tokio::test]
    async fn test_first_run_establishes_baselines() {
        let baseline = TempDir::new().unwrap();
        let logs = TempDir::new().unwrap();
        let capture = logs.path().join("2025_12_12");
        fs::create_dir(&capture).unwrap();
        write_log(
            &capture,
            "[core-sw1]_[2025_12_12].log",
            "<core-sw1>display interface brief\n\
             Interface  PHY  Protocol InUti OutUti\n\
             GigabitEthernet0/0/1  up  up  0%  0%\n",
        );

        let opts = Options {
            baseline_dir: baseline.path().to_path_buf(),
            log_dir: logs.path().to_path_buf(),
            quiet: true,
            verbose: false,
            save_report: false,
        };

        // First run: baseline established, verdict clean.
        let verdict = compare(&opts).await.unwrap();
        assert_eq!(verdict, Verdict::Clean);
        let store = BaselineStore::open(baseline.path()).unwrap();
        assert!(store.load("core-sw1").is_ok());

        // Second run with the same log: still clean, nothing drifted.
        let verdict = compare(&opts).await.unwrap();
        assert_eq!(verdict, Verdict::Clean);
    }

    #[tokio::test]
    async fn test_drift_yields_findings() {
        let baseline = TempDir::new().unwrap();
        let logs = TempDir::new().unwrap();
        let capture = logs.path().join("2025_12_12");
        fs::create_dir(&capture).unwrap();
        write_log(
            &capture,
            "[core-sw1]_[2025_12_12].log",
            "<core-sw1>display interface brief\n\
             Interface  PHY  Protocol InUti OutUti\n\
             GigabitEthernet0/0/1  up  up  0%  0%\n",
        );

        let opts = Options {
            baseline_dir: baseline.path().to_path_buf(),
            log_dir: logs.path().to_path_buf(),
            quiet: true,
            verbose: false,
            save_report: false,
        };
        compare(&opts).await.unwrap();

        // The port goes down in the next capture.
        let capture2 = logs.path().join("2025_12_13");
        fs::create_dir(&capture2).unwrap();
        write_log(
            &capture2,
            "[core-sw1]_[2025_12_13].log",
            "<core-sw1>display interface brief\n\
             Interface  PHY  Protocol InUti OutUti\n\
             GigabitEthernet0/0/1  down  down  0%  0%\n",
        );

        let verdict = compare(&opts).await.unwrap();
        assert_eq!(verdict, Verdict::Findings);
    }
}
