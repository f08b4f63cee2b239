//! Log segmentation: isolating one command's output from a raw device log.
//!
//! A capture log is the concatenated echo of several commands, each preceded
//! by a prompt line (`<host>command` or `[host]command`) and interleaved
//! with pager continuation markers when the device paged its output. The
//! segmenter finds the echo of the requested command, collects lines until
//! the next prompt, and merges paged output into one contiguous block.

use crate::error::{ParseError, Result};
use tracing::debug;

/// Pager continuation markers emitted by the supported vendor families.
/// Matched as substrings so leading/trailing whitespace variants collapse.
const PAGER_MARKERS: &[&str] = &["---- More ----", "<--- More --->", "--More--"];

/// One command's output, cut out of a raw device log.
///
/// Created per command per log file, consumed once by a vendor parser,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// Device the log belongs to.
    pub device: String,
    /// The command whose echo this block contains.
    pub command: String,
    /// Output lines with pager artifacts removed.
    pub lines: Vec<String>,
}

impl RawBlock {
    /// Returns true when the block carries no output lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Returns true for a prompt line that echoes another command, which
/// terminates the current block.
fn is_next_command_prompt(line: &str) -> bool {
    let trimmed = line.trim_start();
    let rest = if trimmed.starts_with('<') {
        trimmed.split_once('>').map(|(_, r)| r)
    } else if trimmed.starts_with('[') {
        trimmed.split_once(']').map(|(_, r)| r)
    } else {
        None
    };
    matches!(rest, Some(r) if !r.trim().is_empty())
}

/// Strip pager markers from a line. Returns `None` when the line held
/// nothing but a marker, so paged output merges without a gap.
fn strip_pager(line: &str) -> Option<String> {
    let mut cleaned = line.to_string();
    let mut had_marker = false;
    for marker in PAGER_MARKERS {
        if cleaned.contains(marker) {
            cleaned = cleaned.replace(marker, "");
            had_marker = true;
        }
    }
    if had_marker && cleaned.trim().is_empty() {
        return None;
    }
    Some(cleaned)
}

/// Cut the output block of one command out of a raw log.
///
/// `aliases` lists the spellings under which the command may have been
/// echoed (full form and operator abbreviation, e.g. both
/// `display interface brief` and `dis int brief`). The first matching echo
/// wins. Fails with [`ParseError::Segmentation`] when no alias appears in
/// the log; callers record that as a missing data point, not a batch
/// failure.
pub fn segment(device: &str, log: &str, aliases: &[&str]) -> Result<RawBlock> {
    let mut lines = log.lines();

    // Locate the command echo.
    let command = loop {
        let Some(line) = lines.next() else {
            return Err(ParseError::Segmentation {
                command: aliases.first().copied().unwrap_or_default().to_string(),
            });
        };
        let lower = line.to_lowercase();
        if let Some(alias) = aliases.iter().find(|a| lower.contains(&a.to_lowercase())) {
            break alias.to_string();
        }
    };

    // Collect until the next command prompt or end of log.
    let mut block = Vec::new();
    for line in lines {
        if is_next_command_prompt(line) {
            break;
        }
        if let Some(cleaned) = strip_pager(line) {
            block.push(cleaned);
        }
    }

    debug!(
        device,
        command = command.as_str(),
        lines = block.len(),
        "segmented command block"
    );

    Ok(RawBlock {
        device: device.to_string(),
        command,
        lines: block,
    })
}
