//! Error types for runner operations.

use thiserror::Error;

use crate::config::RunnerConfig;
use crate::core::failures::FailureRecord;
use crate::util::trace;

/// Errors produced by runner components.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Configuration rejected during validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The completion wait was torn down before the batch settled.
    #[error("completion wait interrupted: {0}")]
    Interrupted(String),
    /// One or more tasks in the batch failed.
    #[error(transparent)]
    TasksFailed(#[from] BatchFailure),
}

/// Aggregated failure raised after a batch completes with task errors.
///
/// Carries every failure recorded during the batch, together with a
/// prerendered report listing them as numbered entries with shortened
/// traces. The report doubles as the `Display` output, so propagating this
/// error surfaces the full listing.
#[derive(Debug, Error)]
#[error("{report}")]
pub struct BatchFailure {
    failures: Vec<FailureRecord>,
    entries: Vec<String>,
    report: String,
}

impl BatchFailure {
    /// Builds the aggregated failure from drained records.
    ///
    /// Returns `None` when the batch recorded no failures, which is the
    /// success path.
    #[must_use]
    pub fn from_records(records: Vec<FailureRecord>, config: &RunnerConfig) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let entries: Vec<String> = records
            .iter()
            .enumerate()
            .map(|(index, record)| render_entry(index, record, config))
            .collect();
        let mut report = config.report_header.clone();
        for entry in &entries {
            report.push('\n');
            report.push_str(entry);
        }
        Some(Self {
            failures: records,
            entries,
            report,
        })
    }

    /// All recorded failures, in completion order.
    #[must_use]
    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    /// The rendered numbered entries, one per failure, including each
    /// entry's shortened trace lines.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of failed tasks.
    #[must_use]
    pub fn count(&self) -> usize {
        self.failures.len()
    }

    /// The rendered multi-line report.
    #[must_use]
    pub fn report(&self) -> &str {
        &self.report
    }
}

/// Renders one `<n>) <message>` entry, the record's shortened trace
/// indented to the width of the numeric prefix.
fn render_entry(index: usize, record: &FailureRecord, config: &RunnerConfig) -> String {
    let prefix = format!("{})", index + 1);
    let mut entry = format!("{} {}", prefix, record.message);
    let indent = " ".repeat(prefix.len());
    let frames = trace::parse_frames(&record.trace);
    for frame in trace::shorten(&frames, &config.trace) {
        entry.push('\n');
        entry.push_str(&indent);
        entry.push_str(&frame.to_string());
    }
    entry
}

/// Application-facing result using anyhow for task-level errors.
pub type AppResult<T> = Result<T, anyhow::Error>;
