//! Runner and failure-report configuration structures.

use serde::{Deserialize, Serialize};

const DEFAULT_REPORT_HEADER: &str =
    "The following errors were encountered while processing tasks:";
const DEFAULT_BOUNDARY_MARKER: &str = "fanout_runner";
const DEFAULT_MAX_FRAMES: usize = 64;

/// Controls how captured backtraces are shortened in failure reports.
///
/// A trace is cut at the first frame whose symbol contains any of the
/// configured boundary markers; that frame is the last one shown. Frames
/// past `max_frames` are dropped regardless of markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Substrings identifying the first frame that belongs to the host
    /// system rather than the failing task.
    pub boundary_markers: Vec<String>,
    /// Hard cap on frames per entry when no boundary marker matches.
    pub max_frames: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            boundary_markers: vec![DEFAULT_BOUNDARY_MARKER.to_string()],
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

impl TraceConfig {
    /// Validate trace shortening values.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_frames == 0 {
            return Err("max_frames must be greater than 0".into());
        }
        if self.boundary_markers.iter().any(|m| m.trim().is_empty()) {
            return Err("boundary_markers must not contain blank entries".into());
        }
        Ok(())
    }
}

/// Root runner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Header line of the aggregated failure report.
    pub report_header: String,
    /// Backtrace shortening behavior.
    pub trace: TraceConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            report_header: DEFAULT_REPORT_HEADER.to_string(),
            trace: TraceConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Validate the report header and trace settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.report_header.trim().is_empty() {
            return Err("report_header must not be blank".into());
        }
        self.trace
            .validate()
            .map_err(|e| format!("trace config invalid: {e}"))?;
        Ok(())
    }

    /// Parse runner configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: RunnerConfig =
            serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Replace the report header line.
    #[must_use]
    pub fn with_report_header(mut self, header: impl Into<String>) -> Self {
        self.report_header = header.into();
        self
    }

    /// Add a boundary marker for trace shortening.
    #[must_use]
    pub fn with_boundary_marker(mut self, marker: impl Into<String>) -> Self {
        self.trace.boundary_markers.push(marker.into());
        self
    }

    /// Replace the per-entry frame cap.
    #[must_use]
    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.trace.max_frames = max_frames;
        self
    }
}
