//! Backtrace rendering helpers for failure reports.
//!
//! Captured backtraces arrive as the multi-line text produced by
//! `std::backtrace::Backtrace`. This module parses that text into frames and
//! shortens the frame list so reports show the failing task's own frames,
//! ending at the first frame that belongs to the host system.

use std::fmt;

use crate::config::TraceConfig;

/// One parsed backtrace frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFrame {
    /// Demangled symbol name.
    pub symbol: String,
    /// Source location, when the rendering carried one.
    pub location: Option<String>,
}

impl fmt::Display for TraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "at {} ({location})", self.symbol),
            None => write!(f, "at {}", self.symbol),
        }
    }
}

/// Parses the display output of a captured `std::backtrace::Backtrace`.
///
/// Frame headers look like `   3: path::to::symbol`, optionally followed by
/// an indented `at src/file.rs:12:34` location line. Anything else, such as
/// the `disabled backtrace` placeholder, yields no frames.
#[must_use]
pub fn parse_frames(rendered: &str) -> Vec<TraceFrame> {
    let mut frames: Vec<TraceFrame> = Vec::new();
    for line in rendered.lines() {
        if let Some(symbol) = frame_symbol(line) {
            frames.push(TraceFrame {
                symbol: symbol.to_string(),
                location: None,
            });
        } else if let Some(location) = frame_location(line) {
            if let Some(last) = frames.last_mut() {
                if last.location.is_none() {
                    last.location = Some(location.to_string());
                }
            }
        }
    }
    frames
}

/// Cuts a frame list at the first host-system frame.
///
/// The matched frame is the last one kept, mirroring how a reader wants to
/// see the call that crossed into host code. `max_frames` bounds the result
/// when no marker matches.
#[must_use]
pub fn shorten<'a>(frames: &'a [TraceFrame], config: &TraceConfig) -> &'a [TraceFrame] {
    let mut end = frames.len().min(config.max_frames);
    for (index, frame) in frames.iter().take(end).enumerate() {
        if is_boundary(frame, config) {
            end = index + 1;
            break;
        }
    }
    &frames[..end]
}

fn is_boundary(frame: &TraceFrame, config: &TraceConfig) -> bool {
    config
        .boundary_markers
        .iter()
        .any(|marker| frame.symbol.contains(marker.as_str()))
}

fn frame_symbol(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let (index, symbol) = trimmed.split_once(": ")?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return None;
    }
    Some(symbol)
}

fn frame_location(line: &str) -> Option<&str> {
    // Location lines are indented continuations, never at column zero.
    if !line.starts_with(char::is_whitespace) {
        return None;
    }
    let trimmed = line.trim_start();
    let location = trimmed.strip_prefix("at ")?.trim();
    if location.is_empty() {
        return None;
    }
    Some(location)
}
