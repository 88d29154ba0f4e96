//! Tests for backtrace parsing and shortening

use fanout_runner::util::trace::{parse_frames, shorten, TraceFrame};
use fanout_runner::TraceConfig;

const RENDERED: &str = "   0: anyhow::error::<impl anyhow::Error>::msg\n             at /home/user/.cargo/registry/src/anyhow-1.0.98/src/error.rs:83:36\n   1: resolver::fetch_model\n             at src/resolver.rs:42:7\n   2: fanout_runner::core::runner::dispatch\n             at src/core/runner.rs:120:13\n   3: tokio::runtime::task::harness::poll_future\n";

fn frame(symbol: &str) -> TraceFrame {
    TraceFrame {
        symbol: symbol.to_string(),
        location: None,
    }
}

#[test]
fn test_parse_typical_rendering() {
    let frames = parse_frames(RENDERED);
    assert_eq!(frames.len(), 4);

    assert_eq!(frames[1].symbol, "resolver::fetch_model");
    assert_eq!(frames[1].location.as_deref(), Some("src/resolver.rs:42:7"));

    // The last frame carried no location line.
    assert_eq!(frames[3].symbol, "tokio::runtime::task::harness::poll_future");
    assert_eq!(frames[3].location, None);
}

#[test]
fn test_parse_disabled_backtrace() {
    assert!(parse_frames("disabled backtrace").is_empty());
    assert!(parse_frames("").is_empty());
}

#[test]
fn test_parse_ignores_orphan_location_lines() {
    // A location line before any frame header has nothing to attach to.
    let frames = parse_frames("             at src/lost.rs:1:1\n   0: alpha::run\n");
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].symbol, "alpha::run");
    assert_eq!(frames[0].location, None);
}

#[test]
fn test_shorten_cuts_at_boundary_inclusive() {
    let frames = parse_frames(RENDERED);
    let config = TraceConfig::default();

    let kept = shorten(&frames, &config);
    assert_eq!(kept.len(), 3);
    assert_eq!(kept[2].symbol, "fanout_runner::core::runner::dispatch");
}

#[test]
fn test_shorten_boundary_on_first_frame() {
    let frames = vec![frame("fanout_runner::gate::wait"), frame("std::thread::park")];
    let config = TraceConfig::default();

    let kept = shorten(&frames, &config);
    assert_eq!(kept.len(), 1);
}

#[test]
fn test_shorten_without_marker_caps_frames() {
    let frames: Vec<TraceFrame> = (0..10).map(|i| frame(&format!("layer_{}::run", i))).collect();
    let config = TraceConfig {
        boundary_markers: Vec::new(),
        max_frames: 4,
    };

    let kept = shorten(&frames, &config);
    assert_eq!(kept.len(), 4);
    assert_eq!(kept[3].symbol, "layer_3::run");
}

#[test]
fn test_shorten_respects_any_marker() {
    let frames = vec![
        frame("alpha::run"),
        frame("beta::deep::call"),
        frame("gamma::run"),
    ];
    let config = TraceConfig {
        boundary_markers: vec!["unmatched".to_string(), "beta::".to_string()],
        max_frames: 64,
    };

    let kept = shorten(&frames, &config);
    assert_eq!(kept.len(), 2);
}

#[test]
fn test_shorten_keeps_everything_when_nothing_matches() {
    let frames = vec![frame("alpha::run"), frame("beta::run")];
    let config = TraceConfig::default();

    assert_eq!(shorten(&frames, &config).len(), 2);
}

#[test]
fn test_frame_display() {
    let with_location = TraceFrame {
        symbol: "resolver::fetch_model".to_string(),
        location: Some("src/resolver.rs:42:7".to_string()),
    };
    assert_eq!(
        format!("{}", with_location),
        "at resolver::fetch_model (src/resolver.rs:42:7)"
    );

    assert_eq!(format!("{}", frame("resolver::fetch_model")), "at resolver::fetch_model");
}
