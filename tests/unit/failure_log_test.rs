//! Tests for the append-only failure log

use std::sync::Arc;
use std::thread;

use anyhow::anyhow;
use fanout_runner::{FailureLog, FailureRecord};

#[test]
fn test_new_log_is_empty() {
    let log = FailureLog::new();
    assert!(log.is_empty());
    assert_eq!(log.len(), 0);
    assert!(log.drain().is_empty());
}

#[test]
fn test_records_keep_arrival_order() {
    let log = FailureLog::new();
    log.record(FailureRecord::from_error(&anyhow!("first")));
    log.record(FailureRecord::from_error(&anyhow!("second")));
    log.record(FailureRecord::from_error(&anyhow!("third")));

    assert_eq!(log.len(), 3);
    let drained = log.drain();
    let messages: Vec<&str> = drained.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
}

#[test]
fn test_drain_empties_the_log() {
    let log = FailureLog::new();
    log.record(FailureRecord::from_error(&anyhow!("only")));

    assert_eq!(log.drain().len(), 1);
    assert!(log.is_empty());
    assert!(log.drain().is_empty());
}

#[test]
fn test_from_error_renders_context_chain() {
    let error = anyhow!("connection refused").context("resolving artifact a:b");
    let record = FailureRecord::from_error(&error);
    assert_eq!(record.message, "resolving artifact a:b: connection refused");
}

#[test]
fn test_concurrent_appends_all_land() {
    const NUM_THREADS: usize = 8;
    const PER_THREAD: usize = 10;

    let log = Arc::new(FailureLog::new());

    let mut handles = Vec::new();
    for t in 0..NUM_THREADS {
        let log = Arc::clone(&log);
        handles.push(thread::spawn(move || {
            for i in 0..PER_THREAD {
                log.record(FailureRecord::from_error(&anyhow!("worker {} item {}", t, i)));
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(log.len(), NUM_THREADS * PER_THREAD);
    assert_eq!(log.drain().len(), NUM_THREADS * PER_THREAD);
}
