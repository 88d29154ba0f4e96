//! Unit tests for individual components

mod failure_log_test;
mod runtime_test;
mod trace_test;
