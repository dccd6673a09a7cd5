//! Attendance smoke tests - end-to-end checks for the office attendance API
//!
//! This library drives a fixed sequence of HTTP cases against the
//! attendance REST API and reports a pass/fail verdict for each.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod testing;

// Re-export commonly used types for tests
pub use api::{ApiClient, ApiResponse, ApiTransport};
pub use common::{Error, Result};
pub use testing::{run_suite, RunnerState, Summary, TestResult};
