//! Smoke-test runner
//!
//! Runs the fixed sequence of API cases against a transport, records one
//! result per case and summarises the run. Cases share state only through
//! the two sample ids carried in [`RunnerState`].

mod cases;
mod report;
mod runner;

#[cfg(test)]
mod fake;

pub use cases::{Case, CaseOutcome, Office};
pub use report::{write_report, Report, Summary};
pub use runner::{print_banner, print_summary, run_case, run_suite, RunnerState, TestResult};
