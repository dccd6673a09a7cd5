//! Test runner implementation
//!
//! Drives the cases strictly in order over one shared transport and keeps
//! the append-only result log.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::api::ApiTransport;
use crate::common::config::Accounts;

use super::cases::{Case, CaseOutcome};
use super::report::Summary;

const RULE_WIDTH: usize = 80;

/// Result of one case
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_snapshot: Option<Value>,
}

/// Everything the cases share during one run
pub struct RunnerState {
    transport: Arc<dyn ApiTransport>,
    accounts: Accounts,
    /// Fixed at construction so all join dates come from the same day
    today: NaiveDate,
    results: Vec<TestResult>,
    sample_user_id: Option<String>,
    sample_attendance_id: Option<String>,
}

impl RunnerState {
    pub fn new(transport: Arc<dyn ApiTransport>, accounts: Accounts) -> Self {
        Self {
            transport,
            accounts,
            today: Local::now().date_naive(),
            results: Vec::new(),
            sample_user_id: None,
            sample_attendance_id: None,
        }
    }

    /// Override the day the join cases count from
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn transport(&self) -> &dyn ApiTransport {
        self.transport.as_ref()
    }

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn sample_user_id(&self) -> Option<&str> {
        self.sample_user_id.as_deref()
    }

    pub fn sample_attendance_id(&self) -> Option<&str> {
        self.sample_attendance_id.as_deref()
    }

    /// Record the employee id later cases book attendance for. First write wins.
    pub fn capture_user_id(&mut self, id: &str) {
        if self.sample_user_id.is_none() {
            tracing::debug!(id, "captured sample user id");
            self.sample_user_id = Some(id.to_string());
        }
    }

    /// Record the attendance id the confirm case updates. First write wins.
    pub fn capture_attendance_id(&mut self, id: &str) {
        if self.sample_attendance_id.is_none() {
            tracing::debug!(id, "captured sample attendance id");
            self.sample_attendance_id = Some(id.to_string());
        }
    }

    pub fn summary(&self) -> Summary {
        Summary::from_results(&self.results)
    }
}

/// Run one case, print its line and append exactly one result
pub async fn run_case(state: &mut RunnerState, case: Case) -> &TestResult {
    let outcome = match case.execute(state).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(case = case.name(), error = %e, "request failed");
            CaseOutcome::fail(format!("Request failed: {}", e), None)
        }
    };

    let status = if outcome.passed {
        "✅ PASS".green().bold()
    } else {
        "❌ FAIL".red().bold()
    };
    println!("{} {}: {}", status, case.name(), outcome.message);

    state.results.push(TestResult {
        name: case.name().to_string(),
        passed: outcome.passed,
        message: outcome.message,
        response_snapshot: outcome.snapshot,
    });
    &state.results[state.results.len() - 1]
}

/// Run `cases` in order and summarise
pub async fn run_suite(state: &mut RunnerState, cases: &[Case]) -> Summary {
    for &case in cases {
        run_case(state, case).await;
        println!();
    }
    state.summary()
}

pub fn print_banner(base_url: &str) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", "OFFICE ATTENDANCE SYSTEM - BACKEND API TESTING".bold());
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Testing against: {}", base_url.cyan());
    println!();
}

pub fn print_summary(summary: &Summary, results: &[TestResult]) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", "TEST SUMMARY".bold());
    println!("{}", "=".repeat(RULE_WIDTH));

    println!("Total Tests: {}", summary.total);
    println!("Passed: {}", summary.passed.to_string().green());
    println!("Failed: {}", summary.failed.to_string().red());
    println!("Success Rate: {:.1}%", summary.success_rate);

    if summary.all_passed() {
        println!(
            "\n{}",
            "🎉 ALL TESTS PASSED! Backend APIs are working correctly."
                .green()
                .bold()
        );
        return;
    }

    println!(
        "\n{}",
        format!("⚠️  {} tests failed. Check the details above.", summary.failed).yellow()
    );

    let failed: Vec<&TestResult> = results.iter().filter(|r| !r.passed).collect();
    if !failed.is_empty() {
        println!("\nFailed Tests:");
        for result in failed {
            println!("  - {}: {}", result.name, result.message);
        }
    }
}
