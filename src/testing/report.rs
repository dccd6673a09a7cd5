//! Run summary and JSON report

use std::path::Path;

use serde::Serialize;

use crate::common::{Error, Result};

use super::runner::TestResult;

/// Pass/fail counts of a run
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage of passed cases; 0 for an empty run
    pub success_rate: f64,
}

impl Summary {
    pub fn from_results(results: &[TestResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let success_rate = if total == 0 {
            0.0
        } else {
            passed as f64 * 100.0 / total as f64
        };
        Self {
            total,
            passed,
            failed: total - passed,
            success_rate,
        }
    }

    /// True only when at least one case ran and none failed
    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.failed == 0
    }
}

/// Machine-readable record of a whole run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub base_url: &'a str,
    /// RFC 3339 start time
    pub started_at: String,
    pub duration_ms: u64,
    pub summary: Summary,
    pub results: &'a [TestResult],
}

/// Write the report as pretty JSON
pub fn write_report(path: &Path, report: &Report<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|e| Error::FileWrite {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}
