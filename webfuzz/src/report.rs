//! Run report data model.
//!
//! The report is the machine-readable outcome of a run: one [`CheckResult`]
//! per executed check plus a [`Summary`]. Field names are stable camelCase so
//! downstream tooling can rely on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const REPORT_VERSION: u32 = 1;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Skip,
}

/// The outcome of running one check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    /// Trials executed before the verdict, shrinking excluded.
    pub trials_run: usize,
    /// Shrink candidates evaluated after the first failure.
    pub shrink_attempts: usize,
    /// Wall-clock duration of the whole check in milliseconds.
    pub duration_ms: u64,
    /// Minimal failing input, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterexample: Option<serde_json::Value>,
    /// Failure or skip explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl CheckResult {
    pub fn passed(name: &str, trials_run: usize, duration_ms: u64) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Pass,
            trials_run,
            shrink_attempts: 0,
            duration_ms,
            counterexample: None,
            error_message: None,
        }
    }

    pub fn failed(
        name: &str,
        trials_run: usize,
        shrink_attempts: usize,
        duration_ms: u64,
        counterexample: serde_json::Value,
        message: String,
    ) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Fail,
            trials_run,
            shrink_attempts,
            duration_ms,
            counterexample: Some(counterexample),
            error_message: Some(message),
        }
    }

    /// A skipped check ran zero trials and carries its reason.
    pub fn skipped(name: &str, reason: String) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Skip,
            trials_run: 0,
            shrink_attempts: 0,
            duration_ms: 0,
            counterexample: None,
            error_message: Some(reason),
        }
    }
}

/// Per-status tallies over all results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let mut summary = Summary {
            total: results.len(),
            passed: 0,
            failed: 0,
            skipped: 0,
        };
        for result in results {
            match result.status {
                CheckStatus::Pass => summary.passed += 1,
                CheckStatus::Fail => summary.failed += 1,
                CheckStatus::Skip => summary.skipped += 1,
            }
        }
        summary
    }
}

/// The full outcome of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    pub base_url: String,
    /// The master seed, always recorded so any run can be replayed.
    pub seed: u64,
    pub results: Vec<CheckResult>,
    pub summary: Summary,
}

impl Report {
    pub fn new(base_url: &str, seed: u64, results: Vec<CheckResult>) -> Self {
        let summary = Summary::from_results(&results);
        Self {
            version: REPORT_VERSION,
            timestamp: Utc::now(),
            base_url: base_url.to_string(),
            seed,
            results,
            summary,
        }
    }

    /// A run passes when nothing failed; skips do not count against it.
    pub fn passed(&self) -> bool {
        self.summary.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_tallies() {
        let results = vec![
            CheckResult::passed("a", 50, 12),
            CheckResult::failed(
                "b",
                3,
                7,
                40,
                serde_json::json!({"path": "/x"}),
                "server error".to_string(),
            ),
            CheckResult::skipped("c", "no forms configured".to_string()),
        ];
        let summary = Summary::from_results(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_report_passes_with_skips() {
        let report = Report::new(
            "http://localhost:3000",
            42,
            vec![
                CheckResult::passed("a", 50, 1),
                CheckResult::skipped("b", "no targets".to_string()),
            ],
        );
        assert!(report.passed());

        let report = Report::new(
            "http://localhost:3000",
            42,
            vec![CheckResult::failed(
                "a",
                1,
                0,
                1,
                serde_json::json!(null),
                "boom".to_string(),
            )],
        );
        assert!(!report.passed());
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = CheckResult::failed(
            "noServerError",
            3,
            11,
            40,
            serde_json::json!("/admin"),
            "HTTP 500".to_string(),
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "fail");
        assert_eq!(value["trialsRun"], 3);
        assert_eq!(value["shrinkAttempts"], 11);
        assert_eq!(value["durationMs"], 40);
        assert_eq!(value["errorMessage"], "HTTP 500");
    }

    #[test]
    fn test_passed_result_omits_counterexample() {
        let value = serde_json::to_value(CheckResult::passed("ok", 50, 2)).unwrap();
        assert!(value.get("counterexample").is_none());
        assert!(value.get("errorMessage").is_none());
    }

    #[test]
    fn test_skipped_result_ran_no_trials() {
        let result = CheckResult::skipped("formFuzzing", "no forms configured".to_string());
        assert_eq!(result.trials_run, 0);
        assert_eq!(
            result.error_message.as_deref(),
            Some("no forms configured")
        );
    }
}
