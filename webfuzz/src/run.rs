//! Whole-run orchestration.
//!
//! Checks run strictly in sequence against the one shared session. A
//! configuration or fatal driver error aborts the run; everything that never
//! executed is recorded as skipped and the partial report travels with the
//! error.

use log::{debug, info, warn};
use rand::RngCore;

use crate::checks::{Check, CheckRegistry};
use crate::config::RunConfig;
use crate::error::{EngineError, FatalRun};
use crate::report::{CheckResult, CheckStatus, Report};
use crate::rng::create_rng;
use crate::runner::{RunnerOptions, DEFAULT_MAX_SHRINK_ATTEMPTS};
use crate::session::SessionDriver;

/// Caller-side overrides for one run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Master seed; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Overrides the configured trial count.
    pub num_runs: Option<usize>,
    /// Run only the named check, ignoring its toggle.
    pub check: Option<String>,
    pub max_shrink_attempts: Option<usize>,
}

/// Run the selected checks and assemble the report.
pub async fn run_checks(
    registry: &CheckRegistry,
    session: &mut dyn SessionDriver,
    config: &RunConfig,
    options: &RunOptions,
) -> Result<Report, FatalRun> {
    let seed = options.seed.unwrap_or_else(|| create_rng().next_u64());
    let runner_options = RunnerOptions {
        seed,
        num_runs: options.num_runs.unwrap_or(config.num_runs),
        max_shrink_attempts: options
            .max_shrink_attempts
            .unwrap_or(DEFAULT_MAX_SHRINK_ATTEMPTS),
    };
    info!(
        "starting run against {} (seed {seed}, {} trials per check)",
        config.base_url, runner_options.num_runs
    );

    let checks = match registry.resolve(config, options.check.as_deref()) {
        Ok(checks) => checks,
        Err(error) => {
            return Err(FatalRun {
                error,
                report: Report::new(&config.base_url, seed, Vec::new()),
            });
        }
    };

    let mut results = Vec::with_capacity(checks.len());
    let mut abort: Option<EngineError> = None;

    for (index, check) in checks.iter().enumerate() {
        if let Some(reason) = check.skip_reason(config) {
            info!("skipping {}: {reason}", check.name());
            results.push(CheckResult::skipped(check.name(), reason));
            continue;
        }

        debug!("running {}", check.name());
        match check.execute(session, config, &runner_options).await {
            Ok(result) => {
                match result.status {
                    CheckStatus::Fail => warn!(
                        "{} failed: {}",
                        result.name,
                        result.error_message.as_deref().unwrap_or("")
                    ),
                    _ => debug!("{} finished: {:?}", result.name, result.status),
                }
                results.push(result);
            }
            Err(error) => {
                warn!("{} aborted the run: {error}", check.name());
                results.push(CheckResult::skipped(
                    check.name(),
                    format!("aborted: {error}"),
                ));
                for unreached in &checks[index + 1..] {
                    results.push(CheckResult::skipped(
                        unreached.name(),
                        "run aborted before this check".to_string(),
                    ));
                }
                abort = Some(error);
                break;
            }
        }
    }

    let report = Report::new(&config.base_url, seed, results);
    match abort {
        Some(error) => Err(FatalRun { error, report }),
        None => {
            info!(
                "run finished: {} passed, {} failed, {} skipped",
                report.summary.passed, report.summary.failed, report.summary.skipped
            );
            Ok(report)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::MockSession;

    fn options_with_seed(seed: u64) -> RunOptions {
        RunOptions {
            seed: Some(seed),
            num_runs: Some(15),
            ..RunOptions::default()
        }
    }

    #[tokio::test]
    async fn test_default_run_covers_enabled_checks() {
        let registry = CheckRegistry::builtin();
        let mut session = MockSession::new();
        let config = RunConfig::default();
        let report = run_checks(&registry, &mut session, &config, &options_with_seed(21))
            .await
            .unwrap();

        // Five enabled by default; formFuzzing skips without forms.
        assert_eq!(report.summary.total, 5);
        assert_eq!(report.summary.failed, 0);
        assert_eq!(report.summary.skipped, 2);
        assert!(report.passed());
        assert_eq!(report.seed, 21);

        let form = report
            .results
            .iter()
            .find(|result| result.name == "formFuzzing")
            .unwrap();
        assert_eq!(form.status, CheckStatus::Skip);
        assert_eq!(form.trials_run, 0);
    }

    #[tokio::test]
    async fn test_single_check_selection() {
        let registry = CheckRegistry::builtin();
        let mut session = MockSession::new();
        let config = RunConfig::default();
        let mut options = options_with_seed(21);
        options.check = Some("noServerError".to_string());

        let report = run_checks(&registry, &mut session, &config, &options)
            .await
            .unwrap();
        assert_eq!(report.summary.total, 1);
        assert_eq!(report.results[0].name, "noServerError");
    }

    #[tokio::test]
    async fn test_unknown_check_fails_before_touching_the_session() {
        let registry = CheckRegistry::builtin();
        let mut session = MockSession::new();
        let config = RunConfig::default();
        let mut options = options_with_seed(21);
        options.check = Some("definitelyNot".to_string());

        let fatal = run_checks(&registry, &mut session, &config, &options)
            .await
            .unwrap_err();
        assert!(matches!(fatal.error, EngineError::Config { .. }));
        assert!(fatal.report.results.is_empty());
        assert_eq!(session.navigations, 0);
    }

    #[tokio::test]
    async fn test_fatal_abort_carries_partial_report() {
        let registry = CheckRegistry::builtin();
        let mut session = MockSession::new();
        session.fatal_after_navigations = Some(3);
        let config = RunConfig::default();

        let fatal = run_checks(&registry, &mut session, &config, &options_with_seed(21))
            .await
            .unwrap_err();
        assert!(matches!(fatal.error, EngineError::DriverFatal { .. }));

        // Every selected check is accounted for, none silently missing.
        assert_eq!(fatal.report.summary.total, 5);
        assert!(fatal
            .report
            .results
            .iter()
            .all(|result| result.status == CheckStatus::Skip));
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_later_checks() {
        let registry = CheckRegistry::builtin();
        let mut session = MockSession::new().with_status("/", 500);
        let config = RunConfig::default();
        let report = run_checks(&registry, &mut session, &config, &options_with_seed(21))
            .await
            .unwrap();

        assert!(report.summary.failed >= 1);
        // The run still reached every selected check.
        assert_eq!(report.summary.total, 5);
        assert!(!report.passed());
    }
}
