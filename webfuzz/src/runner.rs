//! The property runner.
//!
//! [`run_property`] executes one property against a live session: generate an
//! input from a per-trial sub-seed, run the predicate, and on the first
//! failure shrink greedily toward a minimal counterexample. Trials run
//! strictly in sequence because they share one stateful session.

use std::time::Instant;

use serde::Serialize;

use crate::arbitrary::Arbitrary;
use crate::context::TrialContext;
use crate::error::{ArbitraryError, EngineError, TrialError, TrialFailure};
use crate::report::CheckResult;
use crate::rng::{create_seeded_rng, trial_seed};
use crate::session::SessionDriver;

pub const DEFAULT_NUM_RUNS: usize = 50;
pub const DEFAULT_MAX_SHRINK_ATTEMPTS: usize = 500;

/// Knobs for one property run.
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Master seed; each trial derives its own sub-seed from it.
    pub seed: u64,
    pub num_runs: usize,
    pub max_shrink_attempts: usize,
}

impl RunnerOptions {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            num_runs: DEFAULT_NUM_RUNS,
            max_shrink_attempts: DEFAULT_MAX_SHRINK_ATTEMPTS,
        }
    }

    pub fn with_num_runs(mut self, num_runs: usize) -> Self {
        self.num_runs = num_runs;
        self
    }
}

/// The property under test: exercises the session with one generated input
/// and checks its postcondition.
#[async_trait::async_trait]
pub trait Predicate<T>: Sync {
    async fn test(
        &self,
        input: &T,
        session: &mut dyn SessionDriver,
        ctx: &mut TrialContext,
    ) -> Result<(), TrialError>;
}

/// Run `predicate` for up to `num_runs` generated inputs.
///
/// The first failing input is shrunk by repeatedly replacing it with the
/// first shrink candidate that still fails, until no candidate fails or the
/// shrink budget runs out. Fatal errors abort the run immediately; the
/// surviving minimal input is reported as the counterexample.
pub async fn run_property<A, P>(
    name: &str,
    arbitrary: &A,
    predicate: &P,
    session: &mut dyn SessionDriver,
    ctx: &mut TrialContext,
    options: &RunnerOptions,
) -> Result<CheckResult, EngineError>
where
    A: Arbitrary + ?Sized,
    A::Value: Serialize,
    P: Predicate<A::Value> + ?Sized,
{
    let start = Instant::now();

    for trial in 0..options.num_runs {
        let sub_seed = trial_seed(options.seed, name, trial as u64);
        let mut rng = create_seeded_rng(sub_seed);
        let input = arbitrary.generate(&mut rng).map_err(|err| match err {
            ArbitraryError::FilterExhausted { .. } => EngineError::config(err.to_string()),
        })?;

        ctx.begin_trial(session);
        match predicate.test(&input, session, ctx).await {
            Ok(()) => continue,
            Err(TrialError::Fatal(err)) => return Err(err),
            Err(TrialError::Failed(failure)) => {
                let (minimal, final_failure, attempts) =
                    shrink_failure(arbitrary, predicate, session, ctx, input, failure, options)
                        .await?;
                let counterexample =
                    serde_json::to_value(&minimal).unwrap_or(serde_json::Value::Null);
                return Ok(CheckResult::failed(
                    name,
                    trial + 1,
                    attempts,
                    start.elapsed().as_millis() as u64,
                    counterexample,
                    final_failure.message,
                ));
            }
        }
    }

    Ok(CheckResult::passed(
        name,
        options.num_runs,
        start.elapsed().as_millis() as u64,
    ))
}

/// Greedy shrink: restart candidate enumeration from every newly accepted
/// (still failing) input, so each step only ever moves to a smaller value.
async fn shrink_failure<A, P>(
    arbitrary: &A,
    predicate: &P,
    session: &mut dyn SessionDriver,
    ctx: &mut TrialContext,
    input: A::Value,
    failure: TrialFailure,
    options: &RunnerOptions,
) -> Result<(A::Value, TrialFailure, usize), EngineError>
where
    A: Arbitrary + ?Sized,
    P: Predicate<A::Value> + ?Sized,
{
    let mut current = input;
    let mut current_failure = failure;
    let mut attempts = 0;

    'search: loop {
        // Materialize the candidate list; the lazy shrink iterator is not
        // Send and cannot be held across await points.
        let candidates: Vec<A::Value> = arbitrary.shrink(&current).collect();
        for candidate in candidates {
            if attempts >= options.max_shrink_attempts {
                break 'search;
            }
            attempts += 1;

            ctx.begin_trial(session);
            match predicate.test(&candidate, session, ctx).await {
                Ok(()) => continue,
                Err(TrialError::Fatal(err)) => return Err(err),
                Err(TrialError::Failed(next_failure)) => {
                    current = candidate;
                    current_failure = next_failure;
                    continue 'search;
                }
            }
        }
        break;
    }

    Ok((current, current_failure, attempts))
}
