//! Error taxonomy for the check engine.
//!
//! Three tiers, matching how failures propagate:
//!
//! - [`TrialFailure`] is recoverable at the trial level. It feeds the shrink
//!   search and ends up as a `fail` result with a counterexample.
//! - [`EngineError::Config`] means a check cannot run meaningfully as
//!   configured (an exhausted filter budget, an unknown check name). It is
//!   never a silent pass.
//! - [`EngineError::DriverFatal`] means the session driver itself is
//!   unusable. It aborts the whole run and surfaces as [`FatalRun`].

use crate::report::Report;

/// A predicate rejected one sampled input.
///
/// This is the only failure kind eligible for shrinking; everything else
/// escapes the property runner.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TrialFailure {
    pub message: String,
}

impl TrialFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of one predicate invocation, as seen by the property runner.
#[derive(Debug, thiserror::Error)]
pub enum TrialError {
    /// The sampled input violated the property. Recoverable; shrinkable.
    #[error(transparent)]
    Failed(#[from] TrialFailure),

    /// The run as a whole cannot continue.
    #[error(transparent)]
    Fatal(#[from] EngineError),
}

/// Run-level errors. Neither variant is caught inside the property runner.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// The configuration cannot produce a meaningful run.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// The session driver became unusable mid-run.
    #[error("session driver failure: {message}")]
    DriverFatal { message: String },
}

impl EngineError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn driver_fatal(message: impl Into<String>) -> Self {
        Self::DriverFatal {
            message: message.into(),
        }
    }
}

/// Generator-level errors, raised while drawing a sample.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArbitraryError {
    /// A `filter` rejected every candidate within its retry budget. The
    /// generator is over-constrained; this is a configuration problem, not
    /// an empty result.
    #[error("filter retry budget exhausted after {attempts} attempts")]
    FilterExhausted { attempts: usize },
}

/// A run that terminated before producing a complete report.
///
/// Carries the partial report (results up to the abort, plus `skip` entries
/// for every check that never executed) so the caller can still show what
/// happened, distinctly from ordinary check failures.
#[derive(Debug, thiserror::Error)]
#[error("run aborted: {error}")]
pub struct FatalRun {
    #[source]
    pub error: EngineError,
    pub report: Report,
}
