//! # Webfuzz - Property-Based Fuzzing for Web Sessions
//!
//! Webfuzz drives a live web application through randomized interaction
//! sequences and checks robustness properties over the outcome: no path
//! serves a 5xx, adversarial form and query input never crashes a page,
//! history walks and rapid clicks leave the page healthy.
//!
//! A run is fully determined by its master seed: every check derives a
//! sub-seed per trial, so any failure replays exactly from the seed in the
//! report. The first failing input is shrunk to a minimal counterexample
//! before it is reported.
//!
//! The engine is driver-agnostic: implement [`SessionDriver`] for whatever
//! controls your session and hand it to [`run_checks`].

// Public modules
pub mod adversarial;
pub mod arbitrary;
pub mod checks;
pub mod config;
pub mod context;
pub mod error;
pub mod report;
pub mod rng;
pub mod run;
pub mod runner;
pub mod session;
pub mod webpath;

// Re-export the main public API
pub use arbitrary::{
    boxed, constant, dict_of, filter, int_range, json_string, one_of, record, string_of, vec_of,
    Arbitrary, BoxedArb,
};
pub use checks::{Check, CheckRegistry};
pub use config::{
    ButtonTarget, CheckToggles, CheckTuning, FormTarget, PathConfig, RapidClickTuning, RunConfig,
};
pub use context::TrialContext;
pub use error::{ArbitraryError, EngineError, FatalRun, TrialError, TrialFailure};
pub use report::{CheckResult, CheckStatus, Report, Summary};
pub use rng::{create_rng, create_seeded_rng, trial_seed};
pub use run::{run_checks, RunOptions};
pub use runner::{run_property, Predicate, RunnerOptions};
pub use session::{tolerate, DriverError, DriverEvent, SessionDriver};
