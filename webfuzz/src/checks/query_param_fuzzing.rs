//! `queryParamFuzzing`: adversarial query strings on any reachable path must
//! not produce a 5xx or an uncaught page error.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rand::RngCore;
use serde::Serialize;
use url::Url;

use crate::arbitrary::{Arbitrary, BoxedArb, DictArb};
use crate::config::RunConfig;
use crate::context::TrialContext;
use crate::error::{ArbitraryError, EngineError, TrialError, TrialFailure};
use crate::report::CheckResult;
use crate::runner::{run_property, Predicate, RunnerOptions};
use crate::session::SessionDriver;
use crate::webpath::{path_arbitrary, query_params};

use super::{assert_page_healthy, navigate_expecting_success, page_url, Check};

const SETTLE: std::time::Duration = std::time::Duration::from_millis(200);

#[derive(Debug, Clone, Serialize)]
pub struct QueryFuzzInput {
    pub path: String,
    pub params: BTreeMap<String, String>,
}

/// Pairs a path with a generated parameter map; shrinks component-wise.
struct QueryFuzzArb {
    path: BoxedArb<String>,
    params: DictArb,
}

impl Arbitrary for QueryFuzzArb {
    type Value = QueryFuzzInput;

    fn generate(&self, rng: &mut dyn RngCore) -> Result<QueryFuzzInput, ArbitraryError> {
        Ok(QueryFuzzInput {
            path: self.path.generate(rng)?,
            params: self.params.generate(rng)?,
        })
    }

    fn shrink(&self, value: &QueryFuzzInput) -> Box<dyn Iterator<Item = QueryFuzzInput>> {
        let mut candidates = Vec::new();
        for path in self.path.shrink(&value.path) {
            candidates.push(QueryFuzzInput {
                path,
                params: value.params.clone(),
            });
        }
        for params in self.params.shrink(&value.params) {
            candidates.push(QueryFuzzInput {
                path: value.path.clone(),
                params,
            });
        }
        Box::new(candidates.into_iter())
    }
}

pub struct QueryParamFuzzing;

struct VisitWithParams<'a> {
    config: &'a RunConfig,
}

#[async_trait]
impl Predicate<QueryFuzzInput> for VisitWithParams<'_> {
    async fn test(
        &self,
        input: &QueryFuzzInput,
        session: &mut dyn SessionDriver,
        ctx: &mut TrialContext,
    ) -> Result<(), TrialError> {
        let mut url = Url::parse(&page_url(self.config, &input.path))
            .map_err(|err| TrialFailure::new(format!("unparseable URL: {err}")))?;
        if !input.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&input.params);
        }

        navigate_expecting_success(session, ctx, url.as_str()).await?;
        session.settle(SETTLE).await;
        assert_page_healthy(session, ctx).await
    }
}

#[async_trait]
impl Check for QueryParamFuzzing {
    fn name(&self) -> &'static str {
        "queryParamFuzzing"
    }

    fn enabled(&self, config: &RunConfig) -> bool {
        config.checks.query_param_fuzzing
    }

    fn skip_reason(&self, _config: &RunConfig) -> Option<String> {
        None
    }

    async fn execute(
        &self,
        session: &mut dyn SessionDriver,
        config: &RunConfig,
        options: &RunnerOptions,
    ) -> Result<CheckResult, EngineError> {
        let arbitrary = QueryFuzzArb {
            path: path_arbitrary(&config.paths),
            params: query_params(),
        };
        let predicate = VisitWithParams { config };
        let mut ctx = TrialContext::new(config.action_timeout());
        run_property(
            self.name(),
            &arbitrary,
            &predicate,
            session,
            &mut ctx,
            options,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CheckStatus;
    use crate::rng::create_seeded_rng;
    use crate::session::mock::MockSession;

    #[tokio::test]
    async fn test_passes_when_params_are_harmless() {
        let mut session = MockSession::new();
        let config = RunConfig::default();
        let result = QueryParamFuzzing
            .execute(&mut session, &config, &RunnerOptions::new(9).with_num_runs(30))
            .await
            .unwrap();
        assert_eq!(result.status, CheckStatus::Pass);
    }

    #[tokio::test]
    async fn test_server_error_shrinks_params_away() {
        // The path alone triggers the 500, so shrinking strips the params.
        let mut session = MockSession::new().with_status("/", 500);
        let config = RunConfig::default();
        let result = QueryParamFuzzing
            .execute(&mut session, &config, &RunnerOptions::new(9).with_num_runs(30))
            .await
            .unwrap();
        assert_eq!(result.status, CheckStatus::Fail);
        let value = result.counterexample.unwrap();
        assert_eq!(value["path"], "/");
        assert_eq!(value["params"], serde_json::json!({}));
    }

    #[test]
    fn test_generated_inputs_keep_paths_inside_the_include_set() {
        let mut config = RunConfig::default();
        config.paths.exclude = vec!["/api/**".to_string(), "/api".to_string()];
        let arbitrary = QueryFuzzArb {
            path: path_arbitrary(&config.paths),
            params: query_params(),
        };
        let mut rng = create_seeded_rng(4);
        for _ in 0..200 {
            let input = arbitrary.generate(&mut rng).unwrap();
            assert_ne!(input.path, "/api");
            assert!(!input.path.starts_with("/api/"));
        }
    }
}
