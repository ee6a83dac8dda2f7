//! `noServerError`: no reachable path answers with a 5xx status or throws an
//! uncaught page error on load.

use async_trait::async_trait;

use crate::arbitrary::BoxedArb;
use crate::config::RunConfig;
use crate::context::TrialContext;
use crate::error::{EngineError, TrialError};
use crate::report::CheckResult;
use crate::runner::{run_property, Predicate, RunnerOptions};
use crate::session::SessionDriver;
use crate::webpath::path_arbitrary;

use super::{assert_page_healthy, navigate_expecting_success, page_url, Check};

pub struct NoServerError;

struct VisitPath<'a> {
    config: &'a RunConfig,
}

#[async_trait]
impl Predicate<String> for VisitPath<'_> {
    async fn test(
        &self,
        path: &String,
        session: &mut dyn SessionDriver,
        ctx: &mut TrialContext,
    ) -> Result<(), TrialError> {
        let url = page_url(self.config, path);
        navigate_expecting_success(session, ctx, &url).await?;
        assert_page_healthy(session, ctx).await
    }
}

#[async_trait]
impl Check for NoServerError {
    fn name(&self) -> &'static str {
        "noServerError"
    }

    fn enabled(&self, config: &RunConfig) -> bool {
        config.checks.no_server_error
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
        let arbitrary: BoxedArb<String> = path_arbitrary(&config.paths);
        let predicate = VisitPath { config };
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
