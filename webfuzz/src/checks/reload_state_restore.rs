//! `reloadStateRestore`: reloading any reachable page keeps its URL and
//! leaves it healthy. Off by default; meaningful only for applications that
//! persist client state across reloads.

use async_trait::async_trait;

use crate::arbitrary::BoxedArb;
use crate::config::RunConfig;
use crate::context::TrialContext;
use crate::error::{EngineError, TrialError, TrialFailure};
use crate::report::CheckResult;
use crate::runner::{run_property, Predicate, RunnerOptions};
use crate::session::SessionDriver;
use crate::webpath::path_arbitrary;

use super::{assert_page_healthy, navigate_expecting_success, page_url, Check};

const SETTLE: std::time::Duration = std::time::Duration::from_millis(200);

pub struct ReloadStateRestore;

struct ReloadAndCompare<'a> {
    config: &'a RunConfig,
}

#[async_trait]
impl Predicate<String> for ReloadAndCompare<'_> {
    async fn test(
        &self,
        path: &String,
        session: &mut dyn SessionDriver,
        ctx: &mut TrialContext,
    ) -> Result<(), TrialError> {
        let url = page_url(self.config, path);
        navigate_expecting_success(session, ctx, &url).await?;
        let before = session.current_url().await;

        session.reload(ctx.action_timeout()).await?;
        session.settle(SETTLE).await;

        let after = session.current_url().await;
        if before != after {
            return Err(
                TrialFailure::new(format!("URL changed across reload: {before} -> {after}")).into(),
            );
        }
        assert_page_healthy(session, ctx).await
    }
}

#[async_trait]
impl Check for ReloadStateRestore {
    fn name(&self) -> &'static str {
        "reloadStateRestore"
    }

    fn enabled(&self, config: &RunConfig) -> bool {
        config.checks.reload_state_restore
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
        let predicate = ReloadAndCompare { config };
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
