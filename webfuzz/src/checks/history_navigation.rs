//! `historyNavigation`: arbitrary interleavings of back, forward, and fresh
//! navigations must leave the page healthy.

use async_trait::async_trait;
use rand::{Rng, RngCore};
use serde::Serialize;

use crate::arbitrary::{vec_of, Arbitrary, BoxedArb, VecArb};
use crate::config::RunConfig;
use crate::context::TrialContext;
use crate::error::{ArbitraryError, EngineError, TrialError};
use crate::report::CheckResult;
use crate::runner::{run_property, Predicate, RunnerOptions};
use crate::session::{tolerate, SessionDriver};
use crate::webpath::path_arbitrary;

use super::{assert_page_healthy, navigate_expecting_success, page_url, Check};

const MAX_ACTIONS: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Back,
    Forward,
    Navigate(String),
}

/// Single history action; `Navigate` carries a generated path.
struct HistoryActionArb {
    path: BoxedArb<String>,
}

impl Arbitrary for HistoryActionArb {
    type Value = HistoryAction;

    fn generate(&self, rng: &mut dyn RngCore) -> Result<HistoryAction, ArbitraryError> {
        Ok(match rng.gen_range(0..3u32) {
            0 => HistoryAction::Back,
            1 => HistoryAction::Forward,
            _ => HistoryAction::Navigate(self.path.generate(rng)?),
        })
    }

    fn shrink(&self, value: &HistoryAction) -> Box<dyn Iterator<Item = HistoryAction>> {
        match value {
            HistoryAction::Back => Box::new(std::iter::empty()),
            HistoryAction::Forward => Box::new(std::iter::once(HistoryAction::Back)),
            HistoryAction::Navigate(path) => Box::new(
                std::iter::once(HistoryAction::Back).chain(
                    self.path
                        .shrink(path)
                        .map(HistoryAction::Navigate)
                        .collect::<Vec<_>>(),
                ),
            ),
        }
    }
}

pub struct HistoryNavigation;

struct WalkHistory<'a> {
    config: &'a RunConfig,
}

#[async_trait]
impl Predicate<Vec<HistoryAction>> for WalkHistory<'_> {
    async fn test(
        &self,
        actions: &Vec<HistoryAction>,
        session: &mut dyn SessionDriver,
        ctx: &mut TrialContext,
    ) -> Result<(), TrialError> {
        // Anchor the history at the root before replaying the sequence.
        let root = page_url(self.config, "/");
        navigate_expecting_success(session, ctx, &root).await?;

        for action in actions {
            match action {
                HistoryAction::Back => {
                    tolerate(session.go_back(ctx.action_timeout()).await)?;
                }
                HistoryAction::Forward => {
                    tolerate(session.go_forward(ctx.action_timeout()).await)?;
                }
                HistoryAction::Navigate(path) => {
                    let url = page_url(self.config, path);
                    navigate_expecting_success(session, ctx, &url).await?;
                }
            }
        }

        assert_page_healthy(session, ctx).await
    }
}

#[async_trait]
impl Check for HistoryNavigation {
    fn name(&self) -> &'static str {
        "historyNavigation"
    }

    fn enabled(&self, config: &RunConfig) -> bool {
        config.checks.history_navigation
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
        let arbitrary: VecArb<HistoryActionArb> = vec_of(
            HistoryActionArb {
                path: path_arbitrary(&config.paths),
            },
            1,
            MAX_ACTIONS,
        );
        let predicate = WalkHistory { config };
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
