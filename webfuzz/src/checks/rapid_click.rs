//! `rapidClick`: a burst of simultaneous clicks on one interactive target
//! must not produce a 5xx or an uncaught page error.
//!
//! Targets come from the configured forms (their submit selector, unless
//! overridden) and buttons. A target that is not visible when the trial
//! reaches it passes vacuously.

use async_trait::async_trait;
use rand::RngCore;
use serde::Serialize;

use crate::arbitrary::{int_range, Arbitrary, IntRangeArb};
use crate::config::RunConfig;
use crate::context::TrialContext;
use crate::error::{ArbitraryError, EngineError, TrialError};
use crate::report::CheckResult;
use crate::runner::{run_property, Predicate, RunnerOptions};
use crate::session::SessionDriver;

use super::{assert_page_healthy, navigate_expecting_success, page_url, Check};

const SETTLE: std::time::Duration = std::time::Duration::from_millis(500);
const MIN_CLICKS: usize = 2;

#[derive(Debug, Clone, Serialize)]
pub struct RapidClickInput {
    /// Index into the resolved target list.
    pub target: usize,
    pub clicks: usize,
}

struct RapidClickArb {
    target: IntRangeArb,
    clicks: IntRangeArb,
}

impl Arbitrary for RapidClickArb {
    type Value = RapidClickInput;

    fn generate(&self, rng: &mut dyn RngCore) -> Result<RapidClickInput, ArbitraryError> {
        Ok(RapidClickInput {
            target: self.target.generate(rng)?,
            clicks: self.clicks.generate(rng)?,
        })
    }

    fn shrink(&self, value: &RapidClickInput) -> Box<dyn Iterator<Item = RapidClickInput>> {
        let mut candidates = Vec::new();
        for target in self.target.shrink(&value.target) {
            candidates.push(RapidClickInput {
                target,
                clicks: value.clicks,
            });
        }
        for clicks in self.clicks.shrink(&value.clicks) {
            candidates.push(RapidClickInput {
                target: value.target,
                clicks,
            });
        }
        Box::new(candidates.into_iter())
    }
}

/// A resolved (page, selector) click target.
#[derive(Debug, Clone)]
struct ClickTarget {
    path: String,
    selector: String,
}

fn resolve_targets(config: &RunConfig) -> Vec<ClickTarget> {
    let mut targets = Vec::new();
    for form in &config.forms {
        let selector = config
            .check_options
            .rapid_click
            .target_selector
            .clone()
            .unwrap_or_else(|| form.submit.clone());
        targets.push(ClickTarget {
            path: form.path.clone(),
            selector,
        });
    }
    for button in &config.buttons {
        targets.push(ClickTarget {
            path: button.path.clone(),
            selector: button.selector.clone(),
        });
    }
    targets
}

pub struct RapidClick;

struct BurstClick<'a> {
    config: &'a RunConfig,
    targets: &'a [ClickTarget],
}

#[async_trait]
impl Predicate<RapidClickInput> for BurstClick<'_> {
    async fn test(
        &self,
        input: &RapidClickInput,
        session: &mut dyn SessionDriver,
        ctx: &mut TrialContext,
    ) -> Result<(), TrialError> {
        let target = &self.targets[input.target];
        let url = page_url(self.config, &target.path);
        navigate_expecting_success(session, ctx, &url).await?;

        if !session.query_visible(&target.selector).await {
            // Nothing to click; the trial holds vacuously.
            return Ok(());
        }

        session.click_burst(&target.selector, input.clicks).await?;
        session.settle(SETTLE).await;
        assert_page_healthy(session, ctx).await
    }
}

#[async_trait]
impl Check for RapidClick {
    fn name(&self) -> &'static str {
        "rapidClick"
    }

    fn enabled(&self, config: &RunConfig) -> bool {
        config.checks.rapid_click
    }

    fn skip_reason(&self, config: &RunConfig) -> Option<String> {
        if resolve_targets(config).is_empty() {
            Some("no clickable targets configured".to_string())
        } else {
            None
        }
    }

    async fn execute(
        &self,
        session: &mut dyn SessionDriver,
        config: &RunConfig,
        options: &RunnerOptions,
    ) -> Result<CheckResult, EngineError> {
        if let Some(reason) = self.skip_reason(config) {
            return Ok(CheckResult::skipped(self.name(), reason));
        }
        let targets = resolve_targets(config);
        let max_clicks = config.check_options.rapid_click.max_clicks.max(MIN_CLICKS);
        let arbitrary = RapidClickArb {
            target: int_range(0, targets.len() - 1),
            clicks: int_range(MIN_CLICKS, max_clicks),
        };
        let predicate = BurstClick {
            config,
            targets: &targets,
        };
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
