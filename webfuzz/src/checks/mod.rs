//! Built-in checks.
//!
//! A check binds an input arbitrary to a predicate over the live session and
//! runs them through the property runner. Every check shares the same
//! postcondition baseline: after the generated actions the page body is
//! visible and no uncaught page error surfaced during the trial.

use async_trait::async_trait;

use crate::config::RunConfig;
use crate::context::TrialContext;
use crate::error::{EngineError, TrialError, TrialFailure};
use crate::report::CheckResult;
use crate::runner::RunnerOptions;
use crate::session::SessionDriver;

mod form_fuzzing;
mod history_navigation;
mod no_server_error;
mod query_param_fuzzing;
mod rapid_click;
mod registry;
mod reload_state_restore;

pub use form_fuzzing::FormFuzzing;
pub use history_navigation::HistoryNavigation;
pub use no_server_error::NoServerError;
pub use query_param_fuzzing::QueryParamFuzzing;
pub use rapid_click::RapidClick;
pub use registry::CheckRegistry;
pub use reload_state_restore::ReloadStateRestore;

/// One named, independently runnable check.
#[async_trait]
pub trait Check: Send + Sync {
    /// Stable name, used for selection and reporting.
    fn name(&self) -> &'static str;

    /// Whether the configuration enables this check.
    fn enabled(&self, config: &RunConfig) -> bool;

    /// A reason to skip without touching the session, if one applies.
    fn skip_reason(&self, config: &RunConfig) -> Option<String>;

    /// Run the check to completion against the session.
    async fn execute(
        &self,
        session: &mut dyn SessionDriver,
        config: &RunConfig,
        options: &RunnerOptions,
    ) -> Result<CheckResult, EngineError>;
}

/// Join a base URL and an absolute path.
pub(crate) fn page_url(config: &RunConfig, path: &str) -> String {
    format!("{}{}", config.base_url.trim_end_matches('/'), path)
}

/// The shared postcondition: collect trial evidence, then require a visible
/// body and an empty page-error buffer.
pub(crate) async fn assert_page_healthy(
    session: &mut dyn SessionDriver,
    ctx: &mut TrialContext,
) -> Result<(), TrialError> {
    ctx.collect(session);
    if let Some(message) = ctx.first_page_error() {
        return Err(TrialFailure::new(format!("uncaught page error: {message}")).into());
    }
    if !session.query_visible("body").await {
        return Err(TrialFailure::new("page body is not visible").into());
    }
    Ok(())
}

/// Navigate and fail the trial on a server-side error status.
pub(crate) async fn navigate_expecting_success(
    session: &mut dyn SessionDriver,
    ctx: &TrialContext,
    url: &str,
) -> Result<u16, TrialError> {
    let status = session.navigate(url, ctx.action_timeout()).await?;
    if status >= 500 {
        return Err(TrialFailure::new(format!("HTTP {status} at {url}")).into());
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::MockSession;
    use crate::session::DriverEvent;
    use std::time::Duration;

    #[tokio::test]
    async fn test_healthy_page_passes_baseline() {
        let mut session = MockSession::new();
        let mut ctx = TrialContext::new(Duration::from_secs(5));
        session
            .navigate("http://t.local/", Duration::from_secs(1))
            .await
            .unwrap();
        assert!(assert_page_healthy(&mut session, &mut ctx).await.is_ok());
    }

    #[tokio::test]
    async fn test_page_error_fails_baseline() {
        let mut session = MockSession::new();
        let mut ctx = TrialContext::new(Duration::from_secs(5));
        session.push_event(DriverEvent::PageError("ReferenceError: x".to_string()));
        let err = assert_page_healthy(&mut session, &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, TrialError::Failed(_)));
        assert!(err.to_string().contains("ReferenceError"));
    }

    #[tokio::test]
    async fn test_invisible_body_fails_baseline() {
        let mut session = MockSession::new();
        session.visible = false;
        let mut ctx = TrialContext::new(Duration::from_secs(5));
        let err = assert_page_healthy(&mut session, &mut ctx)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not visible"));
    }

    #[tokio::test]
    async fn test_navigate_expecting_success_flags_5xx() {
        let mut session = MockSession::new().with_status("/crash", 500);
        let ctx = TrialContext::new(Duration::from_secs(5));
        let err = navigate_expecting_success(&mut session, &ctx, "http://t.local/crash")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("HTTP 500"));

        // 4xx is a client problem, not a property violation.
        let mut session = MockSession::new().with_status("/missing", 404);
        let status = navigate_expecting_success(&mut session, &ctx, "http://t.local/missing")
            .await
            .unwrap();
        assert_eq!(status, 404);
    }
}
