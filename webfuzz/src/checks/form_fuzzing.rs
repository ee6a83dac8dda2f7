//! `formFuzzing`: submitting adversarial values through a configured form
//! must not produce a 5xx or an uncaught page error.
//!
//! Field names are generated; fills targeting inputs the form does not have
//! are tolerated as no-ops, so the check degrades gracefully instead of
//! depending on DOM introspection.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rand::RngCore;
use serde::Serialize;

use crate::adversarial::fuzz_value;
use crate::arbitrary::{
    boxed, dict_of, int_range, one_of, string_of, Arbitrary, DictArb, IntRangeArb, OneOfArb,
};
use crate::config::RunConfig;
use crate::context::TrialContext;
use crate::error::{ArbitraryError, EngineError, TrialError};
use crate::report::CheckResult;
use crate::runner::{run_property, Predicate, RunnerOptions};
use crate::session::{tolerate, SessionDriver};

use super::{assert_page_healthy, navigate_expecting_success, page_url, Check};

const SETTLE: std::time::Duration = std::time::Duration::from_millis(500);

/// Field names forms commonly use, mixed with random ones.
const COMMON_FIELD_NAMES: &[&str] = &[
    "username", "email", "password", "name", "title", "message", "comment", "search", "q",
    "subject", "body", "url", "phone",
];

#[derive(Debug, Clone, Serialize)]
pub struct FormFuzzInput {
    /// Index into the configured form list.
    pub form: usize,
    pub fields: BTreeMap<String, String>,
}

struct FormFuzzArb {
    form: IntRangeArb,
    fields: DictArb,
}

impl FormFuzzArb {
    fn new(form_count: usize) -> Self {
        let key = one_of(vec![
            boxed(OneOfArb::constants(
                COMMON_FIELD_NAMES.iter().map(|n| n.to_string()).collect(),
            )),
            boxed(string_of("abcdefghijklmnopqrstuvwxyz_", 1, 12)),
        ]);
        Self {
            form: int_range(0, form_count - 1),
            fields: dict_of(boxed(key), fuzz_value(), 1, 6),
        }
    }
}

impl Arbitrary for FormFuzzArb {
    type Value = FormFuzzInput;

    fn generate(&self, rng: &mut dyn RngCore) -> Result<FormFuzzInput, ArbitraryError> {
        Ok(FormFuzzInput {
            form: self.form.generate(rng)?,
            fields: self.fields.generate(rng)?,
        })
    }

    fn shrink(&self, value: &FormFuzzInput) -> Box<dyn Iterator<Item = FormFuzzInput>> {
        let mut candidates = Vec::new();
        for form in self.form.shrink(&value.form) {
            candidates.push(FormFuzzInput {
                form,
                fields: value.fields.clone(),
            });
        }
        for fields in self.fields.shrink(&value.fields) {
            candidates.push(FormFuzzInput {
                form: value.form,
                fields,
            });
        }
        Box::new(candidates.into_iter())
    }
}

pub struct FormFuzzing;

struct SubmitForm<'a> {
    config: &'a RunConfig,
}

#[async_trait]
impl Predicate<FormFuzzInput> for SubmitForm<'_> {
    async fn test(
        &self,
        input: &FormFuzzInput,
        session: &mut dyn SessionDriver,
        ctx: &mut TrialContext,
    ) -> Result<(), TrialError> {
        let form = &self.config.forms[input.form];
        let url = page_url(self.config, &form.path);
        navigate_expecting_success(session, ctx, &url).await?;

        for (name, value) in &input.fields {
            let selector = format!("{} [name=\"{}\"]", form.selector, name);
            tolerate(session.fill_field(&selector, value).await)?;
        }
        tolerate(session.click_element(&form.submit, false).await)?;

        session.settle(SETTLE).await;
        assert_page_healthy(session, ctx).await
    }
}

#[async_trait]
impl Check for FormFuzzing {
    fn name(&self) -> &'static str {
        "formFuzzing"
    }

    fn enabled(&self, config: &RunConfig) -> bool {
        config.checks.form_fuzzing
    }

    fn skip_reason(&self, config: &RunConfig) -> Option<String> {
        if config.forms.is_empty() {
            Some("no forms configured".to_string())
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
        // An empty form list is a skip, not an error; guard here too so the
        // check is safe to call directly.
        if let Some(reason) = self.skip_reason(config) {
            return Ok(CheckResult::skipped(self.name(), reason));
        }
        let arbitrary = FormFuzzArb::new(config.forms.len());
        let predicate = SubmitForm { config };
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
    use crate::config::FormTarget;
    use crate::report::CheckStatus;
    use crate::session::mock::MockSession;

    fn config_with_form() -> RunConfig {
        let mut config = RunConfig::default();
        config.forms = vec![FormTarget {
            path: "/contact".to_string(),
            selector: "#contact-form".to_string(),
            submit: "#contact-form button[type=\"submit\"]".to_string(),
        }];
        config
    }

    #[tokio::test]
    async fn test_skips_without_forms() {
        let config = RunConfig::default();
        assert_eq!(
            FormFuzzing.skip_reason(&config).as_deref(),
            Some("no forms configured")
        );
    }

    #[tokio::test]
    async fn test_execute_without_forms_skips_before_any_trial() {
        let mut session = MockSession::new();
        let result = FormFuzzing
            .execute(&mut session, &RunConfig::default(), &RunnerOptions::new(1))
            .await
            .unwrap();
        assert_eq!(result.status, CheckStatus::Skip);
        assert_eq!(result.trials_run, 0);
        assert!(session.fills.is_empty());
        assert!(session.clicks.is_empty());
    }

    #[tokio::test]
    async fn test_fills_and_submits_the_configured_form() {
        let mut session = MockSession::new();
        let config = config_with_form();
        let result = FormFuzzing
            .execute(&mut session, &config, &RunnerOptions::new(6).with_num_runs(10))
            .await
            .unwrap();
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(session
            .fills
            .iter()
            .all(|(selector, _)| selector.starts_with("#contact-form [name=")));
        assert!(session
            .clicks
            .iter()
            .any(|(selector, _)| selector == "#contact-form button[type=\"submit\"]"));
    }

    #[tokio::test]
    async fn test_uninteractable_fields_are_tolerated() {
        let mut session = MockSession::new();
        session.interactable = false;
        let config = config_with_form();
        let result = FormFuzzing
            .execute(&mut session, &config, &RunnerOptions::new(6).with_num_runs(10))
            .await
            .unwrap();
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(session.fills.is_empty());
    }

    #[tokio::test]
    async fn test_submit_triggering_page_error_fails() {
        let mut session = MockSession::new().with_page_error("/contact", "unhandled rejection");
        let config = config_with_form();
        let result = FormFuzzing
            .execute(&mut session, &config, &RunnerOptions::new(6).with_num_runs(10))
            .await
            .unwrap();
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result
            .error_message
            .as_deref()
            .unwrap()
            .contains("unhandled rejection"));
    }
}
