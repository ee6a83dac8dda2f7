//! Configuration values consumed by the check engine.
//!
//! Only values live here; loading (file format, CLI overrides) belongs to the
//! caller. Field names are stable camelCase so the same document feeds both
//! the config file and the report.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Include/exclude glob pairs constraining which paths checks may visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            include: vec!["/".to_string()],
            exclude: Vec::new(),
        }
    }
}

/// One fuzzable form: where it lives, how to find it, how to submit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormTarget {
    pub path: String,
    pub selector: String,
    pub submit: String,
}

/// One clickable target for the rapid-click check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonTarget {
    pub path: String,
    pub selector: String,
}

/// Which built-in checks are enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckToggles {
    pub no_server_error: bool,
    pub form_fuzzing: bool,
    pub query_param_fuzzing: bool,
    pub history_navigation: bool,
    pub rapid_click: bool,
    pub reload_state_restore: bool,
}

impl Default for CheckToggles {
    fn default() -> Self {
        Self {
            no_server_error: true,
            form_fuzzing: true,
            query_param_fuzzing: true,
            history_navigation: true,
            rapid_click: true,
            reload_state_restore: false,
        }
    }
}

/// Per-check tuning knobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckTuning {
    pub rapid_click: RapidClickTuning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RapidClickTuning {
    /// Upper bound on simultaneous click attempts per trial.
    pub max_clicks: usize,
    /// Overrides the form submit selector as the click target.
    pub target_selector: Option<String>,
}

impl Default for RapidClickTuning {
    fn default() -> Self {
        Self {
            max_clicks: 10,
            target_selector: None,
        }
    }
}

/// Everything the engine needs to run a fuzzing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunConfig {
    pub base_url: String,
    /// Trials per check.
    pub num_runs: usize,
    /// Per-action timeout in milliseconds.
    pub timeout: u64,
    pub paths: PathConfig,
    pub forms: Vec<FormTarget>,
    pub buttons: Vec<ButtonTarget>,
    pub checks: CheckToggles,
    pub check_options: CheckTuning,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            num_runs: 50,
            timeout: 5000,
            paths: PathConfig::default(),
            forms: Vec::new(),
            buttons: Vec::new(),
            checks: CheckToggles::default(),
            check_options: CheckTuning::default(),
        }
    }
}

impl RunConfig {
    /// The per-action timeout as a `Duration`.
    pub fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    /// Collect every configuration problem, not just the first one.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.base_url.is_empty() {
            errors.push("baseUrl is required".to_string());
        } else if Url::parse(&self.base_url).is_err() {
            errors.push(format!("Invalid baseUrl: {}", self.base_url));
        }

        if self.num_runs < 1 {
            errors.push("numRuns must be at least 1".to_string());
        }

        if self.paths.include.is_empty() {
            errors.push("paths.include must have at least one path".to_string());
        }

        // An enabled check with no targets is a skip, not an error, so an
        // empty form list passes validation.
        for form in &self.forms {
            if form.path.is_empty() {
                errors.push("Form path is required".to_string());
            }
            if form.selector.is_empty() {
                errors.push("Form selector is required".to_string());
            }
            if form.submit.is_empty() {
                errors.push("Form submit selector is required".to_string());
            }
        }

        for button in &self.buttons {
            if button.path.is_empty() {
                errors.push("Button path is required".to_string());
            }
            if button.selector.is_empty() {
                errors.push("Button selector is required".to_string());
            }
        }

        errors
    }
}
