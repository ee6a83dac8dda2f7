//! The explicit registry of built-in checks.

use crate::config::RunConfig;
use crate::error::EngineError;

use super::{
    Check, FormFuzzing, HistoryNavigation, NoServerError, QueryParamFuzzing, RapidClick,
    ReloadStateRestore,
};

/// All known checks, in their fixed execution order.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    /// The built-in check set.
    pub fn builtin() -> Self {
        Self {
            checks: vec![
                Box::new(NoServerError),
                Box::new(FormFuzzing),
                Box::new(QueryParamFuzzing),
                Box::new(HistoryNavigation),
                Box::new(RapidClick),
                Box::new(ReloadStateRestore),
            ],
        }
    }

    /// Add a check to the registry, after the existing ones. Names select
    /// and report checks, so a duplicate is a configuration error.
    pub fn register(&mut self, check: Box<dyn Check>) -> Result<(), EngineError> {
        if self.names().contains(&check.name()) {
            return Err(EngineError::config(format!(
                "duplicate check name: {}",
                check.name()
            )));
        }
        self.checks.push(check);
        Ok(())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|check| check.name()).collect()
    }

    /// The checks to run: either the one named explicitly (whether or not
    /// its toggle is on) or everything the configuration enables. An unknown
    /// name is a configuration error, never a silently empty run.
    pub fn resolve(
        &self,
        config: &RunConfig,
        only: Option<&str>,
    ) -> Result<Vec<&dyn Check>, EngineError> {
        match only {
            Some(name) => {
                let check = self
                    .checks
                    .iter()
                    .find(|check| check.name() == name)
                    .ok_or_else(|| {
                        EngineError::config(format!(
                            "unknown check: {name} (known: {})",
                            self.names().join(", ")
                        ))
                    })?;
                Ok(vec![check.as_ref()])
            }
            None => Ok(self
                .checks
                .iter()
                .filter(|check| check.enabled(config))
                .map(|check| check.as_ref())
                .collect()),
        }
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
