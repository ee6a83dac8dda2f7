//! Per-check-run trial context.
//!
//! A [`TrialContext`] is created for one check run and reset at the start of
//! every trial, so evidence from one trial can never leak into the verdict of
//! another. Checks collect driver events into it and checks/predicates read
//! them back when evaluating postconditions.

use std::time::Duration;

use crate::session::{DriverEvent, SessionDriver};

/// Evidence buffer and shared knobs for the trial currently executing.
pub struct TrialContext {
    events: Vec<DriverEvent>,
    action_timeout: Duration,
}

impl TrialContext {
    pub fn new(action_timeout: Duration) -> Self {
        Self {
            events: Vec::new(),
            action_timeout,
        }
    }

    /// Timeout applied to individual driver actions.
    pub fn action_timeout(&self) -> Duration {
        self.action_timeout
    }

    /// Reset for a fresh trial: clear collected evidence and discard
    /// anything still buffered in the driver from before this trial.
    pub fn begin_trial(&mut self, session: &mut dyn SessionDriver) {
        self.events.clear();
        let _ = session.drain_events();
    }

    /// Pull everything the driver buffered since the last collect into this
    /// trial's evidence.
    pub fn collect(&mut self, session: &mut dyn SessionDriver) {
        self.events.extend(session.drain_events());
    }

    pub fn events(&self) -> &[DriverEvent] {
        &self.events
    }

    /// The first uncaught page error observed in this trial, if any.
    pub fn first_page_error(&self) -> Option<&str> {
        self.events.iter().find_map(|event| match event {
            DriverEvent::PageError(message) => Some(message.as_str()),
            DriverEvent::Dialog(_) => None,
        })
    }
}
