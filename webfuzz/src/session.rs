//! The session-driver capability interface.
//!
//! One [`SessionDriver`] represents a single controllable, stateful web
//! session (navigation history, cookies, DOM). The engine only requires this
//! interface; the concrete driver (a real browser, a plain-HTTP session, a
//! test double) lives with the caller.
//!
//! Asynchronous signals (uncaught script errors, dialogs) are buffered by the
//! driver and handed over through [`SessionDriver::drain_events`]; dialogs
//! must be auto-dismissed by the driver so navigation never hangs on them.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{EngineError, TrialError, TrialFailure};

/// Errors a driver action can raise.
///
/// Everything except [`DriverError::Fatal`] is transient: recoverable at the
/// trial level, either tolerated as a no-op or turned into a trial failure by
/// the predicate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DriverError {
    /// The action did not complete within its timeout.
    #[error("action timed out after {0:?}")]
    Timeout(Duration),

    /// The targeted element exists but cannot be interacted with, or does
    /// not exist at all.
    #[error("element not interactable: {0}")]
    NotInteractable(String),

    /// Navigation failed hard (connection refused, invalid URL).
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The session itself is unusable; nothing further can run against it.
    #[error("session unusable: {0}")]
    Fatal(String),
}

impl DriverError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, DriverError::Fatal(_))
    }
}

impl From<DriverError> for TrialError {
    /// Fatal driver errors escape the runner; everything else is a failure
    /// of the current trial.
    fn from(err: DriverError) -> Self {
        match err {
            DriverError::Fatal(message) => TrialError::Fatal(EngineError::driver_fatal(message)),
            other => TrialError::Failed(TrialFailure::new(other.to_string())),
        }
    }
}

/// Tolerate a transient driver error as a no-op, letting only fatal errors
/// escape. Matches the discipline for actions whose failure is expected
/// (clicking a disabled submit, going back with no history).
pub fn tolerate<T>(result: Result<T, DriverError>) -> Result<Option<T>, TrialError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(DriverError::Fatal(message)) => {
            Err(TrialError::Fatal(EngineError::driver_fatal(message)))
        }
        Err(_) => Ok(None),
    }
}

/// An asynchronous signal observed by the driver during an action window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    /// An uncaught script error surfaced on the page.
    PageError(String),
    /// A dialog appeared (and was auto-dismissed by the driver).
    Dialog(String),
}

/// Capability interface for acting on one live web session.
#[async_trait]
pub trait SessionDriver: Send {
    /// Navigate to an absolute URL, returning the response status.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<u16, DriverError>;

    /// Fill a field identified by selector.
    async fn fill_field(&mut self, selector: &str, value: &str) -> Result<(), DriverError>;

    /// Click an element identified by selector.
    async fn click_element(&mut self, selector: &str, force: bool) -> Result<(), DriverError>;

    /// Dispatch `count` simultaneous click attempts against one element and
    /// join them all before returning. Individual attempt failures are
    /// swallowed; the return value is the number of attempts dispatched.
    async fn click_burst(&mut self, selector: &str, count: usize) -> Result<usize, DriverError>;

    /// Is the element visible? Never errors; query failures read as `false`.
    async fn query_visible(&mut self, selector: &str) -> bool;

    /// The session's current URL.
    async fn current_url(&mut self) -> String;

    /// Reload the current page.
    async fn reload(&mut self, timeout: Duration) -> Result<(), DriverError>;

    /// History back; tolerant of an empty history (no-op).
    async fn go_back(&mut self, timeout: Duration) -> Result<(), DriverError>;

    /// History forward; tolerant of an empty forward stack (no-op).
    async fn go_forward(&mut self, timeout: Duration) -> Result<(), DriverError>;

    /// Give the page a moment to settle (flush pending script activity).
    async fn settle(&mut self, duration: Duration);

    /// Take every buffered asynchronous event, leaving the buffer empty.
    fn drain_events(&mut self) -> Vec<DriverEvent>;
}


#[cfg(test)]
mod tests {
    use super::mock::MockSession;
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(DriverError::Fatal("gone".to_string()).is_fatal());
        assert!(!DriverError::Timeout(Duration::from_secs(1)).is_fatal());
        assert!(!DriverError::NotInteractable("button".to_string()).is_fatal());
    }

    #[test]
    fn test_tolerate_swallows_transient_errors_only() {
        let transient: Result<(), DriverError> =
            Err(DriverError::NotInteractable("button".to_string()));
        assert!(matches!(tolerate(transient), Ok(None)));

        let fatal: Result<(), DriverError> = Err(DriverError::Fatal("gone".to_string()));
        assert!(matches!(tolerate(fatal), Err(TrialError::Fatal(_))));

        assert!(matches!(tolerate(Ok(3)), Ok(Some(3))));
    }

    #[tokio::test]
    async fn test_mock_history_navigation() {
        let mut session = MockSession::new();
        let timeout = Duration::from_secs(1);
        session
            .navigate("http://t.local/a", timeout)
            .await
            .unwrap();
        session
            .navigate("http://t.local/b", timeout)
            .await
            .unwrap();
        assert_eq!(session.current_url().await, "http://t.local/b");

        session.go_back(timeout).await.unwrap();
        assert_eq!(session.current_url().await, "http://t.local/a");

        session.go_forward(timeout).await.unwrap();
        assert_eq!(session.current_url().await, "http://t.local/b");

        // Back at the root of history: a no-op, not an error.
        session.go_back(timeout).await.unwrap();
        session.go_back(timeout).await.unwrap();
        assert_eq!(session.current_url().await, "http://t.local/a");
    }

    #[tokio::test]
    async fn test_mock_buffers_and_drains_events() {
        let mut session = MockSession::new().with_page_error("/broken", "boom");
        session
            .navigate("http://t.local/broken", Duration::from_secs(1))
            .await
            .unwrap();
        let events = session.drain_events();
        assert_eq!(events, vec![DriverEvent::PageError("boom".to_string())]);
        assert!(session.drain_events().is_empty());
    }
}
