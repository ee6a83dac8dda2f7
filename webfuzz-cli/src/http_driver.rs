//! Plain-HTTP session driver.
//!
//! Drives the target over GET requests with a cookie jar and a local history
//! stack. DOM-level actions have no HTTP equivalent, so fills and single
//! clicks answer `NotInteractable`; the engine tolerates those and the
//! navigation-centric checks still run at full strength. Click bursts are
//! mapped to concurrent re-fetches of the current page, which preserves the
//! server-side pressure the burst is meant to create.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use webfuzz::{DriverError, DriverEvent, SessionDriver};

pub struct HttpSession {
    client: reqwest::Client,
    history: Vec<String>,
    cursor: usize,
    last_status: Option<u16>,
    body_present: bool,
}

/// Static auth material attached to every request.
#[derive(Debug, Clone, Default)]
pub struct SessionAuth {
    pub bearer_token: Option<String>,
    pub cookie: Option<String>,
}

impl HttpSession {
    pub fn new() -> Result<Self, DriverError> {
        Self::with_auth(SessionAuth::default())
    }

    pub fn with_auth(auth: SessionAuth) -> Result<Self, DriverError> {
        use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, COOKIE};

        let mut headers = HeaderMap::new();
        if let Some(token) = &auth.bearer_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|err| DriverError::Fatal(format!("invalid bearer token: {err}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(cookie) = &auth.cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|err| DriverError::Fatal(format!("invalid cookie value: {err}")))?;
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|err| DriverError::Fatal(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            history: Vec::new(),
            cursor: 0,
            last_status: None,
            body_present: false,
        })
    }

    async fn fetch(&mut self, url: &str, timeout: Duration) -> Result<u16, DriverError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| classify(err, timeout))?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        self.last_status = Some(status);
        self.body_present = !body.is_empty();
        Ok(status)
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> DriverError {
    if err.is_timeout() {
        DriverError::Timeout(timeout)
    } else {
        DriverError::Navigation(err.to_string())
    }
}

#[async_trait]
impl SessionDriver for HttpSession {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<u16, DriverError> {
        let status = self.fetch(url, timeout).await?;
        self.history.truncate(self.cursor);
        self.history.push(url.to_string());
        self.cursor = self.history.len();
        Ok(status)
    }

    async fn fill_field(&mut self, selector: &str, _value: &str) -> Result<(), DriverError> {
        Err(DriverError::NotInteractable(selector.to_string()))
    }

    async fn click_element(&mut self, selector: &str, _force: bool) -> Result<(), DriverError> {
        Err(DriverError::NotInteractable(selector.to_string()))
    }

    async fn click_burst(&mut self, _selector: &str, count: usize) -> Result<usize, DriverError> {
        let Some(url) = self.history.get(self.cursor.saturating_sub(1)).cloned() else {
            return Ok(0);
        };
        // Concurrent re-fetches stand in for simultaneous click handlers.
        let requests = (0..count).map(|_| self.client.get(&url).send());
        join_all(requests).await;
        Ok(count)
    }

    async fn query_visible(&mut self, _selector: &str) -> bool {
        self.body_present
    }

    async fn current_url(&mut self) -> String {
        self.history
            .get(self.cursor.saturating_sub(1))
            .cloned()
            .unwrap_or_default()
    }

    async fn reload(&mut self, timeout: Duration) -> Result<(), DriverError> {
        let url = self.current_url().await;
        if url.is_empty() {
            return Ok(());
        }
        self.fetch(&url, timeout).await?;
        Ok(())
    }

    async fn go_back(&mut self, timeout: Duration) -> Result<(), DriverError> {
        if self.cursor > 1 {
            self.cursor -= 1;
            let url = self.history[self.cursor - 1].clone();
            self.fetch(&url, timeout).await?;
        }
        Ok(())
    }

    async fn go_forward(&mut self, timeout: Duration) -> Result<(), DriverError> {
        if self.cursor < self.history.len() {
            self.cursor += 1;
            let url = self.history[self.cursor - 1].clone();
            self.fetch(&url, timeout).await?;
        }
        Ok(())
    }

    async fn settle(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn drain_events(&mut self) -> Vec<DriverEvent> {
        // Uncaught script errors are not observable over plain HTTP.
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_unusable_auth_material() {
        let auth = SessionAuth {
            bearer_token: Some("line\nbreak".to_string()),
            cookie: None,
        };
        assert!(matches!(
            HttpSession::with_auth(auth),
            Err(DriverError::Fatal(_))
        ));
    }

    #[tokio::test]
    async fn test_fresh_session_has_no_page() {
        let mut session = HttpSession::new().unwrap();
        assert_eq!(session.current_url().await, "");
        assert!(!session.query_visible("body").await);
        assert!(session.drain_events().is_empty());
    }

    #[tokio::test]
    async fn test_dom_actions_answer_not_interactable() {
        let mut session = HttpSession::new().unwrap();
        assert!(matches!(
            session.fill_field("#field", "x").await,
            Err(DriverError::NotInteractable(_))
        ));
        assert!(matches!(
            session.click_element("#button", false).await,
            Err(DriverError::NotInteractable(_))
        ));
    }

    #[tokio::test]
    async fn test_history_moves_are_no_ops_without_history() {
        let mut session = HttpSession::new().unwrap();
        session.go_back(Duration::from_secs(1)).await.unwrap();
        session.go_forward(Duration::from_secs(1)).await.unwrap();
        session.reload(Duration::from_secs(1)).await.unwrap();
        assert_eq!(session.current_url().await, "");
    }
}
