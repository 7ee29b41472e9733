use std::time::Duration;

use tracing::debug;

use crate::domain::{ChatRequest, ChatResponse};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const CHAT_PATH: &str = "/api/chat";
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// Client side of `POST /api/chat`, used by the terminal chat.
///
/// [`BackendClient::send`] always returns displayable text: transport and
/// server failures become friendly messages so the conversation can go on.
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn send(&self, message: &str) -> String {
        let result = self
            .client
            .post(format!("{}{CHAT_PATH}", self.base_url))
            .timeout(self.timeout)
            .json(&ChatRequest::new(message))
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => return self.describe_transport_error(&e),
        };

        let status = response.status();
        match response.json::<ChatResponse>().await {
            Ok(body) if status.is_success() => body.response,
            Ok(body) if !body.response.is_empty() => {
                debug!("Backend returned {status}: {:?}", body.error);
                body.response
            }
            _ => format!(
                "Sorry, I encountered an error (Status: {}). Please try again!",
                status.as_u16()
            ),
        }
    }

    /// `true` when `GET /` answers 200 within five seconds.
    pub async fn is_online(&self) -> bool {
        match self
            .client
            .get(format!("{}/", self.base_url))
            .timeout(STATUS_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Backend status check failed: {e}");
                false
            }
        }
    }

    fn describe_transport_error(&self, e: &reqwest::Error) -> String {
        if e.is_connect() {
            format!(
                "Cannot connect to the backend. Make sure the server is running on {}",
                self.base_url
            )
        } else if e.is_timeout() {
            "Request timed out. Please try again!".to_string()
        } else {
            format!("An unexpected error occurred: {e}")
        }
    }
}
