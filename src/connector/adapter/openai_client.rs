use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::warn;

use crate::application::{ChatClient, CompletionRequest};
use crate::domain::{LlmConfig, ProviderFailure};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for the OpenAI chat-completions API and compatible servers
/// (LM Studio, vLLM, Ollama's OpenAI endpoint).
///
/// Every failure is classified for the retry policy:
///
/// | Observation                  | [`ProviderFailure`] |
/// |------------------------------|---------------------|
/// | HTTP 429                     | `RateLimited`       |
/// | HTTP 401 / 403               | `Authentication`    |
/// | client-side request timeout  | `Timeout`           |
/// | anything else                | `Api`               |
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            url,
        }
    }

    /// Build from an [`LlmConfig`]; `None` when the config has no API key.
    pub fn from_config(config: &LlmConfig) -> Option<Self> {
        let key = config.api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        Some(Self::new(key, &config.base_url))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn classify_status(status: StatusCode, body: &str) -> ProviderFailure {
        match status {
            StatusCode::TOO_MANY_REQUESTS => ProviderFailure::RateLimited,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderFailure::Authentication,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ProviderFailure::Timeout,
            _ => ProviderFailure::api(format!("API returned {status}: {}", truncate(body, 200))),
        }
    }

    fn extract_text(response: ApiResponse) -> Result<String, ProviderFailure> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderFailure::api("response contained no choices"))
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, ProviderFailure> {
        let body = ApiRequest {
            model: request.model,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: request.system,
                },
                ApiMessage {
                    role: "user",
                    content: request.user,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderFailure::Timeout
                } else {
                    ProviderFailure::api(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiClient: API returned {status}: {}", truncate(&body, 200));
            return Err(Self::classify_status(status, &body));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderFailure::Timeout
            } else {
                ProviderFailure::api(format!("failed to parse response: {e}"))
            }
        })?;

        Self::extract_text(api_response)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_completions_url() {
        let client = OpenAiClient::new("k", "http://localhost:1234/");
        assert_eq!(client.url(), "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn from_config_requires_key() {
        assert!(OpenAiClient::from_config(&LlmConfig::enabled()).is_none());
        let client = OpenAiClient::from_config(&LlmConfig::enabled().with_api_key("sk")).unwrap();
        assert_eq!(client.url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn classifies_status_codes() {
        assert_eq!(
            OpenAiClient::classify_status(StatusCode::TOO_MANY_REQUESTS, ""),
            ProviderFailure::RateLimited
        );
        assert_eq!(
            OpenAiClient::classify_status(StatusCode::UNAUTHORIZED, ""),
            ProviderFailure::Authentication
        );
        assert_eq!(
            OpenAiClient::classify_status(StatusCode::FORBIDDEN, ""),
            ProviderFailure::Authentication
        );
        assert_eq!(
            OpenAiClient::classify_status(StatusCode::GATEWAY_TIMEOUT, ""),
            ProviderFailure::Timeout
        );
        assert!(matches!(
            OpenAiClient::classify_status(StatusCode::INTERNAL_SERVER_ERROR, "oops"),
            ProviderFailure::Api(_)
        ));
    }

    #[test]
    fn extracts_first_choice() {
        let response: ApiResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "Try Nursing"}},
                            {"message": {"role": "assistant", "content": "ignored"}}]}"#,
        )
        .unwrap();
        assert_eq!(OpenAiClient::extract_text(response).unwrap(), "Try Nursing");
    }

    #[test]
    fn empty_choices_is_api_failure() {
        let response: ApiResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            OpenAiClient::extract_text(response),
            Err(ProviderFailure::Api(_))
        ));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("hi", 10), "hi");
    }
}
