use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ProviderFailure;

/// Everything a provider needs to produce one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub user: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

/// An interface for sending chat-style prompts to an LLM and receiving text responses.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details, and classify every failure as a [`ProviderFailure`] so the
/// generator's retry policy can stay provider-agnostic.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send a system prompt followed by a single user message and return the
    /// assistant's raw response text.
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, ProviderFailure>;

    /// Provider label for logs.
    fn provider_name(&self) -> &str;
}
