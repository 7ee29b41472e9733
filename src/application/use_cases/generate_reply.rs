use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;

use super::chat::panic_message;
use crate::application::{ChatClient, CompletionRequest, ResponseObserver, TracingObserver};
use crate::domain::{DomainError, LlmConfig, ProviderFailure};

/// Persona and constraints sent as the system message on every request.
pub const SYSTEM_PROMPT: &str = "\
You are FutureMe AI, a friendly and knowledgeable career-guidance counselor who helps \
high school students discover college majors that fit their interests.

Guidelines:
1. Recommend 1-3 specific college majors that match what the student shared.
2. Briefly explain why each major fits, mentioning typical career paths and key skills.
3. Keep the answer concise: under 200 words.
4. Use an encouraging, supportive tone.
5. End with actionable guidance or a follow-up question that helps the student \
reflect further on their interests.";

/// Bounded retry schedule for provider calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Rate-limit backoff waits `backoff_base * 2^(attempt - 1)`.
    pub backoff_base: Duration,
    /// Wait after a timeout or generic provider error.
    pub fixed_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
            fixed_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Same attempt budget with no waiting; used by tests.
    pub fn immediate() -> Self {
        Self {
            backoff_base: Duration::ZERO,
            fixed_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Delay before the attempt following `attempt`, or `None` when the
    /// failure must not be retried.
    pub fn delay_after(&self, attempt: u32, failure: &ProviderFailure) -> Option<Duration> {
        match failure {
            ProviderFailure::Authentication => None,
            ProviderFailure::RateLimited => {
                let exponent = attempt.saturating_sub(1).min(16);
                Some(self.backoff_base.saturating_mul(1u32 << exponent))
            }
            ProviderFailure::Timeout | ProviderFailure::Api(_) => Some(self.fixed_delay),
        }
    }
}

/// Produces a reply through a [`ChatClient`], retrying according to a
/// [`RetryPolicy`].
pub struct LlmGenerator {
    client: Arc<dyn ChatClient>,
    policy: RetryPolicy,
    observer: Arc<dyn ResponseObserver>,
}

impl LlmGenerator {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self {
            client,
            policy: RetryPolicy::default(),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ResponseObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Ask the provider for a reply to `message`.
    ///
    /// Fails with [`DomainError::Configuration`] when `config` has no API key,
    /// with [`DomainError::Provider`] once retries are exhausted or the
    /// provider rejects the credentials, and with [`DomainError::Unexpected`]
    /// when the provider call panics.
    pub async fn generate(&self, message: &str, config: &LlmConfig) -> Result<String, DomainError> {
        if !config.has_credential() {
            return Err(DomainError::configuration("LLM API key is not set"));
        }

        let request = CompletionRequest {
            model: &config.model,
            system: SYSTEM_PROMPT,
            user: message,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: config.timeout(),
        };

        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_failure = None;

        for attempt in 1..=max_attempts {
            self.observer
                .llm_requested(attempt, self.client.provider_name(), &config.model);

            let outcome = AssertUnwindSafe(self.client.complete(&request))
                .catch_unwind()
                .await;

            let failure = match outcome {
                Ok(Ok(text)) => {
                    self.observer.llm_replied(attempt);
                    return Ok(text.trim().to_string());
                }
                Ok(Err(failure)) => failure,
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    self.observer.llm_panicked(attempt, message);
                    return Err(DomainError::unexpected(format!(
                        "{} failed unexpectedly: {message}",
                        self.client.provider_name()
                    )));
                }
            };

            self.observer.llm_attempt_failed(attempt, &failure);

            let Some(delay) = self.policy.delay_after(attempt, &failure) else {
                return Err(DomainError::provider(format!(
                    "{} rejected the request: {failure}",
                    self.client.provider_name()
                )));
            };

            if attempt < max_attempts {
                self.observer.retry_scheduled(attempt, delay);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            last_failure = Some(failure);
        }

        Err(DomainError::provider(format!(
            "{} unavailable after {max_attempts} attempts: {}",
            self.client.provider_name(),
            last_failure.map(|f| f.to_string()).unwrap_or_default()
        )))
    }
}
