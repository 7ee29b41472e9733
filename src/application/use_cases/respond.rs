use std::sync::Arc;

use crate::application::{KeywordClassifier, LlmGenerator, ResponseObserver, TracingObserver};
use crate::domain::{FallbackReason, LlmConfig, Reply};

/// Decides how a single message is answered.
///
/// The LLM stage runs first when configured and yields either generated text
/// or the [`FallbackReason`] explaining why it didn't; the rule stage then
/// answers every message the LLM stage declined. No error leaves this type.
pub struct Responder {
    classifier: KeywordClassifier,
    generator: Option<LlmGenerator>,
    config: LlmConfig,
    observer: Arc<dyn ResponseObserver>,
}

impl Responder {
    pub fn new(classifier: KeywordClassifier, config: LlmConfig) -> Self {
        Self {
            classifier,
            generator: None,
            config,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_generator(mut self, generator: LlmGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ResponseObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    pub fn classifier(&self) -> &KeywordClassifier {
        &self.classifier
    }

    /// Whether a message would be sent to the LLM at all.
    pub fn llm_enabled(&self) -> bool {
        self.config.is_active() && self.generator.is_some()
    }

    pub async fn respond(&self, message: &str) -> String {
        self.reply(message).await.into_text()
    }

    pub async fn reply(&self, message: &str) -> Reply {
        match self.llm_stage(message).await {
            Ok(text) => Reply::from_llm(text),
            Err(reason) => {
                self.observer.fallback(&reason);
                Reply::from_rules(self.classifier.classify(message), reason)
            }
        }
    }

    async fn llm_stage(&self, message: &str) -> Result<String, FallbackReason> {
        if !self.config.use_llm {
            return Err(FallbackReason::Disabled);
        }
        if !self.config.has_credential() {
            return Err(FallbackReason::MissingCredential);
        }
        let generator = self
            .generator
            .as_ref()
            .ok_or(FallbackReason::ProviderUnavailable)?;

        let text = generator
            .generate(message, &self.config)
            .await
            .map_err(|e| FallbackReason::GenerationFailed(e.to_string()))?;

        if text.is_empty() {
            return Err(FallbackReason::EmptyGeneration);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::application::{ChatClient, CompletionRequest, RetryPolicy};
    use crate::domain::{MajorsRegistry, ProviderFailure, RuleTable};

    struct FixedClient {
        outcome: Result<String, ProviderFailure>,
        calls: AtomicUsize,
    }

    impl FixedClient {
        fn new(outcome: Result<String, ProviderFailure>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ChatClient for FixedClient {
        async fn complete(&self, _request: &CompletionRequest<'_>) -> Result<String, ProviderFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }

        fn provider_name(&self) -> &str {
            "fixed"
        }
    }

    fn responder(config: LlmConfig, client: Arc<FixedClient>) -> Responder {
        let classifier = KeywordClassifier::new(
            Arc::new(RuleTable::default()),
            Arc::new(MajorsRegistry::empty()),
        );
        Responder::new(classifier, config)
            .with_generator(LlmGenerator::new(client).with_policy(RetryPolicy::immediate()))
    }

    #[tokio::test]
    async fn llm_reply_wins_when_active() {
        let client = FixedClient::new(Ok("Try Marine Biology".to_string()));
        let reply = responder(LlmConfig::enabled().with_api_key("k"), client)
            .reply("I love the ocean")
            .await;
        assert!(reply.is_llm());
        assert_eq!(reply.text(), "Try Marine Biology");
    }

    #[tokio::test]
    async fn disabled_llm_never_calls_provider() {
        let client = FixedClient::new(Ok("unused".to_string()));
        let reply = responder(LlmConfig::default().with_api_key("k"), client.clone())
            .reply("I love computers")
            .await;
        assert_eq!(reply.fallback_reason(), Some(&FallbackReason::Disabled));
        assert!(reply.text().contains("Computer Science"));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_key_falls_back_silently() {
        let client = FixedClient::new(Ok("unused".to_string()));
        let reply = responder(LlmConfig::enabled(), client.clone())
            .reply("I enjoy painting")
            .await;
        assert_eq!(reply.fallback_reason(), Some(&FallbackReason::MissingCredential));
        assert!(reply.text().contains("Fine Arts"));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn no_generator_falls_back() {
        let classifier = KeywordClassifier::new(
            Arc::new(RuleTable::default()),
            Arc::new(MajorsRegistry::empty()),
        );
        let responder = Responder::new(classifier, LlmConfig::enabled().with_api_key("k"));
        assert!(!responder.llm_enabled());
        let reply = responder.reply("zzz").await;
        assert_eq!(reply.fallback_reason(), Some(&FallbackReason::ProviderUnavailable));
    }

    #[tokio::test]
    async fn provider_failure_falls_back() {
        let client = FixedClient::new(Err(ProviderFailure::Authentication));
        let reply = responder(LlmConfig::enabled().with_api_key("k"), client.clone())
            .reply("I want to help people")
            .await;
        assert!(matches!(
            reply.fallback_reason(),
            Some(FallbackReason::GenerationFailed(_))
        ));
        assert!(reply.text().contains("Psychology"));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_generation_falls_back() {
        let client = FixedClient::new(Ok("   \n".to_string()));
        let reply = responder(LlmConfig::enabled().with_api_key("k"), client)
            .reply("zzz unrelated text")
            .await;
        assert_eq!(reply.fallback_reason(), Some(&FallbackReason::EmptyGeneration));
        assert!(reply.text().contains("Computer Science, Psychology, Business"));
    }
}
