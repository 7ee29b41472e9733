use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::application::{
    ChatClient, ChatService, KeywordClassifier, LlmGenerator, Responder, ResponseObserver,
    TracingObserver,
};
use crate::connector::adapter::{load_majors_registry, load_rule_table, OpenAiClient};
use crate::domain::{LlmConfig, RuleTable};

pub struct ContainerConfig {
    pub majors_file: PathBuf,
    /// Replaces the built-in keyword rules when set.
    pub rules_file: Option<PathBuf>,
    pub llm: LlmConfig,
}

/// Wires the responder and chat service from configuration.
///
/// The rule table, majors registry and LLM configuration are loaded once
/// here and shared read-only by every request.
pub struct Container {
    responder: Arc<Responder>,
    chat_service: Arc<ChatService>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        Self::with_client(config, None)
    }

    /// Build with an explicit provider client instead of the OpenAI adapter.
    pub fn with_client(config: ContainerConfig, client: Option<Arc<dyn ChatClient>>) -> Result<Self> {
        let observer: Arc<dyn ResponseObserver> = Arc::new(TracingObserver);

        let rules = match &config.rules_file {
            Some(path) => load_rule_table(path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))?,
            None => {
                debug!("Using built-in keyword rules");
                RuleTable::default()
            }
        };
        let registry = load_majors_registry(&config.majors_file);

        let classifier = KeywordClassifier::new(Arc::new(rules), Arc::new(registry))
            .with_observer(observer.clone());

        let client = client.or_else(|| {
            if config.llm.is_active() {
                OpenAiClient::from_config(&config.llm).map(|c| Arc::new(c) as Arc<dyn ChatClient>)
            } else {
                None
            }
        });

        let mut responder =
            Responder::new(classifier, config.llm.clone()).with_observer(observer.clone());

        match client {
            Some(client) => {
                info!(
                    "LLM replies enabled via {} (model {})",
                    client.provider_name(),
                    config.llm.model
                );
                responder = responder
                    .with_generator(LlmGenerator::new(client).with_observer(observer.clone()));
            }
            None if config.llm.use_llm => {
                info!("USE_LLM is set but no API key was provided; using keyword replies only")
            }
            None => info!("LLM replies disabled; using keyword replies only"),
        }

        let responder = Arc::new(responder);
        let chat_service = Arc::new(ChatService::new(responder.clone()).with_observer(observer));

        Ok(Self {
            responder,
            chat_service,
        })
    }

    pub fn responder(&self) -> Arc<Responder> {
        self.responder.clone()
    }

    pub fn chat_service(&self) -> Arc<ChatService> {
        self.chat_service.clone()
    }
}
