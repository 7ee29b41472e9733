pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{
    ChatClient, ChatService, CompletionRequest, KeywordClassifier, LlmGenerator, Responder,
    ResponseObserver, RetryPolicy, TracingObserver,
};

pub use connector::{
    create_app, AppState, BackendClient, Container, ContainerConfig, OpenAiClient,
};

pub use domain::{
    CategoryRule, ChatExchange, ChatRequest, ChatResponse, ChatStatus, DomainError,
    FallbackReason, LlmConfig, MajorsRegistry, ProviderFailure, Reply, ReplySource, RuleTable,
};
