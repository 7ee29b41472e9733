use std::time::Duration;

use tracing::warn;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Settings for the optional LLM generation path.
///
/// Read once from the environment at startup and shared read-only:
///
/// | Variable             | Default                  |
/// |----------------------|--------------------------|
/// | `USE_LLM`            | `false`                  |
/// | `OPENAI_API_KEY`     | unset                    |
/// | `OPENAI_MODEL`       | `gpt-3.5-turbo`          |
/// | `OPENAI_MAX_TOKENS`  | `500`                    |
/// | `OPENAI_TEMPERATURE` | `0.7`                    |
/// | `OPENAI_TIMEOUT`     | `30` (seconds)           |
/// | `OPENAI_BASE_URL`    | `https://api.openai.com` |
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub use_llm: bool,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
    pub base_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            use_llm: false,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests don't have to mutate the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            use_llm: lookup("USE_LLM")
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.use_llm),
            api_key: lookup("OPENAI_API_KEY")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            model: lookup("OPENAI_MODEL")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.model),
            max_tokens: parse_or("OPENAI_MAX_TOKENS", lookup("OPENAI_MAX_TOKENS"), defaults.max_tokens),
            temperature: parse_or(
                "OPENAI_TEMPERATURE",
                lookup("OPENAI_TEMPERATURE"),
                defaults.temperature,
            ),
            timeout_seconds: parse_or(
                "OPENAI_TIMEOUT",
                lookup("OPENAI_TIMEOUT"),
                defaults.timeout_seconds,
            ),
            base_url: lookup("OPENAI_BASE_URL")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
        }
    }

    pub fn enabled() -> Self {
        Self {
            use_llm: true,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// The LLM path is attempted only when enabled and a credential exists.
    pub fn is_active(&self) -> bool {
        self.use_llm && self.has_credential()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(
    key: &str,
    value: Option<String>,
    default: T,
) -> T {
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {key}={raw:?}, using default {default}");
            default
        }),
    }
}
