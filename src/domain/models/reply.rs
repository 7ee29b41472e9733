use std::fmt;

/// Why the responder answered from the rule table instead of the LLM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// `use_llm` is off.
    Disabled,
    /// `use_llm` is on but no API key is configured.
    MissingCredential,
    /// `use_llm` is on and a key exists, but no provider client was wired.
    ProviderUnavailable,
    /// The generator returned an error after its retry policy ran out.
    GenerationFailed(String),
    /// The provider answered with only whitespace.
    EmptyGeneration,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "llm disabled"),
            Self::MissingCredential => write!(f, "llm enabled without api key"),
            Self::ProviderUnavailable => write!(f, "no llm provider configured"),
            Self::GenerationFailed(e) => write!(f, "llm generation failed: {e}"),
            Self::EmptyGeneration => write!(f, "llm returned empty text"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplySource {
    Llm,
    Rules(FallbackReason),
}

/// Final answer for one message together with the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    text: String,
    source: ReplySource,
}

impl Reply {
    pub fn from_llm(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: ReplySource::Llm,
        }
    }

    pub fn from_rules(text: impl Into<String>, reason: FallbackReason) -> Self {
        Self {
            text: text.into(),
            source: ReplySource::Rules(reason),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &ReplySource {
        &self.source
    }

    pub fn is_llm(&self) -> bool {
        matches!(self.source, ReplySource::Llm)
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match &self.source {
            ReplySource::Rules(reason) => Some(reason),
            ReplySource::Llm => None,
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
