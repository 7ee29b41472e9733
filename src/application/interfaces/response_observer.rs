use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::{FallbackReason, ProviderFailure};

/// Receives notable events from the response pipeline.
///
/// Components take an observer instead of writing to a global logger, so
/// tests can record what happened and deployments can route events anywhere.
/// All methods default to no-ops.
pub trait ResponseObserver: Send + Sync {
    fn message_received(&self, _chars: usize) {}

    fn llm_requested(&self, _attempt: u32, _provider: &str, _model: &str) {}

    /// The provider call panicked; the generator gives up without retrying.
    fn llm_panicked(&self, _attempt: u32, _message: &str) {}

    fn llm_attempt_failed(&self, _attempt: u32, _failure: &ProviderFailure) {}

    fn retry_scheduled(&self, _attempt: u32, _delay: Duration) {}

    fn llm_replied(&self, _attempt: u32) {}

    fn fallback(&self, _reason: &FallbackReason) {}

    fn rule_matched(&self, _rule: &str) {}

    fn generic_reply(&self, _suggested: &[&str]) {}

    /// No usable reply could be produced; the caller sees the apology.
    fn reply_failed(&self, _reason: &str) {}
}

/// Forwards pipeline events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ResponseObserver for TracingObserver {
    fn message_received(&self, chars: usize) {
        info!(chars, "Handling chat message");
    }

    fn llm_requested(&self, attempt: u32, provider: &str, model: &str) {
        debug!(attempt, provider, model, "Requesting LLM completion");
    }

    fn llm_panicked(&self, attempt: u32, message: &str) {
        error!(attempt, "LLM provider panicked: {message}");
    }

    fn llm_attempt_failed(&self, attempt: u32, failure: &ProviderFailure) {
        warn!(attempt, kind = failure.kind(), "LLM attempt failed: {failure}");
    }

    fn retry_scheduled(&self, attempt: u32, delay: Duration) {
        debug!(attempt, delay_ms = delay.as_millis() as u64, "Retrying LLM request");
    }

    fn llm_replied(&self, attempt: u32) {
        info!(attempt, "Reply generated by LLM");
    }

    fn fallback(&self, reason: &FallbackReason) {
        match reason {
            FallbackReason::Disabled => debug!("Using rule-based reply: {reason}"),
            _ => warn!("Using rule-based reply: {reason}"),
        }
    }

    fn rule_matched(&self, rule: &str) {
        debug!(rule, "Keyword rule matched");
    }

    fn generic_reply(&self, suggested: &[&str]) {
        debug!(?suggested, "No keyword rule matched, using generic reply");
    }

    fn reply_failed(&self, reason: &str) {
        error!("Reply generation failed: {reason}");
    }
}
