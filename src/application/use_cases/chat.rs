use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;

use crate::application::{Responder, ResponseObserver, TracingObserver};
use crate::domain::{ChatRequest, ChatResponse, DomainError};

/// Shown to the user when reply generation fails unexpectedly.
pub const APOLOGY: &str = "I'm sorry, I'm having trouble responding right now. \
Please try again in a moment!";

/// Request/response boundary around the [`Responder`].
///
/// Rejects blank messages before they reach the responder and converts any
/// panic outside the LLM stage into an error envelope carrying [`APOLOGY`].
/// Provider panics never get this far; the responder answers from the rules.
pub struct ChatService {
    responder: Arc<Responder>,
    observer: Arc<dyn ResponseObserver>,
}

impl ChatService {
    pub fn new(responder: Arc<Responder>) -> Self {
        Self {
            responder,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ResponseObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn responder(&self) -> &Responder {
        &self.responder
    }

    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, DomainError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(DomainError::validation("Message cannot be empty"));
        }

        self.observer.message_received(message.chars().count());

        match AssertUnwindSafe(self.responder.reply(message))
            .catch_unwind()
            .await
        {
            Ok(reply) if !reply.text().trim().is_empty() => {
                Ok(ChatResponse::success(reply.into_text()))
            }
            Ok(_) => {
                self.observer.reply_failed("responder produced an empty reply");
                Ok(unexpected_failure())
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                self.observer
                    .reply_failed(&format!("responder panicked: {message}"));
                Ok(unexpected_failure())
            }
        }
    }
}

/// Envelope for failures the caller can't act on.
pub fn unexpected_failure() -> ChatResponse {
    ChatResponse::failure(APOLOGY, "An unexpected error occurred")
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
