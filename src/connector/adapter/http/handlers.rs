use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::application::{unexpected_failure, ChatService, APOLOGY};
use crate::domain::{ChatRequest, ChatResponse, DomainError};

/// Shared state for every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    chat: Arc<ChatService>,
    /// Upper bound on a single chat request, covering every LLM retry.
    request_timeout: Duration,
}

impl AppState {
    pub fn new(chat: Arc<ChatService>, request_timeout: Duration) -> Self {
        Self {
            chat,
            request_timeout,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    llm_enabled: bool,
}

/// Build the application router: `GET /`, `GET /health`, `POST /api/chat`.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "FutureMe AI Backend is running!" }))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        llm_enabled: state.chat.responder().llm_enabled(),
    })
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> (StatusCode, Json<ChatResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected chat body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ChatResponse::failure(
                    "Please send a JSON body with a \"message\" field.",
                    rejection.body_text(),
                )),
            );
        }
    };

    // Dropping the inner future on timeout abandons any in-flight provider call.
    let outcome = tokio::time::timeout(state.request_timeout, state.chat.handle(request)).await;

    match outcome {
        Ok(Ok(response)) if response.is_success() => (StatusCode::OK, Json(response)),
        Ok(Ok(response)) => (StatusCode::INTERNAL_SERVER_ERROR, Json(response)),
        Ok(Err(DomainError::Validation(msg))) => (
            StatusCode::BAD_REQUEST,
            Json(ChatResponse::failure("Please type a message first.", msg)),
        ),
        Ok(Err(e)) => {
            error!("Chat request failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(unexpected_failure()))
        }
        Err(_) => {
            warn!(
                "Chat request exceeded {}s and was cancelled",
                state.request_timeout.as_secs()
            );
            (
                StatusCode::GATEWAY_TIMEOUT,
                Json(ChatResponse::failure(APOLOGY, "Request timed out")),
            )
        }
    }
}
