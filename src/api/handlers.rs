//! HTTP request handlers

use super::types::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse, RootResponse};
use super::AppState;
use crate::session::SessionSummary;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

const WELCOME: &str = "Welcome to Pandit Pradeep Kiradoo's Astrology API";
const FEATURES: &[&str] = &[
    "problem_understanding",
    "astrological_remedies",
    "planetary_analysis",
];

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/session/:id", get(get_session))
        .with_state(state)
}

async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: WELCOME,
        version: env!("CARGO_PKG_VERSION"),
        features: FEATURES,
        provider_available: state.chat.provider_available(),
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        provider_available: state.chat.provider_available(),
    })
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    // Run the turn on its own task so a panic becomes a 500 instead of a dropped connection
    let service = state.chat.clone();
    let outcome = tokio::spawn(async move { service.chat(req.into()).await })
        .await
        .map_err(|e| AppError::Internal(format!("chat task failed: {e}")))?
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(outcome.into()))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSummary>, AppError> {
    state
        .chat
        .session_info(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
