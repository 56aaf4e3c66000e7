//! API request and response types

use crate::chat::{ChatInput, ChatOutcome, IncomingMessage};
use crate::conversation::Stage;
use serde::{Deserialize, Serialize};

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<IncomingMessage>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl From<ChatRequest> for ChatInput {
    fn from(req: ChatRequest) -> Self {
        Self {
            messages: req.messages,
            session_id: req.session_id,
        }
    }
}

/// Chat response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub session_id: String,
    pub stage: Stage,
    pub suggestions: Vec<String>,
}

impl From<ChatOutcome> for ChatResponse {
    fn from(outcome: ChatOutcome) -> Self {
        Self {
            message: outcome.message,
            session_id: outcome.session_id,
            stage: outcome.stage,
            suggestions: outcome.suggestions,
        }
    }
}

/// Service banner returned at `/`
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub features: &'static [&'static str],
    pub provider_available: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub provider_available: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
