//! LLM provider abstraction
//!
//! Provides a common interface for the generative text provider that the
//! response selector may consult outside the scripted question stages.

mod error;
mod openai;
mod types;

#[cfg(test)]
pub mod testing;

pub use error::{LlmError, LlmErrorKind};
pub use openai::{OpenAIConfig, OpenAIService, GROQ_CHAT_COMPLETIONS_URL};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for LLM providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: LlmService + ?Sized> LlmService for Arc<T> {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        (**self).complete(request).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}

/// Logging wrapper for LLM services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = %e.kind,
                    "LLM request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Build the production provider from configuration.
///
/// Returns `None` when the HTTP client cannot be constructed; the service
/// then runs on scripted responses only.
pub fn build_provider(config: OpenAIConfig) -> Option<Arc<dyn LlmService>> {
    match OpenAIService::new(config) {
        Ok(service) => Some(Arc::new(LoggingService::new(Arc::new(service)))),
        Err(e) => {
            tracing::warn!(error = %e, "LLM provider unavailable, using scripted responses");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockLlmService;
    use super::*;

    #[tokio::test]
    async fn test_logging_service_passes_through() {
        let mock = Arc::new(MockLlmService::new("mock-model"));
        mock.queue_response(LlmResponse::from_text("hello"));
        let logged = LoggingService::new(mock.clone());

        assert_eq!(logged.model_id(), "mock-model");

        let request = LlmRequest {
            system: vec![],
            messages: vec![LlmMessage::user("hi")],
            max_tokens: None,
            temperature: None,
        };
        let response = logged.complete(&request).await.unwrap();
        assert_eq!(response.text, "hello");
        assert_eq!(mock.recorded_requests().len(), 1);

        let err = logged.complete(&request).await.unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::Network);
    }
}
