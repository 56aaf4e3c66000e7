//! `OpenAI`-compatible chat completions client
//!
//! Talks to any endpoint that speaks the `chat/completions` wire format.
//! The default deployment points it at Groq.

use super::types::{LlmMessage, LlmRequest, LlmResponse, MessageRole, Usage};
use super::{LlmError, LlmErrorKind, LlmService};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default endpoint used when no base URL is configured
pub const GROQ_CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Settings for one `OpenAI`-compatible model
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

/// OpenAI-compatible service implementation
pub struct OpenAIService {
    client: Client,
    api_key: String,
    base_url: String,
    model_id: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIService {
    pub fn new(config: OpenAIConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url,
            model_id: config.model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn translate_request(&self, request: &LlmRequest) -> OpenAIRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        // System messages first
        if !request.system.is_empty() {
            let system_text = request
                .system
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n");

            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: Some(system_text),
            });
        }

        messages.extend(request.messages.iter().map(Self::translate_message));

        OpenAIRequest {
            model: self.model_id.clone(),
            messages,
            max_tokens: Some(request.max_tokens.unwrap_or(self.max_tokens)),
            temperature: Some(request.temperature.unwrap_or(self.temperature)),
            stream: false,
        }
    }

    fn translate_message(msg: &LlmMessage) -> OpenAIMessage {
        let role = match msg.role {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        OpenAIMessage {
            role: role.to_string(),
            content: Some(msg.text.clone()),
        }
    }

    fn normalize_response(resp: OpenAIResponse) -> Result<LlmResponse, LlmError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::unknown("No choices in response"))?;

        let text = choice.message.content.unwrap_or_default();
        let usage = resp.usage.map_or_else(Usage::default, |u| Usage {
            input_tokens: u64::from(u.prompt_tokens),
            output_tokens: u64::from(u.completion_tokens),
        });

        Ok(LlmResponse {
            text,
            usage,
        })
    }

    fn classify_status(status: reqwest::StatusCode, body: &str) -> LlmError {
        let kind = LlmErrorKind::from_status(status.as_u16());
        let message = serde_json::from_str::<OpenAIErrorResponse>(body)
            .map_or_else(|_| body.to_string(), |resp| resp.error.message);

        let prefix = match kind {
            LlmErrorKind::Auth => "Authentication failed",
            LlmErrorKind::RateLimit => "Rate limit exceeded",
            LlmErrorKind::InvalidRequest => "Invalid request",
            LlmErrorKind::ServerError => "Server error",
            LlmErrorKind::Network | LlmErrorKind::Unknown => "Unexpected response",
        };

        LlmError::new(kind, format!("{prefix} (HTTP {status}): {message}"))
    }
}

#[async_trait]
impl LlmService for OpenAIService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let openai_request = self.translate_request(request);

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::network(format!("Connection failed: {e}"))
                } else {
                    LlmError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_status(status, &body));
        }

        let openai_response: OpenAIResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::unknown(format!("Failed to parse response: {e}")))?;

        Self::normalize_response(openai_response)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
#[allow(clippy::struct_field_names)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::SystemContent;

    fn service() -> OpenAIService {
        OpenAIService::new(OpenAIConfig {
            api_key: "test-key".to_string(),
            base_url: GROQ_CHAT_COMPLETIONS_URL.to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.7,
            max_tokens: 800,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_translate_request_puts_system_first() {
        let request = LlmRequest {
            system: vec![SystemContent::new("persona"), SystemContent::new("rules")],
            messages: vec![LlmMessage::user("hello"), LlmMessage::assistant("namaste")],
            max_tokens: None,
            temperature: None,
        };

        let translated = service().translate_request(&request);
        let json = serde_json::to_value(&translated).unwrap();

        assert_eq!(json["model"], "llama-3.1-8b-instant");
        assert_eq!(json["max_tokens"], 800);
        assert_eq!(json["stream"], false);
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "persona\n\nrules");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[2]["content"], "namaste");
    }

    #[test]
    fn test_request_overrides_defaults() {
        let request = LlmRequest {
            system: vec![],
            messages: vec![LlmMessage::user("hi")],
            max_tokens: Some(50),
            temperature: Some(0.1),
        };

        let translated = service().translate_request(&request);
        assert_eq!(translated.max_tokens, Some(50));
        assert_eq!(translated.temperature, Some(0.1));
        assert_eq!(translated.messages.len(), 1);
    }

    #[test]
    fn test_normalize_response() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Jai Shree Ram"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
        }"#;
        let resp: OpenAIResponse = serde_json::from_str(body).unwrap();
        let normalized = OpenAIService::normalize_response(resp).unwrap();

        assert_eq!(normalized.text, "Jai Shree Ram");
        assert_eq!(normalized.usage.input_tokens, 12);
        assert_eq!(normalized.usage.output_tokens, 4);
    }

    #[test]
    fn test_normalize_rejects_empty_choices() {
        let resp: OpenAIResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let err = OpenAIService::normalize_response(resp).unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::Unknown);
    }

    #[test]
    fn test_classify_status_uses_provider_message() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        let err = OpenAIService::classify_status(reqwest::StatusCode::UNAUTHORIZED, body);
        assert_eq!(err.kind, LlmErrorKind::Auth);
        assert!(err.message.contains("Invalid API Key"));

        let err = OpenAIService::classify_status(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.kind, LlmErrorKind::ServerError);
        assert!(err.message.contains("upstream down"));
    }
}
