//! Response selection
//!
//! Question and analysis stages are always answered from the script so the
//! user gets exactly one question per turn and remedies only after all five
//! answers. Greeting and ongoing stages may be generated by the provider;
//! any provider failure falls back to the same scripted path.

use super::classifier::classify_history;
use super::picker::TemplatePicker;
use super::remedies::{template_for, RemedyTemplate};
use super::stage::user_turns;
use super::{canned, Stage};
use crate::llm::{LlmErrorKind, LlmMessage, LlmRequest, LlmService, SystemContent};
use crate::session::{Message, Role};
use crate::system_prompt::{steering_line, SYSTEM_PROMPT};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Most recent messages forwarded to the provider
pub const CONTEXT_MESSAGES: usize = 10;

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Provider,
    Scripted,
    Remedy(RemedyTemplate),
}

/// Selected reply text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

/// Why the provider produced no usable reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderFailure {
    NotConfigured,
    Timeout(Duration),
    Error { kind: LlmErrorKind, message: String },
    EmptyCompletion,
}

impl std::fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConfigured => f.write_str("provider not configured"),
            Self::Timeout(after) => write!(f, "provider timed out after {}ms", after.as_millis()),
            Self::Error { kind, message } => write!(f, "provider error ({kind}): {message}"),
            Self::EmptyCompletion => f.write_str("provider returned an empty completion"),
        }
    }
}

/// Tagged result of one provider attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Completed(String),
    Failed(ProviderFailure),
}

/// Picks the assistant reply for a stage
pub struct ResponseSelector {
    provider: Option<Arc<dyn LlmService>>,
    picker: Box<dyn TemplatePicker>,
    provider_timeout: Duration,
}

impl ResponseSelector {
    pub fn new(
        provider: Option<Arc<dyn LlmService>>,
        picker: Box<dyn TemplatePicker>,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            picker,
            provider_timeout,
        }
    }

    pub fn provider_available(&self) -> bool {
        self.provider.is_some()
    }

    /// Select the reply for `stage` given the full history
    pub async fn select(&self, history: &[Message], stage: Stage) -> Reply {
        if stage.is_scripted() {
            return self.fallback(history, stage);
        }

        match self.generate(history, stage).await {
            ProviderOutcome::Completed(text) => Reply {
                text,
                source: ReplySource::Provider,
            },
            ProviderOutcome::Failed(ProviderFailure::NotConfigured) => self.fallback(history, stage),
            ProviderOutcome::Failed(reason) => {
                tracing::warn!(stage = %stage, reason = %reason, "Falling back to scripted reply");
                self.fallback(history, stage)
            }
        }
    }

    /// Ask the provider for a reply, bounded by the configured timeout
    pub async fn generate(&self, history: &[Message], stage: Stage) -> ProviderOutcome {
        let Some(provider) = &self.provider else {
            return ProviderOutcome::Failed(ProviderFailure::NotConfigured);
        };

        let request = build_request(history, stage);

        match timeout(self.provider_timeout, provider.complete(&request)).await {
            Ok(Ok(response)) => {
                if response.text.trim().is_empty() {
                    ProviderOutcome::Failed(ProviderFailure::EmptyCompletion)
                } else {
                    ProviderOutcome::Completed(response.text)
                }
            }
            Ok(Err(e)) => ProviderOutcome::Failed(ProviderFailure::Error {
                kind: e.kind,
                message: e.message,
            }),
            Err(_) => ProviderOutcome::Failed(ProviderFailure::Timeout(self.provider_timeout)),
        }
    }

    /// Scripted reply: canned candidate, or a remedy template at analysis
    pub fn fallback(&self, history: &[Message], stage: Stage) -> Reply {
        if stage == Stage::Analysis {
            let classification = classify_history(history);
            let template = template_for(&classification);
            tracing::debug!(?classification, ?template, "Selected remedy template");
            return Reply {
                text: template.text().to_string(),
                source: ReplySource::Remedy(template),
            };
        }

        let options = canned::candidates(stage);
        if options.is_empty() {
            return Reply {
                text: RemedyTemplate::DEFAULT.text().to_string(),
                source: ReplySource::Remedy(RemedyTemplate::DEFAULT),
            };
        }

        let index = self.picker.pick(stage, user_turns(history), options.len());
        let text = options.get(index).unwrap_or(&options[0]);
        Reply {
            text: (*text).to_string(),
            source: ReplySource::Scripted,
        }
    }
}

/// Provider request: system prompt, the recent history, and a steering line
pub fn build_request(history: &[Message], stage: Stage) -> LlmRequest {
    let start = history.len().saturating_sub(CONTEXT_MESSAGES);
    let mut messages: Vec<LlmMessage> = history[start..]
        .iter()
        .map(|m| match m.role {
            Role::User => LlmMessage::user(m.content.clone()),
            Role::Assistant => LlmMessage::assistant(m.content.clone()),
        })
        .collect();
    messages.push(LlmMessage::user(steering_line(stage)));

    LlmRequest {
        system: vec![SystemContent::new(SYSTEM_PROMPT)],
        messages,
        max_tokens: None,
        temperature: None,
    }
}
