//! One chat turn: append the user's messages, pick a reply, record it
//!
//! The session's turn gate is held from reading the history until the
//! reply is stored, so turns for one session never interleave.

use crate::conversation::{resolve_stage, suggestions_for, ReplySource, ResponseSelector, Stage};
use crate::session::{Message, SessionError, SessionStore, SessionSummary};
use serde::Deserialize;
use std::sync::Arc;

/// Message as submitted by a client; only `user` roles are kept
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub role: String,
    pub content: String,
}

impl IncomingMessage {
    fn is_user(&self) -> bool {
        self.role == "user"
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatInput {
    pub messages: Vec<IncomingMessage>,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    pub message: String,
    pub session_id: String,
    pub stage: Stage,
    pub suggestions: Vec<String>,
}

pub struct ChatService {
    store: Arc<dyn SessionStore>,
    selector: ResponseSelector,
}

impl ChatService {
    pub fn new(store: Arc<dyn SessionStore>, selector: ResponseSelector) -> Self {
        Self { store, selector }
    }

    pub fn provider_available(&self) -> bool {
        self.selector.provider_available()
    }

    pub async fn session_info(&self, session_id: &str) -> Option<SessionSummary> {
        self.store.read(session_id).await
    }

    pub async fn chat(&self, input: ChatInput) -> Result<ChatOutcome, SessionError> {
        let session_id = input
            .session_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(new_session_id);

        let handle = self.store.get_or_create(&session_id).await;
        let _turn = handle.begin_turn().await;

        // Nothing is committed until a reply exists; a failed turn leaves the session as it was
        let pending: Vec<Message> = input
            .messages
            .into_iter()
            .filter(IncomingMessage::is_user)
            .map(|incoming| Message::user(incoming.content))
            .collect();
        let mut history = handle.history().await;
        history.extend(pending.iter().cloned());

        let stage = resolve_stage(&history);
        let reply = self.selector.select(&history, stage).await;

        for message in pending {
            self.store.append_message(&session_id, message).await?;
        }
        self.store
            .append_message(&session_id, Message::assistant(reply.text.clone()))
            .await?;

        match reply.source {
            ReplySource::Remedy(template) => {
                tracing::info!(session_id = %session_id, stage = %stage, ?template, "Remedies provided");
            }
            source => {
                tracing::debug!(session_id = %session_id, stage = %stage, ?source, "Reply selected");
            }
        }

        Ok(ChatOutcome {
            message: reply.text,
            session_id,
            stage,
            suggestions: suggestions_for(stage)
                .iter()
                .map(ToString::to_string)
                .collect(),
        })
    }
}

fn new_session_id() -> String {
    format!("session_{}", uuid::Uuid::new_v4().simple())
}
