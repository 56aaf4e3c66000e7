//! Session state and the store abstraction
//!
//! A session is created the first time its id is seen and lives for the
//! lifetime of the process. Each session carries a turn gate so the chat
//! service can serialize concurrent requests for the same id while reads
//! stay available.

mod memory;

pub use memory::InMemorySessionStore;

use crate::conversation::{resolve_stage, Stage};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),
}

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One immutable entry in a session's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Conversation state for one session id
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    messages: Vec<Message>,
    /// Cached copy of the derived stage, for introspection only
    pub current_stage: Stage,
    pub problem_understood: bool,
    pub remedies_provided: bool,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
            current_stage: Stage::Greeting,
            problem_understood: false,
            remedies_provided: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append a message, refresh the cached stage and the flags
    pub fn push(&mut self, message: Message) -> Stage {
        let role = message.role;
        self.messages.push(message);
        self.current_stage = resolve_stage(&self.messages);

        if self.current_stage != Stage::Greeting {
            self.problem_understood = true;
        }
        if role == Role::Assistant && self.current_stage == Stage::Analysis {
            self.remedies_provided = true;
        }
        self.current_stage
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id.clone(),
            message_count: self.messages.len(),
            stage: self.current_stage,
            problem_understood: self.problem_understood,
            remedies_provided: self.remedies_provided,
        }
    }
}

/// Read-only view of a session for introspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub message_count: usize,
    pub stage: Stage,
    pub problem_understood: bool,
    pub remedies_provided: bool,
}

/// One stored session plus the gate that serializes its chat turns
pub struct SessionSlot {
    turn: Mutex<()>,
    session: Mutex<Session>,
}

impl SessionSlot {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            turn: Mutex::new(()),
            session: Mutex::new(Session::new(id)),
        }
    }

    /// Wait until no other turn runs for this session; the guard is the turn
    pub async fn begin_turn(&self) -> MutexGuard<'_, ()> {
        self.turn.lock().await
    }

    /// Copy of the history as currently committed
    pub async fn history(&self) -> Vec<Message> {
        self.session.lock().await.messages().to_vec()
    }
}

pub type SessionHandle = Arc<SessionSlot>;

/// Storage for sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the session for `id`, creating an empty one if it is unknown
    async fn get_or_create(&self, id: &str) -> SessionHandle;

    /// Append a message to an existing session, returning its new stage
    async fn append_message(&self, id: &str, message: Message) -> Result<Stage, SessionError>;

    /// Summary of an existing session
    async fn read(&self, id: &str) -> Option<SessionSummary>;
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn get_or_create(&self, id: &str) -> SessionHandle {
        (**self).get_or_create(id).await
    }

    async fn append_message(&self, id: &str, message: Message) -> Result<Stage, SessionError> {
        (**self).append_message(id, message).await
    }

    async fn read(&self, id: &str) -> Option<SessionSummary> {
        (**self).read(id).await
    }
}
