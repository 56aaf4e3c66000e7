//! In-memory session store
//!
//! Sessions live until the process exits; there is no eviction.

use super::{Message, SessionError, SessionHandle, SessionSlot, SessionStore, SessionSummary};
use crate::conversation::Stage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Session store backed by a map of per-session slots
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: &str) -> SessionHandle {
        if let Some(handle) = self.get(id).await {
            return handle;
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(id.to_string())
            .or_insert_with(|| {
                tracing::info!(session_id = %id, "Created session");
                Arc::new(SessionSlot::new(id))
            })
            .clone()
    }

    async fn append_message(&self, id: &str, message: Message) -> Result<Stage, SessionError> {
        let handle = self
            .get(id)
            .await
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        let mut session = handle.session.lock().await;
        Ok(session.push(message))
    }

    async fn read(&self, id: &str) -> Option<SessionSummary> {
        let handle = self.get(id).await?;
        let session = handle.session.lock().await;
        Some(session.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let store = InMemorySessionStore::new();
        let a = store.get_or_create("s1").await;
        let b = store.get_or_create("s1").await;
        assert!(Arc::ptr_eq(&a, &b));

        let c = store.get_or_create("s2").await;
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(store.read("s2").await.unwrap().message_count, 0);
    }

    #[tokio::test]
    async fn test_append_and_read() {
        let store = InMemorySessionStore::new();
        store.get_or_create("s1").await;

        assert_eq!(
            store.append_message("s1", Message::user("hi")).await,
            Ok(Stage::Greeting)
        );
        assert_eq!(
            store.append_message("s1", Message::user("career trouble")).await,
            Ok(Stage::Question1)
        );

        let summary = store.read("s1").await.unwrap();
        assert_eq!(summary.message_count, 2);
        assert_eq!(summary.stage, Stage::Question1);
        assert!(summary.problem_understood);

        let handle = store.get_or_create("s1").await;
        assert_eq!(handle.history().await[1].content, "career trouble");
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = InMemorySessionStore::new();
        assert!(store.read("missing").await.is_none());
        assert_eq!(
            store.append_message("missing", Message::user("hi")).await,
            Err(SessionError::NotFound("missing".to_string()))
        );
        assert!(store.read("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_turns_are_per_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let handle = store.get_or_create("s1").await;
        let _turn = handle.begin_turn().await;

        // A second turn on s1 waits
        let blocked = {
            let store = store.clone();
            tokio::spawn(async move {
                let handle = store.get_or_create("s1").await;
                let _turn = handle.begin_turn().await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!blocked.is_finished());

        // Writes and reads on s1 are not held up by the open turn
        store.append_message("s1", Message::user("hi")).await.unwrap();
        assert_eq!(store.read("s1").await.unwrap().message_count, 1);

        // Other sessions are not blocked by s1
        let other = store.get_or_create("s2").await;
        drop(other.begin_turn().await);

        blocked.abort();
    }
}
