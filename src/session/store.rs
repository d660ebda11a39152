//! Session storage backends

use crate::session::{SessionError, SessionId, SessionState};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a live session; expired sessions read as absent
    async fn load(&self, id: &SessionId) -> Option<SessionState>;

    /// Record the most recently accepted document, creating the session if needed
    async fn set_current_document(
        &self,
        id: &SessionId,
        filename: &str,
    ) -> Result<(), SessionError>;

    /// Drop expired sessions, returning how many were removed
    async fn purge_expired(&self) -> usize;
}

/// Process-local session store with an idle timeout
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionState>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn is_expired(&self, state: &SessionState) -> bool {
        // A last_seen in the future (clock step) converts to Err and counts as live
        (Utc::now() - state.last_seen)
            .to_std()
            .map(|idle| idle >= self.ttl)
            .unwrap_or(false)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> Option<SessionState> {
        let sessions = self.sessions.read().await;
        sessions
            .get(id)
            .filter(|state| !self.is_expired(state))
            .cloned()
    }

    async fn set_current_document(
        &self,
        id: &SessionId,
        filename: &str,
    ) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;

        let expired = sessions
            .get(id)
            .map(|state| self.is_expired(state))
            .unwrap_or(false);
        if expired {
            debug!("Session {} expired, starting over", id);
            sessions.remove(id);
        }

        let state = sessions.entry(*id).or_default();
        state.current_document = Some(filename.to_string());
        state.last_seen = Utc::now();
        Ok(())
    }

    async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, state| !self.is_expired(state));
        before - sessions.len()
    }
}
