//! Per-client session state
//!
//! Sessions are identified by a random [`SessionId`] carried in a signed
//! cookie ([`SessionTokens`]). Request handlers resolve a [`SessionContext`]
//! and hand it to the intake pipeline explicitly; nothing reads session data
//! from ambient state.

pub mod store;
pub mod token;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

pub use store::{InMemorySessionStore, SessionStore};
pub use token::SessionTokens;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid session token")]
    InvalidToken,

    #[error("Failed to sign session token: {0}")]
    Signing(String),
}

/// Opaque session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| SessionError::InvalidToken)
    }
}

/// Server-side state kept for one session
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    /// Sanitized filename of the most recently accepted upload.
    /// Written by the intake pipeline; no endpoint reads it yet.
    pub current_document: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            current_document: None,
            created_at: now,
            last_seen: now,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// The session a request belongs to
#[derive(Debug, Clone)]
pub struct SessionContext {
    id: SessionId,
    is_new: bool,
}

impl SessionContext {
    /// Context for a session the client already holds a valid cookie for
    pub fn resumed(id: SessionId) -> Self {
        Self { id, is_new: false }
    }

    /// Context for a brand new session; the client has no cookie yet
    pub fn fresh() -> Self {
        Self {
            id: SessionId::generate(),
            is_new: true,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Whether the client arrived without a valid session cookie
    pub fn is_new(&self) -> bool {
        self.is_new
    }
}
