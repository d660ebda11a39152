//! Upload intake pipeline
//!
//! An upload moves through `Received → Validated → Sanitized → Stored →
//! Acknowledged`, or ends in `Rejected` when the gate refuses it. Nothing is
//! written for a rejected upload. Storage and session failures propagate
//! unchanged; there are no retries.

use crate::core::service::ServiceError;
use crate::security::sanitize_filename;
use crate::session::{SessionContext, SessionStore};
use crate::storage::{DocumentStore, StoredDocument};
use crate::validation::UploadGate;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why an upload did not make it to disk
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("No file provided")]
    MissingFile,

    #[error("No file selected")]
    EmptySelection,

    #[error("Invalid file type. Please upload {} files.", describe_types(.allowed))]
    UnsupportedType { allowed: Vec<String> },

    #[error("File size exceeds {} limit.", format_limit(.limit))]
    TooLarge { limit: usize },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IntakeError {
    /// True for rejections caused by the client's input
    pub fn is_rejection(&self) -> bool {
        !matches!(self, IntakeError::Service(_))
    }
}

/// "PDF", "PDF or TXT", "PDF, DOCX, or TXT"
fn describe_types(allowed: &[String]) -> String {
    let names: Vec<String> = allowed.iter().map(|ext| ext.to_ascii_uppercase()).collect();
    match names.as_slice() {
        [] => "supported".to_string(),
        [only] => only.clone(),
        [first, second] => format!("{} or {}", first, second),
        [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
    }
}

fn format_limit(limit: &usize) -> String {
    const MIB: usize = 1024 * 1024;
    let limit = *limit;
    if limit >= MIB && limit % MIB == 0 {
        format!("{}MB", limit / MIB)
    } else {
        format!("{} bytes", limit)
    }
}

/// Lifecycle stage of a single upload, used in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeStage {
    Received,
    Validated,
    Sanitized,
    Stored,
    Acknowledged,
    Rejected,
}

impl fmt::Display for IntakeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntakeStage::Received => "received",
            IntakeStage::Validated => "validated",
            IntakeStage::Sanitized => "sanitized",
            IntakeStage::Stored => "stored",
            IntakeStage::Acknowledged => "acknowledged",
            IntakeStage::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// An upload as received from the client
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    /// Client-supplied filename, untrusted
    pub filename: String,
    pub content: Vec<u8>,
    /// Length the client declared for the request body, if any
    pub declared_length: Option<u64>,
}

impl UploadCandidate {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            declared_length: None,
        }
    }

    pub fn with_declared_length(mut self, declared_length: Option<u64>) -> Self {
        self.declared_length = declared_length;
        self
    }
}

/// Gate → sanitize → store → record in session
pub struct IntakePipeline {
    gate: UploadGate,
    store: Arc<dyn DocumentStore>,
    sessions: Arc<dyn SessionStore>,
}

impl IntakePipeline {
    pub fn new(
        gate: UploadGate,
        store: Arc<dyn DocumentStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            gate,
            store,
            sessions,
        }
    }

    pub fn gate(&self) -> &UploadGate {
        &self.gate
    }

    /// Run one upload through the pipeline on behalf of `session`
    pub async fn accept(
        &self,
        session: &SessionContext,
        candidate: UploadCandidate,
    ) -> Result<StoredDocument, IntakeError> {
        debug!(
            stage = %IntakeStage::Received,
            session = %session.id(),
            filename = %candidate.filename,
            size = candidate.content.len(),
            "Upload received"
        );

        self.gate
            .check_declared_length(candidate.declared_length)
            .and_then(|_| {
                self.gate
                    .check_candidate(&candidate.filename, candidate.content.len())
            })
            .map_err(|e| Self::rejected(&candidate.filename, e))?;
        debug!(stage = %IntakeStage::Validated, "Upload passed the gate");

        let sanitized = sanitize_filename(&candidate.filename);
        self.gate
            .check_sanitized(&sanitized)
            .map_err(|e| Self::rejected(&candidate.filename, e))?;
        debug!(stage = %IntakeStage::Sanitized, sanitized = %sanitized, "Filename sanitized");

        let document = self
            .store
            .store(&sanitized, &candidate.content)
            .await
            .map_err(|e| {
                warn!("Failed to store {}: {}", sanitized, e);
                e
            })?;
        debug!(stage = %IntakeStage::Stored, path = %document.path.display(), "Upload stored");

        self.sessions
            .set_current_document(session.id(), sanitized.as_str())
            .await
            .map_err(ServiceError::from)?;

        info!(
            stage = %IntakeStage::Acknowledged,
            session = %session.id(),
            filename = %sanitized,
            size = document.size,
            "Document uploaded"
        );

        Ok(document)
    }

    fn rejected(filename: &str, error: IntakeError) -> IntakeError {
        info!(stage = %IntakeStage::Rejected, filename = %filename, reason = %error, "Upload rejected");
        error
    }
}
