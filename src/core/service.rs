//! Main legaldoc service implementation

use crate::core::config::ServiceConfig;
use crate::core::intake::IntakePipeline;
use crate::security::PathSecurityError;
use crate::session::{InMemorySessionStore, SessionError, SessionStore, SessionTokens};
use crate::storage::{DocumentStore, UploadStore};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Main service error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl From<PathSecurityError> for ServiceError {
    fn from(err: PathSecurityError) -> Self {
        ServiceError::Storage(err.to_string())
    }
}

/// The document intake service shared by all request handlers
pub struct DocumentService {
    config: ServiceConfig,
    store: Arc<dyn DocumentStore>,
    sessions: Arc<dyn SessionStore>,
    tokens: SessionTokens,
    intake: IntakePipeline,
}

impl DocumentService {
    /// Build the service with the filesystem upload store and in-memory sessions
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let store = Arc::new(UploadStore::new(config.upload_dir.clone()));
        let sessions = Arc::new(InMemorySessionStore::new(config.session.ttl()));
        Self::with_components(config, store, sessions)
    }

    /// Build the service around caller-supplied backends
    pub fn with_components(
        config: ServiceConfig,
        store: Arc<dyn DocumentStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self, ServiceError> {
        config.validate_config()?;

        let tokens = SessionTokens::new(&config.session.secret, config.session.ttl());
        let intake = IntakePipeline::new(config.upload_gate(), store.clone(), sessions.clone());

        Ok(Self {
            config,
            store,
            sessions,
            tokens,
            intake,
        })
    }

    /// Prepare backends (creates the upload directory)
    pub async fn initialize(&self) -> Result<(), ServiceError> {
        self.store.initialize().await?;
        info!(
            "legaldoc service initialized (uploads: {}, max {} bytes)",
            self.config.upload_dir.display(),
            self.config.max_upload_bytes
        );
        Ok(())
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn intake(&self) -> &IntakePipeline {
        &self.intake
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    pub fn session_tokens(&self) -> &SessionTokens {
        &self.tokens
    }

    /// Periodically drop expired sessions until the returned task is aborted
    pub fn spawn_session_reaper(&self) -> JoinHandle<()> {
        let sessions = Arc::clone(&self.sessions);
        let period = self.config.session.purge_interval();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let purged = sessions.purge_expired().await;
                if purged > 0 {
                    debug!("Purged {} expired sessions", purged);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::intake::UploadCandidate;
    use crate::session::SessionContext;
    use tempfile::TempDir;

    fn config_in(temp_dir: &TempDir) -> ServiceConfig {
        ServiceConfig {
            upload_dir: temp_dir.path().join("uploads"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_service_initialization_creates_upload_dir() {
        let temp_dir = TempDir::new().unwrap();
        let service = DocumentService::new(config_in(&temp_dir)).unwrap();

        service.initialize().await.unwrap();
        assert!(temp_dir.path().join("uploads").is_dir());

        // Re-initializing is harmless
        service.initialize().await.unwrap();
    }

    #[test]
    fn test_invalid_config_is_refused() {
        let config = ServiceConfig {
            max_upload_bytes: 0,
            ..Default::default()
        };
        assert!(matches!(
            DocumentService::new(config),
            Err(ServiceError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_intake_uses_configured_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let config = ServiceConfig {
            allowed_extensions: vec!["txt".to_string()],
            ..config_in(&temp_dir)
        };
        let service = DocumentService::new(config).unwrap();
        let session = SessionContext::fresh();

        assert!(service
            .intake()
            .accept(&session, UploadCandidate::new("contract.pdf", "x"))
            .await
            .is_err());
        assert!(service
            .intake()
            .accept(&session, UploadCandidate::new("notes.txt", "x"))
            .await
            .is_ok());

        let state = service.sessions().load(session.id()).await.unwrap();
        assert_eq!(state.current_document.as_deref(), Some("notes.txt"));
    }

    #[tokio::test]
    async fn test_session_reaper_purges_expired_sessions() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        let sessions = Arc::new(InMemorySessionStore::new(std::time::Duration::ZERO));
        let service = DocumentService::with_components(
            config.clone(),
            Arc::new(UploadStore::new(config.upload_dir.clone())),
            sessions.clone(),
        )
        .unwrap();

        sessions
            .set_current_document(&crate::session::SessionId::generate(), "old.pdf")
            .await
            .unwrap();
        assert_eq!(sessions.len().await, 1);

        // The first interval tick fires immediately
        let reaper = service.spawn_session_reaper();
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        reaper.abort();

        assert!(sessions.is_empty().await);
    }
}
