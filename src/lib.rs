//! # legaldoc
//!
//! Intake service for legal documents. Clients upload a PDF, DOCX or TXT file
//! over HTTP; the service checks type and size, sanitizes the filename, writes
//! the file under a fixed upload directory and remembers it as the client's
//! current document.
//!
//! ## Architecture
//!
//! - `security` - filename sanitization and storage-root containment
//! - `validation` - the type/size gate
//! - `storage` - the upload directory backend
//! - `session` - signed session ids and per-session state
//! - `core` - configuration, the intake pipeline and the service facade
//! - `http` - the Axum router and handlers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use legaldoc::{DocumentService, ServiceConfig, SessionContext, UploadCandidate};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServiceConfig {
//!         upload_dir: PathBuf::from("./uploads"),
//!         ..Default::default()
//!     };
//!
//!     let service = DocumentService::new(config)?;
//!     service.initialize().await?;
//!
//!     let session = SessionContext::fresh();
//!     let stored = service
//!         .intake()
//!         .accept(&session, UploadCandidate::new("../contract.pdf", b"%PDF-1.7".to_vec()))
//!         .await?;
//!     println!("Stored {} at {}", stored.filename, stored.path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod http;
pub mod security;
pub mod session;
pub mod storage;
pub mod validation;

pub use core::config::{ServerConfig, ServiceConfig, SessionConfig};
pub use core::intake::{IntakeError, IntakePipeline, UploadCandidate};
pub use core::service::{DocumentService, ServiceError};
pub use security::{sanitize_filename, SanitizedFilename};
pub use session::{SessionContext, SessionId, SessionState};
pub use storage::{DocumentStore, StoredDocument, UploadStore};
pub use validation::UploadGate;

/// Version of the service
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging for the service (safe for testing)
pub fn init_logging() {
    // Only initialize logging once
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "legaldoc=info".into());

        let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();

        // This will fail silently if already initialized
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_service_initialization() {
        init_logging();
        let temp_dir = TempDir::new().unwrap();
        let config = ServiceConfig {
            upload_dir: temp_dir.path().join("uploads"),
            ..Default::default()
        };

        let service = DocumentService::new(config).unwrap();
        service.initialize().await.unwrap();
        assert!(temp_dir.path().join("uploads").is_dir());
    }
}
