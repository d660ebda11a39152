//! Storage backend implementations

use crate::core::service::ServiceError;
use crate::security::SanitizedFilename;
use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;

pub mod uploads;

pub use uploads::UploadStore;

/// A persisted upload
#[derive(Debug, Clone, Serialize)]
pub struct StoredDocument {
    pub filename: SanitizedFilename,
    /// Absolute path under the storage root
    pub path: PathBuf,
    pub size: u64,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn initialize(&self) -> Result<(), ServiceError>;
    async fn store(
        &self,
        filename: &SanitizedFilename,
        content: &[u8],
    ) -> Result<StoredDocument, ServiceError>;
}
