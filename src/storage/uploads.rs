//! Filesystem store for accepted uploads

use crate::core::service::ServiceError;
use crate::security::{join_within_root, SanitizedFilename};
use crate::storage::{DocumentStore, StoredDocument};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Writes uploads flat under a single storage root.
///
/// Same-named uploads overwrite each other (last write wins). Writes are not
/// atomic, so a concurrent reader may observe a partially written file.
pub struct UploadStore {
    /// Configured storage root, possibly relative
    root: PathBuf,

    /// Canonical root, resolved once the directory exists
    canonical_root: OnceCell<PathBuf>,
}

impl UploadStore {
    /// Create a store rooted at `root`. Nothing is touched on disk until
    /// [`UploadStore::ensure_root`] or the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            canonical_root: OnceCell::new(),
        }
    }

    /// Configured storage root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the storage root if absent and return its canonical path.
    ///
    /// Safe to call concurrently; the directory is created at most once per
    /// store and an existing directory is not an error.
    pub async fn ensure_root(&self) -> Result<&Path, ServiceError> {
        let canonical = self
            .canonical_root
            .get_or_try_init(|| async {
                fs::create_dir_all(&self.root).await.map_err(|e| {
                    ServiceError::Storage(format!(
                        "Failed to create upload directory {}: {}",
                        self.root.display(),
                        e
                    ))
                })?;

                let canonical = fs::canonicalize(&self.root).await?;
                info!("Upload directory ready at {}", canonical.display());
                Ok::<_, ServiceError>(canonical)
            })
            .await?;

        Ok(canonical.as_path())
    }

    /// Absolute path a sanitized name would be stored at
    pub async fn path_for(&self, filename: &SanitizedFilename) -> Result<PathBuf, ServiceError> {
        let root = self.ensure_root().await?;
        Ok(join_within_root(root, filename.as_str())?)
    }
}

#[async_trait]
impl DocumentStore for UploadStore {
    async fn initialize(&self) -> Result<(), ServiceError> {
        self.ensure_root().await.map(|_| ())
    }

    async fn store(
        &self,
        filename: &SanitizedFilename,
        content: &[u8],
    ) -> Result<StoredDocument, ServiceError> {
        let path = self.path_for(filename).await?;

        fs::write(&path, content).await?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());

        Ok(StoredDocument {
            filename: filename.clone(),
            path,
            size: content.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::sanitize_filename;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ensure_root_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("nested").join("uploads");
        let store = UploadStore::new(&root);

        assert!(!root.exists());
        store.ensure_root().await.unwrap();
        assert!(root.is_dir());

        // Second call is a no-op
        store.initialize().await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_root_tolerates_existing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path());
        let canonical = store.ensure_root().await.unwrap();
        assert_eq!(canonical, temp_dir.path().canonicalize().unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_first_use() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(UploadStore::new(temp_dir.path().join("uploads")));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.initialize().await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert!(temp_dir.path().join("uploads").is_dir());
    }

    #[tokio::test]
    async fn test_store_writes_under_root() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path().join("uploads"));

        let name = sanitize_filename("contract.pdf");
        let doc = store.store(&name, b"%PDF-1.7 lease").await.unwrap();

        assert_eq!(doc.filename.as_str(), "contract.pdf");
        assert_eq!(doc.size, 14);
        assert!(doc.path.is_absolute());
        assert_eq!(std::fs::read(&doc.path).unwrap(), b"%PDF-1.7 lease");
        assert_eq!(
            doc.path.parent().unwrap(),
            temp_dir.path().join("uploads").canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn test_store_overwrites_same_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path());
        let name = sanitize_filename("notes.txt");

        store.store(&name, b"first draft").await.unwrap();
        let doc = store.store(&name, b"final").await.unwrap();

        assert_eq!(std::fs::read(&doc.path).unwrap(), b"final");
    }

    #[tokio::test]
    async fn test_traversal_name_stays_inside_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("uploads");
        let store = UploadStore::new(&root);

        let name = sanitize_filename("../../etc/passwd.txt");
        let doc = store.store(&name, b"x").await.unwrap();

        assert!(doc.path.starts_with(root.canonicalize().unwrap()));
        assert!(!temp_dir.path().join("passwd.txt").exists());
    }

    #[tokio::test]
    async fn test_empty_name_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path());

        let result = store.store(&sanitize_filename("../.."), b"x").await;
        assert!(matches!(result, Err(ServiceError::Storage(_))));
    }
}
