use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use business::domain::errors::StorageError;
use business::domain::receipt::services::{DocumentStorageService, StoredDocument};
use business::domain::receipt::value_objects::DocumentUpload;

/// Writes uploaded documents to a local directory under a generated
/// unique name. The returned path is relative to the store root, so rows
/// stay valid if the root moves.
pub struct LocalDocumentStorage {
    base_dir: PathBuf,
}

impl LocalDocumentStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl DocumentStorageService for LocalDocumentStorage {
    async fn store(&self, document: &DocumentUpload) -> Result<StoredDocument, StorageError> {
        let file_name = format!("{}.{}", Uuid::new_v4(), document.media_type.extension());

        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|_| StorageError::WriteFailed)?;
        tokio::fs::write(self.base_dir.join(&file_name), &document.bytes)
            .await
            .map_err(|_| StorageError::WriteFailed)?;

        Ok(StoredDocument { path: file_name })
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        tokio::fs::remove_file(self.base_dir.join(path))
            .await
            .map_err(|_| StorageError::DeleteFailed)
    }
}
