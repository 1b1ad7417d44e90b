use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::repository::ReceiptRepository;
use crate::domain::receipt::services::DocumentStorageService;
use crate::domain::receipt::use_cases::delete::{DeleteReceiptParams, DeleteReceiptUseCase};

pub struct DeleteReceiptUseCaseImpl {
    pub repository: Arc<dyn ReceiptRepository>,
    pub storage: Arc<dyn DocumentStorageService>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteReceiptUseCase for DeleteReceiptUseCaseImpl {
    async fn execute(&self, params: DeleteReceiptParams) -> Result<(), ReceiptError> {
        let receipt = self
            .repository
            .get_by_id(params.id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ReceiptError::NotFound,
                other => ReceiptError::Repository(other),
            })?;

        self.repository.delete(params.id).await?;

        // The row is gone either way; a missing file is only worth a warning
        if let Some(path) = &receipt.file_path {
            if self.storage.remove(path).await.is_err() {
                self.logger
                    .warn(&format!("Could not remove stored document: {}", path));
            }
        }

        self.logger.info(&format!("Receipt deleted: {}", params.id));
        Ok(())
    }
}
