use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::receipt::errors::ReceiptError;

pub struct DeleteReceiptParams {
    pub id: Uuid,
}

/// Removes the receipt row and its stored document file.
#[async_trait]
pub trait DeleteReceiptUseCase: Send + Sync {
    async fn execute(&self, params: DeleteReceiptParams) -> Result<(), ReceiptError>;
}
