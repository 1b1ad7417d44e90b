use async_trait::async_trait;

use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::model::Receipt;
use crate::domain::receipt::value_objects::MediaType;

pub struct ScanReceiptParams {
    pub document_bytes: Vec<u8>,
    pub media_type: MediaType,
}

/// Full scan flow: extract, archive the original document, persist the row.
#[async_trait]
pub trait ScanReceiptUseCase: Send + Sync {
    async fn execute(&self, params: ScanReceiptParams) -> Result<Receipt, ReceiptError>;
}
