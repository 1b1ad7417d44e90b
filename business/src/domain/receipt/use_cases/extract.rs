use async_trait::async_trait;

use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::services::ExtractionResult;
use crate::domain::receipt::value_objects::MediaType;

pub struct ExtractReceiptParams {
    pub document_bytes: Vec<u8>,
    pub media_type: MediaType,
}

/// Extraction-only operation: runs the document through the provider and
/// returns the structured record without persisting anything.
#[async_trait]
pub trait ExtractReceiptUseCase: Send + Sync {
    async fn execute(&self, params: ExtractReceiptParams)
    -> Result<ExtractionResult, ReceiptError>;
}
