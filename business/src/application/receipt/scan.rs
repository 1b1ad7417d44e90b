use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::logger::Logger;
use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::model::Receipt;
use crate::domain::receipt::repository::ReceiptRepository;
use crate::domain::receipt::services::{DocumentExtractorService, DocumentStorageService};
use crate::domain::receipt::use_cases::scan::{ScanReceiptParams, ScanReceiptUseCase};
use crate::domain::receipt::value_objects::DocumentUpload;

pub struct ScanReceiptUseCaseImpl {
    pub extractor: Arc<dyn DocumentExtractorService>,
    pub storage: Arc<dyn DocumentStorageService>,
    pub repository: Arc<dyn ReceiptRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ScanReceiptUseCase for ScanReceiptUseCaseImpl {
    async fn execute(&self, params: ScanReceiptParams) -> Result<Receipt, ReceiptError> {
        let document = DocumentUpload::new(params.document_bytes, params.media_type)?;

        self.logger.info("Scanning receipt document");
        let extraction = self.extractor.extract(&document).await?;

        // The original file is only archived once extraction succeeded
        let stored = self.storage.store(&document).await?;

        // Purchase date is the upload date, not whatever the document says
        let receipt =
            Receipt::from_extraction(extraction, Utc::now().date_naive(), Some(stored.path));
        self.repository.save(&receipt).await?;

        self.logger.info(&format!(
            "Receipt saved: {} ({} {} at {})",
            receipt.id, receipt.total, receipt.currency, receipt.merchant
        ));

        Ok(receipt)
    }
}
