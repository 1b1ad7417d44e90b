use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::services::{DocumentExtractorService, ExtractionResult};
use crate::domain::receipt::use_cases::extract::{ExtractReceiptParams, ExtractReceiptUseCase};
use crate::domain::receipt::value_objects::DocumentUpload;

pub struct ExtractReceiptUseCaseImpl {
    pub extractor: Arc<dyn DocumentExtractorService>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ExtractReceiptUseCase for ExtractReceiptUseCaseImpl {
    async fn execute(
        &self,
        params: ExtractReceiptParams,
    ) -> Result<ExtractionResult, ReceiptError> {
        // Input validation happens here, before any provider call
        let document = DocumentUpload::new(params.document_bytes, params.media_type)?;

        self.logger.info(&format!(
            "Extracting {} document ({} bytes)",
            document.media_type,
            document.bytes.len()
        ));

        let result = self.extractor.extract(&document).await?;

        self.logger.info(&format!(
            "Extraction complete: {} from {} for {} {}",
            result.document_type, result.merchant, result.total, result.currency
        ));

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::receipt::services::LineItem;
    use crate::domain::receipt::value_objects::{DocumentType, MediaType};
    use mockall::mock;

    mock! {
        pub Extractor {}

        #[async_trait]
        impl DocumentExtractorService for Extractor {
            async fn extract(&self, document: &DocumentUpload) -> Result<ExtractionResult, ReceiptError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn oxxo_extraction() -> ExtractionResult {
        ExtractionResult {
            merchant: "OXXO".to_string(),
            total: 85.50,
            currency: "MXN".to_string(),
            category: "Food".to_string(),
            narrative_summary: "Ticket de OXXO por $85.50 MXN en bebidas y snacks.".to_string(),
            document_type: DocumentType::Ticket,
            items: vec![
                LineItem {
                    name: "Soda".to_string(),
                    price: 20.0,
                },
                LineItem {
                    name: "Chips".to_string(),
                    price: 65.50,
                },
            ],
        }
    }

    #[tokio::test]
    async fn should_return_extraction_when_document_is_valid() {
        let mut mock_extractor = MockExtractor::new();
        mock_extractor
            .expect_extract()
            .returning(|_| Ok(oxxo_extraction()));

        let use_case = ExtractReceiptUseCaseImpl {
            extractor: Arc::new(mock_extractor),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(ExtractReceiptParams {
                document_bytes: vec![0xFF, 0xD8, 0xFF],
                media_type: MediaType::Jpeg,
            })
            .await;

        assert!(result.is_ok());
        let extraction = result.unwrap();
        assert_eq!(extraction.merchant, "OXXO");
        assert_eq!(extraction.total, 85.50);
        assert_eq!(extraction.items.len(), 2);
        assert!(extraction.narrative_summary.starts_with("Ticket"));
    }

    #[tokio::test]
    async fn should_reject_empty_document_without_calling_provider() {
        let mut mock_extractor = MockExtractor::new();
        mock_extractor.expect_extract().never();

        let use_case = ExtractReceiptUseCaseImpl {
            extractor: Arc::new(mock_extractor),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(ExtractReceiptParams {
                document_bytes: vec![],
                media_type: MediaType::Png,
            })
            .await;

        assert!(matches!(result, Err(ReceiptError::EmptyDocument)));
    }

    #[tokio::test]
    async fn should_propagate_extraction_failure() {
        let mut mock_extractor = MockExtractor::new();
        mock_extractor
            .expect_extract()
            .returning(|_| Err(ReceiptError::MalformedResponse));

        let use_case = ExtractReceiptUseCaseImpl {
            extractor: Arc::new(mock_extractor),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(ExtractReceiptParams {
                document_bytes: vec![1, 2, 3],
                media_type: MediaType::Pdf,
            })
            .await;

        assert!(matches!(result, Err(ReceiptError::MalformedResponse)));
    }
}
