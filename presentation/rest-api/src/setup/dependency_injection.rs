use std::sync::Arc;

use logger::TracingLogger;
use persistence::receipt::repository::ReceiptRepositoryPostgres;
use storage::LocalDocumentStorage;

use gemini::client::{GeminiClient, GenerateContent};
use gemini::document_extractor::GeminiDocumentExtractor;

use business::application::receipt::delete::DeleteReceiptUseCaseImpl;
use business::application::receipt::extract::ExtractReceiptUseCaseImpl;
use business::application::receipt::get_all::GetAllReceiptsUseCaseImpl;
use business::application::receipt::scan::ScanReceiptUseCaseImpl;
use business::application::receipt::stats::GetSpendingStatsUseCaseImpl;

use crate::config::gemini_config::GeminiConfig;
use crate::config::storage_config::StorageConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub receipt_api: crate::api::receipt::routes::ReceiptApi,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool) -> anyhow::Result<Self> {
        let logger = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new();

        // Infrastructure adapters
        let repository = Arc::new(ReceiptRepositoryPostgres::new(pool));

        let storage_config = StorageConfig::from_env();
        let document_storage = Arc::new(LocalDocumentStorage::new(storage_config.base_dir));

        let gemini_config = GeminiConfig::from_env();
        let transport: Arc<dyn GenerateContent> =
            Arc::new(GeminiClient::new(gemini_config.api_key));
        let extractor = Arc::new(GeminiDocumentExtractor::new(transport));

        // Receipt use cases
        let scan_use_case = Arc::new(ScanReceiptUseCaseImpl {
            extractor: extractor.clone(),
            storage: document_storage.clone(),
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let extract_use_case = Arc::new(ExtractReceiptUseCaseImpl {
            extractor,
            logger: logger.clone(),
        });
        let get_all_use_case = Arc::new(GetAllReceiptsUseCaseImpl {
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let delete_use_case = Arc::new(DeleteReceiptUseCaseImpl {
            repository: repository.clone(),
            storage: document_storage,
            logger: logger.clone(),
        });
        let stats_use_case = Arc::new(GetSpendingStatsUseCaseImpl {
            repository,
            logger,
        });

        let receipt_api = crate::api::receipt::routes::ReceiptApi::new(
            scan_use_case,
            extract_use_case,
            get_all_use_case,
            delete_use_case,
            stats_use_case,
        );

        Ok(Self {
            health_api,
            receipt_api,
        })
    }
}
