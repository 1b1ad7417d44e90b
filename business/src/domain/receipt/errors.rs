#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    #[error("receipt.empty_document")]
    EmptyDocument,
    #[error("receipt.unsupported_media_type")]
    UnsupportedMediaType,
    #[error("receipt.provider_unavailable")]
    ProviderUnavailable,
    #[error("receipt.malformed_response")]
    MalformedResponse,
    #[error("receipt.provider_error: {0}")]
    ProviderError(String),
    #[error("receipt.extraction_failed: {0}")]
    ExtractionFailed(String),
    #[error("receipt.not_found")]
    NotFound,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
    #[error("storage.persistence")]
    Storage(#[from] crate::domain::errors::StorageError),
}
