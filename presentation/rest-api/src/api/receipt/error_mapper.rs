use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::receipt::errors::ReceiptError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ReceiptError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            ReceiptError::EmptyDocument => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "receipt.empty_document",
            ),
            ReceiptError::UnsupportedMediaType => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "receipt.unsupported_media_type",
            ),
            ReceiptError::NotFound => (StatusCode::NOT_FOUND, "NotFound", "receipt.not_found"),
            ReceiptError::MalformedResponse => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ExtractionError",
                "receipt.malformed_response",
            ),
            ReceiptError::ProviderUnavailable => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ExtractionError",
                "receipt.provider_unavailable",
            ),
            ReceiptError::ProviderError(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ExtractionError",
                "receipt.provider_error",
            ),
            ReceiptError::ExtractionFailed(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ExtractionError",
                "receipt.extraction_failed",
            ),
            ReceiptError::Repository(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "repository.persistence",
            ),
            ReceiptError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "storage.persistence",
            ),
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message: message.to_string(),
            }),
        )
    }
}
