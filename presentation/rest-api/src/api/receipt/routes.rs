use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDate;
use poem_openapi::{OpenApi, param::Path, param::Query, payload::Json};
use uuid::Uuid;

use business::domain::receipt::errors::ReceiptError;
use business::domain::receipt::repository::ReceiptFilter;
use business::domain::receipt::use_cases::delete::{DeleteReceiptParams, DeleteReceiptUseCase};
use business::domain::receipt::use_cases::extract::{
    ExtractReceiptParams, ExtractReceiptUseCase,
};
use business::domain::receipt::use_cases::get_all::{
    GetAllReceiptsParams, GetAllReceiptsUseCase,
};
use business::domain::receipt::use_cases::scan::{ScanReceiptParams, ScanReceiptUseCase};
use business::domain::receipt::use_cases::stats::{
    GetSpendingStatsParams, GetSpendingStatsUseCase,
};
use business::domain::receipt::value_objects::MediaType;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::receipt::dto::{
    ExtractionResponse, ReceiptDocumentRequest, ReceiptResponse, SpendingStatsResponse,
};
use crate::api::tags::ApiTags;

pub struct ReceiptApi {
    scan_use_case: Arc<dyn ScanReceiptUseCase>,
    extract_use_case: Arc<dyn ExtractReceiptUseCase>,
    get_all_use_case: Arc<dyn GetAllReceiptsUseCase>,
    delete_use_case: Arc<dyn DeleteReceiptUseCase>,
    stats_use_case: Arc<dyn GetSpendingStatsUseCase>,
}

impl ReceiptApi {
    pub fn new(
        scan_use_case: Arc<dyn ScanReceiptUseCase>,
        extract_use_case: Arc<dyn ExtractReceiptUseCase>,
        get_all_use_case: Arc<dyn GetAllReceiptsUseCase>,
        delete_use_case: Arc<dyn DeleteReceiptUseCase>,
        stats_use_case: Arc<dyn GetSpendingStatsUseCase>,
    ) -> Self {
        Self {
            scan_use_case,
            extract_use_case,
            get_all_use_case,
            delete_use_case,
            stats_use_case,
        }
    }

    /// Decodes the document payload shared by the scan and extract endpoints.
    fn decode_document(
        request: ReceiptDocumentRequest,
    ) -> Result<(Vec<u8>, MediaType), Json<ErrorResponse>> {
        let media_type = request
            .media_type
            .parse::<MediaType>()
            .map_err(|_| ReceiptError::UnsupportedMediaType.into_error_response().1)?;

        let bytes = BASE64.decode(request.document_base64.as_bytes()).map_err(|_| {
            Json(ErrorResponse {
                name: "ValidationError".to_string(),
                message: "receipt.invalid_base64".to_string(),
            })
        })?;

        Ok((bytes, media_type))
    }

    /// Splits the comma-separated `merchant` query parameter.
    fn merchant_filter(raw: Option<String>) -> Vec<String> {
        raw.map(|merchants| {
            merchants
                .split(',')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect()
        })
        .unwrap_or_default()
    }
}

/// Receipt management API
///
/// Endpoints for scanning, browsing, and aggregating purchase receipts.
#[OpenApi]
impl ReceiptApi {
    /// Scan and save a receipt
    ///
    /// Runs the document through AI extraction, archives the original file,
    /// and persists the resulting receipt.
    #[oai(path = "/receipts/scan", method = "post", tag = "ApiTags::Receipts")]
    async fn scan_receipt(&self, body: Json<ReceiptDocumentRequest>) -> ScanReceiptResponse {
        let (document_bytes, media_type) = match Self::decode_document(body.0) {
            Ok(decoded) => decoded,
            Err(json) => return ScanReceiptResponse::BadRequest(json),
        };

        match self
            .scan_use_case
            .execute(ScanReceiptParams {
                document_bytes,
                media_type,
            })
            .await
        {
            Ok(receipt) => ScanReceiptResponse::Created(Json(receipt.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => ScanReceiptResponse::BadRequest(json),
                    422 => ScanReceiptResponse::UnprocessableEntity(json),
                    _ => ScanReceiptResponse::InternalError(json),
                }
            }
        }
    }

    /// Extract a receipt without saving
    ///
    /// Runs the document through AI extraction and returns the structured
    /// record. Nothing is persisted.
    #[oai(path = "/receipts/extract", method = "post", tag = "ApiTags::Receipts")]
    async fn extract_receipt(
        &self,
        body: Json<ReceiptDocumentRequest>,
    ) -> ExtractReceiptResponse {
        let (document_bytes, media_type) = match Self::decode_document(body.0) {
            Ok(decoded) => decoded,
            Err(json) => return ExtractReceiptResponse::BadRequest(json),
        };

        match self
            .extract_use_case
            .execute(ExtractReceiptParams {
                document_bytes,
                media_type,
            })
            .await
        {
            Ok(extraction) => ExtractReceiptResponse::Ok(Json(extraction.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => ExtractReceiptResponse::BadRequest(json),
                    422 => ExtractReceiptResponse::UnprocessableEntity(json),
                    _ => ExtractReceiptResponse::InternalError(json),
                }
            }
        }
    }

    /// List receipts
    ///
    /// Returns receipt history, newest first. Optional merchant and date
    /// range filters combine.
    #[oai(path = "/receipts", method = "get", tag = "ApiTags::Receipts")]
    async fn get_all_receipts(
        &self,
        merchant: Query<Option<String>>,
        from: Query<Option<NaiveDate>>,
        to: Query<Option<NaiveDate>>,
    ) -> GetAllReceiptsResponse {
        let filter = ReceiptFilter {
            merchants: Self::merchant_filter(merchant.0),
            from: from.0,
            to: to.0,
        };

        match self
            .get_all_use_case
            .execute(GetAllReceiptsParams { filter })
            .await
        {
            Ok(receipts) => {
                let responses: Vec<ReceiptResponse> =
                    receipts.into_iter().map(|r| r.into()).collect();
                GetAllReceiptsResponse::Ok(Json(responses))
            }
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetAllReceiptsResponse::InternalError(json)
            }
        }
    }

    /// Spending statistics
    ///
    /// Aggregates total spend, per-category spend, and per-merchant spend
    /// over the same optional filters as the history listing.
    #[oai(path = "/receipts/stats", method = "get", tag = "ApiTags::Receipts")]
    async fn get_spending_stats(
        &self,
        merchant: Query<Option<String>>,
        from: Query<Option<NaiveDate>>,
        to: Query<Option<NaiveDate>>,
    ) -> GetSpendingStatsResponse {
        let filter = ReceiptFilter {
            merchants: Self::merchant_filter(merchant.0),
            from: from.0,
            to: to.0,
        };

        match self
            .stats_use_case
            .execute(GetSpendingStatsParams { filter })
            .await
        {
            Ok(stats) => GetSpendingStatsResponse::Ok(Json(stats.into())),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetSpendingStatsResponse::InternalError(json)
            }
        }
    }

    /// Delete a receipt
    ///
    /// Removes the receipt row and its stored document file.
    #[oai(path = "/receipts/:id", method = "delete", tag = "ApiTags::Receipts")]
    async fn delete_receipt(&self, id: Path<String>) -> DeleteReceiptResponse {
        let uuid = match Uuid::parse_str(&id.0) {
            Ok(uuid) => uuid,
            Err(_) => {
                return DeleteReceiptResponse::BadRequest(Json(ErrorResponse {
                    name: "ValidationError".to_string(),
                    message: "receipt.invalid_id".to_string(),
                }));
            }
        };

        match self
            .delete_use_case
            .execute(DeleteReceiptParams { id: uuid })
            .await
        {
            Ok(()) => DeleteReceiptResponse::NoContent,
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => DeleteReceiptResponse::NotFound(json),
                    _ => DeleteReceiptResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum ScanReceiptResponse {
    #[oai(status = 201)]
    Created(Json<ReceiptResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ExtractReceiptResponse {
    #[oai(status = 200)]
    Ok(Json<ExtractionResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetAllReceiptsResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<ReceiptResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetSpendingStatsResponse {
    #[oai(status = 200)]
    Ok(Json<SpendingStatsResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteReceiptResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
