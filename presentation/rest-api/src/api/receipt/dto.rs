use chrono::{DateTime, NaiveDate, Utc};
use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

use business::domain::receipt::model::Receipt;
use business::domain::receipt::services::{ExtractionResult, LineItem};
use business::domain::receipt::stats::{CategorySpend, MerchantSpend, SpendingStats};
use business::domain::receipt::value_objects::DocumentType;

#[derive(Debug, Clone, Serialize, Deserialize, Enum)]
pub enum DocumentTypeDto {
    #[oai(rename = "Ticket")]
    Ticket,
    #[oai(rename = "Factura")]
    Factura,
}

impl From<DocumentType> for DocumentTypeDto {
    fn from(document_type: DocumentType) -> Self {
        match document_type {
            DocumentType::Ticket => DocumentTypeDto::Ticket,
            DocumentType::Factura => DocumentTypeDto::Factura,
        }
    }
}

/// Document payload for the scan and extract endpoints.
#[derive(Debug, Clone, Object)]
pub struct ReceiptDocumentRequest {
    /// Document content, base64 encoded
    pub document_base64: String,
    /// Media type of the document (image/jpeg, image/png, application/pdf)
    pub media_type: String,
}

#[derive(Debug, Clone, Object)]
pub struct LineItemDto {
    pub name: String,
    pub price: f64,
}

impl From<LineItem> for LineItemDto {
    fn from(item: LineItem) -> Self {
        Self {
            name: item.name,
            price: item.price,
        }
    }
}

/// Structured record extracted from a document, before persistence.
#[derive(Debug, Clone, Object)]
pub struct ExtractionResponse {
    pub merchant: String,
    pub total: f64,
    /// ISO-like currency code as inferred by the model
    pub currency: String,
    /// Spending category; out-of-set values are passed through verbatim
    pub category: String,
    /// One-sentence summary, prefixed with the document type
    pub narrative_summary: String,
    pub document_type: DocumentTypeDto,
    pub items: Vec<LineItemDto>,
}

impl From<ExtractionResult> for ExtractionResponse {
    fn from(extraction: ExtractionResult) -> Self {
        Self {
            merchant: extraction.merchant,
            total: extraction.total,
            currency: extraction.currency,
            category: extraction.category,
            narrative_summary: extraction.narrative_summary,
            document_type: extraction.document_type.into(),
            items: extraction.items.into_iter().map(|i| i.into()).collect(),
        }
    }
}

/// A persisted receipt row.
#[derive(Debug, Clone, Object)]
pub struct ReceiptResponse {
    /// Receipt unique identifier
    pub id: String,
    pub merchant: String,
    /// Purchase date (stamped with the upload date)
    pub date: NaiveDate,
    pub total: f64,
    pub currency: String,
    pub category: String,
    pub summary: String,
    pub document_type: DocumentTypeDto,
    pub items: Vec<LineItemDto>,
    /// Stored document path, relative to the store root
    #[oai(skip_serializing_if_is_none)]
    pub file_path: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Receipt> for ReceiptResponse {
    fn from(receipt: Receipt) -> Self {
        Self {
            id: receipt.id.to_string(),
            merchant: receipt.merchant,
            date: receipt.date,
            total: receipt.total,
            currency: receipt.currency,
            category: receipt.category,
            summary: receipt.summary,
            document_type: receipt.document_type.into(),
            items: receipt.items.into_iter().map(|i| i.into()).collect(),
            file_path: receipt.file_path,
            created_at: receipt.created_at,
        }
    }
}

// --- DTOs for spending statistics ---

#[derive(Debug, Clone, Object)]
pub struct CategorySpendResponse {
    pub category: String,
    pub amount: f64,
    pub receipt_count: u64,
}

impl From<CategorySpend> for CategorySpendResponse {
    fn from(spend: CategorySpend) -> Self {
        Self {
            category: spend.category,
            amount: spend.amount,
            receipt_count: spend.receipt_count as u64,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct MerchantSpendResponse {
    pub merchant: String,
    pub amount: f64,
    pub receipt_count: u64,
}

impl From<MerchantSpend> for MerchantSpendResponse {
    fn from(spend: MerchantSpend) -> Self {
        Self {
            merchant: spend.merchant,
            amount: spend.amount,
            receipt_count: spend.receipt_count as u64,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct SpendingStatsResponse {
    pub total_spent: f64,
    pub receipt_count: u64,
    pub by_category: Vec<CategorySpendResponse>,
    pub by_merchant: Vec<MerchantSpendResponse>,
}

impl From<SpendingStats> for SpendingStatsResponse {
    fn from(stats: SpendingStats) -> Self {
        Self {
            total_spent: stats.total_spent,
            receipt_count: stats.receipt_count as u64,
            by_category: stats.by_category.into_iter().map(|c| c.into()).collect(),
            by_merchant: stats.by_merchant.into_iter().map(|m| m.into()).collect(),
        }
    }
}
