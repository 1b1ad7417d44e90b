use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::StorageError;

use super::errors::ReceiptError;
use super::value_objects::{DocumentType, DocumentUpload};

/// A single purchased item extracted from a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub price: f64,
}

/// Structured record extracted from a receipt or invoice.
///
/// Only produced from a fully well-formed provider payload; there are no
/// partially populated results. `category` and `currency` stay free-form
/// strings: the model is instructed with a closed set but not constrained
/// to it, and out-of-set values are passed through verbatim.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub merchant: String,
    pub total: f64,
    pub currency: String,
    pub category: String,
    pub narrative_summary: String,
    pub document_type: DocumentType,
    pub items: Vec<LineItem>,
}

/// Service port for extracting structured data from receipt documents.
#[async_trait]
pub trait DocumentExtractorService: Send + Sync {
    async fn extract(&self, document: &DocumentUpload) -> Result<ExtractionResult, ReceiptError>;
}

/// Handle to a document written to the store.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    /// Path relative to the store root.
    pub path: String,
}

/// Service port for persisting the original uploaded document.
#[async_trait]
pub trait DocumentStorageService: Send + Sync {
    async fn store(&self, document: &DocumentUpload) -> Result<StoredDocument, StorageError>;
    async fn remove(&self, path: &str) -> Result<(), StorageError>;
}
