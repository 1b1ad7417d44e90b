use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::services::{ExtractionResult, LineItem};
use super::value_objects::DocumentType;

#[derive(Debug, Clone)]
pub struct Receipt {
    pub id: Uuid,
    pub merchant: String,
    pub date: NaiveDate,
    pub total: f64,
    pub currency: String,
    pub category: String,
    pub summary: String,
    pub document_type: DocumentType,
    pub items: Vec<LineItem>,
    pub file_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Receipt {
    /// Builds a receipt row from an extraction. The purchase date is
    /// stamped with the upload date rather than read from the document.
    pub fn from_extraction(
        extraction: ExtractionResult,
        date: NaiveDate,
        file_path: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            merchant: extraction.merchant,
            date,
            total: extraction.total,
            currency: extraction.currency,
            category: extraction.category,
            summary: extraction.narrative_summary,
            document_type: extraction.document_type,
            items: extraction.items,
            file_path,
            created_at: Utc::now(),
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn from_repository(
        id: Uuid,
        merchant: String,
        date: NaiveDate,
        total: f64,
        currency: String,
        category: String,
        summary: String,
        document_type: DocumentType,
        items: Vec<LineItem>,
        file_path: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            merchant,
            date,
            total,
            currency,
            category,
            summary,
            document_type,
            items,
            file_path,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_extraction() -> ExtractionResult {
        ExtractionResult {
            merchant: "OXXO".to_string(),
            total: 85.50,
            currency: "MXN".to_string(),
            category: "Food".to_string(),
            narrative_summary: "Ticket de OXXO por $85.50 MXN en bebidas.".to_string(),
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

    #[test]
    fn should_build_receipt_from_extraction_without_mutating_fields() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let receipt = Receipt::from_extraction(
            sample_extraction(),
            date,
            Some("abc.jpg".to_string()),
        );

        assert_eq!(receipt.merchant, "OXXO");
        assert_eq!(receipt.total, 85.50);
        assert_eq!(receipt.currency, "MXN");
        assert_eq!(receipt.document_type, DocumentType::Ticket);
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.date, date);
        assert_eq!(receipt.file_path.as_deref(), Some("abc.jpg"));
    }

    #[test]
    fn should_generate_distinct_ids_per_receipt() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let a = Receipt::from_extraction(sample_extraction(), date, None);
        let b = Receipt::from_extraction(sample_extraction(), date, None);
        assert_ne!(a.id, b.id);
    }
}
