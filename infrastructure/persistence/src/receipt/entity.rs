use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::receipt::model::Receipt;
use business::domain::receipt::services::LineItem;
use business::domain::receipt::value_objects::DocumentType;

#[derive(Debug, FromRow)]
pub struct ReceiptEntity {
    pub id: Uuid,
    pub merchant: String,
    pub date: NaiveDate,
    pub total: f64,
    pub currency: String,
    pub category: String,
    pub summary: String,
    pub document_type: String,
    pub items: serde_json::Value,
    pub file_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ReceiptEntity {
    pub fn into_domain(self) -> Receipt {
        Receipt::from_repository(
            self.id,
            self.merchant,
            self.date,
            self.total,
            self.currency,
            self.category,
            self.summary,
            self.document_type
                .parse::<DocumentType>()
                .unwrap_or(DocumentType::Ticket),
            serde_json::from_value::<Vec<LineItem>>(self.items).unwrap_or_default(),
            self.file_path,
            self.created_at,
        )
    }
}

/// Items column content for a receipt row.
pub fn items_to_json(items: &[LineItem]) -> serde_json::Value {
    serde_json::to_value(items).unwrap_or_else(|_| serde_json::Value::Array(vec![]))
}
