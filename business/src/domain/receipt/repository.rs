use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::model::Receipt;

/// History filter. Empty merchant list and open bounds mean "everything".
#[derive(Debug, Clone, Default)]
pub struct ReceiptFilter {
    pub merchants: Vec<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[async_trait]
pub trait ReceiptRepository: Send + Sync {
    /// Receipts matching the filter, newest first.
    async fn find(&self, filter: &ReceiptFilter) -> Result<Vec<Receipt>, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Receipt, RepositoryError>;
    async fn save(&self, receipt: &Receipt) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
