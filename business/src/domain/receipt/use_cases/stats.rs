use async_trait::async_trait;

use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::repository::ReceiptFilter;
use crate::domain::receipt::stats::SpendingStats;

pub struct GetSpendingStatsParams {
    pub filter: ReceiptFilter,
}

#[async_trait]
pub trait GetSpendingStatsUseCase: Send + Sync {
    async fn execute(&self, params: GetSpendingStatsParams)
    -> Result<SpendingStats, ReceiptError>;
}
