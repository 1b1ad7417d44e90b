use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::repository::ReceiptRepository;
use crate::domain::receipt::stats::{SpendingStats, spending_stats};
use crate::domain::receipt::use_cases::stats::{GetSpendingStatsParams, GetSpendingStatsUseCase};

pub struct GetSpendingStatsUseCaseImpl {
    pub repository: Arc<dyn ReceiptRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetSpendingStatsUseCase for GetSpendingStatsUseCaseImpl {
    async fn execute(
        &self,
        params: GetSpendingStatsParams,
    ) -> Result<SpendingStats, ReceiptError> {
        let receipts = self.repository.find(&params.filter).await?;
        let stats = spending_stats(&receipts);

        self.logger.debug(&format!(
            "Stats over {} receipts: {} total",
            stats.receipt_count, stats.total_spent
        ));

        Ok(stats)
    }
}
