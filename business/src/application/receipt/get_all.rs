use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::model::Receipt;
use crate::domain::receipt::repository::ReceiptRepository;
use crate::domain::receipt::use_cases::get_all::{GetAllReceiptsParams, GetAllReceiptsUseCase};

pub struct GetAllReceiptsUseCaseImpl {
    pub repository: Arc<dyn ReceiptRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetAllReceiptsUseCase for GetAllReceiptsUseCaseImpl {
    async fn execute(&self, params: GetAllReceiptsParams) -> Result<Vec<Receipt>, ReceiptError> {
        let receipts = self.repository.find(&params.filter).await?;

        self.logger
            .debug(&format!("History query returned {} receipts", receipts.len()));

        Ok(receipts)
    }
}
