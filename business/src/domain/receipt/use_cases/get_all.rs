use async_trait::async_trait;

use crate::domain::receipt::errors::ReceiptError;
use crate::domain::receipt::model::Receipt;
use crate::domain::receipt::repository::ReceiptFilter;

pub struct GetAllReceiptsParams {
    pub filter: ReceiptFilter,
}

#[async_trait]
pub trait GetAllReceiptsUseCase: Send + Sync {
    async fn execute(&self, params: GetAllReceiptsParams) -> Result<Vec<Receipt>, ReceiptError>;
}
