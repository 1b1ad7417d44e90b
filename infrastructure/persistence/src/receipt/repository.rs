use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::receipt::model::Receipt;
use business::domain::receipt::repository::{ReceiptFilter, ReceiptRepository};

use super::entity::{ReceiptEntity, items_to_json};

pub struct ReceiptRepositoryPostgres {
    pool: PgPool,
}

impl ReceiptRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReceiptRepository for ReceiptRepositoryPostgres {
    async fn find(&self, filter: &ReceiptFilter) -> Result<Vec<Receipt>, RepositoryError> {
        let entities = sqlx::query_as::<_, ReceiptEntity>(
            r#"SELECT id, merchant, date, total, currency, category, summary, document_type, items, file_path, created_at
            FROM receipts
            WHERE (cardinality($1::text[]) = 0 OR merchant = ANY($1))
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY created_at DESC"#,
        )
        .bind(&filter.merchants)
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Receipt, RepositoryError> {
        let entity = sqlx::query_as::<_, ReceiptEntity>(
            "SELECT id, merchant, date, total, currency, category, summary, document_type, items, file_path, created_at FROM receipts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn save(&self, receipt: &Receipt) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO receipts (id, merchant, date, total, currency, category, summary, document_type, items, file_path, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                merchant = EXCLUDED.merchant,
                date = EXCLUDED.date,
                total = EXCLUDED.total,
                currency = EXCLUDED.currency,
                category = EXCLUDED.category,
                summary = EXCLUDED.summary,
                document_type = EXCLUDED.document_type,
                items = EXCLUDED.items,
                file_path = EXCLUDED.file_path"#,
        )
        .bind(receipt.id)
        .bind(&receipt.merchant)
        .bind(receipt.date)
        .bind(receipt.total)
        .bind(&receipt.currency)
        .bind(&receipt.category)
        .bind(&receipt.summary)
        .bind(receipt.document_type.to_string())
        .bind(items_to_json(&receipt.items))
        .bind(&receipt.file_path)
        .bind(receipt.created_at)
        .execute(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM receipts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(())
    }
}
