use crate::{db::DbPool, entities::invoice, errors::ServiceError};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use std::sync::Arc;
use tracing::{info, instrument};

/// Creates and looks up sale invoices. An invoice is written before the
/// admission transaction when a sale is paid up front; the order then carries
/// its id as a foreign key.
#[derive(Clone)]
pub struct InvoiceService {
    db_pool: Arc<DbPool>,
}

impl InvoiceService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn create_invoice(
        &self,
        sub_total: Decimal,
        tax_total: Decimal,
        total: Decimal,
    ) -> Result<i64, ServiceError> {
        let db = &*self.db_pool;

        let row = invoice::ActiveModel {
            sub_total: Set(sub_total),
            tax_total: Set(tax_total),
            total: Set(total),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(invoice_id = row.id, "Invoice created");
        Ok(row.id)
    }

    pub async fn get_invoice(&self, invoice_id: i64) -> Result<invoice::Model, ServiceError> {
        let db = &*self.db_pool;

        invoice::Entity::find_by_id(invoice_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Invoice {} not found", invoice_id)))
    }
}
