use crate::{db::DbPool, entities::tax, errors::ServiceError, models::TaxMode};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct TaxService {
    db_pool: Arc<DbPool>,
}

impl TaxService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, title))]
    pub async fn create_tax(
        &self,
        title: String,
        rate: Decimal,
        mode: TaxMode,
    ) -> Result<tax::Model, ServiceError> {
        let db = &*self.db_pool;

        let row = tax::ActiveModel {
            title: Set(title),
            rate: Set(rate),
            mode: Set(mode.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(tax_id = row.id, "Tax created");
        Ok(row)
    }

    pub async fn list_taxes(&self) -> Result<Vec<tax::Model>, ServiceError> {
        let db = &*self.db_pool;

        Ok(tax::Entity::find()
            .order_by_asc(tax::Column::Title)
            .all(db)
            .await?)
    }
}
