use crate::{
    db::DbPool,
    entities::{store_profile, store_table},
    errors::ServiceError,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Clone, Deserialize)]
pub struct StoreProfileUpdate {
    pub store_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStoreTable {
    pub title: String,
    pub floor: Option<String>,
    pub seating_capacity: Option<i32>,
}

/// Store-level configuration: the singleton profile row and dining tables.
#[derive(Clone)]
pub struct SettingsService {
    db_pool: Arc<DbPool>,
}

impl SettingsService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    pub async fn store_profile(&self) -> Result<Option<store_profile::Model>, ServiceError> {
        let db = &*self.db_pool;

        Ok(store_profile::Entity::find_by_id(store_profile::SINGLETON_ID)
            .one(db)
            .await?)
    }

    /// Insert-or-update on the fixed profile id.
    #[instrument(skip(self, update), fields(store_name = %update.store_name))]
    pub async fn set_store_profile(
        &self,
        update: StoreProfileUpdate,
    ) -> Result<store_profile::Model, ServiceError> {
        let db = &*self.db_pool;

        let existing = store_profile::Entity::find_by_id(store_profile::SINGLETON_ID)
            .one(db)
            .await?;

        let saved = match existing {
            Some(row) => {
                let mut active: store_profile::ActiveModel = row.into();
                active.store_name = Set(update.store_name);
                active.address = Set(update.address);
                active.phone = Set(update.phone);
                active.email = Set(update.email);
                active.currency = Set(update.currency);
                active.update(db).await?
            }
            None => {
                store_profile::ActiveModel {
                    id: Set(store_profile::SINGLETON_ID),
                    store_name: Set(update.store_name),
                    address: Set(update.address),
                    phone: Set(update.phone),
                    email: Set(update.email),
                    currency: Set(update.currency),
                }
                .insert(db)
                .await?
            }
        };

        info!("Store profile saved");
        Ok(saved)
    }

    pub async fn list_tables(&self) -> Result<Vec<store_table::Model>, ServiceError> {
        let db = &*self.db_pool;

        Ok(store_table::Entity::find()
            .filter(store_table::Column::IsActive.eq(true))
            .order_by_asc(store_table::Column::Title)
            .all(db)
            .await?)
    }

    #[instrument(skip(self, new_table), fields(title = %new_table.title))]
    pub async fn create_table(
        &self,
        new_table: NewStoreTable,
    ) -> Result<store_table::Model, ServiceError> {
        let db = &*self.db_pool;

        let row = store_table::ActiveModel {
            title: Set(new_table.title),
            floor: Set(new_table.floor),
            seating_capacity: Set(new_table.seating_capacity),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(table_id = row.id, "Dining table created");
        Ok(row)
    }
}
