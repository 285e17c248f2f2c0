use crate::{
    db::DbPool,
    entities::{menu_item, menu_item_addon, menu_item_variant},
    errors::ServiceError,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Clone, Deserialize)]
pub struct NewMenuItem {
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub tax_id: Option<i64>,
}

/// A menu item with its variants and addons nested, the shape the POS
/// front end consumes on startup.
#[derive(Debug, Serialize)]
pub struct CatalogItem {
    #[serde(flatten)]
    pub item: menu_item::Model,
    pub variants: Vec<menu_item_variant::Model>,
    pub addons: Vec<menu_item_addon::Model>,
}

#[derive(Clone)]
pub struct MenuService {
    db_pool: Arc<DbPool>,
}

impl MenuService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, new_item), fields(title = %new_item.title))]
    pub async fn create_item(&self, new_item: NewMenuItem) -> Result<menu_item::Model, ServiceError> {
        let db = &*self.db_pool;

        let row = menu_item::ActiveModel {
            title: Set(new_item.title),
            description: Set(new_item.description),
            price: Set(new_item.price),
            tax_id: Set(new_item.tax_id),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(item_id = row.id, "Menu item created");
        Ok(row)
    }

    #[instrument(skip(self, title))]
    pub async fn create_variant(
        &self,
        item_id: i64,
        title: String,
        price: Decimal,
    ) -> Result<menu_item_variant::Model, ServiceError> {
        let db = &*self.db_pool;
        self.ensure_item_exists(item_id).await?;

        let row = menu_item_variant::ActiveModel {
            item_id: Set(item_id),
            title: Set(title),
            price: Set(price),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(row)
    }

    #[instrument(skip(self, title))]
    pub async fn create_addon(
        &self,
        item_id: i64,
        title: String,
        price: Decimal,
    ) -> Result<menu_item_addon::Model, ServiceError> {
        let db = &*self.db_pool;
        self.ensure_item_exists(item_id).await?;

        let row = menu_item_addon::ActiveModel {
            item_id: Set(item_id),
            title: Set(title),
            price: Set(price),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(row)
    }

    pub async fn list_items(&self) -> Result<Vec<menu_item::Model>, ServiceError> {
        let db = &*self.db_pool;

        Ok(menu_item::Entity::find()
            .order_by_asc(menu_item::Column::Title)
            .all(db)
            .await?)
    }

    /// Active menu items with their variants and addons grouped in.
    #[instrument(skip(self))]
    pub async fn catalog(&self) -> Result<Vec<CatalogItem>, ServiceError> {
        let db = &*self.db_pool;

        let items = menu_item::Entity::find()
            .filter(menu_item::Column::IsActive.eq(true))
            .order_by_asc(menu_item::Column::Title)
            .all(db)
            .await?;

        let mut variants_by_item: HashMap<i64, Vec<menu_item_variant::Model>> = HashMap::new();
        for variant in menu_item_variant::Entity::find().all(db).await? {
            variants_by_item
                .entry(variant.item_id)
                .or_default()
                .push(variant);
        }
        let mut addons_by_item: HashMap<i64, Vec<menu_item_addon::Model>> = HashMap::new();
        for addon in menu_item_addon::Entity::find().all(db).await? {
            addons_by_item.entry(addon.item_id).or_default().push(addon);
        }

        Ok(items
            .into_iter()
            .map(|item| CatalogItem {
                variants: variants_by_item.remove(&item.id).unwrap_or_default(),
                addons: addons_by_item.remove(&item.id).unwrap_or_default(),
                item,
            })
            .collect())
    }

    async fn ensure_item_exists(&self, item_id: i64) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        menu_item::Entity::find_by_id(item_id)
            .one(db)
            .await?
            .map(|_| ())
            .ok_or_else(|| ServiceError::NotFound(format!("Menu item {} not found", item_id)))
    }
}
