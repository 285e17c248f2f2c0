use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed id of the only row this table ever holds.
pub const SINGLETON_ID: i32 = 1;

/// Store identity shown on tickets and receipts. Singleton row maintained
/// with an insert-or-update on the fixed id.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "store_profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub store_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub currency: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
