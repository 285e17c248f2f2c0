use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub customer_id: String,
    pub table_id: Option<i64>,
    pub reserved_for: DateTimeUtc,
    pub people_count: i32,
    pub status: String,
    pub notes: Option<String>,
    /// Confirmation code handed to the customer when booking.
    pub unique_code: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Phone"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::store_table::Entity",
        from = "Column::TableId",
        to = "super::store_table::Column::Id"
    )]
    StoreTable,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::store_table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StoreTable.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
