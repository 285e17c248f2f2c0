use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An admitted order header. `token_no` is unique per calendar day, not
/// globally; readers must never see this row without its items (the two are
/// written in one transaction).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub delivery_type: String,
    pub customer_type: String,
    pub customer_id: Option<String>,
    pub table_id: Option<i64>,
    pub token_no: i32,
    pub payment_status: String,
    pub invoice_id: Option<i64>,
    pub status: String,
    pub placed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
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
    #[sea_orm(
        belongs_to = "super::invoice::Entity",
        from = "Column::InvoiceId",
        to = "super::invoice::Column::Id"
    )]
    Invoice,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
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

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
