use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed id of the only row this table ever holds.
pub const SINGLETON_ID: i32 = 1;

/// Daily ticket counter. At most one row exists; it is read and rewritten
/// exclusively inside the order admission transaction, under a row lock.
/// `sequence_no` is the last ticket issued on `last_updated`'s date; a stored
/// date older than today means the effective count is zero (lazy rollover,
/// nothing resets the row between days).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "token_sequences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub sequence_no: i32,
    pub last_updated: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
