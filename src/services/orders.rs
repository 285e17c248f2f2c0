use crate::{
    db::DbPool,
    entities::{customer, menu_item, menu_item_addon, menu_item_variant, order, order_item,
        store_table, token_sequence},
    errors::ServiceError,
    models::{CustomerType, DeliveryType, OrderItemStatus, OrderStatus, PaymentStatus},
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use lazy_static::lazy_static;
use prometheus::IntCounter;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{error, info, instrument};

lazy_static! {
    static ref ORDER_ADMISSIONS: IntCounter = IntCounter::new(
        "pos_order_admissions_total",
        "Total number of orders admitted"
    )
    .expect("metric can be created");
    static ref ORDER_ADMISSION_FAILURES: IntCounter = IntCounter::new(
        "pos_order_admission_failures_total",
        "Total number of failed order admissions"
    )
    .expect("metric can be created");
}

/// One cart line of an incoming order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: i64,
    #[serde(default)]
    pub variant_id: Option<i64>,
    pub price: Decimal,
    pub quantity: i32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub addon_ids: Option<Vec<i64>>,
}

/// Everything the admission transaction needs besides payment context.
///
/// A non-empty cart is the caller's contract (the HTTP layer rejects empty
/// carts with 400); an empty cart here simply writes an order with zero lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub cart: Vec<CartLine>,
    pub delivery_type: DeliveryType,
    pub customer_type: CustomerType,
    pub customer_id: Option<String>,
    pub table_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderPlacement {
    pub order_id: i64,
    pub token_no: i32,
}

/// Kitchen board: open orders of the last day with their lines and the
/// addon definitions those lines reference.
#[derive(Debug, Serialize)]
pub struct KitchenBoard {
    pub orders: Vec<KitchenOrder>,
    pub items: Vec<KitchenItem>,
    pub addons: Vec<AddonSummary>,
}

#[derive(Debug, Serialize)]
pub struct KitchenOrder {
    pub id: i64,
    pub token_no: i32,
    pub delivery_type: String,
    pub customer_type: String,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub table_id: Option<i64>,
    pub table_title: Option<String>,
    pub status: String,
    pub payment_status: String,
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct KitchenItem {
    pub id: i64,
    pub order_id: i64,
    pub item_id: i64,
    pub item_title: Option<String>,
    pub variant_id: Option<i64>,
    pub variant_title: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub status: String,
    pub notes: Option<String>,
    pub addon_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct AddonSummary {
    pub id: i64,
    pub item_id: i64,
    pub title: String,
    pub price: Decimal,
}

/// Service owning order admission and the kitchen-facing order lifecycle.
#[derive(Clone)]
pub struct OrderService {
    db_pool: Arc<DbPool>,
}

impl OrderService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Date used both for the rollover comparison and the counter write.
    /// One clock for both sides keeps the comparison and the stored date
    /// from ever disagreeing.
    fn business_date() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Admits an order: allocates the next same-day ticket number under an
    /// exclusive row lock on the counter row, writes the order header, all
    /// cart lines, and the updated counter as one transaction.
    ///
    /// Concurrent admissions serialize on the row lock, so ticket numbers on
    /// a given day are distinct and contiguous. Any failure rolls everything
    /// back; the counter is untouched and the error propagates to the caller.
    #[instrument(skip(self, new_order), fields(
        lines = new_order.cart.len(),
        delivery_type = %new_order.delivery_type,
    ))]
    pub async fn place_order(
        &self,
        new_order: NewOrder,
        payment_status: PaymentStatus,
        invoice_id: Option<i64>,
    ) -> Result<OrderPlacement, ServiceError> {
        let db = &*self.db_pool;

        let txn = db.begin().await.map_err(|e| {
            ORDER_ADMISSION_FAILURES.inc();
            error!(error = %e, "Failed to start order admission transaction");
            ServiceError::DatabaseError(e)
        })?;

        // Lock the counter row first; everything after this point runs in a
        // critical section scoped to this transaction.
        let counter = token_sequence::Entity::find_by_id(token_sequence::SINGLETON_ID)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| {
                ORDER_ADMISSION_FAILURES.inc();
                error!(error = %e, "Failed to lock ticket counter");
                ServiceError::DatabaseError(e)
            })?;

        let today = Self::business_date();
        // Missing row and stale date both mean the day starts at zero.
        let last_issued = counter
            .as_ref()
            .filter(|row| row.last_updated == today)
            .map(|row| row.sequence_no)
            .unwrap_or(0);
        let token_no = last_issued + 1;
        let now = Utc::now();

        let order_row = order::ActiveModel {
            delivery_type: Set(new_order.delivery_type.to_string()),
            customer_type: Set(new_order.customer_type.to_string()),
            customer_id: Set(new_order.customer_id.clone()),
            table_id: Set(new_order.table_id),
            token_no: Set(token_no),
            payment_status: Set(payment_status.to_string()),
            invoice_id: Set(invoice_id),
            status: Set(OrderStatus::Pending.to_string()),
            placed_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            ORDER_ADMISSION_FAILURES.inc();
            error!(error = %e, "Failed to insert order header");
            ServiceError::DatabaseError(e)
        })?;

        let lines = new_order
            .cart
            .iter()
            .map(|line| {
                Ok(order_item::ActiveModel {
                    order_id: Set(order_row.id),
                    item_id: Set(line.item_id),
                    variant_id: Set(line.variant_id),
                    price: Set(line.price),
                    quantity: Set(line.quantity),
                    notes: Set(line.notes.clone()),
                    addons: Set(encode_addon_ids(line.addon_ids.as_deref())?),
                    status: Set(OrderItemStatus::Pending.to_string()),
                    placed_at: Set(now),
                    ..Default::default()
                })
            })
            .collect::<Result<Vec<_>, ServiceError>>()?;

        if !lines.is_empty() {
            order_item::Entity::insert_many(lines)
                .exec(&txn)
                .await
                .map_err(|e| {
                    ORDER_ADMISSION_FAILURES.inc();
                    error!(error = %e, order_id = order_row.id, "Failed to insert order items");
                    ServiceError::DatabaseError(e)
                })?;
        }

        // Insert-or-update on the fixed id, still under the lock.
        match counter {
            Some(row) => {
                let mut updated: token_sequence::ActiveModel = row.into();
                updated.sequence_no = Set(token_no);
                updated.last_updated = Set(today);
                updated.update(&txn).await.map_err(|e| {
                    ORDER_ADMISSION_FAILURES.inc();
                    error!(error = %e, "Failed to update ticket counter");
                    ServiceError::DatabaseError(e)
                })?;
            }
            None => {
                token_sequence::ActiveModel {
                    id: Set(token_sequence::SINGLETON_ID),
                    sequence_no: Set(token_no),
                    last_updated: Set(today),
                }
                .insert(&txn)
                .await
                .map_err(|e| {
                    ORDER_ADMISSION_FAILURES.inc();
                    error!(error = %e, "Failed to seed ticket counter");
                    ServiceError::DatabaseError(e)
                })?;
            }
        }

        txn.commit().await.map_err(|e| {
            ORDER_ADMISSION_FAILURES.inc();
            error!(error = %e, order_id = order_row.id, "Failed to commit order admission");
            ServiceError::DatabaseError(e)
        })?;

        ORDER_ADMISSIONS.inc();
        info!(
            order_id = order_row.id,
            token_no, "Order admitted successfully"
        );

        Ok(OrderPlacement {
            order_id: order_row.id,
            token_no,
        })
    }

    /// Open orders of the last day with their lines and referenced addons.
    #[instrument(skip(self))]
    pub async fn kitchen_board(&self) -> Result<KitchenBoard, ServiceError> {
        let db = &*self.db_pool;
        let cutoff = Utc::now() - Duration::days(1);

        let open_orders = order::Entity::find()
            .filter(order::Column::PlacedAt.gte(cutoff))
            .filter(order::Column::Status.is_not_in([
                OrderStatus::Completed.to_string(),
                OrderStatus::Cancelled.to_string(),
            ]))
            .order_by_asc(order::Column::PlacedAt)
            .all(db)
            .await?;

        let order_ids: Vec<i64> = open_orders.iter().map(|o| o.id).collect();
        let items = if order_ids.is_empty() {
            Vec::new()
        } else {
            order_item::Entity::find()
                .filter(order_item::Column::OrderId.is_in(order_ids))
                .all(db)
                .await?
        };

        let customer_ids: Vec<String> = open_orders
            .iter()
            .filter_map(|o| o.customer_id.clone())
            .collect();
        let customer_names: HashMap<String, String> = if customer_ids.is_empty() {
            HashMap::new()
        } else {
            customer::Entity::find()
                .filter(customer::Column::Phone.is_in(customer_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|c| (c.phone, c.name))
                .collect()
        };

        let table_ids: Vec<i64> = open_orders.iter().filter_map(|o| o.table_id).collect();
        let table_titles: HashMap<i64, String> = if table_ids.is_empty() {
            HashMap::new()
        } else {
            store_table::Entity::find()
                .filter(store_table::Column::Id.is_in(table_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|t| (t.id, t.title))
                .collect()
        };

        let item_ids: BTreeSet<i64> = items.iter().map(|i| i.item_id).collect();
        let item_titles: HashMap<i64, String> = if item_ids.is_empty() {
            HashMap::new()
        } else {
            menu_item::Entity::find()
                .filter(menu_item::Column::Id.is_in(item_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|m| (m.id, m.title))
                .collect()
        };

        let variant_ids: BTreeSet<i64> = items.iter().filter_map(|i| i.variant_id).collect();
        let variant_titles: HashMap<i64, String> = if variant_ids.is_empty() {
            HashMap::new()
        } else {
            menu_item_variant::Entity::find()
                .filter(menu_item_variant::Column::Id.is_in(variant_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|v| (v.id, v.title))
                .collect()
        };

        let mut board_items = Vec::with_capacity(items.len());
        let mut addon_ids: BTreeSet<i64> = BTreeSet::new();
        for item in items {
            let line_addons = match &item.addons {
                Some(raw) => decode_addon_ids(raw)?,
                None => Vec::new(),
            };
            addon_ids.extend(line_addons.iter().copied());
            board_items.push(KitchenItem {
                id: item.id,
                order_id: item.order_id,
                item_title: item_titles.get(&item.item_id).cloned(),
                item_id: item.item_id,
                variant_title: item.variant_id.and_then(|v| variant_titles.get(&v).cloned()),
                variant_id: item.variant_id,
                price: item.price,
                quantity: item.quantity,
                status: item.status,
                notes: item.notes,
                addon_ids: line_addons,
            });
        }

        let addons = if addon_ids.is_empty() {
            Vec::new()
        } else {
            menu_item_addon::Entity::find()
                .filter(menu_item_addon::Column::Id.is_in(addon_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|a| AddonSummary {
                    id: a.id,
                    item_id: a.item_id,
                    title: a.title,
                    price: a.price,
                })
                .collect()
        };

        let orders = open_orders
            .into_iter()
            .map(|o| KitchenOrder {
                id: o.id,
                token_no: o.token_no,
                delivery_type: o.delivery_type,
                customer_type: o.customer_type,
                customer_name: o
                    .customer_id
                    .as_ref()
                    .and_then(|id| customer_names.get(id).cloned()),
                customer_id: o.customer_id,
                table_title: o.table_id.and_then(|id| table_titles.get(&id).cloned()),
                table_id: o.table_id,
                status: o.status,
                payment_status: o.payment_status,
                placed_at: o.placed_at,
            })
            .collect();

        Ok(KitchenBoard {
            orders,
            items: board_items,
            addons,
        })
    }

    /// Updates a single order line's kitchen status.
    #[instrument(skip(self))]
    pub async fn update_item_status(
        &self,
        order_item_id: i64,
        status: OrderItemStatus,
    ) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let item = order_item::Entity::find_by_id(order_item_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Order item {} not found", order_item_id))
            })?;

        let mut active: order_item::ActiveModel = item.into();
        active.status = Set(status.to_string());
        active.update(db).await?;

        info!(order_item_id, "Order item status updated");
        Ok(())
    }

    /// Marks a batch of orders completed. Returns the number of rows touched.
    #[instrument(skip(self))]
    pub async fn complete_orders(&self, order_ids: &[i64]) -> Result<u64, ServiceError> {
        self.transition_orders(order_ids, OrderStatus::Completed)
            .await
    }

    /// Marks a batch of orders cancelled. Returns the number of rows touched.
    #[instrument(skip(self))]
    pub async fn cancel_orders(&self, order_ids: &[i64]) -> Result<u64, ServiceError> {
        self.transition_orders(order_ids, OrderStatus::Cancelled)
            .await
    }

    /// Marks a batch of orders completed and paid, linking the invoice that
    /// settled them.
    #[instrument(skip(self))]
    pub async fn settle_orders(
        &self,
        order_ids: &[i64],
        invoice_id: i64,
    ) -> Result<u64, ServiceError> {
        if order_ids.is_empty() {
            return Ok(0);
        }
        let db = &*self.db_pool;

        let result = order::Entity::update_many()
            .col_expr(
                order::Column::Status,
                Expr::value(OrderStatus::Completed.to_string()),
            )
            .col_expr(
                order::Column::PaymentStatus,
                Expr::value(PaymentStatus::Paid.to_string()),
            )
            .col_expr(order::Column::InvoiceId, Expr::value(invoice_id))
            .filter(order::Column::Id.is_in(order_ids.to_vec()))
            .exec(db)
            .await?;

        info!(
            rows = result.rows_affected,
            invoice_id, "Orders settled against invoice"
        );
        Ok(result.rows_affected)
    }

    async fn transition_orders(
        &self,
        order_ids: &[i64],
        status: OrderStatus,
    ) -> Result<u64, ServiceError> {
        if order_ids.is_empty() {
            return Ok(0);
        }
        let db = &*self.db_pool;

        let result = order::Entity::update_many()
            .col_expr(order::Column::Status, Expr::value(status.to_string()))
            .filter(order::Column::Id.is_in(order_ids.to_vec()))
            .exec(db)
            .await?;

        info!(rows = result.rows_affected, status = %status, "Orders transitioned");
        Ok(result.rows_affected)
    }
}

/// Empty or missing addon lists store as NULL, never as `"[]"`.
fn encode_addon_ids(ids: Option<&[i64]>) -> Result<Option<String>, ServiceError> {
    match ids {
        Some(ids) if !ids.is_empty() => serde_json::to_string(ids).map(Some).map_err(|e| {
            ServiceError::InternalError(format!("Failed to encode addon ids: {}", e))
        }),
        _ => Ok(None),
    }
}

fn decode_addon_ids(raw: &str) -> Result<Vec<i64>, ServiceError> {
    serde_json::from_str(raw)
        .map_err(|e| ServiceError::InternalError(format!("Corrupt addons column: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addon_ids_encode_non_empty_lists_only() {
        assert_eq!(
            encode_addon_ids(Some(&[3, 7])).unwrap(),
            Some("[3,7]".to_string())
        );
        assert_eq!(encode_addon_ids(Some(&[])).unwrap(), None);
        assert_eq!(encode_addon_ids(None).unwrap(), None);
    }

    #[test]
    fn addon_ids_decode_round_trip() {
        let encoded = encode_addon_ids(Some(&[11, 42])).unwrap().unwrap();
        assert_eq!(decode_addon_ids(&encoded).unwrap(), vec![11, 42]);
        assert!(decode_addon_ids("not json").is_err());
    }
}
