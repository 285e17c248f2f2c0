mod common;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use common::TestApp;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use tavola_pos::entities::{order, order_item, token_sequence};
use tavola_pos::errors::ServiceError;
use tavola_pos::models::{CustomerType, DeliveryType, PaymentStatus};
use tavola_pos::services::orders::{CartLine, NewOrder};

fn cart_line(item_id: i64) -> CartLine {
    CartLine {
        item_id,
        variant_id: None,
        price: dec!(9.50),
        quantity: 1,
        notes: None,
        addon_ids: None,
    }
}

fn new_order(cart: Vec<CartLine>) -> NewOrder {
    NewOrder {
        cart,
        delivery_type: DeliveryType::DineIn,
        customer_type: CustomerType::WalkIn,
        customer_id: None,
        table_id: None,
    }
}

async fn read_counter(app: &TestApp) -> Option<token_sequence::Model> {
    token_sequence::Entity::find_by_id(token_sequence::SINGLETON_ID)
        .one(&*app.state.db)
        .await
        .unwrap()
}

async fn seed_counter(app: &TestApp, sequence_no: i32, days_ago: i64) {
    token_sequence::ActiveModel {
        id: Set(token_sequence::SINGLETON_ID),
        sequence_no: Set(sequence_no),
        last_updated: Set((Utc::now() - Duration::days(days_ago)).date_naive()),
    }
    .insert(&*app.state.db)
    .await
    .unwrap();
}

#[tokio::test]
async fn first_admission_starts_the_daily_sequence() {
    let app = TestApp::new().await;
    let margherita = app.seed_menu_item("Margherita", "11.00").await;
    let espresso = app.seed_menu_item("Espresso", "2.50").await;

    let placement = app
        .state
        .services
        .orders
        .place_order(
            new_order(vec![cart_line(margherita), cart_line(espresso)]),
            PaymentStatus::Pending,
            None,
        )
        .await
        .unwrap();

    assert_eq!(placement.token_no, 1);

    // Counter persisted with today's date
    let counter = read_counter(&app).await.unwrap();
    assert_eq!(counter.sequence_no, 1);
    assert_eq!(counter.last_updated, Utc::now().date_naive());

    // Every line references the new order
    let items = order_item::Entity::find()
        .filter(order_item::Column::OrderId.eq(placement.order_id))
        .all(&*app.state.db)
        .await
        .unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.order_id == placement.order_id));

    let header = order::Entity::find_by_id(placement.order_id)
        .one(&*app.state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(header.token_no, 1);
    assert_eq!(header.status, "pending");
    assert_eq!(header.payment_status, "pending");
    assert!(header.invoice_id.is_none());
}

#[tokio::test]
async fn same_day_submissions_continue_the_sequence() {
    let app = TestApp::new().await;
    let item = app.seed_menu_item("Carbonara", "13.00").await;
    seed_counter(&app, 5, 0).await;

    let placement = app
        .state
        .services
        .orders
        .place_order(
            new_order(vec![cart_line(item)]),
            PaymentStatus::Pending,
            None,
        )
        .await
        .unwrap();

    assert_eq!(placement.token_no, 6);
    assert_eq!(read_counter(&app).await.unwrap().sequence_no, 6);
}

#[tokio::test]
async fn day_rollover_restarts_at_one() {
    let app = TestApp::new().await;
    let item = app.seed_menu_item("Tiramisu", "6.00").await;
    seed_counter(&app, 5, 1).await;

    let placement = app
        .state
        .services
        .orders
        .place_order(
            new_order(vec![cart_line(item)]),
            PaymentStatus::Pending,
            None,
        )
        .await
        .unwrap();

    // Counting restarts regardless of the stale sequence value
    assert_eq!(placement.token_no, 1);

    let counter = read_counter(&app).await.unwrap();
    assert_eq!(counter.sequence_no, 1);
    assert_eq!(counter.last_updated, Utc::now().date_naive());
}

#[tokio::test]
async fn concurrent_admissions_allocate_distinct_tokens() {
    let app = TestApp::new().await;
    let item = app.seed_menu_item("Focaccia", "4.00").await;

    let orders_a = app.state.services.orders.clone();
    let orders_b = app.state.services.orders.clone();

    let task_a = tokio::spawn(async move {
        orders_a
            .place_order(
                new_order(vec![cart_line(item)]),
                PaymentStatus::Pending,
                None,
            )
            .await
    });
    let task_b = tokio::spawn(async move {
        orders_b
            .place_order(
                new_order(vec![cart_line(item)]),
                PaymentStatus::Pending,
                None,
            )
            .await
    });

    let a = task_a.await.unwrap().unwrap();
    let b = task_b.await.unwrap().unwrap();

    let mut tokens = vec![a.token_no, b.token_no];
    tokens.sort_unstable();
    assert_eq!(tokens, vec![1, 2]);
    assert_ne!(a.order_id, b.order_id);
}

#[tokio::test]
async fn addon_ids_persist_as_json_or_null() {
    let app = TestApp::new().await;
    let item = app.seed_menu_item("Burger", "10.00").await;

    let mut with_addons = cart_line(item);
    with_addons.addon_ids = Some(vec![3, 7]);
    let mut empty_addons = cart_line(item);
    empty_addons.addon_ids = Some(vec![]);

    let placement = app
        .state
        .services
        .orders
        .place_order(
            new_order(vec![with_addons, empty_addons]),
            PaymentStatus::Pending,
            None,
        )
        .await
        .unwrap();

    let items = order_item::Entity::find()
        .filter(order_item::Column::OrderId.eq(placement.order_id))
        .all(&*app.state.db)
        .await
        .unwrap();
    assert_eq!(items.len(), 2);

    let stored: Vec<Option<String>> = items.into_iter().map(|i| i.addons).collect();
    assert!(stored.contains(&Some("[3,7]".to_string())));
    // Empty list is stored as NULL, never as "[]"
    assert!(stored.contains(&None));
}

#[tokio::test]
async fn failed_admission_leaves_no_trace() {
    let app = TestApp::new().await;
    seed_counter(&app, 4, 0).await;

    // No menu item with this id exists, so the line insert violates the
    // foreign key and the whole transaction must roll back.
    let result = app
        .state
        .services
        .orders
        .place_order(
            new_order(vec![cart_line(9_999)]),
            PaymentStatus::Pending,
            None,
        )
        .await;
    assert_matches!(result, Err(ServiceError::DatabaseError(_)));

    // No order row, no counter change
    let orders = order::Entity::find().count(&*app.state.db).await.unwrap();
    assert_eq!(orders, 0);
    let counter = read_counter(&app).await.unwrap();
    assert_eq!(counter.sequence_no, 4);

    // The next successful admission continues as if the failure never happened
    let item = app.seed_menu_item("Lasagna", "12.00").await;
    let placement = app
        .state
        .services
        .orders
        .place_order(
            new_order(vec![cart_line(item)]),
            PaymentStatus::Pending,
            None,
        )
        .await
        .unwrap();
    assert_eq!(placement.token_no, 5);
}

#[tokio::test]
async fn empty_cart_writes_no_lines() {
    // Cart emptiness is the HTTP layer's contract; the service itself just
    // writes an order with zero lines.
    let app = TestApp::new().await;

    let placement = app
        .state
        .services
        .orders
        .place_order(new_order(vec![]), PaymentStatus::Pending, None)
        .await
        .unwrap();

    assert_eq!(placement.token_no, 1);
    let items = order_item::Entity::find()
        .filter(order_item::Column::OrderId.eq(placement.order_id))
        .count(&*app.state.db)
        .await
        .unwrap();
    assert_eq!(items, 0);
}
