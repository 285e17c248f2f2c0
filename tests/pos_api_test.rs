mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration as ChronoDuration, Utc};
use common::TestApp;
use rust_decimal_macros::dec;
use sea_orm::EntityTrait;
use serde_json::{json, Value};
use std::time::Duration;
use tavola_pos::entities::order;
use tavola_pos::events::Event;
use tower::ServiceExt;

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder.body(Body::from(body.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn cart_json(item_id: i64) -> Value {
    json!([{ "item_id": item_id, "price": "9.50", "quantity": 1 }])
}

#[tokio::test]
async fn place_order_returns_token_and_broadcasts() {
    let app = TestApp::new().await;
    let item = app.seed_menu_item("Margherita", "11.00").await;
    let mut events = app.state.notifications.subscribe();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/v1/pos/orders",
        Some(json!({
            "cart": cart_json(item),
            "delivery_type": "dine-in",
            "customer_type": "walk-in",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["token_no"], 1);
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Order created. Token: 1"
    );

    // The relay delivers the placement to realtime subscribers
    let event = tokio::time::timeout(Duration::from_secs(2), events.recv())
        .await
        .expect("timed out waiting for broadcast")
        .unwrap();
    match event {
        Event::OrderPlaced { order_id, token_no } => {
            assert_eq!(order_id, body["data"]["order_id"].as_i64().unwrap());
            assert_eq!(token_no, 1);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn empty_cart_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/v1/pos/orders",
        Some(json!({
            "cart": [],
            "delivery_type": "takeaway",
            "customer_type": "walk-in",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Cart is empty"));
}

#[tokio::test]
async fn checkout_links_a_fresh_invoice() {
    let app = TestApp::new().await;
    let item = app.seed_menu_item("Carbonara", "13.00").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/v1/pos/orders/checkout",
        Some(json!({
            "cart": cart_json(item),
            "delivery_type": "dine-in",
            "customer_type": "walk-in",
            "sub_total": "13.00",
            "tax_total": "1.30",
            "total": "14.30",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let invoice_id = body["data"]["invoice_id"].as_i64().unwrap();
    let order_id = body["data"]["order_id"].as_i64().unwrap();

    let header_row = order::Entity::find_by_id(order_id)
        .one(&*app.state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(header_row.payment_status, "paid");
    assert_eq!(header_row.invoice_id, Some(invoice_id));

    let invoice = app
        .state
        .services
        .invoices
        .get_invoice(invoice_id)
        .await
        .unwrap();
    assert_eq!(invoice.total, dec!(14.30));
}

#[tokio::test]
async fn kitchen_board_shows_open_orders_with_lines_and_addons() {
    let app = TestApp::new().await;
    let item = app.seed_menu_item("Burger", "10.00").await;
    let addon = app.seed_addon(item, "Extra cheese", "1.50").await;

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/v1/pos/orders",
        Some(json!({
            "cart": [{
                "item_id": item,
                "price": "10.00",
                "quantity": 2,
                "notes": "no onions",
                "addon_ids": [addon],
            }],
            "delivery_type": "dine-in",
            "customer_type": "walk-in",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app.router, Method::GET, "/api/v1/orders/open", None).await;
    assert_eq!(status, StatusCode::OK);

    let board = &body["data"];
    assert_eq!(board["orders"].as_array().unwrap().len(), 1);
    assert_eq!(board["orders"][0]["token_no"], 1);

    let items = board["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["item_title"], "Burger");
    assert_eq!(items[0]["notes"], "no onions");
    assert_eq!(items[0]["addon_ids"][0].as_i64().unwrap(), addon);

    let addons = board["addons"].as_array().unwrap();
    assert_eq!(addons.len(), 1);
    assert_eq!(addons[0]["title"], "Extra cheese");
}

#[tokio::test]
async fn item_status_update_and_settlement_close_the_order() {
    let app = TestApp::new().await;
    let item = app.seed_menu_item("Ramen", "12.00").await;

    let (_, placed) = send(
        &app.router,
        Method::POST,
        "/api/v1/pos/orders",
        Some(json!({
            "cart": cart_json(item),
            "delivery_type": "dine-in",
            "customer_type": "walk-in",
        })),
    )
    .await;
    let order_id = placed["data"]["order_id"].as_i64().unwrap();

    // Move the single line to ready
    let (_, board) = send(&app.router, Method::GET, "/api/v1/orders/open", None).await;
    let line_id = board["data"]["items"][0]["id"].as_i64().unwrap();
    let (status, _) = send(
        &app.router,
        Method::PUT,
        &format!("/api/v1/orders/items/{line_id}/status"),
        Some(json!({ "status": "ready" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Unknown statuses are rejected before touching the database
    let (status, _) = send(
        &app.router,
        Method::PUT,
        &format!("/api/v1/orders/items/{line_id}/status"),
        Some(json!({ "status": "plated" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Settle the order against a new invoice
    let (status, settled) = send(
        &app.router,
        Method::POST,
        "/api/v1/orders/settle",
        Some(json!({
            "order_ids": [order_id],
            "sub_total": "12.00",
            "tax_total": "1.20",
            "total": "13.20",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settled["data"]["updated"], 1);
    let invoice_id = settled["data"]["invoice_id"].as_i64().unwrap();

    let header_row = order::Entity::find_by_id(order_id)
        .one(&*app.state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(header_row.status, "completed");
    assert_eq!(header_row.payment_status, "paid");
    assert_eq!(header_row.invoice_id, Some(invoice_id));

    // Settled orders leave the kitchen board
    let (_, board) = send(&app.router, Method::GET, "/api/v1/orders/open", None).await;
    assert!(board["data"]["orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn cancel_batch_removes_orders_from_board() {
    let app = TestApp::new().await;
    let item = app.seed_menu_item("Pad Thai", "11.50").await;

    let (_, placed) = send(
        &app.router,
        Method::POST,
        "/api/v1/pos/orders",
        Some(json!({
            "cart": cart_json(item),
            "delivery_type": "takeaway",
            "customer_type": "walk-in",
        })),
    )
    .await;
    let order_id = placed["data"]["order_id"].as_i64().unwrap();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/v1/orders/cancel",
        Some(json!({ "order_ids": [order_id] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["updated"], 1);

    let (_, board) = send(&app.router, Method::GET, "/api/v1/orders/open", None).await;
    assert!(board["data"]["orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn customer_and_reservation_flow() {
    let app = TestApp::new().await;

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/v1/customers",
        Some(json!({ "phone": "5550001234", "name": "Dana" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Duplicate phone conflicts
    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/v1/customers",
        Some(json!({ "phone": "5550001234", "name": "Dana again" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app.router, Method::GET, "/api/v1/customers/5550001234", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Dana");

    let (status, _) = send(&app.router, Method::GET, "/api/v1/customers/5559999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let reserved_for = (Utc::now() + ChronoDuration::hours(4)).to_rfc3339();
    let (status, created) = send(
        &app.router,
        Method::POST,
        "/api/v1/reservations",
        Some(json!({
            "customer_id": "5550001234",
            "reserved_for": reserved_for,
            "people_count": 4,
            "notes": "window seat",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let reservation_id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["status"], "booked");
    assert!(!created["data"]["unique_code"].as_str().unwrap().is_empty());

    let (status, listed) = send(&app.router, Method::GET, "/api/v1/reservations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app.router,
        Method::PUT,
        &format!("/api/v1/reservations/{reservation_id}/status"),
        Some(json!({ "status": "seated" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["status"], "seated");

    let (status, _) = send(
        &app.router,
        Method::DELETE,
        &format!("/api/v1/reservations/{reservation_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app.router,
        Method::DELETE,
        &format!("/api/v1/reservations/{reservation_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_profile_honors_fixed_id_upsert() {
    let app = TestApp::new().await;

    let (status, body) = send(&app.router, Method::GET, "/api/v1/settings/store", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());

    let (status, _) = send(
        &app.router,
        Method::PUT,
        "/api/v1/settings/store",
        Some(json!({ "store_name": "Tavola", "currency": "EUR" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app.router,
        Method::PUT,
        "/api/v1/settings/store",
        Some(json!({ "store_name": "Tavola Trattoria", "currency": "EUR" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);

    let (_, body) = send(&app.router, Method::GET, "/api/v1/settings/store", None).await;
    assert_eq!(body["data"]["store_name"], "Tavola Trattoria");
}

#[tokio::test]
async fn pos_init_returns_nested_catalog() {
    let app = TestApp::new().await;

    let (_, tax) = send(
        &app.router,
        Method::POST,
        "/api/v1/taxes",
        Some(json!({ "title": "VAT", "rate": "10", "mode": "percent" })),
    )
    .await;
    let tax_id = tax["data"]["id"].as_i64().unwrap();

    let (_, item) = send(
        &app.router,
        Method::POST,
        "/api/v1/menu/items",
        Some(json!({ "title": "Margherita", "price": "11.00", "tax_id": tax_id })),
    )
    .await;
    let item_id = item["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app.router,
        Method::POST,
        &format!("/api/v1/menu/items/{item_id}/variants"),
        Some(json!({ "title": "Large", "price": "14.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app.router,
        Method::POST,
        &format!("/api/v1/menu/items/{item_id}/addons"),
        Some(json!({ "title": "Extra basil", "price": "0.80" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _) = send(
        &app.router,
        Method::POST,
        "/api/v1/settings/tables",
        Some(json!({ "title": "T1", "floor": "ground", "seating_capacity": 4 })),
    )
    .await;

    let (status, body) = send(&app.router, Method::GET, "/api/v1/pos/init", None).await;
    assert_eq!(status, StatusCode::OK);

    let menu = body["data"]["menuItems"].as_array().unwrap();
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0]["title"], "Margherita");
    assert_eq!(menu[0]["variants"].as_array().unwrap().len(), 1);
    assert_eq!(menu[0]["addons"].as_array().unwrap().len(), 1);

    assert_eq!(body["data"]["storeTables"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["taxes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn health_reports_database_up() {
    let app = TestApp::new().await;

    let (status, body) = send(&app.router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}
