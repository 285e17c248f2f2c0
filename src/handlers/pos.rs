use axum::{extract::State, response::IntoResponse, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use validator::Validate;

use crate::events::Event;
use crate::models::{CustomerType, DeliveryType, PaymentStatus};
use crate::services::orders::{CartLine, NewOrder, OrderPlacement};
use crate::{errors::ServiceError, ApiResponse, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct PlaceOrderRequest {
    #[validate(length(min = 1, message = "Cart is empty"))]
    pub cart: Vec<CartLine>,
    pub delivery_type: DeliveryType,
    pub customer_type: CustomerType,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub table_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate]
    #[serde(flatten)]
    pub order: PlaceOrderRequest,
    pub sub_total: Decimal,
    pub tax_total: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PlacementResponse {
    pub order_id: i64,
    pub token_no: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<i64>,
}

impl PlaceOrderRequest {
    fn into_new_order(self) -> NewOrder {
        NewOrder {
            cart: self.cart,
            delivery_type: self.delivery_type,
            customer_type: self.customer_type,
            customer_id: self.customer_id,
            table_id: self.table_id,
        }
    }
}

/// POST /pos/orders: admit an order that will be paid later.
pub async fn place_order(
    State(state): State<AppState>,
    Json(payload): Json<PlaceOrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let placement = state
        .services
        .orders
        .place_order(payload.into_new_order(), PaymentStatus::Pending, None)
        .await?;

    publish_placement(&state, &placement).await;

    Ok(Json(ApiResponse::success_with_message(
        PlacementResponse {
            order_id: placement.order_id,
            token_no: placement.token_no,
            invoice_id: None,
        },
        format!("Order created. Token: {}", placement.token_no),
    )))
}

/// POST /pos/orders/checkout: invoice first, then admit the order as paid
/// with the invoice linked.
pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let invoice_id = state
        .services
        .invoices
        .create_invoice(payload.sub_total, payload.tax_total, payload.total)
        .await?;

    let placement = state
        .services
        .orders
        .place_order(
            payload.order.into_new_order(),
            PaymentStatus::Paid,
            Some(invoice_id),
        )
        .await?;

    publish_placement(&state, &placement).await;

    Ok(Json(ApiResponse::success_with_message(
        PlacementResponse {
            order_id: placement.order_id,
            token_no: placement.token_no,
            invoice_id: Some(invoice_id),
        },
        format!("Order created. Token: {}", placement.token_no),
    )))
}

/// GET /pos/init: everything the POS front end needs at startup.
pub async fn pos_init(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let catalog = state.services.menu.catalog().await?;
    let tables = state.services.settings.list_tables().await?;
    let taxes = state.services.taxes.list_taxes().await?;
    let store = state.services.settings.store_profile().await?;

    Ok(Json(ApiResponse::success(json!({
        "menuItems": catalog,
        "storeTables": tables,
        "taxes": taxes,
        "storeProfile": store,
    }))))
}

/// The order is committed; a lost push event must not fail the request.
async fn publish_placement(state: &AppState, placement: &OrderPlacement) {
    if let Err(e) = state
        .event_sender
        .send(Event::OrderPlaced {
            order_id: placement.order_id,
            token_no: placement.token_no,
        })
        .await
    {
        warn!(error = %e, order_id = placement.order_id, "Failed to publish order event");
    }
}
