use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;
use validator::Validate;

use crate::events::Event;
use crate::models::OrderItemStatus;
use crate::{errors::ServiceError, ApiResponse, AppState};

fn map_item_status(status: &str) -> Result<OrderItemStatus, ServiceError> {
    OrderItemStatus::from_str(status)
        .map_err(|_| ServiceError::InvalidStatus(format!("Unknown order item status: {status}")))
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OrderBatchRequest {
    #[validate(length(min = 1, message = "At least one order id is required"))]
    pub order_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SettleRequest {
    #[validate(length(min = 1, message = "At least one order id is required"))]
    pub order_ids: Vec<i64>,
    pub sub_total: Decimal,
    pub tax_total: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub updated: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<i64>,
}

/// GET /orders/open: the kitchen board.
pub async fn kitchen_board(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let board = state.services.orders.kitchen_board().await?;
    Ok(Json(ApiResponse::success(board)))
}

/// PUT /orders/items/{id}/status
pub async fn update_item_status(
    State(state): State<AppState>,
    Path(order_item_id): Path<i64>,
    Json(payload): Json<UpdateItemStatusRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let status = map_item_status(&payload.status)?;
    state
        .services
        .orders
        .update_item_status(order_item_id, status)
        .await?;

    publish(
        &state,
        Event::OrderItemStatusChanged {
            order_item_id,
            status: status.to_string(),
        },
    )
    .await;

    Ok(Json(ApiResponse::success(())))
}

/// POST /orders/complete
pub async fn complete_orders(
    State(state): State<AppState>,
    Json(payload): Json<OrderBatchRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let updated = state
        .services
        .orders
        .complete_orders(&payload.order_ids)
        .await?;

    publish(
        &state,
        Event::OrdersCompleted {
            order_ids: payload.order_ids,
        },
    )
    .await;

    Ok(Json(ApiResponse::success(BatchOutcome {
        updated,
        invoice_id: None,
    })))
}

/// POST /orders/cancel
pub async fn cancel_orders(
    State(state): State<AppState>,
    Json(payload): Json<OrderBatchRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let updated = state
        .services
        .orders
        .cancel_orders(&payload.order_ids)
        .await?;

    publish(
        &state,
        Event::OrdersCancelled {
            order_ids: payload.order_ids,
        },
    )
    .await;

    Ok(Json(ApiResponse::success(BatchOutcome {
        updated,
        invoice_id: None,
    })))
}

/// POST /orders/settle: invoice a batch of open orders and close them out.
pub async fn settle_orders(
    State(state): State<AppState>,
    Json(payload): Json<SettleRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let invoice_id = state
        .services
        .invoices
        .create_invoice(payload.sub_total, payload.tax_total, payload.total)
        .await?;

    let updated = state
        .services
        .orders
        .settle_orders(&payload.order_ids, invoice_id)
        .await?;

    publish(
        &state,
        Event::OrdersSettled {
            order_ids: payload.order_ids,
            invoice_id,
        },
    )
    .await;

    Ok(Json(ApiResponse::success(BatchOutcome {
        updated,
        invoice_id: Some(invoice_id),
    })))
}

async fn publish(state: &AppState, event: Event) {
    if let Err(e) = state.event_sender.send(event).await {
        warn!(error = %e, "Failed to publish order lifecycle event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_status_parsing() {
        assert_eq!(map_item_status("ready").unwrap(), OrderItemStatus::Ready);
        assert!(map_item_status("plated").is_err());
    }
}
