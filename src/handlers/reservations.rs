use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;
use tracing::warn;
use validator::Validate;

use crate::events::Event;
use crate::models::ReservationStatus;
use crate::services::reservations::NewReservation;
use crate::{errors::ServiceError, ApiResponse, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    #[validate(length(min = 5, message = "Customer phone is required"))]
    pub customer_id: String,
    #[serde(default)]
    pub table_id: Option<i64>,
    pub reserved_for: DateTime<Utc>,
    #[validate(range(min = 1, message = "Party size must be at least one"))]
    pub people_count: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReservationStatusRequest {
    pub status: String,
}

/// GET /reservations
pub async fn list_reservations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let reservations = state.services.reservations.list_upcoming().await?;
    Ok(Json(ApiResponse::success(reservations)))
}

/// POST /reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let reservation = state
        .services
        .reservations
        .create_reservation(NewReservation {
            customer_id: payload.customer_id,
            table_id: payload.table_id,
            reserved_for: payload.reserved_for,
            people_count: payload.people_count,
            notes: payload.notes,
        })
        .await?;

    if let Err(e) = state
        .event_sender
        .send(Event::ReservationCreated {
            reservation_id: reservation.id,
        })
        .await
    {
        warn!(error = %e, "Failed to publish reservation event");
    }

    Ok(Json(ApiResponse::success(reservation)))
}

/// PUT /reservations/{id}/status
pub async fn update_reservation_status(
    State(state): State<AppState>,
    Path(reservation_id): Path<i64>,
    Json(payload): Json<UpdateReservationStatusRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let status = ReservationStatus::from_str(&payload.status).map_err(|_| {
        ServiceError::InvalidStatus(format!("Unknown reservation status: {}", payload.status))
    })?;

    let reservation = state
        .services
        .reservations
        .update_status(reservation_id, status)
        .await?;

    Ok(Json(ApiResponse::success(reservation)))
}

/// DELETE /reservations/{id}
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .reservations
        .delete_reservation(reservation_id)
        .await?;
    Ok(Json(ApiResponse::success(())))
}
