use axum::{extract::State, response::IntoResponse, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use validator::Validate;

use crate::models::TaxMode;
use crate::{errors::ServiceError, ApiResponse, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaxRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub rate: Decimal,
    pub mode: String,
}

/// GET /taxes
pub async fn list_taxes(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let taxes = state.services.taxes.list_taxes().await?;
    Ok(Json(ApiResponse::success(taxes)))
}

/// POST /taxes
pub async fn create_tax(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaxRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let mode = TaxMode::from_str(&payload.mode)
        .map_err(|_| ServiceError::InvalidInput(format!("Unknown tax mode: {}", payload.mode)))?;

    let tax = state
        .services
        .taxes
        .create_tax(payload.title, payload.rate, mode)
        .await?;

    Ok(Json(ApiResponse::success(tax)))
}
