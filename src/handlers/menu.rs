use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::services::menu::NewMenuItem;
use crate::{errors::ServiceError, ApiResponse, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMenuItemRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub tax_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVariantRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub price: Decimal,
}

pub type CreateAddonRequest = CreateVariantRequest;

/// GET /menu/items
pub async fn list_items(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let items = state.services.menu.list_items().await?;
    Ok(Json(ApiResponse::success(items)))
}

/// POST /menu/items
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateMenuItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let item = state
        .services
        .menu
        .create_item(NewMenuItem {
            title: payload.title,
            description: payload.description,
            price: payload.price,
            tax_id: payload.tax_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(item)))
}

/// POST /menu/items/{id}/variants
pub async fn create_variant(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Json(payload): Json<CreateVariantRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let variant = state
        .services
        .menu
        .create_variant(item_id, payload.title, payload.price)
        .await?;

    Ok(Json(ApiResponse::success(variant)))
}

/// POST /menu/items/{id}/addons
pub async fn create_addon(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Json(payload): Json<CreateAddonRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let addon = state
        .services
        .menu
        .create_addon(item_id, payload.title, payload.price)
        .await?;

    Ok(Json(ApiResponse::success(addon)))
}
