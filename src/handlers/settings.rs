use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use validator::Validate;

use crate::services::settings::{NewStoreTable, StoreProfileUpdate};
use crate::{errors::ServiceError, ApiResponse, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct StoreProfileRequest {
    #[validate(length(min = 1, message = "Store name is required"))]
    pub store_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 3, max = 3, message = "Currency must be a 3-letter code"))]
    pub currency: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTableRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub seating_capacity: Option<i32>,
}

/// GET /settings/store
pub async fn get_store_profile(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let profile = state.services.settings.store_profile().await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// PUT /settings/store
pub async fn set_store_profile(
    State(state): State<AppState>,
    Json(payload): Json<StoreProfileRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let profile = state
        .services
        .settings
        .set_store_profile(StoreProfileUpdate {
            store_name: payload.store_name,
            address: payload.address,
            phone: payload.phone,
            email: payload.email,
            currency: payload.currency,
        })
        .await?;

    Ok(Json(ApiResponse::success(profile)))
}

/// GET /settings/tables
pub async fn list_tables(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let tables = state.services.settings.list_tables().await?;
    Ok(Json(ApiResponse::success(tables)))
}

/// POST /settings/tables
pub async fn create_table(
    State(state): State<AppState>,
    Json(payload): Json<CreateTableRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let table = state
        .services
        .settings
        .create_table(NewStoreTable {
            title: payload.title,
            floor: payload.floor,
            seating_capacity: payload.seating_capacity,
        })
        .await?;

    Ok(Json(ApiResponse::success(table)))
}
