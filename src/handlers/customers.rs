use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::services::customers::NewCustomer;
use crate::{errors::ServiceError, ApiResponse, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 5, message = "Phone number is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
}

/// GET /customers
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let customers = state.services.customers.list_customers().await?;
    Ok(Json(ApiResponse::success(customers)))
}

/// POST /customers
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let customer = state
        .services
        .customers
        .create_customer(NewCustomer {
            phone: payload.phone,
            name: payload.name,
            email: payload.email,
        })
        .await?;

    Ok(Json(ApiResponse::success(customer)))
}

/// GET /customers/{phone}
pub async fn get_customer(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.services.customers.get_customer(&phone).await?;
    Ok(Json(ApiResponse::success(customer)))
}
