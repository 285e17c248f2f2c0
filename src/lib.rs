//! Tavola POS backend library
//!
//! Order admission with daily ticket sequencing, kitchen ticketing,
//! reservations, and menu/customer management for a restaurant point of sale.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod models;
pub mod services;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    /// Fan-out side of the order broadcast relay; SSE streams subscribe here.
    pub notifications: broadcast::Sender<events::Event>,
    pub services: handlers::AppServices,
}

// Common response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
        }
    }
}

/// Assembles the full HTTP surface. Middleware layers (trace, CORS, timeout)
/// are applied by the binary on top of this.
pub fn app_router(state: AppState) -> Router {
    let api = Router::new()
        // POS
        .route("/pos/orders", post(handlers::pos::place_order))
        .route("/pos/orders/checkout", post(handlers::pos::checkout))
        .route("/pos/init", get(handlers::pos::pos_init))
        // Kitchen & order lifecycle
        .route("/orders/open", get(handlers::orders::kitchen_board))
        .route(
            "/orders/items/:id/status",
            put(handlers::orders::update_item_status),
        )
        .route("/orders/complete", post(handlers::orders::complete_orders))
        .route("/orders/cancel", post(handlers::orders::cancel_orders))
        .route("/orders/settle", post(handlers::orders::settle_orders))
        // Menu
        .route(
            "/menu/items",
            get(handlers::menu::list_items).post(handlers::menu::create_item),
        )
        .route("/menu/items/:id/variants", post(handlers::menu::create_variant))
        .route("/menu/items/:id/addons", post(handlers::menu::create_addon))
        // Customers
        .route(
            "/customers",
            get(handlers::customers::list_customers).post(handlers::customers::create_customer),
        )
        .route("/customers/:phone", get(handlers::customers::get_customer))
        // Reservations
        .route(
            "/reservations",
            get(handlers::reservations::list_reservations)
                .post(handlers::reservations::create_reservation),
        )
        .route(
            "/reservations/:id/status",
            put(handlers::reservations::update_reservation_status),
        )
        .route(
            "/reservations/:id",
            delete(handlers::reservations::delete_reservation),
        )
        // Taxes
        .route(
            "/taxes",
            get(handlers::taxes::list_taxes).post(handlers::taxes::create_tax),
        )
        // Settings
        .route(
            "/settings/store",
            get(handlers::settings::get_store_profile).put(handlers::settings::set_store_profile),
        )
        .route(
            "/settings/tables",
            get(handlers::settings::list_tables).post(handlers::settings::create_table),
        )
        // Realtime broadcast
        .route("/events/stream", get(handlers::events::stream));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(handlers::health::health))
        .with_state(state)
}

#[cfg(test)]
mod response_tests {
    use super::*;

    #[test]
    fn success_response_carries_data() {
        let response = ApiResponse::success(7);
        assert!(response.success);
        assert_eq!(response.data, Some(7));
        assert!(response.message.is_none());
    }

    #[test]
    fn success_with_message_keeps_both() {
        let response = ApiResponse::success_with_message((), "Order created. Token: 3");
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("Order created. Token: 3"));
    }

    #[test]
    fn error_response_has_no_data() {
        let response = ApiResponse::<()>::error("oops".into());
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.message.as_deref(), Some("oops"));
    }
}
