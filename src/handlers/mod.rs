pub mod customers;
pub mod events;
pub mod health;
pub mod menu;
pub mod orders;
pub mod pos;
pub mod reservations;
pub mod settings;
pub mod taxes;

use crate::db::DbPool;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub orders: Arc<crate::services::orders::OrderService>,
    pub invoices: Arc<crate::services::invoices::InvoiceService>,
    pub menu: Arc<crate::services::menu::MenuService>,
    pub customers: Arc<crate::services::customers::CustomerService>,
    pub reservations: Arc<crate::services::reservations::ReservationService>,
    pub taxes: Arc<crate::services::taxes::TaxService>,
    pub settings: Arc<crate::services::settings::SettingsService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            orders: Arc::new(crate::services::orders::OrderService::new(db_pool.clone())),
            invoices: Arc::new(crate::services::invoices::InvoiceService::new(
                db_pool.clone(),
            )),
            menu: Arc::new(crate::services::menu::MenuService::new(db_pool.clone())),
            customers: Arc::new(crate::services::customers::CustomerService::new(
                db_pool.clone(),
            )),
            reservations: Arc::new(crate::services::reservations::ReservationService::new(
                db_pool.clone(),
            )),
            taxes: Arc::new(crate::services::taxes::TaxService::new(db_pool.clone())),
            settings: Arc::new(crate::services::settings::SettingsService::new(db_pool)),
        }
    }
}
