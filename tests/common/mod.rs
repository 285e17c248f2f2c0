use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use rust_decimal::Decimal;
use tokio::sync::{broadcast, mpsc};

use tavola_pos::{
    config::AppConfig,
    db,
    events::{self, EventSender},
    handlers::AppServices,
    AppState,
};

/// Helper harness spinning up application state backed by an in-memory
/// SQLite database. A single pooled connection keeps the in-memory database
/// alive and shared for the lifetime of the test.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _relay_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");
        let db_arc = Arc::new(pool);

        let (event_tx, event_rx) = mpsc::channel(64);
        let (notify_tx, _) = broadcast::channel(64);
        let relay_task = tokio::spawn(events::process_events(event_rx, notify_tx.clone()));

        let services = AppServices::new(db_arc.clone());
        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender: EventSender::new(event_tx),
            notifications: notify_tx,
            services,
        };
        let router = tavola_pos::app_router(state.clone());

        Self {
            router,
            state,
            _relay_task: relay_task,
        }
    }

    /// Seed a menu item and return its id.
    #[allow(dead_code)]
    pub async fn seed_menu_item(&self, title: &str, price: &str) -> i64 {
        self.state
            .services
            .menu
            .create_item(tavola_pos::services::menu::NewMenuItem {
                title: title.to_string(),
                description: None,
                price: Decimal::from_str(price).expect("valid decimal"),
                tax_id: None,
            })
            .await
            .expect("failed to seed menu item")
            .id
    }

    /// Seed an addon for a menu item and return its id.
    #[allow(dead_code)]
    pub async fn seed_addon(&self, item_id: i64, title: &str, price: &str) -> i64 {
        self.state
            .services
            .menu
            .create_addon(
                item_id,
                title.to_string(),
                Decimal::from_str(price).expect("valid decimal"),
            )
            .await
            .expect("failed to seed addon")
            .id
    }

    /// Seed a customer keyed by phone.
    #[allow(dead_code)]
    pub async fn seed_customer(&self, phone: &str, name: &str) {
        self.state
            .services
            .customers
            .create_customer(tavola_pos::services::customers::NewCustomer {
                phone: phone.to_string(),
                name: name.to_string(),
                email: None,
            })
            .await
            .expect("failed to seed customer");
    }
}
