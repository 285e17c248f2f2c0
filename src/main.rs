use std::{sync::Arc, time::Duration};

use http::HeaderValue;
use tokio::{signal, sync::broadcast, sync::mpsc};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use tavola_pos as pos;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = pos::config::load_config()?;
    pos::config::init_tracing(cfg.log_level(), cfg.log_json);

    // Init DB
    let db_pool = pos::db::establish_connection_from_app_config(&cfg).await?;
    if cfg.auto_migrate {
        pos::db::run_migrations(&db_pool).await?;
    }
    let db_arc = Arc::new(db_pool);

    // Init the order broadcast relay
    let (event_tx, event_rx) = mpsc::channel(cfg.event_channel_capacity);
    let (notify_tx, _) = broadcast::channel(cfg.event_channel_capacity);
    let event_sender = pos::events::EventSender::new(event_tx);
    tokio::spawn(pos::events::process_events(event_rx, notify_tx.clone()));

    // Aggregate app services used by HTTP handlers
    let services = pos::handlers::AppServices::new(db_arc.clone());

    let app_state = pos::AppState {
        db: db_arc,
        config: cfg.clone(),
        event_sender,
        notifications: notify_tx,
        services,
    };

    // Build CORS layer from config
    let configured_origins: Option<Vec<HeaderValue>> = cfg
        .cors_allowed_origins
        .as_ref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        HeaderValue::from_str(trimmed).ok()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    let cors_layer = if let Some(origins) = configured_origins {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else if cfg.should_allow_permissive_cors() {
        info!("Using permissive CORS (no explicit origins configured)");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    let app = pos::app_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(TimeoutLayer::new(Duration::from_secs(
            cfg.request_timeout_secs,
        )));

    let addr = cfg.bind_addr();
    info!("Tavola POS listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
