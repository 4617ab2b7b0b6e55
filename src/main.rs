use std::sync::{Arc, Mutex};

use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use salonbook::config::AppConfig;
use salonbook::db;
use salonbook::handlers;
use salonbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/services", get(handlers::services::list_services))
        .route("/api/services", post(handlers::services::create_service))
        .route(
            "/api/services/:id",
            delete(handlers::services::delete_service),
        )
        .route("/api/bookings/slots", get(handlers::bookings::get_slots))
        .route("/api/bookings", get(handlers::bookings::list_bookings))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route(
            "/api/bookings/:id/status",
            patch(handlers::bookings::update_status),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
