// File: services/bookify_backend/src/main.rs
use axum::{routing::get, Router};
use bookify_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod app_state;
mod service_factory;

use app_state::AppState;

#[tokio::main]
async fn main() {
    bookify_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));
    let state = AppState::new(config).await;

    let api_router = Router::new().route("/", get(|| async { "Welcome to the Bookify API!" }));

    let api_router = match &state.booking_state {
        Some(booking_state) => {
            api_router.merge(bookify_booking::routes(booking_state.clone()))
        }
        None => {
            warn!("Calendar service unavailable, /api/book not mounted.");
            api_router
        }
    };

    let app = Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = TcpListener::bind(&addr).await.expect("Failed to bind address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
