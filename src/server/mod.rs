//! HTTP server — Axum router for the risk API and the static frontend.
//!
//! Serves `POST /api/cyclone-risk`, a health probe, and every other path
//! from the configured static directory. CORS enabled when configured.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::ServerConfig;
use routes::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route(
            "/api/cyclone-risk",
            post(routes::cyclone_risk).fallback(routes::method_not_allowed),
        )
        .route("/health", get(routes::health))
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(state);

    if config.cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]);
        router.layer(cors)
    } else {
        router
    }
}

/// Bind and serve until Ctrl+C.
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<()> {
    let app = build_router(state, config);
    let addr = config.bind_addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, static_dir = %config.static_dir.display(), "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received.");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
