// Run and routing helpers (build_router, run_server).

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::services::ServeDir;

use anyhow::{Context, Result};

use super::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Client assets are served from ./static when present; the server runs
    // headless without them.
    let serve_static = ServeDir::new("static");

    Router::new()
        .route(
            "/health",
            get(|| async { Json(serde_json::json!({ "ok": true })) }),
        )
        .route("/ws", get(super::ws::ws_handler))
        .route("/create_room", post(super::http::create_room_handler))
        .route("/join_room/:room_code", post(super::http::join_room_handler))
        .route("/room_status/:room_code", get(super::http::room_status_handler))
        .nest_service("/static", serve_static)
        .with_state(state)
}

pub async fn run_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = build_router(state);

    tracing::info!(%addr, "Super Fishy server running");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    axum::serve(listener, app)
        .await
        .context("serving HTTP/WebSocket traffic")?;
    Ok(())
}
