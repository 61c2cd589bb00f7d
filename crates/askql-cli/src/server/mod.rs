//! HTTP server hosting the single-page UI and its REST API.

pub mod api;
mod assets;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

pub use state::{AppState, ServerConfig};

/// Largest accepted request body; the forms this API carries are tiny.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Run the HTTP server. Blocks until shut down (Ctrl+C).
pub async fn run_server(state: Arc<AppState>) -> Result<()> {
    let port = state.config.port;
    let open_browser = state.config.open_browser;
    let app = build_router(state, port);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    // Bind before opening the browser so a taken port fails loudly.
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    println!("askql: server listening on http://{addr}");

    if open_browser {
        let url = format!("http://localhost:{port}");
        if let Err(e) = open::that(&url) {
            eprintln!("askql: warning: failed to open browser: {e}");
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    println!("\naskql: server stopped");
    Ok(())
}

/// Build the router: API under `/api`, embedded UI everywhere else.
pub fn build_router(state: Arc<AppState>, port: u16) -> Router {
    // The server binds to localhost only, and CORS keeps other origins from
    // driving the session: the connect form carries database credentials.
    let allowed_origins = [
        format!("http://localhost:{port}").parse().unwrap(),
        format!("http://127.0.0.1:{port}").parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", api::api_routes())
        .fallback(assets::static_handler)
        .with_state(state)
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
