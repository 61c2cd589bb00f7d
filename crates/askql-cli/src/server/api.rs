//! REST API handlers for the single-page UI.
//!
//! Each failure domain is caught at its call site and surfaced as plain
//! text: connect errors clear the handle, generation errors skip execution,
//! execution errors still return the generated SQL.

use std::sync::Arc;

use askql_core::{build_prompt, extract_sql, ConnectionParams, QueryResult, STOP_SEQUENCE};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::{self, DbHandle};

use super::AppState;

/// Build the API router with all endpoints.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/schema", get(schema))
        .route("/connect", post(connect))
        .route("/generate", post(generate))
}

// === Request/Response types ===

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct StatusResponse {
    connected: bool,
    database: Option<String>,
    model: String,
    last_sql: Option<String>,
}

#[derive(Serialize)]
struct ConnectResponse {
    message: String,
    database: String,
}

#[derive(Deserialize)]
struct GenerateRequest {
    question: String,
}

#[derive(Serialize)]
struct GenerateResponse {
    sql: String,
    /// Execution output; null when no connection exists or execution failed.
    result: Option<QueryResult>,
    /// Execution failure text; generation itself succeeded.
    execution_error: Option<String>,
}

// === Handlers ===

/// GET /api/health - liveness check with version
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/status - connection and session info
async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let db = state.db.read().await;
    Json(StatusResponse {
        connected: db.is_some(),
        database: db.as_ref().map(|handle| handle.database().to_string()),
        model: state.config.model.clone(),
        last_sql: state.last_sql.read().await.clone(),
    })
}

/// GET /api/schema - current schema text (sentinel when disconnected)
async fn schema(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let db = state.db.read().await;
    db::describe_or_sentinel(db.as_ref())
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))
}

/// POST /api/connect - open a new handle, replacing any previous one
async fn connect(
    State(state): State<Arc<AppState>>,
    Json(params): Json<ConnectionParams>,
) -> Result<Json<ConnectResponse>, (StatusCode, String)> {
    match DbHandle::connect(&params).await {
        Ok(handle) => {
            let database = handle.database().to_string();
            *state.db.write().await = Some(handle);
            Ok(Json(ConnectResponse {
                message: "Connected to database successfully!".to_string(),
                database,
            }))
        }
        Err(e) => {
            // A failed attempt invalidates whatever handle was live before.
            *state.db.write().await = None;
            Err((
                StatusCode::BAD_GATEWAY,
                format!("Failed to connect to database: {e}"),
            ))
        }
    }
}

/// POST /api/generate - question -> schema snapshot -> prompt -> SQL, then
/// execute when a connection exists.
async fn generate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, String)> {
    if payload.question.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "Please enter a question to generate an SQL query.".to_string(),
        ));
    }

    let db = state.db.read().await;

    // One schema snapshot per generation, taken before the completion call.
    let schema = db::describe_or_sentinel(db.as_ref())
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, format!("Error generating SQL: {e}")))?;

    let prompt = build_prompt(&schema, &payload.question);
    let raw = state
        .llm
        .complete(&prompt, &[STOP_SEQUENCE])
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, format!("Error generating SQL: {e}")))?;

    let sql = extract_sql(&raw);
    *state.last_sql.write().await = Some(sql.clone());

    // Execute only when a connection exists; otherwise skip silently.
    let (result, execution_error) = if db.is_some() {
        match db::execute_with(db.as_ref(), &sql).await {
            Ok(result) => (Some(result), None),
            Err(e) => (None, Some(format!("Error running query: {e}"))),
        }
    } else {
        (None, None)
    };

    Ok(Json(GenerateResponse {
        sql,
        result,
        execution_error,
    }))
}
