//! Embedded single-page UI served from `embedded-app/`.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;

use super::AppState;

/// The page and its assets, compiled into the binary so the server works
/// from a bare `cargo install`.
#[derive(Embed)]
#[folder = "../../embedded-app/"]
#[include = "*.html"]
#[include = "*.css"]
#[include = "*.js"]
#[include = "*.svg"]
#[include = "*.ico"]
struct WebAssets;

/// Serve an embedded asset, falling back to the page itself for any path
/// that does not look like a file.
pub async fn static_handler(State(_state): State<Arc<AppState>>, request: Request) -> Response {
    let path = request.uri().path().trim_start_matches('/');

    if let Some(asset) = <WebAssets as Embed>::get(path) {
        return serve(path, asset.data.as_ref());
    }

    if !path.contains('.') {
        if let Some(index) = <WebAssets as Embed>::get("index.html") {
            return serve("index.html", index.data.as_ref());
        }
    }

    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

fn serve(path: &str, data: &[u8]) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime.as_ref())],
        data.to_vec(),
    )
        .into_response()
}
