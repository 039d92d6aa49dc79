//! HTTP server for the blob store endpoints
//!
//! Provides /ping, /health, /upload, /download/{filename}, /delete/{filename}
//! and /all. Request validation (non-empty key, blob size cap) lives here,
//! before anything reaches the tiered store.

use crate::content_type;
use crate::error::AppError;
use crate::types::{HealthResponse, ListResponse};
use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use tiered_blob_store::TieredStore;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state for the HTTP server
pub struct ServerState {
    pub store: TieredStore,
    pub max_blob_size: usize,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(store: TieredStore, max_blob_size: usize) -> Self {
        Self {
            store,
            max_blob_size,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    // Leave headroom above the blob cap for multipart framing.
    let body_limit = state.max_blob_size + 64 * 1024;

    Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/download/{filename}", get(download))
        .route("/delete/{filename}", post(delete))
        .route("/all", get(list_all))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received, draining connections");
}

async fn ping() -> &'static str {
    "pong"
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let cache = state.store.cache_stats().await;
    let uptime_secs = (Utc::now() - state.started_at).num_seconds() as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
        cache,
    })
}

/// Upload a blob as a multipart form; the client filename becomes the key.
async fn upload(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("param error".to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::BadRequest("filename is null".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|_| AppError::BadRequest("param error".to_string()))?;

        if data.len() > state.max_blob_size {
            return Err(AppError::BadRequest(format!(
                "file size exceeds {} bytes",
                state.max_blob_size
            )));
        }

        state.store.create(&filename, data.to_vec()).await?;
        info!(key = %filename, size = data.len(), "Blob stored");
        return Ok(Json(json!({ "code": 0 })));
    }

    Err(AppError::BadRequest("param error".to_string()))
}

/// Download a blob by key
async fn download(
    State(state): State<SharedState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    if filename.is_empty() {
        return Err(AppError::BadRequest("filename is null".to_string()));
    }

    let blob = state
        .store
        .read(&filename)
        .await?
        .ok_or(AppError::NotFound)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        urlencoding::encode(&filename)
    );

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type::from_filename(&filename))
        .header(header::CONTENT_DISPOSITION, disposition)
        .header("Accept-Length", blob.len())
        .header("Filename", filename)
        .body(Body::from(blob.as_ref().clone()))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()))
}

/// Delete a blob from both tiers; deleting an absent key still succeeds.
async fn delete(
    State(state): State<SharedState>,
    Path(filename): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if filename.is_empty() {
        return Err(AppError::BadRequest("filename is null".to_string()));
    }

    state.store.delete(&filename).await?;
    info!(key = %filename, "Blob deleted");
    Ok(Json(json!({ "code": 0 })))
}

/// List all stored keys
async fn list_all(State(state): State<SharedState>) -> Result<Json<ListResponse>, AppError> {
    let files = state.store.list().await?;
    Ok(Json(ListResponse { code: 0, files }))
}
