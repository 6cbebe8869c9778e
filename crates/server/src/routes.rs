use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// Upload cap; bounds the in-memory table the transform builds.
pub const MAX_UPLOAD_SIZE: usize = 16 * 1024 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/upload", post(upload))
        .route("/api/download/{filename}", get(download))
        .route("/api/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct UploadResponse {
    message: String,
    download_filename: String,
    rows: usize,
    dropped: usize,
    excluded: usize,
}

/// Accept a ledger CSV, run the transform, and stash the report for
/// download under a generated name.
async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Failed to read form field: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::bad_request("Failed to read file data"))?;
            file = Some((filename, bytes));
        }
    }

    let (filename, bytes) = file.ok_or_else(|| AppError::bad_request("No file part"))?;
    if filename.is_empty() {
        return Err(AppError::bad_request("No selected file"));
    }
    if !allowed_file(&filename) {
        return Err(AppError::bad_request(
            "Invalid file type. Only CSV files are allowed.",
        ));
    }

    // Key both files by a fresh UUID so concurrent uploads of the same
    // name never collide.
    let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(&filename));
    let download_name = format!("processed_{stored_name}");
    let input_path = state.upload_dir.join(&stored_name);
    let output_path = state.processed_dir.join(&download_name);

    tokio::fs::write(&input_path, &bytes)
        .await
        .map_err(|e| AppError::internal(format!("Failed to store upload: {e}")))?;

    // The report is rendered fully in memory; nothing lands in the
    // processed directory unless the whole transform succeeded.
    let (table, outcome) = tally_import::summarize(bytes.as_ref(), &state.config)?;
    let rendered = tally_import::render_csv(&table, &state.config.labels)?;
    tokio::fs::write(&output_path, rendered)
        .await
        .map_err(|e| AppError::internal(format!("Failed to store report: {e}")))?;

    info!(
        upload = %stored_name,
        rows = outcome.rows,
        dropped = outcome.dropped,
        excluded = outcome.excluded,
        "report generated"
    );

    Ok(Json(UploadResponse {
        message: "File processed successfully".to_string(),
        download_filename: download_name,
        rows: outcome.rows,
        dropped: outcome.dropped,
        excluded: outcome.excluded,
    }))
}

/// Serve a previously generated report as a CSV attachment.
async fn download(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    if filename.contains(['/', '\\']) || filename.contains("..") {
        return Err(AppError::bad_request("Invalid filename"));
    }
    let path = state.processed_dir.join(&filename);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::not_found("File not found"))?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("csv"))
}

/// Flatten a client-supplied filename to a safe basename: path components
/// are dropped and anything outside [A-Za-z0-9._-] becomes '_'.
fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "upload.csv".to_string()
    } else {
        cleaned
    }
}
