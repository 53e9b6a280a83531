//! HTTP server for the sheetsplice API.
//!
//! Provides REST endpoints for merging and splitting uploaded spreadsheets.
//! Outputs are returned directly as downloadable attachments.
//!
//! # API Endpoints
//!
//! | Method | Path           | Description                                 |
//! |--------|----------------|---------------------------------------------|
//! | GET    | `/health`      | Health check                                |
//! | POST   | `/api/merge`   | Merge uploaded files into one workbook      |
//! | POST   | `/api/split`   | Split an uploaded file into a zip of parts  |
//! | POST   | `/api/inspect` | Preview metadata for one uploaded file      |
//! | GET    | `/api/logs`    | SSE stream for real-time progress logs      |

use axum::{
    extract::Multipart,
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::LOG_BROADCASTER;
use super::types::{error_response, InspectResponse};
use crate::codec::read_grid;
use crate::error::PipelineError;
use crate::transform::pipeline::{merge_files, split_file, InputFile};

/// Content type for `.xlsx` attachments.
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Content type for `.zip` attachments.
const ZIP_CONTENT_TYPE: &str = "application/zip";

type ApiError = (StatusCode, Json<Value>);

/// Start the HTTP server
pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    let app = Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/merge", post(merge_upload))
        .route("/api/split", post(split_upload))
        .route("/api/inspect", post(inspect_upload))
        .route("/api/logs", get(sse_logs))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 sheetsplice server running on http://localhost:{}", port);
    println!("   POST /api/merge   - Merge uploaded spreadsheets");
    println!("   POST /api/split   - Split a spreadsheet into parts");
    println!("   POST /api/inspect - Preview an uploaded spreadsheet");
    println!("   GET  /api/logs    - SSE progress stream");
    println!("   GET  /health      - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "sheetsplice",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "merge": "POST /api/merge",
            "split": "POST /api/split",
            "inspect": "POST /api/inspect",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time progress streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Merge endpoint: accepts repeated `files` fields, returns one workbook.
async fn merge_upload(multipart: Multipart) -> Result<Response, ApiError> {
    let (files, _) = read_upload(multipart).await?;
    if files.is_empty() {
        return Err(bad_request("No files provided"));
    }

    println!("\n📄 MERGE: {} files", files.len());

    let output = merge_files(&files).map_err(pipeline_error)?;

    Ok(attachment(&output.file_name, XLSX_CONTENT_TYPE, output.bytes))
}

/// Split endpoint: accepts one `file` field plus a `rows` text field,
/// returns a zip archive of part workbooks.
async fn split_upload(multipart: Multipart) -> Result<Response, ApiError> {
    let (mut files, rows) = read_upload(multipart).await?;

    let input = files.pop().ok_or_else(|| bad_request("No file provided"))?;
    if !files.is_empty() {
        return Err(bad_request("Split accepts exactly one file"));
    }

    let rows_per_part: usize = rows
        .ok_or_else(|| bad_request("Missing 'rows' field"))?
        .trim()
        .parse()
        .map_err(|_| bad_request("'rows' must be a positive integer"))?;
    // The transform rejects 0 as well; checking here gives a 400, not a 500.
    if rows_per_part < 1 {
        return Err(bad_request("'rows' must be at least 1"));
    }

    println!("\n📄 SPLIT: {} ({} rows per part)", input.name, rows_per_part);

    let output = split_file(&input, rows_per_part).map_err(pipeline_error)?;

    Ok(attachment(&output.file_name, ZIP_CONTENT_TYPE, output.bytes))
}

/// Inspect endpoint: parses one uploaded file and returns grid metadata.
async fn inspect_upload(multipart: Multipart) -> Result<Json<InspectResponse>, ApiError> {
    let (mut files, _) = read_upload(multipart).await?;
    let input = files.pop().ok_or_else(|| bad_request("No file provided"))?;

    let grid = read_grid(&input.name, &input.bytes).map_err(pipeline_error)?;

    Ok(Json(InspectResponse::from(&grid)))
}

/// Drain a multipart upload into file parts plus the optional `rows` field.
///
/// File parts may arrive under `file` or repeated `files` names; upload
/// order is preserved.
async fn read_upload(mut multipart: Multipart) -> Result<(Vec<InputFile>, Option<String>), ApiError> {
    let mut files = Vec::new();
    let mut rows = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" | "files" => {
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "upload".to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(&format!("Read error: {}", e)))?;
                files.push(InputFile::new(file_name, bytes.to_vec()));
            }
            "rows" => {
                rows = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| bad_request(&format!("Read error: {}", e)))?,
                );
            }
            _ => {}
        }
    }

    Ok((files, rows))
}

/// Build a downloadable attachment response.
fn attachment(file_name: &str, content_type: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
        .into_response()
}

fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(error_response(message)))
}

/// Map a pipeline failure to an HTTP status.
///
/// Problems with the uploaded content (unreadable bytes, too few rows, bad
/// parameters) are the client's fault; packaging and IO failures are ours.
fn pipeline_error(err: PipelineError) -> ApiError {
    eprintln!("❌ Pipeline error: {}", err);
    let status = match err {
        PipelineError::Decode(_) | PipelineError::Grid(_) | PipelineError::Transform(_) => {
            StatusCode::BAD_REQUEST
        }
        PipelineError::Pack(_) | PipelineError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(error_response(&err.to_string())))
}
