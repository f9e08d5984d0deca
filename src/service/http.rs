//! HTTP transport for the record service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health` - liveness, `{ "ok": true }`.
//! - `GET /records?min&max&offset&limit|pageSize&sort` - list records.
//! - `POST /records` - create one record from `{ "name", "salary" }`.
//! - `POST /records/upload` - ingest CSV, as multipart field `file` or as
//!   the raw request body.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use salary_records::service::{self, RecordService};
//!
//! let service = Arc::new(RecordService::in_memory());
//! service::serve(service, "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, FromRequest, Multipart, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use crate::lock::LockManager;
use crate::query::QueryParams;
use crate::store::RecordStore;

use super::error::ServiceError;
use super::record_service::RecordService;
use super::response::ApiResponse;

/// Multipart field that carries the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Build an axum `Router` over the given service.
pub fn router<S, L>(service: Arc<RecordService<S, L>>) -> Router
where
    S: RecordStore + 'static,
    L: LockManager + 'static,
{
    let body_limit = service.max_upload_bytes();
    Router::new()
        .route("/health", get(health_handler))
        .route("/records", get(list_handler::<S, L>).post(create_handler::<S, L>))
        .route("/records/upload", post(upload_handler::<S, L>))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(service)
}

/// Serve the service at `addr` until Ctrl-C.
pub async fn serve<S, L>(service: Arc<RecordService<S, L>>, addr: &str) -> Result<(), std::io::Error>
where
    S: RecordStore + 'static,
    L: LockManager + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "records server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

fn respond<T>(result: Result<T, ServiceError>, ok: impl FnOnce(&T) -> ApiResponse) -> ApiResponse {
    match result {
        Ok(value) => ok(&value),
        Err(e) => error_response(e),
    }
}

fn error_response(err: ServiceError) -> ApiResponse {
    if err.status_code() >= 500 {
        tracing::error!(error = %err, "request failed");
    } else {
        tracing::debug!(error = %err, "request rejected");
    }
    ApiResponse::from_error(&err)
}

/// `GET /health`
async fn health_handler() -> ApiResponse {
    ApiResponse::health()
}

/// `GET /records`
async fn list_handler<S, L>(
    State(service): State<Arc<RecordService<S, L>>>,
    Query(params): Query<QueryParams>,
) -> ApiResponse
where
    S: RecordStore + 'static,
    L: LockManager + 'static,
{
    respond(service.list(&params), ApiResponse::listing)
}

/// `POST /records` - the body is parsed here so malformed JSON gets the
/// same error envelope as a validation failure.
async fn create_handler<S, L>(
    State(service): State<Arc<RecordService<S, L>>>,
    body: Bytes,
) -> ApiResponse
where
    S: RecordStore + 'static,
    L: LockManager + 'static,
{
    let result = serde_json::from_slice::<Value>(&body)
        .map_err(|e| ServiceError::BadRequest(format!("invalid JSON body: {e}")))
        .and_then(|input| service.create(&input));
    respond(result, ApiResponse::created)
}

/// `POST /records/upload`
async fn upload_handler<S, L>(
    State(service): State<Arc<RecordService<S, L>>>,
    request: Request,
) -> ApiResponse
where
    S: RecordStore + 'static,
    L: LockManager + 'static,
{
    let payload = match upload_payload(request).await {
        Ok(payload) => payload,
        Err(e) => return error_response(e),
    };

    // Row locks and the store block, so the run goes to the blocking pool.
    let result = tokio::task::spawn_blocking(move || service.ingest_upload(&payload))
        .await
        .unwrap_or_else(|e| Err(ServiceError::Internal(format!("ingest task failed: {e}"))));

    if let Err(ServiceError::Ingest(failure)) = &result {
        tracing::warn!(
            committed = failure.partial.accepted,
            "upload aborted after partial commit"
        );
    }
    respond(result, ApiResponse::ingested)
}

/// Pull the CSV bytes out of a multipart form or a raw body.
async fn upload_payload(request: Request) -> Result<Bytes, ServiceError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    if !is_multipart {
        return Bytes::from_request(request, &())
            .await
            .map_err(|e| ServiceError::BadRequest(e.body_text()));
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| ServiceError::BadRequest(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::BadRequest(e.body_text()))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            return field
                .bytes()
                .await
                .map_err(|e| ServiceError::BadRequest(e.body_text()));
        }
    }

    Err(ServiceError::BadRequest(format!(
        "missing multipart field: {UPLOAD_FIELD}"
    )))
}
