//! Record service - list, create and ingest over a record store.
//!
//! `RecordService` is framework-agnostic; `ApiResponse` turns results into
//! status + JSON envelopes. The `http` feature adds an axum router and a
//! `serve` helper on top.

mod error;
#[cfg(feature = "http")]
mod http;
mod record_service;
mod response;

pub use error::ServiceError;
#[cfg(feature = "http")]
pub use http::{router, serve, UPLOAD_FIELD};
pub use record_service::{Listing, RecordService};
pub use response::ApiResponse;
