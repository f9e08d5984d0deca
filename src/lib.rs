//! Salary record service.
//!
//! - [`query`]: salary-range filtering, sorting and pagination
//! - [`ingest`]: CSV bulk ingest with per-row validation and upsert-by-name
//! - [`store`]: the record store trait and an in-memory implementation
//! - [`lock`]: per-name row locks that make each upsert atomic
//! - [`service`]: the facade transports call, plus the axum router
//!   (feature `http`)

pub mod config;
mod error;
pub mod ingest;
pub mod lock;
pub mod query;
pub mod service;
pub mod store;
pub mod telemetry;

pub use config::{ConfigError, ServiceConfig};
pub use error::ValidationError;
pub use ingest::{IngestError, IngestFailure, IngestPipeline, IngestResult, IngestRow};
pub use query::{Page, QueryEngine, QueryParams, QuerySpec, SortKey};
pub use service::{ApiResponse, Listing, RecordService, ServiceError};
pub use store::{InMemoryRecordStore, NewRecord, Record, RecordId, RecordStore, StoreError};
