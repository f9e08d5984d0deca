//! Record service - the composition root the transports call into.
//!
//! A `RecordService<S, L>` owns one record store and one lock manager and
//! exposes the three operations the API offers: list, create and ingest.
//! There is no process-wide store; whoever builds the service decides
//! which store it talks to.
//!
//! ## Example
//!
//! ```ignore
//! use salary_records::service::RecordService;
//! use salary_records::query::QueryParams;
//! use serde_json::json;
//!
//! let service = RecordService::in_memory();
//! service.create(&json!({ "name": "Jane", "salary": 3500 }))?;
//! let listing = service.list(&QueryParams::default())?;
//! assert_eq!(listing.total, 1);
//! ```

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use crate::config::ServiceConfig;
use crate::error::ValidationError;
use crate::ingest::{
    IngestError, IngestFailure, IngestPipeline, IngestResult, IngestRow, StagedUpload,
};
use crate::lock::{InMemoryLockManager, LockManager};
use crate::query::{QueryEngine, QueryParams, QueryPlan, QuerySpec};
use crate::store::{InMemoryRecordStore, NewRecord, Record, RecordStore};

use super::error::ServiceError;

/// A page of records plus the paging parameters that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub records: Vec<Record>,
    pub total: usize,
    pub offset: usize,
    pub limit: Option<usize>,
}

/// Salary record operations over a store and a row-lock manager.
pub struct RecordService<S, L = InMemoryLockManager> {
    store: S,
    locks: L,
    max_page_size: Option<usize>,
    max_upload_bytes: usize,
    csv_delimiter: u8,
    upload_dir: Option<PathBuf>,
}

impl RecordService<InMemoryRecordStore, InMemoryLockManager> {
    /// A service over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(InMemoryRecordStore::new(), InMemoryLockManager::new())
    }
}

impl<S: RecordStore, L: LockManager> RecordService<S, L> {
    pub fn new(store: S, locks: L) -> Self {
        let defaults = ServiceConfig::default();
        Self {
            store,
            locks,
            max_page_size: defaults.max_page_size,
            max_upload_bytes: defaults.max_upload_bytes,
            csv_delimiter: defaults.csv_delimiter,
            upload_dir: defaults.upload_dir,
        }
    }

    /// Apply the query and ingest settings from `config`.
    pub fn with_config(mut self, config: &ServiceConfig) -> Self {
        self.max_page_size = config.max_page_size;
        self.max_upload_bytes = config.max_upload_bytes;
        self.csv_delimiter = config.csv_delimiter;
        self.upload_dir = config.upload_dir.clone();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Largest upload body the transports should accept.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Validate raw query parameters and run the query.
    ///
    /// `limit` in the result is the effective page size after any
    /// configured cap.
    pub fn list(&self, params: &QueryParams) -> Result<Listing, ServiceError> {
        let spec = QuerySpec::from_params(params)?;
        self.query(&spec)
    }

    /// Run an already-validated query.
    pub fn query(&self, spec: &QuerySpec) -> Result<Listing, ServiceError> {
        let page = QueryEngine::new(&self.store)
            .with_max_page_size(self.max_page_size)
            .query(spec)?;
        Ok(Listing {
            records: page.records,
            total: page.total,
            offset: spec.offset,
            limit: QueryPlan::new(spec, self.max_page_size).limit,
        })
    }

    /// Validate a JSON body and insert it as a new record.
    ///
    /// Always inserts; creating a name that already exists yields a
    /// second record with its own id.
    pub fn create(&self, input: &Value) -> Result<Record, ServiceError> {
        let new_record = parse_new_record(input)?;
        let record = self.store.insert(&new_record)?;
        tracing::info!(id = %record.id, name = %record.name, "record created");
        Ok(record)
    }

    /// Upsert every row of an iterator. See [`IngestPipeline::run`].
    pub fn ingest<I>(&self, rows: I) -> Result<IngestResult, IngestFailure>
    where
        I: IntoIterator<Item = Result<IngestRow, IngestError>>,
    {
        IngestPipeline::new(&self.store, &self.locks).run(rows)
    }

    /// Stage an uploaded payload, ingest it, and remove the staged copy.
    ///
    /// The copy is removed whether the run succeeds or aborts partway.
    pub fn ingest_upload(&self, bytes: &[u8]) -> Result<IngestResult, ServiceError> {
        let upload =
            StagedUpload::stage(bytes, self.upload_dir.as_deref()).map_err(IngestFailure::from)?;
        let rows = upload
            .rows(self.csv_delimiter)
            .map_err(IngestFailure::from)?;
        Ok(self.ingest(rows)?)
    }
}

/// `{ "name": <non-empty string>, "salary": <number >= 0> }`
fn parse_new_record(input: &Value) -> Result<NewRecord, ValidationError> {
    let name = match input.get("name") {
        None | Some(Value::Null) => return Err(ValidationError::MissingField("name")),
        Some(Value::String(name)) => name.trim(),
        Some(_) => {
            return Err(ValidationError::InvalidField {
                field: "name",
                expected: "a string",
            })
        }
    };
    if name.is_empty() {
        return Err(ValidationError::MissingField("name"));
    }

    let salary = match input.get("salary") {
        None | Some(Value::Null) => return Err(ValidationError::MissingField("salary")),
        Some(Value::Number(n)) => n.as_f64().ok_or(ValidationError::InvalidField {
            field: "salary",
            expected: "a number",
        })?,
        Some(_) => {
            return Err(ValidationError::InvalidField {
                field: "salary",
                expected: "a number",
            })
        }
    };
    if salary < 0.0 {
        return Err(ValidationError::NegativeSalary(salary));
    }

    Ok(NewRecord::new(name, salary))
}
