//! Ingest pipeline - bulk upsert of salary records from delimited text.
//!
//! Rows are read, validated and upserted one at a time, in order. Each
//! row's upsert completes before the next row is read, so a later row for
//! the same name sees the earlier row's write.
//!
//! ## Row policy
//!
//! - missing or empty `name` / `salary` field: the batch aborts
//! - non-numeric `salary`: the batch aborts
//! - negative `salary`: the row is skipped and counted as rejected
//!
//! ## Failure policy
//!
//! Rows are committed as they are processed. When the batch aborts at row
//! N, rows before N stay in the store. [`IngestFailure`] carries the error
//! together with the partial [`IngestResult`] describing what landed.
//!
//! ```ignore
//! let upload = StagedUpload::stage(bytes, None)?;
//! let rows = upload.rows(b',')?;
//! let result = IngestPipeline::new(&store, &locks).run(rows)?;
//! // `upload` drops here and the staged file is removed
//! ```

mod pipeline;
mod reader;
mod row;
mod staged;

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::lock::LockError;
use crate::store::StoreError;

pub use pipeline::{IngestPipeline, Upserted};
pub use reader::{CsvRows, NAME_COLUMN, SALARY_COLUMN};
pub use row::{IngestRow, RowOutcome};
pub use staged::StagedUpload;

/// Summary of one ingest run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResult {
    /// Rows that were upserted.
    pub accepted: usize,
    /// Rows skipped by a soft rejection.
    pub rejected: usize,
    /// Names inserted by this run.
    pub created_names: BTreeSet<String>,
    /// Names that matched a record existing before this run touched them.
    pub updated_names: BTreeSet<String>,
}

impl IngestResult {
    pub(crate) fn record_upsert(&mut self, upserted: &Upserted) {
        self.accepted += 1;
        match upserted {
            Upserted::Created(record) => {
                self.created_names.insert(record.name.clone());
            }
            Upserted::Updated(record) => {
                // Repeats of a name created earlier in this run stay "created".
                if !self.created_names.contains(&record.name) {
                    self.updated_names.insert(record.name.clone());
                }
            }
        }
    }
}

/// Batch-terminating ingest error.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The header row lacks a required column.
    #[error("header is missing required column: {0}")]
    MissingColumn(&'static str),
    /// A row lacks a required field, or the field is empty.
    #[error("line {line}: missing required field: {field}")]
    MissingField { line: u64, field: &'static str },
    /// A row's salary is not a number.
    #[error("line {line}: salary {value:?} is not a number")]
    InvalidSalary { line: u64, value: String },
    /// The input is not valid delimited text.
    #[error("malformed input: {message}")]
    Malformed { line: Option<u64>, message: String },
    /// Staging or reading the upload failed.
    #[error("upload i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Lock(#[from] LockError),
}

impl IngestError {
    /// True for errors caused by the input itself rather than the service.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            IngestError::MissingColumn(_)
                | IngestError::MissingField { .. }
                | IngestError::InvalidSalary { .. }
                | IngestError::Malformed { .. }
        )
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => IngestError::Io(io),
            _ => IngestError::Malformed { line, message },
        }
    }
}

/// An aborted ingest run.
///
/// `partial` describes the rows that were committed before the abort.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct IngestFailure {
    #[source]
    pub error: IngestError,
    pub partial: IngestResult,
}

impl From<IngestError> for IngestFailure {
    /// A failure before any row was processed.
    fn from(error: IngestError) -> Self {
        IngestFailure {
            error,
            partial: IngestResult::default(),
        }
    }
}
