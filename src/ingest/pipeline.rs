use crate::lock::LockManager;
use crate::store::{NewRecord, Record, RecordStore};

use super::{IngestError, IngestFailure, IngestResult, IngestRow, RowOutcome};

/// Result of a single upsert.
#[derive(Debug, Clone, PartialEq)]
pub enum Upserted {
    Created(Record),
    Updated(Record),
}

impl Upserted {
    pub fn record(&self) -> &Record {
        match self {
            Upserted::Created(record) | Upserted::Updated(record) => record,
        }
    }
}

/// Sequential validate-and-upsert over a row source.
pub struct IngestPipeline<'a, S, L> {
    store: &'a S,
    locks: &'a L,
}

impl<'a, S: RecordStore, L: LockManager> IngestPipeline<'a, S, L> {
    pub fn new(store: &'a S, locks: &'a L) -> Self {
        Self { store, locks }
    }

    /// Consume `rows` in order, upserting each accepted row before pulling
    /// the next one.
    ///
    /// Stops at the first batch-terminating error. Rows upserted before
    /// that point stay committed and are described by the failure's
    /// `partial` result.
    pub fn run<I>(&self, rows: I) -> Result<IngestResult, IngestFailure>
    where
        I: IntoIterator<Item = Result<IngestRow, IngestError>>,
    {
        let mut result = IngestResult::default();

        for row in rows {
            if let Err(error) = self.step(row, &mut result) {
                tracing::warn!(
                    error = %error,
                    committed = result.accepted,
                    "ingest aborted"
                );
                return Err(IngestFailure {
                    error,
                    partial: result,
                });
            }
        }

        tracing::info!(
            accepted = result.accepted,
            rejected = result.rejected,
            created = result.created_names.len(),
            updated = result.updated_names.len(),
            "ingest complete"
        );
        Ok(result)
    }

    fn step(
        &self,
        row: Result<IngestRow, IngestError>,
        result: &mut IngestResult,
    ) -> Result<(), IngestError> {
        match row?.validate()? {
            RowOutcome::Accepted(record) => {
                let upserted = self.upsert(&record)?;
                result.record_upsert(&upserted);
            }
            RowOutcome::Rejected { line, reason } => {
                tracing::warn!(line, reason = %reason, "row skipped");
                result.rejected += 1;
            }
        }
        Ok(())
    }

    /// Update the salary of the record named `record.name`, or insert it.
    ///
    /// Holds the name's row lock across the lookup and the write, so
    /// concurrent upserts of one new name insert it once.
    pub fn upsert(&self, record: &NewRecord) -> Result<Upserted, IngestError> {
        let _guard = self.locks.acquire(&record.name)?;

        let upserted = match self.store.find_by_name(&record.name)? {
            Some(existing) => {
                Upserted::Updated(self.store.update_salary(&existing.id, record.salary)?)
            }
            None => Upserted::Created(self.store.insert(record)?),
        };

        tracing::debug!(
            name = %record.name,
            id = %upserted.record().id,
            created = matches!(upserted, Upserted::Created(_)),
            "upsert"
        );
        Ok(upserted)
    }
}
