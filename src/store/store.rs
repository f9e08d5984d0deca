//! RecordStore - storage abstraction for salary records.

use crate::query::{Page, QueryPlan};

use super::{NewRecord, Record, RecordId, StoreError};

/// Storage for salary records.
///
/// Every method is individually atomic. Sequences of calls (find then
/// update) are not; callers that need that hold a row lock from
/// [`crate::lock`] around the sequence.
pub trait RecordStore: Send + Sync {
    /// Insert a record under a freshly assigned id.
    fn insert(&self, record: &NewRecord) -> Result<Record, StoreError>;

    /// Get a record by id.
    fn get(&self, id: &RecordId) -> Result<Option<Record>, StoreError>;

    /// Find the first record (in iteration order) whose name equals `name`
    /// exactly. Matching is case-sensitive.
    fn find_by_name(&self, name: &str) -> Result<Option<Record>, StoreError>;

    /// Replace the salary of an existing record. The id and name are kept.
    fn update_salary(&self, id: &RecordId, salary: f64) -> Result<Record, StoreError>;

    /// Run a filter + sort + page plan over the stored records.
    fn query(&self, plan: &QueryPlan) -> Result<Page, StoreError>;

    /// Number of stored records.
    fn count(&self) -> Result<usize, StoreError>;
}
