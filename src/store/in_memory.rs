//! InMemoryRecordStore - Vec-backed record store for tests and single-node use.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::query::{Page, QueryPlan};

use super::{NewRecord, Record, RecordId, RecordStore, StoreError};

#[derive(Default)]
struct Records {
    /// Insertion order is iteration order.
    rows: Vec<Record>,
    by_id: HashMap<RecordId, usize>,
}

/// In-memory record store.
///
/// Records are kept in insertion order, which is the order an unsorted
/// query returns them in. Clone-friendly via `Arc`; clones share storage.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    storage: Arc<RwLock<Records>>,
}

impl InMemoryRecordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`, in order.
    pub fn with_records(
        records: impl IntoIterator<Item = NewRecord>,
    ) -> Result<Self, StoreError> {
        let store = Self::new();
        for record in records {
            store.insert(&record)?;
        }
        Ok(store)
    }

    /// Snapshot of every record in insertion order.
    pub fn all(&self) -> Result<Vec<Record>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("all"))?;
        Ok(storage.rows.clone())
    }
}

impl RecordStore for InMemoryRecordStore {
    fn insert(&self, record: &NewRecord) -> Result<Record, StoreError> {
        let record = record.clone().into_record();
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("insert"))?;

        let index = storage.rows.len();
        storage.by_id.insert(record.id.clone(), index);
        storage.rows.push(record.clone());
        Ok(record)
    }

    fn get(&self, id: &RecordId) -> Result<Option<Record>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("get"))?;
        Ok(storage
            .by_id
            .get(id)
            .map(|&index| storage.rows[index].clone()))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Record>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("find_by_name"))?;
        Ok(storage.rows.iter().find(|r| r.name == name).cloned())
    }

    fn update_salary(&self, id: &RecordId, salary: f64) -> Result<Record, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("update_salary"))?;

        let index = *storage
            .by_id
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let row = &mut storage.rows[index];
        row.salary = salary;
        Ok(row.clone())
    }

    fn query(&self, plan: &QueryPlan) -> Result<Page, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("query"))?;
        plan.execute(storage.rows.iter())
    }

    fn count(&self) -> Result<usize, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("count"))?;
        Ok(storage.rows.len())
    }
}
