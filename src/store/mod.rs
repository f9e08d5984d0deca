//! Record store - the sole owner of persisted salary records.
//!
//! The query engine and ingest pipeline talk to storage only through the
//! `RecordStore` trait and never cache records between calls.
//! `InMemoryRecordStore` is the bundled implementation.
//!
//! ## Example
//!
//! ```ignore
//! use salary_records::store::{InMemoryRecordStore, NewRecord, RecordStore};
//!
//! let store = InMemoryRecordStore::new();
//! let jane = store.insert(&NewRecord::new("Jane", 75_000.0))?;
//! store.update_salary(&jane.id, 80_000.0)?;
//! assert_eq!(store.find_by_name("Jane")?.unwrap().salary, 80_000.0);
//! ```

mod in_memory;
mod record;
mod store;

use thiserror::Error;

pub use in_memory::InMemoryRecordStore;
pub use record::{NewRecord, Record, RecordId};
pub use store::RecordStore;

/// Error type for record store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The storage lock was poisoned by a panicking writer.
    #[error("record store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// No record with this id.
    #[error("record not found: {0}")]
    NotFound(RecordId),
    /// Name collation data could not be loaded for a NAME sort.
    #[error("name collation unavailable: {0}")]
    Collation(String),
}
