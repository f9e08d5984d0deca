//! Row locks - per-name mutual exclusion for read-modify-write sequences.
//!
//! An upsert is a find-by-name followed by either an update or an insert.
//! Two of those racing on the same name could both observe "not found" and
//! both insert. A `LockManager` serializes callers per key (the record
//! name), and callers hold the key for the whole find-then-write sequence.
//!
//! ```ignore
//! use salary_records::lock::{InMemoryLockManager, LockManager};
//!
//! let locks = InMemoryLockManager::new();
//! let _guard = locks.acquire("Jane")?;
//! // find + update/insert for "Jane" happen here
//! // guard drops -> "Jane" released
//! ```

mod error;
mod guard;
mod in_memory;
mod lock_manager;

pub use error::LockError;
pub use guard::LockGuard;
pub use in_memory::InMemoryLockManager;
pub use lock_manager::LockManager;
