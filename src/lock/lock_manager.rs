use super::{LockError, LockGuard};

/// Per-key mutual exclusion.
///
/// The ingest pipeline keys locks by record name so every find-then-write
/// on a name is serialized across concurrent runs. A store backed by a
/// database would map this onto row or advisory locks.
pub trait LockManager: Send + Sync {
    /// Block until `key` is free, then mark it held.
    fn lock(&self, key: &str) -> Result<(), LockError>;

    /// Release `key`. Releasing a key that is not held is a no-op.
    fn unlock(&self, key: &str) -> Result<(), LockError>;

    /// Lock `key` and return a guard that unlocks it on drop.
    fn acquire(&self, key: &str) -> Result<LockGuard<'_, Self>, LockError> {
        self.lock(key)?;
        Ok(LockGuard::new(self, key))
    }
}
